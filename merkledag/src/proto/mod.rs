//! The DAG-PB wire schema:
//!
//! ```protobuf
//! message PBLink {
//!   optional bytes Hash = 1;
//!   optional string Name = 2;
//!   optional uint64 Tsize = 3;
//! }
//!
//! message PBNode {
//!   repeated PBLink Links = 2;
//!   optional bytes Data = 1;
//! }
//! ```
use bytes::{Buf, BufMut, Bytes};
use prost::encoding::{self, DecodeContext, WireType};
use prost::{DecodeError, Message};

use crate::{Link, Node, ValidateLinkError};

#[cfg(test)]
mod tests;

const LINKS_TAG: u32 = 2;
const DATA_TAG: u32 = 1;

/// A single link record, as it appears on the wire.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct PbLink {
    /// Multihash of the target node.
    #[prost(bytes = "bytes", optional, tag = "1")]
    pub hash: Option<Bytes>,
    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,
    /// Cumulative size of the target.
    #[prost(uint64, optional, tag = "3")]
    pub tsize: Option<u64>,
}

/// A node, as it appears on the wire.
///
/// The [Message] impl is written by hand rather than derived: derived
/// messages write their fields in tag order, while DAG-PB writes `Links`
/// (tag 2) before `Data` (tag 1). Decoding accepts either order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PbNode {
    pub links: Vec<PbLink>,
    pub data: Option<Bytes>,
}

impl Message for PbNode {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        encoding::message::encode_repeated(LINKS_TAG, &self.links, buf);
        if let Some(data) = &self.data {
            encoding::bytes::encode(DATA_TAG, data, buf);
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        match tag {
            DATA_TAG => {
                let data = self.data.get_or_insert_with(Bytes::new);
                encoding::bytes::merge(wire_type, data, buf, ctx)
            }
            LINKS_TAG => encoding::message::merge_repeated(wire_type, &mut self.links, buf, ctx),
            _ => encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        encoding::message::encoded_len_repeated(LINKS_TAG, &self.links)
            + self
                .data
                .as_ref()
                .map_or(0, |data| encoding::bytes::encoded_len(DATA_TAG, data))
    }

    fn clear(&mut self) {
        self.links.clear();
        self.data = None;
    }
}

impl From<&Link> for PbLink {
    fn from(link: &Link) -> Self {
        PbLink {
            hash: Some(link.hash().clone().into()),
            name: Some(link.name().to_owned()),
            tsize: Some(link.size()),
        }
    }
}

impl TryFrom<PbLink> for Link {
    type Error = ValidateLinkError;

    /// An absent name is read as the empty name, an absent size as 0.
    /// A record without a hash doesn't point anywhere and is rejected.
    fn try_from(value: PbLink) -> Result<Self, Self::Error> {
        let name = value.name.unwrap_or_default();
        match value.hash {
            Some(hash) => Ok(Link::new(name, value.tsize.unwrap_or_default(), hash.into())),
            None => Err(ValidateLinkError::MissingHash(name)),
        }
    }
}

impl From<&Node> for PbNode {
    fn from(node: &Node) -> Self {
        PbNode {
            links: node.links().iter().map(PbLink::from).collect(),
            data: node.data().cloned(),
        }
    }
}
