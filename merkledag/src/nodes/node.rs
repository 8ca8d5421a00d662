use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::sync::OnceLock;

use bstr::ByteSlice;
use bytes::Bytes;
use data_encoding::BASE64;
use prost::Message;
use serde_json::json;
use tracing::{debug, instrument, warn};

use super::link::{link_order, Link, LinkInput};
use crate::{proto, ContentHash, Error, HashAlgo};

/// A node in a Merkle DAG: an optional payload, and a list of [Link]s to
/// other nodes, kept sorted by [link_order].
///
/// The identity of a node ([Node::hash]) is the multihash of its canonical
/// DAG-PB encoding ([Node::serialize]). It's computed on first use and
/// cached until the next mutation. Payload and links can only be changed
/// through the methods below, all of which drop the cached hash.
///
/// Zero-length payloads are treated as absent. Both encode without a `Data`
/// field, and decoding yields an absent payload in either case.
#[derive(Default)]
pub struct Node {
    data: Option<Bytes>,
    links: Vec<Link>,
    hash_algo: HashAlgo,

    /// The cached [Node::hash]. Empty while dirty.
    hash: OnceLock<ContentHash>,
}

impl Node {
    /// Constructs a node from a payload and an initial set of links, in any
    /// order.
    pub fn new(data: Option<Bytes>, links: impl IntoIterator<Item = Link>) -> Self {
        let mut links: Vec<Link> = links.into_iter().collect();
        links.sort_by(link_order);

        Self {
            data: data.filter(|data| !data.is_empty()),
            links,
            hash_algo: HashAlgo::default(),
            hash: OnceLock::new(),
        }
    }

    /// Like [Node::new], but also accepts raw link records, which are
    /// validated first.
    /// Fails if a record has no hash.
    pub fn try_new<I>(data: Option<Bytes>, links: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<LinkInput>,
    {
        let links = links
            .into_iter()
            .map(|input| {
                let input: LinkInput = input.into();
                Link::try_from(input)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(data, links))
    }

    /// Decodes a node from its canonical encoding.
    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        Self::decode_with(buf, HashAlgo::default())
    }

    /// Decodes a node from its canonical encoding, deriving its identity with
    /// `hash_algo`.
    pub fn decode_with(buf: &[u8], hash_algo: HashAlgo) -> Result<Self, Error> {
        let mut node = Self::default().with_hash_algo(hash_algo);
        node.deserialize(buf)?;
        Ok(node)
    }

    /// Sets the hash function used to derive the identity of this node.
    pub fn with_hash_algo(mut self, hash_algo: HashAlgo) -> Self {
        self.hash_algo = hash_algo;
        self.invalidate();
        self
    }

    pub fn hash_algo(&self) -> HashAlgo {
        self.hash_algo
    }

    /// The payload, if there is one. Never empty.
    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    /// The links of this node, sorted by [link_order].
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Adds a link called `name` pointing to `target`.
    /// Other links with the same name are kept.
    pub fn add_link(&mut self, name: impl Into<String>, target: &Node) {
        self.add_raw_link(Link::for_node(name, target))
    }

    /// Adds an already constructed link.
    /// Other links with the same name are kept, the new one is sorted after
    /// them.
    pub fn add_raw_link(&mut self, link: Link) {
        self.links.push(link);
        self.links.sort_by(link_order);
        self.invalidate();
    }

    /// Returns a copy of this node, with all links called `name` replaced by
    /// a single link to `target`. `self` is left untouched.
    pub fn update_link(&self, name: &str, target: &Node) -> Node {
        let mut node = self.clone();
        node.remove_link_by_name(name);
        node.add_link(name, target);
        node
    }

    /// Removes all links called `name`.
    pub fn remove_link_by_name(&mut self, name: &str) {
        self.links.retain(|link| link.name() != name);
        self.invalidate();
    }

    /// Removes all links pointing to `hash`.
    pub fn remove_link_by_hash(&mut self, hash: impl AsRef<[u8]>) {
        let hash = hash.as_ref();
        self.links.retain(|link| link.hash().as_slice() != hash);
        self.invalidate();
    }

    /// Returns the canonical DAG-PB encoding of this node.
    pub fn serialize(&self) -> Bytes {
        proto::PbNode::from(self).encode_to_vec().into()
    }

    /// The length of [Node::serialize], without producing it.
    pub fn encoded_len(&self) -> usize {
        proto::PbNode::from(self).encoded_len()
    }

    /// Replaces payload and links with the ones decoded from `buf`.
    /// On error, `self` is left untouched.
    #[instrument(skip_all, fields(buf.len = buf.len()), err)]
    pub fn deserialize(&mut self, buf: &[u8]) -> Result<(), Error> {
        let pb_node = proto::PbNode::decode(buf)
            .map_err(|e| Error::MalformedEncoding(format!("PBNode: {}", e)))?;

        let mut links = pb_node
            .links
            .into_iter()
            .map(Link::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::MalformedEncoding(e.to_string()))?;

        if links
            .windows(2)
            .any(|w| link_order(&w[0], &w[1]) == Ordering::Greater)
        {
            warn!("links not in canonical order, sorting");
            links.sort_by(link_order);
        }

        if pb_node.data.as_ref().is_some_and(|data| data.is_empty()) {
            warn!("zero-length Data field, treating as absent");
        }

        self.data = pb_node.data.filter(|data| !data.is_empty());
        self.links = links;
        self.invalidate();

        Ok(())
    }

    /// The size of a node is the length of its own encoding, plus the sizes
    /// of everything it links to, as recorded in the links.
    /// Link sizes are taken as-is, so the sum may not fit: it saturates at
    /// [u64::MAX] then, on every path. See [Node::size_checked].
    pub fn size(&self) -> u64 {
        self.size_checked().unwrap_or(u64::MAX)
    }

    /// Like [Node::size], but returns [None] on overflow.
    pub fn size_checked(&self) -> Option<u64> {
        checked_sum(
            std::iter::once(self.encoded_len() as u64).chain(self.links.iter().map(Link::size)),
        )
    }

    /// Returns the identity of this node, the multihash of [Node::serialize].
    pub fn hash(&self) -> ContentHash {
        self.hash.get_or_init(|| self.compute_hash()).clone()
    }

    #[instrument(level = "trace", skip_all, fields(node.links = self.links.len()))]
    fn compute_hash(&self) -> ContentHash {
        let hash = self.hash_algo.digest(&self.serialize());
        debug!(node.hash = %hash, hash_algo = %self.hash_algo, "computed node hash");
        hash
    }

    /// Whether [Node::hash] would be served from the cache.
    #[cfg(test)]
    pub(crate) fn hash_is_cached(&self) -> bool {
        self.hash.get().is_some()
    }

    fn invalidate(&mut self) {
        self.hash.take();
    }

    /// A JSON view of this node, for display purposes:
    /// the payload (base64), the links, the hash and the size.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "Data": self.data.as_ref().map(|data| BASE64.encode(data)),
            "Links": self.links.iter().map(Link::to_json).collect::<Vec<_>>(),
            "Hash": self.hash().to_string(),
            "Size": self.size(),
        })
    }
}

fn checked_sum(iter: impl IntoIterator<Item = u64>) -> Option<u64> {
    iter.into_iter().try_fold(0u64, |acc, i| acc.checked_add(i))
}

/// Copies share payload and links, but not the cached hash.
impl Clone for Node {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            links: self.links.clone(),
            hash_algo: self.hash_algo,
            hash: OnceLock::new(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.links == other.links && self.hash_algo == other.hash_algo
    }
}

impl Eq for Node {}

impl Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("data", &self.data.as_deref().map(|data| data.as_bstr()))
            .field("links", &self.links)
            .field("hash_algo", &self.hash_algo)
            .finish()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Node <{} - data: \"{}\", links: {}, size: {}>",
            self.hash(),
            self.data.as_deref().unwrap_or_default().as_bstr(),
            self.links.len(),
            self.size()
        )
    }
}
