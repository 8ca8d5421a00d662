use std::cmp::Ordering;

use serde_json::json;

use crate::{proto, ContentHash, Node, ValidateLinkError};

/// A named, sized reference from one [Node] to another, by the target's
/// [ContentHash].
/// `size` is the size of the whole subtree below the target, as reported by
/// [Node::size] at the time the link was made. It's trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    name: String,
    size: u64,
    hash: ContentHash,
}

impl Link {
    pub fn new(name: impl Into<String>, size: u64, hash: ContentHash) -> Self {
        Self {
            name: name.into(),
            size,
            hash,
        }
    }

    /// Builds a link pointing to `node`, with its current size and hash.
    pub fn for_node(name: impl Into<String>, node: &Node) -> Self {
        Self::new(name, node.size(), node.hash())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Whether both links point to the same node, regardless of name and size.
    pub fn same_target(&self, other: &Link) -> bool {
        self.hash == other.hash
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "Name": self.name,
            "Hash": self.hash.to_string(),
            "Size": self.size,
        })
    }
}

/// The canonical order of links inside a node: ascending by the raw bytes
/// of their names. Sorting with it must be stable, links sharing a name keep
/// their relative order.
pub fn link_order(a: &Link, b: &Link) -> Ordering {
    a.name.as_bytes().cmp(b.name.as_bytes())
}

/// Anything a [Node] can be constructed with: either an already validated
/// [Link], or a raw record as read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkInput {
    Link(Link),
    Record(proto::PbLink),
}

impl From<Link> for LinkInput {
    fn from(value: Link) -> Self {
        LinkInput::Link(value)
    }
}

impl From<proto::PbLink> for LinkInput {
    fn from(value: proto::PbLink) -> Self {
        LinkInput::Record(value)
    }
}

impl TryFrom<LinkInput> for Link {
    type Error = ValidateLinkError;

    fn try_from(value: LinkInput) -> Result<Self, Self::Error> {
        match value {
            LinkInput::Link(link) => Ok(link),
            LinkInput::Record(record) => record.try_into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{link_order, Link, LinkInput};
    use crate::fixtures::{DUMMY_HASH, DUMMY_HASH_2};
    use crate::proto::PbLink;
    use crate::ValidateLinkError;
    use rstest::rstest;
    use std::cmp::Ordering;

    #[rstest]
    #[case::equal("a", "a", Ordering::Equal)]
    #[case::less("a", "b", Ordering::Less)]
    #[case::prefix("a", "aa", Ordering::Less)]
    #[case::empty_first("", "a", Ordering::Less)]
    #[case::uppercase_first("Z", "a", Ordering::Less)]
    /// Raw bytes, not chars: U+00E9 is 0xc3 0xa9, sorting after 'z'.
    #[case::bytewise("é", "z", Ordering::Greater)]
    fn order(#[case] a: &str, #[case] b: &str, #[case] exp: Ordering) {
        assert_eq!(
            exp,
            link_order(
                &Link::new(a, 0, DUMMY_HASH.clone()),
                &Link::new(b, 0, DUMMY_HASH.clone())
            )
        );
    }

    #[test]
    fn same_target() {
        let a = Link::new("a", 1, DUMMY_HASH.clone());
        let b = Link::new("b", 2, DUMMY_HASH.clone());
        let c = Link::new("a", 1, DUMMY_HASH_2.clone());

        assert!(a.same_target(&b));
        assert!(!a.same_target(&c));
    }

    #[test]
    fn from_record() {
        let record = PbLink {
            hash: Some(DUMMY_HASH.clone().into()),
            name: None,
            tsize: None,
        };

        assert_eq!(
            Link::new("", 0, DUMMY_HASH.clone()),
            Link::try_from(LinkInput::from(record)).expect("must succeed")
        );
    }

    #[test]
    fn from_record_without_hash() {
        let record = PbLink {
            hash: None,
            name: Some("foo".to_string()),
            tsize: Some(3),
        };

        assert_eq!(
            Err(ValidateLinkError::MissingHash("foo".to_string())),
            Link::try_from(LinkInput::from(record))
        );
    }

    #[test]
    fn json() {
        let link = Link::new("foo", 42, DUMMY_HASH.clone());
        assert_eq!(
            serde_json::json!({
                "Name": "foo",
                "Hash": DUMMY_HASH.to_string(),
                "Size": 42,
            }),
            link.to_json()
        );
    }
}
