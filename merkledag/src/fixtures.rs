use crate::{ContentHash, Link, Node};
use bytes::Bytes;
use lazy_static::lazy_static;

pub const HELLO_DATA_CONTENTS: &[u8] = b"hello";

/// The encoding of a node with an empty list of links and a payload of `0x08
/// 0x01`, which is what UnixFS uses for an empty directory.
pub const UNIXFS_EMPTY_DIR_CONTENTS: &[u8] = &[0x0a, 0x02, 0x08, 0x01];

lazy_static! {
    /// A sha2-256 multihash with an all-zero digest.
    pub static ref DUMMY_HASH: ContentHash = {
        let u: &[u8; 34] = &[
            0x12, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        u.as_slice().into()
    };
    pub static ref DUMMY_HASH_2: ContentHash = {
        let u: &[u8; 34] = &[
            0x12, 0x20, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        u.as_slice().into()
    };

    pub static ref EMPTY_NODE: Node = Node::default();
    pub static ref EMPTY_NODE_HASH: ContentHash =
        "QmdfTbBqBPQ7VNxZEYEj14VmRuZBkqFbiwReogJgS1zR1n".parse().unwrap();

    // 7 bytes encoded
    pub static ref HELLO_NODE: Node = Node::new(Some(Bytes::from_static(HELLO_DATA_CONTENTS)), []);
    pub static ref HELLO_NODE_HASH: ContentHash =
        "QmTnaGEpw4totXN7rhv2jPMXKfL8s65PhhCKL5pwtJfRxn".parse().unwrap();

    pub static ref UNIXFS_EMPTY_DIR_HASH: ContentHash =
        "QmUNLLsPACCz1vLxQVkXqqLX5R1X345qqfHbsf67hvA3Nn".parse().unwrap();

    /// "hi", with a link called "a" to [HELLO_NODE].
    pub static ref LINKED_NODE: Node = Node::new(
        Some(Bytes::from_static(b"hi")),
        [Link::for_node("a", &HELLO_NODE)],
    );
    pub static ref LINKED_NODE_HASH: ContentHash =
        "QmU2harTx96ACGfLqiPNdLfene8g4Uxrp991mWGMoM5FPp".parse().unwrap();
}
