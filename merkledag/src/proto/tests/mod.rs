use crate::fixtures::{HELLO_NODE_HASH, UNIXFS_EMPTY_DIR_CONTENTS};
use crate::proto::{PbLink, PbNode};

use bytes::Bytes;
use hex_literal::hex;
use prost::Message;

#[test]
fn encode_empty() {
    assert!(PbNode::default().encode_to_vec().is_empty());
}

#[test]
fn encode_data_only() {
    let n = PbNode {
        links: vec![],
        data: Some(Bytes::from_static(b"hello")),
    };

    assert_eq!(hex!("0a0568656c6c6f").as_slice(), n.encode_to_vec());
    assert_eq!(7, n.encoded_len());
}

/// Links (tag 2) are written before Data (tag 1).
#[test]
fn encode_links_before_data() {
    let n = PbNode {
        links: vec![PbLink {
            hash: Some(HELLO_NODE_HASH.clone().into()),
            name: Some("a".to_string()),
            tsize: Some(7),
        }],
        data: Some(Bytes::from_static(b"hi")),
    };

    let expected = hex!(
        "12290a22122050ee8231ac5be6b674d35e806db2900dd4048450d29a8598559a9c0d088cc7e3"
        "12016118070a026869"
    );
    assert_eq!(expected.as_slice(), n.encode_to_vec());
    assert_eq!(expected.len(), n.encoded_len());
}

#[test]
fn encode_empty_name() {
    let l = PbLink {
        hash: Some(Bytes::from_static(&[0x01])),
        name: Some(String::new()),
        tsize: Some(0),
    };

    // the empty name and zero size are still written out
    assert_eq!(hex!("0a0101120018 00").as_slice(), l.encode_to_vec());
    assert_eq!(7, l.encoded_len());
}

#[test]
fn decode_data_before_links() {
    let buf = hex!(
        "0a026869"
        "12290a22122050ee8231ac5be6b674d35e806db2900dd4048450d29a8598559a9c0d088cc7e3"
        "12016118 07"
    );

    let n = PbNode::decode(buf.as_slice()).expect("must decode");
    assert_eq!(Some(Bytes::from_static(b"hi")), n.data);
    assert_eq!(1, n.links.len());
    assert_eq!(Some("a"), n.links[0].name.as_deref());
    assert_eq!(Some(7), n.links[0].tsize);
}

#[test]
fn decode_unixfs_empty_dir() {
    let n = PbNode::decode(UNIXFS_EMPTY_DIR_CONTENTS).expect("must decode");
    assert_eq!(Some(Bytes::from_static(&[0x08, 0x01])), n.data);
    assert!(n.links.is_empty());
}

#[test]
fn decode_skips_unknown_fields() {
    // field 5, varint 1, then Data
    let n = PbNode::decode(hex!("2801 0a0101").as_slice()).expect("must decode");
    assert_eq!(Some(Bytes::from_static(&[0x01])), n.data);
}

#[test]
fn decode_truncated() {
    // Data claims 5 bytes, only 1 follows
    assert!(PbNode::decode(hex!("0a0568").as_slice()).is_err());
}

#[test]
fn decode_wrong_wire_type() {
    // Data as a varint
    assert!(PbNode::decode(hex!("0801").as_slice()).is_err());
}

#[test]
fn decode_invalid_name() {
    // link name is not valid UTF-8
    assert!(PbNode::decode(hex!("1203 1201ff").as_slice()).is_err());
}
