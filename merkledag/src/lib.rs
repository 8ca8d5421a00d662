//! A content-addressed node type for Merkle DAGs.
//!
//! A [Node] carries an optional byte payload and a list of named, sized
//! [Link]s to other nodes. Its identity is the multihash of its canonical
//! protobuf (DAG-PB) encoding, see [Node::hash].
mod digests;
mod errors;
mod hashing;
mod nodes;

pub mod fixtures;
pub mod proto;

pub use digests::{ContentHash, Error as ContentHashError};
pub use errors::{Error, ValidateLinkError};
pub use hashing::HashAlgo;
pub use nodes::{link_order, Link, LinkInput, Node};
