//! The node type and the links between nodes.
mod link;
mod node;

pub use link::{link_order, Link, LinkInput};
pub use node::Node;
