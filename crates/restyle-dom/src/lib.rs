//! restyle DOM - Element tree
//!
//! Arena-backed element tree shared by the HTML parser, the style collector
//! and the skeleton renderer. Nodes are addressed by [`NodeId`] and linked
//! through parent/sibling indices, so a tree can never hold a node twice.

mod category;
mod interner;
mod node;
mod tree;

pub use category::Category;
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tree manipulation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    #[error("Hierarchy request error: cannot append {child:?} under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
