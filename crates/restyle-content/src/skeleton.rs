//! Skeleton tree
//!
//! Unstyled element tree built from rendered blocks. Block elements hang
//! directly off the document node.

use restyle_dom::{Category, DomError, DomTree, NodeId};

use crate::ContentBlock;

/// Build an element tree from blocks, in order
pub fn build(blocks: &[ContentBlock]) -> Result<DomTree, DomError> {
    let mut tree = DomTree::new();
    let root = tree.root();

    let mut stack: Vec<(&ContentBlock, NodeId)> = blocks.iter().rev().map(|b| (b, root)).collect();
    while let Some((block, parent)) = stack.pop() {
        if block.category == Category::Text {
            let text = tree.create_text(&block.text);
            tree.append_child(parent, text)?;
            continue;
        }

        let node = tree.create_element(block.category.tag());
        for (name, value) in &block.attributes {
            tree.set_attribute(node, name, value)?;
        }
        tree.append_child(parent, node)?;

        if !block.text.is_empty() && !block.category.is_void() {
            let text = tree.create_text(&block.text);
            tree.append_child(node, text)?;
        }
        stack.extend(block.children.iter().rev().map(|child| (child, node)));
    }

    tracing::trace!(nodes = tree.len(), "built skeleton tree");
    Ok(tree)
}
