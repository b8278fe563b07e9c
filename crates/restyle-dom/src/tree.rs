//! DOM Tree (arena-based allocation)

use crate::node::{ElementData, Node, NodeData, TextData};
use crate::{Category, DomError, InternedString, NodeId, StringInterner};

/// Arena-based DOM tree
///
/// Index 0 always holds the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            interner: StringInterner::new(),
        }
    }

    /// Root (document) node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree, document node included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds nothing but the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// String interner for tag and attribute names
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Mutable string interner
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Create a detached element; the tag is lower-cased
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(NodeData::Element(ElementData::new(name)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(TextData {
            content: text.to_string(),
        }))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Doctype {
            name: name.to_string(),
        })
    }

    /// Append `child` as the last child of `parent`
    ///
    /// A child that is already linked elsewhere is moved. Appending a node
    /// under itself or one of its descendants is rejected, which keeps the
    /// tree acyclic.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.get(parent).is_none() {
            return Err(DomError::NotFound(parent));
        }
        if self.get(child).is_none() {
            return Err(DomError::NotFound(child));
        }
        // a childless node can only be an ancestor of itself
        let cycle = if self.nodes[child.index()].first_child.is_valid() {
            self.is_inclusive_ancestor(child, parent)
        } else {
            child == parent
        };
        if child == NodeId::ROOT || cycle {
            tracing::trace!(?parent, ?child, "rejected append that would create a cycle");
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(())
    }

    /// Insert `child` as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let first = self.get(parent).ok_or(DomError::NotFound(parent))?.first_child;
        if !first.is_valid() || first == child {
            return self.append_child(parent, child);
        }
        self.append_child(parent, child)?;

        // move from the tail to the head
        self.detach(child);
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = first;
        }
        self.nodes[first.index()].prev_sibling = child;
        self.nodes[parent.index()].first_child = child;
        Ok(())
    }

    /// Unlink a node from its parent and siblings
    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        while node.is_valid() {
            if node == ancestor {
                return true;
            }
            node = self.nodes[node.index()].parent;
        }
        false
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Iterate over all descendants of a node in document order
    ///
    /// The start node itself is not yielded.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).map(|(child, _)| child).collect();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Iterate over every element in document order
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &ElementData)> {
        self.descendants(self.root())
            .filter_map(|(id, node)| node.as_element().map(|e| (id, e)))
    }

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name))
    }

    /// Element category of an element node
    pub fn category(&self, id: NodeId) -> Option<Category> {
        self.tag_name(id).and_then(Category::from_tag)
    }

    /// Read an attribute by name
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Set an attribute, keeping the id/class caches in sync
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let lower = name.to_ascii_lowercase();
        let key = self.interner.intern(&lower);
        let elem = self
            .nodes
            .get_mut(id.index())
            .and_then(Node::as_element_mut)
            .ok_or(DomError::NotFound(id))?;

        match lower.as_str() {
            "id" => elem.id = Some(value.to_string()),
            "class" => {
                elem.classes = value.split_whitespace().map(str::to_string).collect();
            }
            _ => {}
        }
        elem.set_attr(key, value.to_string());
        Ok(())
    }

    /// Remove an attribute, returning the old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let lower = name.to_ascii_lowercase();
        let key = self.interner.lookup(&lower)?;
        let elem = self.nodes.get_mut(id.index())?.as_element_mut()?;
        let old = elem.remove_attr(key)?;
        match lower.as_str() {
            "id" => elem.id = None,
            "class" => elem.classes.clear(),
            _ => {}
        }
        Some(old)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for (_, node) in self.descendants(id) {
            if let Some(text) = node.as_text() {
                out.push_str(text);
            }
        }
        out
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the direct children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over the descendants of a node
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.get(id)?;

        let first = self.stack.len();
        self.stack
            .extend(self.tree.children(id).map(|(child, _)| child));
        self.stack[first..].reverse();

        Some((id, node))
    }
}
