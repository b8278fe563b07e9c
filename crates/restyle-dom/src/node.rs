//! Tree nodes
//!
//! A node is a payload plus five `NodeId` links into the owning arena.

use crate::{InternedString, NodeId};

#[derive(Debug)]
pub struct Node {
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    /// Detached node; every link starts as `NodeId::NONE`
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.as_element().is_some()
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        if let NodeData::Element(element) = &self.data {
            Some(element)
        } else {
            None
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        if let NodeData::Element(element) = &mut self.data {
            Some(element)
        } else {
            None
        }
    }

    /// Content of a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        if let NodeData::Text(text) = &self.data {
            Some(&text.content)
        } else {
            None
        }
    }
}

/// Node payload
#[derive(Debug)]
pub enum NodeData {
    Document,
    Doctype { name: String },
    Element(ElementData),
    Text(TextData),
    Comment(String),
}

/// An element with its attributes
///
/// `id` and `classes` mirror the `id` and `class` attributes so selector
/// matching never re-splits the class string. `DomTree::set_attribute`
/// keeps them in step.
#[derive(Debug)]
pub struct ElementData {
    /// Lower-case tag name
    pub name: InternedString,
    /// Source order is kept for output
    pub attrs: Vec<Attribute>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl ElementData {
    pub fn new(name: InternedString) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            id: None,
            classes: Vec::new(),
        }
    }

    pub fn get_attr(&self, name: InternedString) -> Option<&str> {
        self.attr_index(name).map(|i| self.attrs[i].value.as_str())
    }

    /// Replace in place, or append a new attribute at the end
    pub fn set_attr(&mut self, name: InternedString, value: String) {
        match self.attr_index(name) {
            Some(i) => self.attrs[i].value = value,
            None => self.attrs.push(Attribute { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: InternedString) -> Option<String> {
        let i = self.attr_index(name)?;
        Some(self.attrs.remove(i).value)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attr_index(&self, name: InternedString) -> Option<usize> {
        self.attrs.iter().position(|attr| attr.name == name)
    }
}

#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: InternedString,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: InternedString = InternedString(1);
    const STYLE: InternedString = InternedString(2);
    const TITLE: InternedString = InternedString(3);

    #[test]
    fn test_set_attr_keeps_position() {
        let mut elem = ElementData::new(P);
        elem.set_attr(STYLE, "color: red".into());
        elem.set_attr(TITLE, "t".into());
        elem.set_attr(STYLE, "color: blue".into());

        assert_eq!(elem.attrs.len(), 2);
        assert_eq!(elem.attrs[0].name, STYLE);
        assert_eq!(elem.get_attr(STYLE), Some("color: blue"));
    }

    #[test]
    fn test_remove_attr() {
        let mut elem = ElementData::new(P);
        elem.set_attr(STYLE, "x".into());

        assert_eq!(elem.remove_attr(STYLE), Some("x".to_string()));
        assert_eq!(elem.remove_attr(STYLE), None);
        assert!(elem.attrs.is_empty());
    }
}
