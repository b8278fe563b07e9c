//! Style Applicator
//!
//! Writes a resolved profile onto a skeleton tree. Every element is looked
//! up by category, falling back along [`Category::fallbacks`]; an element
//! with no match simply stays unstyled.

use restyle_css::{StyleProfile, inline_style};
use restyle_dom::{Category, DomError, DomTree, NodeId};

use crate::StyleMode;

/// Style applicator
#[derive(Debug, Clone, Copy)]
pub struct StyleApplicator<'a> {
    profile: &'a StyleProfile,
    mode: StyleMode,
}

impl<'a> StyleApplicator<'a> {
    pub fn new(profile: &'a StyleProfile, mode: StyleMode) -> Self {
        Self { profile, mode }
    }

    /// Style every element of the tree, returning how many got a style
    ///
    /// Any previous `style` attribute is replaced, so applying twice gives
    /// the same tree as applying once.
    pub fn apply(&self, tree: &mut DomTree) -> Result<usize, DomError> {
        let elements: Vec<(NodeId, Option<Category>)> = tree
            .elements()
            .map(|(id, _)| (id, tree.category(id)))
            .collect();

        let mut styled = 0;
        for (id, category) in elements {
            let found = category.and_then(|c| self.profile.lookup(c));
            match found {
                Some((source, properties)) if self.mode.inline() => {
                    if category != Some(source) {
                        tracing::trace!(?category, %source, "styled via fallback");
                    }
                    tree.set_attribute(id, "style", &inline_style(properties))?;
                    styled += 1;
                }
                _ => {
                    tree.remove_attribute(id, "style");
                }
            }
        }

        if self.mode.stylesheet() {
            self.insert_stylesheet(tree)?;
        }

        tracing::debug!(styled, mode = %self.mode, "applied styles");
        Ok(styled)
    }

    /// Leading `<style>` element holding the profile as category rules
    fn insert_stylesheet(&self, tree: &mut DomTree) -> Result<(), DomError> {
        let root = tree.root();
        let existing = tree
            .children(root)
            .find(|(id, _)| tree.tag_name(*id) == Some("style"))
            .map(|(id, _)| id);
        if existing.is_some() || self.profile.is_empty() {
            return Ok(());
        }

        // keep source values from closing the element early
        let css = self.profile.to_css().replace("</", "<\\/");
        let style = tree.create_element("style");
        let text = tree.create_text(&format!("\n{css}"));
        tree.append_child(style, text)?;
        tree.prepend_child(root, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_html::HtmlSerializer;

    fn skeleton() -> DomTree {
        let mut tree = DomTree::new();
        let root = tree.root();
        for tag in ["h4", "p", "ul"] {
            let el = tree.create_element(tag);
            tree.append_child(root, el).unwrap();
            if tag == "ul" {
                let li = tree.create_element("li");
                tree.append_child(el, li).unwrap();
            }
        }
        tree
    }

    fn render(tree: &DomTree) -> String {
        HtmlSerializer::new().serialize_inner(tree, tree.root())
    }

    #[test]
    fn test_fallback_chain() {
        let profile = StyleProfile::new()
            .with(Category::Heading(2), "color", "navy")
            .with(Category::Paragraph, "margin", "0");
        let mut tree = skeleton();

        let styled = StyleApplicator::new(&profile, StyleMode::Inline).apply(&mut tree).unwrap();

        assert_eq!(styled, 3);
        assert_eq!(
            render(&tree),
            r#"<h4 style="color: navy;"></h4><p style="margin: 0;"></p><ul><li style="margin: 0;"></li></ul>"#
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let profile = StyleProfile::new().with(Category::Paragraph, "color", "red");
        let mut tree = skeleton();
        let applicator = StyleApplicator::new(&profile, StyleMode::Both);

        applicator.apply(&mut tree).unwrap();
        let once = render(&tree);
        applicator.apply(&mut tree).unwrap();

        assert_eq!(render(&tree), once);
    }

    #[test]
    fn test_stale_style_removed() {
        let profile = StyleProfile::new();
        let mut tree = skeleton();
        let (p, _) = tree.elements().find(|(id, _)| tree.tag_name(*id) == Some("p")).unwrap();
        tree.set_attribute(p, "style", "color: pink").unwrap();

        StyleApplicator::new(&profile, StyleMode::Inline).apply(&mut tree).unwrap();

        assert_eq!(tree.attribute(p, "style"), None);
    }

    #[test]
    fn test_stylesheet_mode() {
        let profile = StyleProfile::new().with(Category::Paragraph, "color", "red");
        let mut tree = skeleton();

        let styled = StyleApplicator::new(&profile, StyleMode::Stylesheet).apply(&mut tree).unwrap();

        assert_eq!(styled, 0);
        assert!(render(&tree).starts_with("<style>\np { color: red; }\n</style><h4></h4><p></p>"));
    }
}
