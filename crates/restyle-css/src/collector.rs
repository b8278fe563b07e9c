//! Style Collector
//!
//! Walks a parsed source tree and emits one [`StyleDeclaration`] per observed
//! property, tagged with the element category it was seen on. Repeats are
//! kept: how often a value shows up is what the resolver ranks by.

use std::collections::BTreeSet;

use restyle_dom::{Category, DomTree};
use serde::Serialize;

use crate::{CssParser, Declaration, Rule, SelectorKind, parse_declarations};

/// Where a declaration was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationSource {
    /// `style` attribute
    Inline,
    /// Stylesheet rule whose subject has an id
    Id,
    /// Stylesheet rule whose subject has a class
    Class,
    /// Stylesheet rule with a bare type selector
    Tag,
}

impl From<SelectorKind> for DeclarationSource {
    fn from(kind: SelectorKind) -> Self {
        match kind {
            SelectorKind::Id => Self::Id,
            SelectorKind::Class => Self::Class,
            SelectorKind::Tag => Self::Tag,
        }
    }
}

/// One property-value pair observed on an element category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub category: Category,
    pub property: String,
    pub value: String,
    pub source: DeclarationSource,
    /// Observation order, increasing in document order
    pub order: usize,
}

/// What the source document carried, for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    /// Elements with a `style` attribute
    pub styled_elements: usize,
    /// Usable rules across all `<style>` blocks
    pub stylesheet_rules: usize,
    /// Distinct class names
    pub classes: BTreeSet<String>,
    /// Distinct ids
    pub ids: BTreeSet<String>,
}

/// Style collector
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleCollector {
    parser: CssParser,
}

impl StyleCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect inline declarations, then stylesheet declarations
    pub fn collect(&self, tree: &DomTree) -> Vec<StyleDeclaration> {
        let mut out = Vec::new();
        self.push_inline(tree, &mut out);
        self.push_stylesheet(tree, &mut out);
        tracing::debug!(declarations = out.len(), "collected source styles");
        out
    }

    /// Declarations from `style` attributes
    pub fn collect_inline(&self, tree: &DomTree) -> Vec<StyleDeclaration> {
        let mut out = Vec::new();
        self.push_inline(tree, &mut out);
        out
    }

    /// Declarations from embedded `<style>` blocks
    pub fn collect_stylesheet(&self, tree: &DomTree) -> Vec<StyleDeclaration> {
        let mut out = Vec::new();
        self.push_stylesheet(tree, &mut out);
        out
    }

    /// Count styled elements, rules, classes and ids in the source
    pub fn summarize(&self, tree: &DomTree) -> SourceSummary {
        let mut summary = SourceSummary::default();
        for (id, elem) in tree.elements() {
            if tree.attribute(id, "style").is_some() {
                summary.styled_elements += 1;
            }
            summary.classes.extend(elem.classes.iter().cloned());
            summary.ids.extend(elem.id.iter().cloned());
        }
        summary.stylesheet_rules = self.stylesheet_rules(tree).len();
        summary
    }

    fn push_inline(&self, tree: &DomTree, out: &mut Vec<StyleDeclaration>) {
        for (id, _) in tree.elements() {
            let Some(style) = tree.attribute(id, "style") else {
                continue;
            };
            let Some(category) = tree.category(id) else {
                tracing::trace!(tag = tree.tag_name(id), "ignoring inline style on uncategorized element");
                continue;
            };
            for decl in parse_declarations(style) {
                push(out, category, decl, DeclarationSource::Inline);
            }
        }
    }

    fn push_stylesheet(&self, tree: &DomTree, out: &mut Vec<StyleDeclaration>) {
        for rule in self.stylesheet_rules(tree) {
            for selector in &rule.selectors {
                let source = DeclarationSource::from(selector.kind());

                if let Some(tag) = selector.tag_only() {
                    match Category::from_tag(tag) {
                        Some(category) => {
                            for decl in &rule.declarations {
                                push(out, category, decl.clone(), source);
                            }
                        }
                        None => {
                            tracing::trace!(selector = %selector.text, "dropping rule for uncategorized tag");
                        }
                    }
                    continue;
                }

                let mut matched = 0;
                for (id, elem) in tree.elements() {
                    let tag = tree.resolve(elem.name);
                    if !selector.matches(tag, elem) {
                        continue;
                    }
                    let Some(category) = tree.category(id) else {
                        continue;
                    };
                    matched += 1;
                    for decl in &rule.declarations {
                        push(out, category, decl.clone(), source);
                    }
                }
                if matched == 0 {
                    tracing::debug!(selector = %selector.text, "dropping rule with no matching elements");
                }
            }
        }
    }

    /// Rules of every `<style>` element, in document order
    fn stylesheet_rules(&self, tree: &DomTree) -> Vec<Rule> {
        tree.elements()
            .filter(|(id, _)| tree.tag_name(*id) == Some("style"))
            .flat_map(|(id, _)| self.parser.parse(&tree.text_content(id)).rules)
            .collect()
    }
}

fn push(out: &mut Vec<StyleDeclaration>, category: Category, decl: Declaration, source: DeclarationSource) {
    let order = out.len();
    out.push(StyleDeclaration {
        category,
        property: decl.property,
        value: decl.value,
        source,
        order,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_html::{HtmlParser, Parser};

    fn tree(html: &str) -> DomTree {
        HtmlParser::new().parse(html).unwrap()
    }

    #[test]
    fn test_collect_inline() {
        let tree = tree(r#"<p style="color: red; margin: 0">a</p><h2 style="color: blue">b</h2>"#);

        let decls = StyleCollector::new().collect_inline(&tree);
        let seen: Vec<_> = decls
            .iter()
            .map(|d| (d.category, d.property.as_str(), d.value.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                (Category::Paragraph, "color", "red"),
                (Category::Paragraph, "margin", "0"),
                (Category::Heading(2), "color", "blue"),
            ]
        );
        assert!(decls.iter().all(|d| d.source == DeclarationSource::Inline));
    }

    #[test]
    fn test_tag_selector_maps_directly() {
        let tree = tree("<style>h3 { color: navy }</style><p>no headings here</p>");

        let decls = StyleCollector::new().collect_stylesheet(&tree);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].category, Category::Heading(3));
        assert_eq!(decls[0].source, DeclarationSource::Tag);
    }

    #[test]
    fn test_class_selector_attributed_per_element() {
        let html = r#"
            <style>.note { color: gray } #top { font-size: 20px } .missing { color: red }</style>
            <p class="note">a</p><li class="note">b</li><p class="note">c</p>
            <h1 id="top">t</h1>
        "#;
        let decls = StyleCollector::new().collect_stylesheet(&tree(html));

        let seen: Vec<_> = decls.iter().map(|d| (d.category, d.source)).collect();
        assert_eq!(
            seen,
            vec![
                (Category::Paragraph, DeclarationSource::Class),
                (Category::ListItem, DeclarationSource::Class),
                (Category::Paragraph, DeclarationSource::Class),
                (Category::Heading(1), DeclarationSource::Id),
            ]
        );
    }

    #[test]
    fn test_order_continues_across_sources() {
        let tree = tree(r#"<style>p { margin: 0 }</style><p style="color: red">x</p>"#);

        let decls = StyleCollector::new().collect(&tree);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].source, DeclarationSource::Inline);
        assert_eq!(decls[1].source, DeclarationSource::Tag);
        assert_eq!(decls.iter().map(|d| d.order).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_summarize() {
        let html = r#"
            <style>p { color: red } div { }</style>
            <div id="main" class="wrap"><p class="a b" style="x: y">t</p><p class="a">u</p></div>
        "#;
        let summary = StyleCollector::new().summarize(&tree(html));

        assert_eq!(summary.styled_elements, 1);
        assert_eq!(summary.stylesheet_rules, 1);
        assert_eq!(summary.classes.len(), 3);
        assert!(summary.ids.contains("main"));
    }
}
