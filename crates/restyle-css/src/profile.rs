//! Style profile
//!
//! The resolved category → dominant declarations map for one request.

use std::collections::BTreeMap;
use std::fmt::Write;

use restyle_dom::Category;

/// Property-value pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StyleProperty {
    pub name: String,
    pub value: String,
}

/// Dominant declarations per element category
///
/// Properties within a category are unique and sorted by name. A profile is
/// built once by the resolver and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProfile {
    entries: BTreeMap<Category, Vec<StyleProperty>>,
}

impl StyleProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a property
    pub fn with(mut self, category: Category, property: &str, value: &str) -> Self {
        let properties = self.entries.entry(category).or_default();
        match properties.binary_search_by(|p| p.name.as_str().cmp(property)) {
            Ok(index) => properties[index].value = value.to_string(),
            Err(index) => properties.insert(
                index,
                StyleProperty {
                    name: property.to_string(),
                    value: value.to_string(),
                },
            ),
        }
        self
    }

    /// Properties recorded for exactly this category
    pub fn get(&self, category: Category) -> Option<&[StyleProperty]> {
        self.entries.get(&category).map(Vec::as_slice)
    }

    /// Value of one property for exactly this category
    pub fn value(&self, category: Category, property: &str) -> Option<&str> {
        self.get(category)?
            .iter()
            .find(|p| p.name == property)
            .map(|p| p.value.as_str())
    }

    /// Properties for a category, walking its fallback chain
    ///
    /// Returns the category the properties were found under.
    pub fn lookup(&self, category: Category) -> Option<(Category, &[StyleProperty])> {
        std::iter::once(category)
            .chain(category.fallbacks().iter().copied())
            .find_map(|candidate| self.get(candidate).map(|props| (candidate, props)))
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[StyleProperty])> {
        self.entries.iter().map(|(c, props)| (*c, props.as_slice()))
    }

    /// Render the profile as stylesheet rules, one per category
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (category, properties) in self.iter() {
            if category == Category::Text {
                continue;
            }
            let _ = write!(css, "{} {{", category.tag());
            for prop in properties {
                let _ = write!(css, " {}: {};", prop.name, prop.value);
            }
            css.push_str(" }\n");
        }
        css
    }
}

/// Serialize properties as a `style` attribute value
pub fn inline_style(properties: &[StyleProperty]) -> String {
    let mut style = String::new();
    for prop in properties {
        let _ = write!(style, "{}: {};", prop.name, prop.value);
    }
    style
}
