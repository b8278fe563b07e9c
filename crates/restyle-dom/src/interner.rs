//! Tag and attribute name interning
//!
//! Names are stored once per tree and compared as `u32`.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Always resolves to `""`
    pub const EMPTY: InternedString = InternedString(0);
}

/// Names seeded into every tree; these are the ones the style pipeline
/// reads and writes.
const SEEDED: &[&str] = &[
    "", "html", "head", "body", "div", "p", "a", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5",
    "h6", "strong", "b", "em", "i", "code", "pre", "blockquote", "hr", "br", "style", "id",
    "class", "href", "start", "data-lang",
];

#[derive(Debug)]
pub struct StringInterner {
    names: Vec<Box<str>>,
    ids: HashMap<Box<str>, u32>,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut interner = Self {
            names: Vec::with_capacity(SEEDED.len() * 2),
            ids: HashMap::with_capacity(SEEDED.len() * 2),
        };
        for name in SEEDED {
            interner.intern(name);
        }
        interner
    }

    pub fn intern(&mut self, name: &str) -> InternedString {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let id = self.names.len() as u32;
        self.names.push(name.into());
        self.ids.insert(name.into(), id);
        InternedString(id)
    }

    /// Id of an already interned name
    pub fn lookup(&self, name: &str) -> Option<InternedString> {
        self.ids.get(name).copied().map(InternedString)
    }

    /// Unknown ids resolve to `""`
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.names.get(id.0 as usize).map_or("", |name| &**name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
