//! Dominant Style Resolver
//!
//! Ranks collected declarations per category and property by weighted
//! frequency and keeps the winner.

use std::collections::BTreeMap;

use restyle_dom::Category;
use serde::{Deserialize, Serialize};

use crate::{DeclarationSource, StyleDeclaration, StyleProfile};

/// Per-source weights used when scoring a value
///
/// Only the ordering `inline > id > class > tag` is fixed; the magnitudes
/// are policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub inline: f32,
    pub id: f32,
    pub class: f32,
    pub tag: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            inline: 3.0,
            id: 2.0,
            class: 1.5,
            tag: 1.0,
        }
    }
}

impl ScoringWeights {
    pub fn weight(&self, source: DeclarationSource) -> f32 {
        match source {
            DeclarationSource::Inline => self.inline,
            DeclarationSource::Id => self.id,
            DeclarationSource::Class => self.class,
            DeclarationSource::Tag => self.tag,
        }
    }

    /// Check that all weights are positive and strictly ordered
    pub fn validate(&self) -> Result<(), WeightError> {
        for (name, value) in [
            ("inline", self.inline),
            ("id", self.id),
            ("class", self.class),
            ("tag", self.tag),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(WeightError::NotPositive { name, value });
            }
        }

        for (stronger, weaker) in [
            (("inline", self.inline), ("id", self.id)),
            (("id", self.id), ("class", self.class)),
            (("class", self.class), ("tag", self.tag)),
        ] {
            if stronger.1 <= weaker.1 {
                return Err(WeightError::OutOfOrder {
                    stronger: stronger.0,
                    weaker: weaker.0,
                });
            }
        }
        Ok(())
    }
}

/// Invalid scoring weights
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("Weight `{name}` must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("Weight `{stronger}` must be greater than weight `{weaker}`")]
    OutOfOrder {
        stronger: &'static str,
        weaker: &'static str,
    },
}

/// Accumulated score of one value
#[derive(Debug)]
struct Candidate<'a> {
    value: &'a str,
    score: f32,
}

/// Dominant style resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct DominantStyleResolver {
    weights: ScoringWeights,
}

impl DominantStyleResolver {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Reduce a declaration bag to a profile
    ///
    /// The result depends only on the multiset of declarations and their
    /// observation order, never on the order of the slice.
    pub fn resolve(&self, declarations: &[StyleDeclaration]) -> StyleProfile {
        let mut ordered: Vec<&StyleDeclaration> = declarations.iter().collect();
        ordered.sort_by_key(|d| d.order);

        // Candidates stay in first-observed order.
        let mut groups: BTreeMap<Category, BTreeMap<&str, Vec<Candidate<'_>>>> = BTreeMap::new();
        for decl in ordered {
            if decl.category == Category::Text {
                continue;
            }
            let weight = self.weights.weight(decl.source);
            let candidates = groups
                .entry(decl.category)
                .or_default()
                .entry(decl.property.as_str())
                .or_default();
            match candidates.iter_mut().find(|c| c.value == decl.value) {
                Some(candidate) => candidate.score += weight,
                None => candidates.push(Candidate {
                    value: decl.value.as_str(),
                    score: weight,
                }),
            }
        }

        let mut profile = StyleProfile::new();
        for (category, properties) in groups {
            for (property, candidates) in properties {
                let mut best: Option<&Candidate<'_>> = None;
                for candidate in &candidates {
                    if best.is_none_or(|b| candidate.score > b.score) {
                        best = Some(candidate);
                    }
                }
                if let Some(best) = best {
                    tracing::trace!(%category, property, value = best.value, score = best.score, "dominant value");
                    profile = profile.with(category, property, best.value);
                }
            }
        }

        tracing::debug!(categories = profile.len(), "resolved style profile");
        profile
    }
}
