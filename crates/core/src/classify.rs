//! Classification of an input against a catalog.

use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::family::HashFamily;

/// Families whose rule accepted an input, ranked by confidence.
///
/// Holds references into the catalog, not copies. Equal confidences keep
/// their catalog declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    input: String,
    candidates: Vec<&'a HashFamily>,
}

impl<'a> Classification<'a> {
    /// The trimmed input that was classified.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn candidates(&self) -> &[&'a HashFamily] {
        &self.candidates
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a HashFamily> + '_ {
        self.candidates.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// More than one family fits; callers must not assume uniqueness.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }

    /// The highest-ranked candidate.
    #[must_use]
    pub fn top(&self) -> Option<&'a HashFamily> {
        self.candidates.first().copied()
    }

    /// Whether a candidate is called `name` (ASCII case-insensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.candidates
            .iter()
            .any(|f| f.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.candidates.iter().map(|f| f.name).collect()
    }

    /// Drop candidates below `min_confidence`, keeping the order.
    #[must_use]
    pub fn at_least(mut self, min_confidence: u8) -> Self {
        self.candidates.retain(|f| f.confidence >= min_confidence);
        self
    }

    /// Keep only the candidate called `name` (ASCII case-insensitive).
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.candidates.retain(|f| f.name.eq_ignore_ascii_case(name));
        self
    }
}

impl<'a> IntoIterator for Classification<'a> {
    type Item = &'a HashFamily;
    type IntoIter = std::vec::IntoIter<&'a HashFamily>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

impl<'a, 'b> IntoIterator for &'b Classification<'a> {
    type Item = &'a HashFamily;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a HashFamily>>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter().copied()
    }
}

impl Catalog {
    /// Evaluate `input` against every family in this catalog.
    ///
    /// Whitespace around the input is ignored. Blank input yields an empty
    /// classification rather than an error.
    #[must_use]
    pub fn classify(&self, input: &str) -> Classification<'_> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            trace!("blank input, nothing to classify");
            return Classification {
                input: String::new(),
                candidates: Vec::new(),
            };
        }

        let mut candidates: Vec<&HashFamily> = self
            .families()
            .iter()
            .filter(|family| family.matches(trimmed))
            .collect();

        // sort_by is stable, so ties keep catalog order
        candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));

        debug!(
            len = trimmed.len(),
            matches = candidates.len(),
            top = candidates.first().map(|f| f.name),
            "classified input"
        );

        Classification {
            input: trimmed.to_string(),
            candidates,
        }
    }
}

/// Classify `input` against the built-in catalog.
///
/// # Examples
///
/// ```
/// let result = hashorbit_core::classify("5d41402abc4b2a76b9719d911017c592");
///
/// assert_eq!(result.top().unwrap().name, "MD5");
/// assert!(result.contains("NTLM"));
/// assert!(result.is_ambiguous());
/// ```
#[must_use]
pub fn classify(input: &str) -> Classification<'static> {
    Catalog::builtin().classify(input)
}
