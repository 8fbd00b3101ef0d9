//! The pattern catalog.
//!
//! An ordered, immutable list of [`HashFamily`] descriptors. Declaration order
//! matters: it breaks ties between families with the same confidence.

mod builtin;

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::family::HashFamily;

/// Errors raised while assembling a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two descriptors share a name.
    #[error("duplicate hash family name: {0}")]
    DuplicateName(&'static str),

    /// Confidence prior outside `[0, 100]`.
    #[error("confidence {confidence} for '{name}' is outside 0-100")]
    InvalidConfidence { name: &'static str, confidence: u8 },

    /// A segmented rule's pattern failed to compile.
    #[error("invalid pattern for prefix '{prefix}': {message}")]
    InvalidPattern {
        prefix: &'static str,
        message: String,
    },
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    builtin::families()
        .and_then(Catalog::new)
        .expect("built-in catalog is valid")
});

/// Immutable, ordered collection of hash families.
#[derive(Debug, Clone)]
pub struct Catalog {
    families: Vec<HashFamily>,
}

impl Catalog {
    /// Build a catalog, checking that names are unique and priors in range.
    pub fn new(families: Vec<HashFamily>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(families.len());
        for family in &families {
            if !seen.insert(family.name) {
                return Err(CatalogError::DuplicateName(family.name));
            }
            if family.confidence > 100 {
                return Err(CatalogError::InvalidConfidence {
                    name: family.name,
                    confidence: family.confidence,
                });
            }
        }
        Ok(Self { families })
    }

    /// The shared built-in catalog, constructed on first use.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashorbit_core::Catalog;
    ///
    /// let catalog = Catalog::builtin();
    /// assert_eq!(catalog.families()[0].name, "BCrypt");
    /// ```
    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// All families in declaration order.
    #[must_use]
    pub fn families(&self) -> &[HashFamily] {
        &self.families
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Look up a family by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HashFamily> {
        self.families
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Distinct fixed lengths, ascending.
    #[must_use]
    pub fn lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self
            .families
            .iter()
            .filter_map(|f| f.length.fixed())
            .collect();
        lengths.sort_unstable();
        lengths.dedup();
        lengths
    }
}
