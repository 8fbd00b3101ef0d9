//! Core types for Hashorbit.
//!
//! These are the values handed back to callers: how long a family's digests
//! are, how much to trust a match, and what a reversal attempt produced.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Expected character length of a family's encoded digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "chars", rename_all = "kebab-case")]
pub enum DeclaredLength {
    /// Every digest is exactly this many characters.
    Fixed(usize),
    /// Self-describing format; length depends on the embedded parameters.
    Variable,
}

impl DeclaredLength {
    /// The fixed length, if there is one.
    #[must_use]
    pub fn fixed(self) -> Option<usize> {
        match self {
            Self::Fixed(len) => Some(len),
            Self::Variable => None,
        }
    }
}

impl fmt::Display for DeclaredLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(len) => write!(f, "{len}"),
            Self::Variable => f.write_str("variable"),
        }
    }
}

/// Display bucket for a confidence prior.
///
/// Presentation layers color-code and flag candidates by band, so the
/// thresholds live here rather than in each front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceBand {
    /// Below 50.
    Weak,
    /// 50 to 69.
    Low,
    /// 70 to 89.
    Medium,
    /// 90 and above. Shown as "high reliability".
    High,
}

impl ConfidenceBand {
    #[must_use]
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            90..=u8::MAX => Self::High,
            70..=89 => Self::Medium,
            50..=69 => Self::Low,
            _ => Self::Weak,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Weak => "weak",
        }
    }
}

/// Result of a reversal attempt. Always exactly one of these shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "kebab-case")]
pub enum ReversalOutcome {
    /// The lookup service knew a plaintext for the digest.
    Found(String),
    /// The service answered but has no plaintext for the digest.
    NotFound,
    /// No provider handles the matched families, or the attempt failed.
    Unsupported(String),
}

impl ReversalOutcome {
    /// Reason given when none of the candidates has a registered provider.
    pub const NO_SUPPORT: &'static str = "no reversal support for matched families";

    /// Reason given for transport failures, bad responses and timeouts.
    pub const FAILED: &'static str = "reversal attempt failed";

    pub(crate) fn no_support() -> Self {
        Self::Unsupported(Self::NO_SUPPORT.to_string())
    }

    pub(crate) fn failed() -> Self {
        Self::Unsupported(Self::FAILED.to_string())
    }

    /// The recovered plaintext, if any.
    #[must_use]
    pub fn plaintext(&self) -> Option<&str> {
        match self {
            Self::Found(plaintext) => Some(plaintext),
            _ => None,
        }
    }
}
