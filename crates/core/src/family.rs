//! Hash family descriptors and their structural match rules.

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::catalog::CatalogError;
use crate::types::{ConfidenceBand, DeclaredLength};

/// Character sets a fixed-length rule can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Charset {
    /// `0-9a-fA-F`
    Hex,
    /// Standard base64 alphabet with optional `=` padding.
    Base64,
    /// The `./A-Za-z0-9` alphabet used by crypt(3)-style formats.
    CryptBase64,
    /// `A-Za-z0-9`
    Alphanumeric,
}

impl Charset {
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Hex => c.is_ascii_hexdigit(),
            Self::Base64 => c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='),
            Self::CryptBase64 => c.is_ascii_alphanumeric() || matches!(c, '.' | '/'),
            Self::Alphanumeric => c.is_ascii_alphanumeric(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::CryptBase64 => "crypt-base64",
            Self::Alphanumeric => "alphanumeric",
        }
    }
}

/// Structural predicate a family uses to accept or reject an input.
///
/// Inputs reaching a rule are already trimmed.
#[derive(Debug, Clone)]
pub enum MatchRule {
    /// Exactly `len` hex digits, either case.
    Hex { len: usize },
    /// Exactly `len` characters drawn from `charset`.
    Charset { len: usize, charset: Charset },
    /// Self-describing `$`-delimited format. `prefix` must open the input
    /// verbatim (case-sensitive) and `pattern` must match the whole input.
    Segmented { prefix: &'static str, pattern: Regex },
}

impl MatchRule {
    /// Build a segmented rule, compiling `pattern`.
    ///
    /// The pattern always has to match the whole input.
    pub fn segmented(prefix: &'static str, pattern: &str) -> Result<Self, CatalogError> {
        let anchored = format!("^(?:{pattern})$");
        let pattern = Regex::new(&anchored).map_err(|e| CatalogError::InvalidPattern {
            prefix,
            message: e.to_string(),
        })?;
        Ok(Self::Segmented { prefix, pattern })
    }

    /// Test a trimmed input against this rule.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::Hex { len } => input.len() == *len && input.bytes().all(|b| b.is_ascii_hexdigit()),
            Self::Charset { len, charset } => {
                input.chars().count() == *len && input.chars().all(|c| charset.contains(c))
            }
            Self::Segmented { prefix, pattern } => {
                input.starts_with(prefix) && pattern.is_match(input)
            }
        }
    }

    /// Length implied by the rule alone.
    #[must_use]
    pub fn implied_length(&self) -> DeclaredLength {
        match self {
            Self::Hex { len } | Self::Charset { len, .. } => DeclaredLength::Fixed(*len),
            Self::Segmented { .. } => DeclaredLength::Variable,
        }
    }

    /// Short human-readable summary, e.g. `hex{32}` or `prefix "$2"`.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Hex { len } => format!("hex{{{len}}}"),
            Self::Charset { len, charset } => format!("{}{{{len}}}", charset.name()),
            Self::Segmented { prefix, .. } => format!("prefix \"{prefix}\""),
        }
    }
}

impl PartialEq for MatchRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Hex { len: a }, Self::Hex { len: b }) => a == b,
            (
                Self::Charset { len: a, charset: ca },
                Self::Charset { len: b, charset: cb },
            ) => a == b && ca == cb,
            (
                Self::Segmented { prefix: pa, pattern: ra },
                Self::Segmented { prefix: pb, pattern: rb },
            ) => pa == pb && ra.as_str() == rb.as_str(),
            _ => false,
        }
    }
}

impl Eq for MatchRule {}

fn serialize_rule<S: Serializer>(rule: &MatchRule, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&rule.summary())
}

fn no_markers(markers: &&'static [&'static str]) -> bool {
    markers.is_empty()
}

/// Descriptor of one hash algorithm family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashFamily {
    /// Unique human-readable name (e.g. "SHA-256").
    pub name: &'static str,
    #[serde(serialize_with = "serialize_rule")]
    pub rule: MatchRule,
    pub length: DeclaredLength,
    pub description: &'static str,
    /// Static prior in `[0, 100]`, not derived from the input.
    pub confidence: u8,
    /// Notes that help a human tell this family apart from look-alikes.
    #[serde(skip_serializing_if = "no_markers")]
    pub markers: &'static [&'static str],
}

impl HashFamily {
    /// New descriptor with the length implied by `rule` and no markers.
    #[must_use]
    pub fn new(
        name: &'static str,
        rule: MatchRule,
        description: &'static str,
        confidence: u8,
    ) -> Self {
        Self {
            name,
            length: rule.implied_length(),
            rule,
            description,
            confidence,
            markers: &[],
        }
    }

    /// Shorthand for a fixed-length hex family.
    #[must_use]
    pub fn hex(name: &'static str, len: usize, description: &'static str, confidence: u8) -> Self {
        Self::new(name, MatchRule::Hex { len }, description, confidence)
    }

    #[must_use]
    pub fn with_markers(mut self, markers: &'static [&'static str]) -> Self {
        self.markers = markers;
        self
    }

    /// Override the declared length (e.g. a segmented format whose
    /// instances are always the same size).
    #[must_use]
    pub fn with_length(mut self, length: DeclaredLength) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        self.rule.matches(input)
    }

    #[must_use]
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rule_is_case_insensitive() {
        let rule = MatchRule::Hex { len: 8 };
        assert!(rule.matches("deadbeef"));
        assert!(rule.matches("DEADBEEF"));
        assert!(rule.matches("DeAdBeEf"));
    }

    #[test]
    fn test_hex_rule_rejects_wrong_length_or_chars() {
        let rule = MatchRule::Hex { len: 8 };
        assert!(!rule.matches("deadbee"));
        assert!(!rule.matches("deadbeef0"));
        assert!(!rule.matches("deadbeeg"));
        assert!(!rule.matches(""));
    }

    #[test]
    fn test_hex_rule_counts_bytes_not_chars() {
        // Multi-byte chars must not sneak in through a char-count check
        let rule = MatchRule::Hex { len: 4 };
        assert!(!rule.matches("ab\u{e9}"));
    }

    #[test]
    fn test_charset_rule() {
        let rule = MatchRule::Charset {
            len: 4,
            charset: Charset::CryptBase64,
        };
        assert!(rule.matches("a./Z"));
        assert!(!rule.matches("a+/Z"));
        assert!(!rule.matches("a./"));
        assert_eq!(rule.implied_length(), DeclaredLength::Fixed(4));
        assert_eq!(rule.summary(), "crypt-base64{4}");
    }

    #[test]
    fn test_segmented_rule_prefix_is_case_sensitive() {
        let rule = MatchRule::segmented("$x$", r"\$x\$[0-9]+").unwrap();
        assert!(rule.matches("$x$123"));
        assert!(!rule.matches("$X$123"));
        assert!(!rule.matches("$x$123a"));
        assert_eq!(rule.implied_length(), DeclaredLength::Variable);
    }

    #[test]
    fn test_segmented_rule_invalid_pattern() {
        let err = MatchRule::segmented("$x$", r"(unclosed").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { prefix: "$x$", .. }));
    }

    #[test]
    fn test_identical_rules_compare_equal() {
        let a = MatchRule::segmented("$x$", r"\$x\$.+").unwrap();
        let b = MatchRule::segmented("$x$", r"\$x\$.+").unwrap();
        let c = MatchRule::segmented("$x$", r"\$x\$.*").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(MatchRule::Hex { len: 32 }, MatchRule::Hex { len: 32 });
        assert_ne!(MatchRule::Hex { len: 32 }, MatchRule::Hex { len: 40 });
    }

    #[test]
    fn test_family_builders() {
        let family = HashFamily::hex("Demo", 16, "demo family", 72).with_markers(&["16 chars"]);
        assert_eq!(family.length, DeclaredLength::Fixed(16));
        assert_eq!(family.band(), ConfidenceBand::Medium);
        assert_eq!(family.markers, &["16 chars"]);

        let family = HashFamily::new(
            "Seg",
            MatchRule::segmented("$s$", r"\$s\$.{4}").unwrap(),
            "segmented",
            95,
        )
        .with_length(DeclaredLength::Fixed(7));
        assert_eq!(family.length, DeclaredLength::Fixed(7));
        assert!(family.matches("$s$abcd"));
    }
}
