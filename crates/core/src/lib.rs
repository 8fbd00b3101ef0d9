//! Hashorbit Core
//!
//! Identify the likely algorithm family of a hash string by its structure
//! (length, character set, literal prefixes) and, for families with a lookup
//! provider, try to recover the plaintext from a precomputed database.
//!
//! # Quick Start
//!
//! ```
//! use hashorbit_core::classify;
//!
//! let result = classify("5d41402abc4b2a76b9719d911017c592");
//!
//! // Several families share the 32-hex signature; the most common comes first
//! let best = result.top().unwrap();
//! assert_eq!(best.name, "MD5");
//! assert!(result.len() > 1);
//!
//! for family in &result {
//!     println!("{} ({}%): {}", family.name, family.confidence, family.description);
//! }
//! ```
//!
//! # Self-describing formats
//!
//! ```
//! use hashorbit_core::{classify, DeclaredLength};
//!
//! let result = classify("$2b$12$KIXQJmK1xrA0LpRnNCC1qOZpMv8pVvFmGQxF8Y5YjLrHd3Ol5h7kK");
//! assert_eq!(result.names(), vec!["BCrypt"]);
//! assert_eq!(result.top().unwrap().length, DeclaredLength::Fixed(60));
//! ```
//!
//! # Reversal
//!
//! Reversal is asynchronous and never fails; see [`ReversalRegistry`].

pub mod catalog;
pub mod classify;
pub mod family;
pub mod reversal;
pub mod types;

pub use catalog::{Catalog, CatalogError};
pub use classify::{classify, Classification};
pub use family::{Charset, HashFamily, MatchRule};
pub use reversal::{
    HttpFetch, Md5DbProvider, ReversalError, ReversalProvider, ReversalRegistry, ReversalSession,
    UreqFetch,
};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    /// Regression test: every 40-hex input must offer SHA-1 first
    #[test]
    fn test_sha1_leads_40_hex() {
        let result = classify("da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(
            result.names(),
            vec!["SHA-1", "RIPEMD-160", "Tiger-160", "HMAC-SHA1"]
        );
    }

    #[test]
    fn test_prefix_must_match_case() {
        let upper = "$2B$12$KIXQJmK1xrA0LpRnNCC1qOZpMv8pVvFmGQxF8Y5YjLrHd3Ol5h7kK";
        assert!(classify(upper).is_empty());
    }
}
