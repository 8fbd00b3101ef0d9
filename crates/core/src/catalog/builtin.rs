//! Built-in hash families.
//!
//! Confidence values are hand-tuned priors reflecting how common each family
//! is among look-alikes with the same signature. Keep them as they are; they
//! are not derived from anything that could be recomputed.

use crate::catalog::CatalogError;
use crate::family::{HashFamily, MatchRule};
use crate::types::DeclaredLength;

const BCRYPT: &str = r"\$2[ayb]\$[0-9]{2}\$[A-Za-z0-9./]{53}";
const ARGON2: &str =
    r"\$argon2[id]\$v=[0-9]+\$m=[0-9]+,t=[0-9]+,p=[0-9]+\$[A-Za-z0-9+/]+\$[A-Za-z0-9+/]+";
const SCRYPT: &str = r"\$scrypt\$[A-Za-z0-9/$.]+";
const PBKDF2: &str = r"\$pbkdf2-sha[0-9]+\$[0-9]+\$[A-Za-z0-9/.]+\$[A-Za-z0-9/.]+";

pub(crate) fn families() -> Result<Vec<HashFamily>, CatalogError> {
    Ok(vec![
        // Parameterized password hashes
        HashFamily::new(
            "BCrypt",
            MatchRule::segmented("$2", BCRYPT)?,
            "Blowfish-based adaptive password hash",
            99,
        )
        .with_length(DeclaredLength::Fixed(60))
        .with_markers(&["$2a$", "$2b$", "$2y$"]),
        HashFamily::new(
            "Argon2",
            MatchRule::segmented("$argon2", ARGON2)?,
            "Memory-hard password hashing and key derivation function",
            99,
        )
        .with_markers(&["$argon2i$", "$argon2d$"]),
        HashFamily::new(
            "scrypt",
            MatchRule::segmented("$scrypt$", SCRYPT)?,
            "Memory-hard password-based key derivation function",
            95,
        )
        .with_markers(&["$scrypt$"]),
        HashFamily::new(
            "PBKDF2",
            MatchRule::segmented("$pbkdf2-sha", PBKDF2)?,
            "Password-Based Key Derivation Function 2",
            95,
        )
        .with_markers(&["$pbkdf2-sha"]),
        // MD family
        HashFamily::hex("MD5", 32, "Message-Digest Algorithm 5", 60),
        HashFamily::hex("MD4", 32, "Message-Digest Algorithm 4", 40),
        HashFamily::hex("MD2", 32, "Message-Digest Algorithm 2", 40),
        HashFamily::hex("MD6-128", 32, "Message-Digest Algorithm 6 (128-bit)", 40),
        HashFamily::hex("MD6-256", 64, "Message-Digest Algorithm 6 (256-bit)", 50),
        HashFamily::hex("MD6-512", 128, "Message-Digest Algorithm 6 (512-bit)", 60),
        // SHA-1 / SHA-2
        HashFamily::hex("SHA-1", 40, "Secure Hash Algorithm 1", 70),
        HashFamily::hex("SHA-224", 56, "Secure Hash Algorithm 224", 85)
            .with_markers(&["always 56 characters"]),
        HashFamily::hex("SHA-256", 64, "Secure Hash Algorithm 256", 80),
        HashFamily::hex("SHA-384", 96, "Secure Hash Algorithm 384", 85)
            .with_markers(&["always 96 characters"]),
        HashFamily::hex("SHA-512", 128, "Secure Hash Algorithm 512", 85),
        // SHA-3
        HashFamily::hex("SHA3-224", 56, "SHA-3 family (224-bit)", 75),
        HashFamily::hex("SHA3-256", 64, "SHA-3 family (256-bit)", 75),
        HashFamily::hex("SHA3-384", 96, "SHA-3 family (384-bit)", 80),
        HashFamily::hex("SHA3-512", 128, "SHA-3 family (512-bit)", 80),
        // RIPEMD
        HashFamily::hex(
            "RIPEMD-128",
            32,
            "RACE Integrity Primitives Evaluation Message Digest 128",
            40,
        ),
        HashFamily::hex(
            "RIPEMD-160",
            40,
            "RACE Integrity Primitives Evaluation Message Digest 160",
            60,
        ),
        HashFamily::hex(
            "RIPEMD-256",
            64,
            "RACE Integrity Primitives Evaluation Message Digest 256",
            50,
        ),
        HashFamily::hex(
            "RIPEMD-320",
            80,
            "RACE Integrity Primitives Evaluation Message Digest 320",
            80,
        )
        .with_markers(&["always 80 characters"]),
        // Everything else
        HashFamily::hex("Tiger-128", 32, "128-bit Tiger cryptographic hash", 40),
        HashFamily::hex("Tiger-160", 40, "160-bit Tiger cryptographic hash", 50),
        HashFamily::hex("Tiger-192", 48, "192-bit Tiger cryptographic hash", 85)
            .with_markers(&["always 48 characters"]),
        HashFamily::hex("Whirlpool", 128, "Whirlpool cryptographic hash", 60),
        HashFamily::hex("NTLM", 32, "Microsoft NT LAN Manager hash", 40),
        HashFamily::hex("HMAC-MD5", 32, "Hash-based message authentication code (MD5)", 40),
        HashFamily::hex("HMAC-SHA1", 40, "Hash-based message authentication code (SHA-1)", 50),
        HashFamily::hex(
            "HMAC-SHA256",
            64,
            "Hash-based message authentication code (SHA-256)",
            50,
        ),
        HashFamily::hex("CRC32", 8, "Cyclic redundancy check (32-bit)", 90)
            .with_markers(&["8 characters long"]),
        HashFamily::hex("Adler32", 8, "Adler-32 checksum", 85).with_markers(&["8 characters long"]),
    ])
}
