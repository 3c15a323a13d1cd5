//! Content hashes and typed domain separators.
//!
//! Every fingerprint and digest in the workspace is
//! `sha256(domain_bytes || data)` rendered as `"sha256:<hex>"`. The domain
//! prefix keeps a state fingerprint from ever colliding with, say, a graph
//! digest computed over the same bytes.
//!
//! **Exactly one place defines canonical hashing**: [`canonical_hash`].

use sha2::{Digest, Sha256};

/// Algorithm tag carried by every [`ContentHash`] this crate produces.
pub const HASH_ALGORITHM: &str = "sha256";

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the separator is missing, repeated, or either side
    /// is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    fn from_digest(digest: &[u8]) -> Self {
        let full = format!("{HASH_ALGORITHM}:{}", hex::encode(digest));
        Self {
            full,
            colon: HASH_ALGORITHM.len(),
        }
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// First `n` hex characters of the digest, for log lines.
    #[must_use]
    pub fn short(&self, n: usize) -> &str {
        let hex = self.hex_digest();
        &hex[..n.min(hex.len())]
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Declares `HashDomain`, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used
        /// as the SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl std::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Search state identity bytes (audit fingerprints, cross-run comparison).
    StateFingerprint => b"WAYPOINT::STATE_FINGERPRINT::V1\0",

    /// Canonical JSON of a recorded search graph.
    SearchGraph => b"WAYPOINT::SEARCH_GRAPH::V1\0",

    /// Canonical JSON of a search policy snapshot.
    PolicySnapshot => b"WAYPOINT::POLICY_SNAPSHOT::V1\0",

    /// Canonical JSON of a harness run report.
    RunReport => b"WAYPOINT::RUN_REPORT::V1\0",
}

/// Compute the canonical hash of a byte slice with domain separation.
///
/// Result format: `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    ContentHash::from_digest(&hasher.finalize())
}
