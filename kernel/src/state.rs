//! The state contract shared by every search problem.
//!
//! # Equality semantics
//!
//! Dedup uses `Eq + Hash` on the state value itself. Identity bytes are a
//! second, process-independent view of the same equality: two equal states
//! MUST write identical identity bytes. The converse is guaranteed by the
//! writer's length prefixes for any state built from the provided impls.
//!
//! Fingerprints (`sha256` over identity bytes) label states in audit graphs
//! and reports; they are never used for dedup, so a hash collision can
//! mislabel a log line but cannot merge two states.

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// A searchable state: immutable once created, comparable, hashable, and
/// reducible to stable identity bytes.
pub trait SearchState: Clone + Eq + Hash + Debug {
    /// Append this state's identity to `w`.
    ///
    /// Equal states must append equal bytes.
    fn write_identity(&self, w: &mut IdentityWriter);

    /// Identity bytes of this state alone.
    #[must_use]
    fn identity_bytes(&self) -> Vec<u8> {
        let mut w = IdentityWriter::new();
        self.write_identity(&mut w);
        w.finish()
    }

    /// Domain-separated SHA-256 of [`identity_bytes`](Self::identity_bytes).
    #[must_use]
    fn fingerprint(&self) -> ContentHash {
        canonical_hash(HashDomain::StateFingerprint, &self.identity_bytes())
    }
}

/// Builder for little-endian, length-prefixed identity bytes.
///
/// Fixed-width integers are written as-is; variable-length values (strings,
/// byte runs, sequences) carry a `u64` length prefix so concatenation stays
/// unambiguous.
#[derive(Debug, Default, Clone)]
pub struct IdentityWriter {
    buf: Vec<u8>,
}

impl IdentityWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A one-byte discriminant, for enum variants.
    pub fn tag(&mut self, tag: u8) -> &mut Self {
        self.buf.push(tag);
        self
    }

    pub fn u64(&mut self, v: u64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i64(&mut self, v: i64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn usize(&mut self, v: usize) -> &mut Self {
        self.u64(u64::try_from(v).unwrap_or(u64::MAX))
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.tag(u8::from(v))
    }

    pub fn bytes(&mut self, v: &[u8]) -> &mut Self {
        self.usize(v.len());
        self.buf.extend_from_slice(v);
        self
    }

    pub fn str(&mut self, v: &str) -> &mut Self {
        self.bytes(v.as_bytes())
    }

    /// A length-prefixed run of nested states.
    pub fn seq<'a, T, I>(&mut self, items: I) -> &mut Self
    where
        T: SearchState + 'a,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        self.usize(items.len());
        for item in items {
            item.write_identity(self);
        }
        self
    }

    /// Consume the writer, returning the accumulated bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

macro_rules! unsigned_state {
    ($($t:ty),+) => {
        $(
            impl SearchState for $t {
                fn write_identity(&self, w: &mut IdentityWriter) {
                    w.u64(u64::from(*self));
                }
            }
        )+
    };
}

macro_rules! signed_state {
    ($($t:ty),+) => {
        $(
            impl SearchState for $t {
                fn write_identity(&self, w: &mut IdentityWriter) {
                    w.i64(i64::from(*self));
                }
            }
        )+
    };
}

unsigned_state!(u8, u16, u32, u64);
signed_state!(i8, i16, i32, i64);

impl SearchState for usize {
    fn write_identity(&self, w: &mut IdentityWriter) {
        w.usize(*self);
    }
}

impl SearchState for isize {
    fn write_identity(&self, w: &mut IdentityWriter) {
        w.i64(i64::try_from(*self).unwrap_or(i64::MAX));
    }
}

impl SearchState for bool {
    fn write_identity(&self, w: &mut IdentityWriter) {
        w.bool(*self);
    }
}

impl SearchState for char {
    fn write_identity(&self, w: &mut IdentityWriter) {
        w.u64(u64::from(u32::from(*self)));
    }
}

impl SearchState for String {
    fn write_identity(&self, w: &mut IdentityWriter) {
        w.str(self);
    }
}

impl<T: SearchState> SearchState for Option<T> {
    fn write_identity(&self, w: &mut IdentityWriter) {
        match self {
            None => {
                w.tag(0);
            }
            Some(v) => {
                w.tag(1);
                v.write_identity(w);
            }
        }
    }
}

impl<T: SearchState> SearchState for Vec<T> {
    fn write_identity(&self, w: &mut IdentityWriter) {
        w.seq(self.iter());
    }
}

impl<T: SearchState + Ord> SearchState for BTreeSet<T> {
    fn write_identity(&self, w: &mut IdentityWriter) {
        w.seq(self.iter());
    }
}

impl<A: SearchState, B: SearchState> SearchState for (A, B) {
    fn write_identity(&self, w: &mut IdentityWriter) {
        self.0.write_identity(w);
        self.1.write_identity(w);
    }
}

impl<A: SearchState, B: SearchState, C: SearchState> SearchState for (A, B, C) {
    fn write_identity(&self, w: &mut IdentityWriter) {
        self.0.write_identity(w);
        self.1.write_identity(w);
        self.2.write_identity(w);
    }
}
