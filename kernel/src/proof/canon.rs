//! Canonical JSON bytes: the one serialization used for digests.
//!
//! Search graphs, policy snapshots and run reports are hashed over the bytes
//! produced here, so two runs agree on a digest exactly when they agree on
//! content.
//!
//! # Canonicalization rules
//!
//! 1. Object keys sorted by byte order.
//! 2. Compact form, no whitespace.
//! 3. Strings escaped per RFC 8259 §7; non-ASCII passes through as UTF-8.
//! 4. Numbers must be integers (`i64` or `u64`). Floats are rejected because
//!    their textual form is not stable across formatters.

use std::io::Write;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer.
    NonIntegerNumber {
        /// JSON-pointer style location of the offending value.
        path: String,
        /// The number as serde rendered it.
        raw: String,
    },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { path, raw } => {
                write!(f, "non-integer number at {path}: {raw}")
            }
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut canon = Canonicalizer {
        out: Vec::new(),
        path: Vec::new(),
    };
    canon.value(value)?;
    Ok(canon.out)
}

struct Canonicalizer {
    out: Vec<u8>,
    path: Vec<String>,
}

impl Canonicalizer {
    fn value(&mut self, value: &serde_json::Value) -> Result<(), CanonError> {
        match value {
            serde_json::Value::Null => self.out.extend_from_slice(b"null"),
            serde_json::Value::Bool(true) => self.out.extend_from_slice(b"true"),
            serde_json::Value::Bool(false) => self.out.extend_from_slice(b"false"),
            serde_json::Value::Number(n) => self.number(n)?,
            serde_json::Value::String(s) => self.string(s),
            serde_json::Value::Array(items) => {
                self.out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push(b',');
                    }
                    self.path.push(i.to_string());
                    self.value(item)?;
                    self.path.pop();
                }
                self.out.push(b']');
            }
            serde_json::Value::Object(map) => {
                let mut entries: Vec<(&String, &serde_json::Value)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

                self.out.push(b'{');
                for (i, (key, item)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        self.out.push(b',');
                    }
                    self.string(key);
                    self.out.push(b':');
                    self.path.push(key.clone());
                    self.value(item)?;
                    self.path.pop();
                }
                self.out.push(b'}');
            }
        }
        Ok(())
    }

    fn number(&mut self, n: &serde_json::Number) -> Result<(), CanonError> {
        if let Some(i) = n.as_i64() {
            let _ = write!(self.out, "{i}");
        } else if let Some(u) = n.as_u64() {
            let _ = write!(self.out, "{u}");
        } else {
            return Err(CanonError::NonIntegerNumber {
                path: format!("/{}", self.path.join("/")),
                raw: n.to_string(),
            });
        }
        Ok(())
    }

    fn string(&mut self, s: &str) {
        self.out.push(b'"');
        for ch in s.chars() {
            match ch {
                '"' => self.out.extend_from_slice(b"\\\""),
                '\\' => self.out.extend_from_slice(b"\\\\"),
                '\n' => self.out.extend_from_slice(b"\\n"),
                '\r' => self.out.extend_from_slice(b"\\r"),
                '\t' => self.out.extend_from_slice(b"\\t"),
                c if c < '\u{0020}' => {
                    let _ = write!(self.out, "\\u{:04x}", u32::from(c));
                }
                c => {
                    let mut utf8 = [0u8; 4];
                    self.out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                }
            }
        }
        self.out.push(b'"');
    }
}
