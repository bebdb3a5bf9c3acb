//! Storage keys and the filename sanitizer.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an object in the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(pub String);

impl StorageKey {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StorageKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StorageKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Check if a character is safe for the storage namespace.
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'
}

fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| if is_safe(c) { c } else { '_' })
        .collect()
}

/// Build a collision-resistant storage key from a user-supplied file name.
///
/// Every character outside `[A-Za-z0-9._-]` becomes `_`, the original
/// extension is preserved, and `stamp` is inserted before the extension so
/// repeated uploads of the same name never map to the same object.
///
/// Total and deterministic given `(name, stamp)`; see [`KeyStamper`] for
/// producing distinct stamps.
pub fn storage_key_for(name: &str, stamp: u64) -> StorageKey {
    let name = name.trim();

    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    let stem = sanitize(stem);
    match extension {
        Some(ext) => StorageKey(format!("{}_{}.{}", stem, stamp, sanitize(ext))),
        None => StorageKey(format!("{}_{}", stem, stamp)),
    }
}

/// Monotonic uniqueness stamp source for storage keys.
///
/// Returns the wall clock in milliseconds, bumped past the previous stamp
/// when two uploads land in the same millisecond, so keys built from the
/// same name never collide within a session.
#[derive(Debug, Default)]
pub struct KeyStamper {
    last: AtomicU64,
}

impl KeyStamper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next stamp for the given wall-clock instant.
    pub fn next(&self, now: DateTime<Utc>) -> u64 {
        let now_ms = now.timestamp_millis().max(0) as u64;
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_ms.max(last + 1))
            })
            .unwrap_or(0);
        now_ms.max(prev + 1)
    }
}
