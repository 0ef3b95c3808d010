//! Note domain model and key generation.
//!
//! # Responsibility
//! - Define the `Note` record and its timestamp-derived key.
//! - Issue new keys that stay unique even when the clock stalls.
//!
//! # Invariants
//! - `key` is stable and never reused for another note.
//! - The key IS the creation timestamp; `created_at_ms` is derived, not
//!   stored separately.
//! - `KeyGenerator` output is strictly increasing per generator instance.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures. The
/// value is the creation timestamp in epoch milliseconds, rendered as a
/// decimal string, so it stays an opaque key to every collaborator while
/// still carrying its own creation time.
pub type NoteKey = String;

/// A user-authored text snippet with a unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable timestamp-derived key.
    pub key: NoteKey,
    /// Raw note body. May contain embedded line breaks; never empty once
    /// persisted.
    pub text: String,
}

impl Note {
    /// Creates a note from an already-issued key and raw text.
    pub fn new(key: impl Into<NoteKey>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }

    /// Returns the creation timestamp embedded in the key.
    ///
    /// Returns `None` for keys that were not minted by [`KeyGenerator`],
    /// e.g. foreign keys observed from another context.
    pub fn created_at_ms(&self) -> Option<i64> {
        parse_key_timestamp(&self.key)
    }
}

/// Parses a note key back into its epoch-milliseconds timestamp.
pub fn parse_key_timestamp(key: &str) -> Option<i64> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Time source seam for key generation.
///
/// Injected so the board can be driven by a frozen clock under test.
pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Issues timestamp-derived note keys, strictly increasing per instance.
///
/// Two submissions inside the same clock tick would otherwise collide on the
/// same millisecond; the generator bumps past the last issued value so every
/// key is unique by construction.
#[derive(Debug, Default)]
pub struct KeyGenerator {
    last_issued_ms: i64,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next key for the given clock reading.
    pub fn next_key(&mut self, clock: &dyn Clock) -> NoteKey {
        let now = clock.now_ms();
        let issued = if now > self.last_issued_ms {
            now
        } else {
            self.last_issued_ms + 1
        };
        self.last_issued_ms = issued;
        issued.to_string()
    }
}
