// SPDX-License-Identifier: Apache-2.0
//! File persistence for braid graph messages.
//!
//! Moves any serde-serializable message between memory and a filesystem
//! path in two encodings: compact CBOR binary (always built) and a
//! human-editable JSON text rendering (`text` feature, on by default; a
//! lite build with `default-features = false` compiles the text path
//! out entirely).
//!
//! The codec does not know the message schema — it is generic over
//! serde's `Serialize`/`DeserializeOwned` — and it never retains the
//! caller's message past a call. Binary decoding streams through a
//! bounded reader: a hard limit of 1 GiB fails the decode, a threshold
//! of 512 MiB logs a warning.

mod file;
mod limit;

pub use file::{read_binary, write_binary};
#[cfg(feature = "text")]
pub use file::{read_text, write_text};
pub use limit::{HARD_LIMIT_BYTES, WARN_LIMIT_BYTES};

use thiserror::Error;

/// Error type for codec operations.
///
/// Two tiers. `NotFound`, `Io`, `TooLarge`, and `Parse` are expected
/// runtime conditions a caller may handle. `Create` and `Encode` are
/// the fatal tier: they indicate a configuration error on the write
/// path, and the caller must abort the operation rather than continue
/// with a partial result.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Path could not be opened for reading.
    #[error("file not found: {0}")]
    NotFound(String),
    /// I/O failure mid-stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Decoded input crossed the hard size limit.
    #[error("input exceeds decode limit of {limit} bytes")]
    TooLarge {
        /// The hard limit that was crossed.
        limit: u64,
    },
    /// Bytes/text do not form a valid encoding of the target message.
    #[error("parse error: {0}")]
    Parse(String),
    /// Path could not be created for writing (fatal tier).
    #[error("file cannot be created: {path}: {source}")]
    Create {
        /// Path that could not be created.
        path: String,
        /// Underlying open error.
        #[source]
        source: std::io::Error,
    },
    /// Message failed to serialize (fatal tier).
    #[error("serialize error: {0}")]
    Encode(String),
}
