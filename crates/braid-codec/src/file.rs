// SPDX-License-Identifier: Apache-2.0
//! Read/write a graph message at a filesystem path.
//!
//! Binary is streaming CBOR over the file handle; text is pretty JSON.
//! Handles are scoped locals, so they are released on every exit path,
//! parse failures included.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::limit::BoundedReader;
use crate::{CodecError, HARD_LIMIT_BYTES, WARN_LIMIT_BYTES};

fn open_read(path: &Path) -> Result<File, CodecError> {
    match File::open(path) {
        Ok(file) => Ok(file),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(CodecError::NotFound(path.display().to_string()))
        }
        Err(err) => Err(CodecError::Io(err)),
    }
}

/// Open for writing: create or truncate, owner-rw / group-other-read.
fn open_write(path: &Path) -> Result<File, CodecError> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    opts.open(path).map_err(|source| CodecError::Create {
        path: path.display().to_string(),
        source,
    })
}

/// Decode one binary message from `reader` under the given byte budget.
fn decode_bounded<T, R>(reader: R, limit: u64, warn_at: u64) -> Result<(T, u64), CodecError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut bounded = BoundedReader::new(reader, limit, warn_at);
    match ciborium::de::from_reader::<T, _>(&mut bounded) {
        Ok(message) => Ok((message, bounded.consumed())),
        Err(_) if bounded.exceeded() => Err(CodecError::TooLarge { limit }),
        Err(err) => Err(CodecError::Parse(err.to_string())),
    }
}

/// Read a binary-encoded message from `path`.
///
/// Streams through a bounded decoder with a hard limit of
/// [`HARD_LIMIT_BYTES`] and a warning threshold of [`WARN_LIMIT_BYTES`]
/// on total decoded bytes. Inputs past the hard limit fail with
/// [`CodecError::TooLarge`] rather than allocating; crossing the
/// threshold only logs. Malformed bytes fail with [`CodecError::Parse`].
pub fn read_binary<T, P>(path: P) -> Result<T, CodecError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = open_read(path)?;
    let (message, bytes) =
        decode_bounded(BufReader::new(file), HARD_LIMIT_BYTES, WARN_LIMIT_BYTES)?;
    debug!(path = %path.display(), bytes, "read binary message");
    Ok(message)
}

/// Write `message` to `path` in binary form.
///
/// Creates or truncates the file (0o644 on Unix) and streams the
/// encoding out incrementally. Open failure is [`CodecError::Create`]
/// and serialization failure is [`CodecError::Encode`] — the fatal
/// tier; neither leaves a complete file behind.
pub fn write_binary<T, P>(message: &T, path: P) -> Result<(), CodecError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = open_write(path)?;
    let mut writer = BufWriter::new(file);
    ciborium::ser::into_writer(message, &mut writer).map_err(|err| match err {
        ciborium::ser::Error::Io(io_err) => CodecError::Io(io_err),
        ciborium::ser::Error::Value(msg) => CodecError::Encode(msg),
    })?;
    writer.flush()?;
    debug!(path = %path.display(), "wrote binary message");
    Ok(())
}

/// Read a text-rendered (JSON) message from `path`. Full builds only.
#[cfg(feature = "text")]
pub fn read_text<T, P>(path: P) -> Result<T, CodecError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = open_read(path)?;
    let message = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| CodecError::Parse(err.to_string()))?;
    debug!(path = %path.display(), "read text message");
    Ok(message)
}

/// Render `message` as human-editable text (pretty JSON) at `path`.
/// Full builds only. Failures follow [`write_binary`]'s fatal tier.
#[cfg(feature = "text")]
pub fn write_text<T, P>(message: &T, path: P) -> Result<(), CodecError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = open_write(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, message).map_err(|err| {
        if err.is_io() {
            CodecError::Io(io::Error::from(err))
        } else {
            CodecError::Encode(err.to_string())
        }
    })?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!(path = %path.display(), "wrote text message");
    Ok(())
}
