// SPDX-License-Identifier: Apache-2.0
//! Byte-counting guard for streamed decodes.

use std::io::{self, Read};

use tracing::warn;

/// Hard ceiling on total bytes consumed by one binary decode (1 GiB).
pub const HARD_LIMIT_BYTES: u64 = 1024 << 20;
/// Threshold that logs a single warning once crossed (512 MiB).
pub const WARN_LIMIT_BYTES: u64 = 512 << 20;

/// `Read` adapter that fails once a decode consumes more than `limit`
/// bytes. The decoder would otherwise trust a length-prefixed field and
/// allocate up to that size.
pub(crate) struct BoundedReader<R> {
    inner: R,
    limit: u64,
    warn_at: u64,
    consumed: u64,
    warned: bool,
    exceeded: bool,
}

impl<R> BoundedReader<R> {
    pub(crate) fn new(inner: R, limit: u64, warn_at: u64) -> Self {
        Self {
            inner,
            limit,
            warn_at,
            consumed: 0,
            warned: false,
            exceeded: false,
        }
    }

    /// True once a read was refused for crossing the hard limit.
    pub(crate) fn exceeded(&self) -> bool {
        self.exceeded
    }

    /// Total bytes handed to the decoder so far.
    pub(crate) fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.consumed >= self.limit {
            self.exceeded = true;
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "decode byte limit exceeded",
            ));
        }
        // Never hand out more than the remaining budget in one read, so
        // the budget check above is exact.
        let room = usize::try_from(self.limit - self.consumed)
            .map_or(buf.len(), |r| r.min(buf.len()));
        let n = self.inner.read(&mut buf[..room])?;
        self.consumed += n as u64;
        if !self.warned && self.consumed > self.warn_at {
            self.warned = true;
            warn!(
                consumed = self.consumed,
                warn_at = self.warn_at,
                "decode crossed size warning threshold"
            );
        }
        Ok(n)
    }
}
