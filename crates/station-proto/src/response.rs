//! Response framing.
//!
//! Every request produces exactly one of:
//!
//! - a success line: `+ <payload>` (bare `+` when there is no payload),
//! - a multi-line diagnostic block: zero or more data lines followed by the
//!   end-of-response marker `.` on its own line,
//! - an error line: `- <result token>`.
//!
//! Lines are LF-terminated. [`ResponseWriter`] assembles each line in a
//! [`BytesMut`] and hands it to the underlying writer in one call, so a
//! line is never interleaved on the wire.

use std::fmt::Write as _;
use std::io::Write;

use bytes::BytesMut;

use station_core::Result;

/// Marker starting a success line.
pub const SUCCESS_MARKER: char = '+';

/// Marker starting an error line.
pub const ERROR_MARKER: char = '-';

/// End-of-response marker closing a multi-line block.
pub const EOR_MARKER: char = '.';

/// Writes protocol responses to an underlying byte sink.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    inner: W,
    buf: BytesMut,
}

impl<W: Write> ResponseWriter<W> {
    /// Wrap a byte sink.
    pub fn new(inner: W) -> Self {
        ResponseWriter {
            inner,
            buf: BytesMut::with_capacity(128),
        }
    }

    /// Write a success line carrying `payload`.
    ///
    /// Call as `w.success(format_args!("{speed}"))`.
    pub fn success(&mut self, payload: std::fmt::Arguments<'_>) -> Result<()> {
        self.buf.clear();
        let _ = self.buf.write_char(SUCCESS_MARKER);
        let mark = self.buf.len();
        let _ = write!(self.buf, " {payload}");
        // A payload that formats to nothing leaves a dangling space.
        if self.buf.len() == mark + 1 {
            self.buf.truncate(mark);
        }
        self.flush_line()
    }

    /// Write one data line of a multi-line diagnostic block.
    pub fn multi(&mut self, payload: std::fmt::Arguments<'_>) -> Result<()> {
        self.buf.clear();
        let _ = write!(self.buf, "{payload}");
        self.flush_line()
    }

    /// Close a multi-line block with the end-of-response marker.
    pub fn eor(&mut self) -> Result<()> {
        self.buf.clear();
        let _ = self.buf.write_char(EOR_MARKER);
        self.flush_line()
    }

    /// Write an error line carrying the result-code token.
    pub fn error(&mut self, token: &str) -> Result<()> {
        self.buf.clear();
        let _ = write!(self.buf, "{ERROR_MARKER} {token}");
        self.flush_line()
    }

    /// Unwrap the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    // fmt writes into BytesMut are infallible, hence the ignored results above.
    fn flush_line(&mut self) -> Result<()> {
        let _ = self.buf.write_char('\n');
        self.inner.write_all(&self.buf)?;
        Ok(())
    }
}
