//! Transport trait for the command link.
//!
//! The [`Transport`] trait abstracts over the physical link carrying the
//! textual command protocol -- a USB serial port on the real station, a
//! pseudo-terminal or an in-memory pipe in tests.
//!
//! The line loop in `shell-app` operates on a `Transport` rather than
//! directly on a serial port, so the same loop serves real hardware and
//! deterministic tests.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport for the command link.
///
/// Implementations handle buffering and error recovery at the physical
/// layer. Line framing and tokenization are handled by `station-proto`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the peer.
    ///
    /// Implementations should not return until all bytes have been written
    /// to the underlying link.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the peer into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Waits up to `timeout`
    /// for data to arrive; returns
    /// [`Error::Timeout`](crate::error::Error::Timeout) if none arrives
    /// within the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the transport connection.
    ///
    /// After `close()`, subsequent `send()` and `receive()` calls should
    /// return [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
