//! Transport implementation for the station command link.
//!
//! This crate provides [`SerialTransport`], the concrete
//! [`Transport`](station_core::Transport) for the USB CDC serial link the
//! station presents to the host. The protocol is plain LF-terminated text;
//! framing and tokenization live in `station-proto`.
//!
//! # Example
//!
//! ```no_run
//! use station_transport::SerialTransport;
//! use station_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> station_core::Result<()> {
//! let mut transport = SerialTransport::open("/dev/ttyACM0", 115200).await?;
//!
//! transport.send(b"board\n").await?;
//!
//! let mut buf = [0u8; 256];
//! let n = transport.receive(&mut buf, Duration::from_secs(1)).await?;
//! # Ok(())
//! # }
//! ```

pub mod serial;

pub use serial::{SerialTransport, DEFAULT_BAUD};
