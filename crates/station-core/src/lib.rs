//! station-core: Core traits, DCC domain rules, and error definitions for
//! the DCC command station.
//!
//! This crate defines the hardware-agnostic abstractions that the command
//! dispatcher operates on. The dispatcher crate (`station-cmd`) and the
//! protocol crate (`station-proto`) depend on these types without pulling
//! in any transport or board backend.
//!
//! # Key types
//!
//! - [`Board`] -- board identification and LED access
//! - [`RefreshBuffer`] -- locomotive refresh ring, the dispatcher's read/write seam
//! - [`TrackChannel`] -- DCC track-signal output requests
//! - [`TempSensor`] -- raw ADC reads of the onboard temperature channel
//! - [`Transport`] -- byte-level communication link
//! - [`Error`] / [`Result`] -- error handling

pub mod board;
pub mod channel;
pub mod dcc;
pub mod error;
pub mod fgroup;
pub mod rbuf;
pub mod sensor;
pub mod transport;

// Re-export key types at crate root for ergonomic `use station_core::*`.
pub use board::{Board, BoardKind};
pub use channel::TrackChannel;
pub use dcc::{check_bit, check_cv_index, check_cv_value, check_loco_addr, check_speed128};
pub use error::{Error, Result};
pub use fgroup::FunctionGroups;
pub use rbuf::{RefreshBuffer, RefreshSlot, NO_SLOT};
pub use sensor::{temp_celsius, TempSensor};
pub use transport::Transport;
