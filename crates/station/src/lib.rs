//! # station -- DCC Command Station Control
//!
//! `station` is a Rust library implementing the textual command protocol of
//! a DCC (Digital Command Control) model railway command station: a
//! table-driven command dispatcher, the NMRA parameter codec (addresses,
//! CVs, speed steps, function banks), and a locomotive refresh buffer
//! abstraction, plus a serial transport for talking to the real hardware.
//!
//! ## Quick Start
//!
//! Drive a simulated station through the dispatcher:
//!
//! ```
//! use station::cmd::Dispatcher;
//! use station::proto::{params, ResponseWriter};
//! use station_test_harness::{MockBoard, MockChannel, MockTempSensor, SimRefreshBuffer};
//!
//! let mut dispatcher = Dispatcher::new(
//!     MockBoard::pico(),
//!     SimRefreshBuffer::new(),
//!     MockChannel::new(),
//!     MockTempSensor::default(),
//! );
//!
//! let mut out = Vec::new();
//! let mut writer = ResponseWriter::new(&mut out);
//! let prm = params::tokenize("loco_speed128 1234 20");
//! dispatcher.dispatch(&prm, &mut writer).unwrap();
//! drop(writer);
//! assert_eq!(out, b"+ 20\n");
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                  | Purpose                                         |
//! |------------------------|-------------------------------------------------|
//! | `station-core`         | Collaborator traits, NMRA codec, errors         |
//! | `station-proto`        | Parameter parsing and response framing          |
//! | `station-cmd`          | Command table, dispatcher, handlers             |
//! | `station-transport`    | Serial transport for the host link              |
//! | `station-test-harness` | Mock collaborators and the simulated ring       |
//! | **`station`**          | This facade crate, re-exports everything        |
//!
//! The dispatcher is generic over the [`Board`], [`RefreshBuffer`],
//! [`TrackChannel`], and [`TempSensor`] traits, so the same handlers serve
//! real hardware and the in-memory simulation.

pub use station_cmd as cmd;
pub use station_core as core;
pub use station_proto as proto;
pub use station_transport as transport;

pub use station_cmd::{CmdStatus, CommandId, CommandSpec, Dispatcher, COMMANDS};
pub use station_core::{
    Board, BoardKind, Error, FunctionGroups, RefreshBuffer, RefreshSlot, Result, TempSensor,
    TrackChannel, Transport, NO_SLOT,
};
pub use station_proto::ResponseWriter;
pub use station_transport::SerialTransport;
