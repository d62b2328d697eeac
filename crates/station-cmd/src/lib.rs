//! station-cmd: the command dispatcher.
//!
//! One [`Dispatcher`] per station, created at startup around the board, the
//! locomotive refresh buffer, and the track channel. Each request is a
//! tokenized parameter list; [`Dispatcher::dispatch`] resolves token 0
//! against the ordered command table, runs the handler, and writes exactly
//! one error line when the handler reports anything but
//! [`CmdStatus::Ok`] -- success responses are written by the handler itself.
//!
//! # Modules
//!
//! - [`table`] -- ordered command descriptors and name resolution
//! - [`status`] -- the closed result-code enumeration
//! - [`dispatch`] -- dispatcher state, flags, and all handlers

pub mod dispatch;
pub mod status;
pub mod table;

pub use dispatch::Dispatcher;
pub use status::CmdStatus;
pub use table::{resolve, CommandId, CommandSpec, COMMANDS};
