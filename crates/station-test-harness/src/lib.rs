//! station-test-harness: mock collaborators for deterministic dispatcher
//! testing without station hardware.
//!
//! This crate provides [`MockBoard`], [`MockChannel`], and [`MockTempSensor`]
//! with call logs for asserting what the dispatcher requested, plus
//! [`SimRefreshBuffer`], a full in-memory refresh ring (arena of slots with
//! `prev`/`next` links and a `first` cursor) implementing the
//! [`RefreshBuffer`](station_core::RefreshBuffer) contract. The `shell-app`
//! console reuses the same simulation to run the dispatcher interactively.

pub mod mock_board;
pub mod mock_channel;
pub mod mock_sensor;
pub mod ring;

pub use mock_board::MockBoard;
pub use mock_channel::{ChannelCall, MockChannel};
pub use mock_sensor::MockTempSensor;
pub use ring::SimRefreshBuffer;
