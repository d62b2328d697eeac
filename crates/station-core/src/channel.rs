//! Track-signal output channel.
//!
//! The channel owns the DCC bit-stream generator that drives the track.
//! The dispatcher never touches the generator itself -- it issues encoded
//! requests through this trait: enable/disable, preamble sync-bit tuning,
//! and the service-mode programming packets (CV byte, CV bit, CV29 bit 5,
//! long-address assignment).
//!
//! Addresses arrive pre-split into MSB/LSB byte pairs (see
//! [`crate::dcc::msb`] / [`crate::dcc::lsb`]); CV addresses are already the
//! 0-based wire form. All calls are synchronous and non-blocking from the
//! dispatcher's perspective.

/// Requests into the DCC track-signal generator.
pub trait TrackChannel {
    /// Enable or disable track output.
    fn set_enabled(&mut self, on: bool);

    /// Current DCC preamble sync-bit count.
    fn dcc_sync_bits(&self) -> u16;

    /// Set the DCC preamble sync-bit count; returns the value actually
    /// applied (the generator may clamp it).
    fn set_dcc_sync_bits(&mut self, sync_bits: u16) -> u16;

    /// Program a CV byte value on a locomotive.
    fn cv_byte(&mut self, addr_msb: u8, addr_lsb: u8, cv_msb: u8, cv_lsb: u8, value: u8);

    /// Program a single CV bit on a locomotive.
    fn cv_bit(&mut self, addr_msb: u8, addr_lsb: u8, cv_msb: u8, cv_lsb: u8, bit: u8, flag: bool);

    /// Set CV29 bit 5 (long/short address select) on a locomotive.
    fn cv29_bit5(&mut self, addr_msb: u8, addr_lsb: u8, flag: bool);

    /// Assign a long address (CV17/CV18 pair) to a locomotive.
    fn assign_long_addr(&mut self, addr_msb: u8, addr_lsb: u8, laddr_msb: u8, laddr_lsb: u8);
}
