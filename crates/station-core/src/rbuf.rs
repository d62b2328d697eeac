//! Locomotive refresh buffer contract.
//!
//! The refresh buffer holds one entry per registered locomotive in a
//! circular doubly linked list over an arena of slots, periodically walked
//! by the packet scheduler to regenerate DCC packets. Its scheduling
//! internals are not the dispatcher's business; this trait captures exactly
//! what the dispatcher consumes: typed get/set/toggle accessors keyed by
//! locomotive address, deregistration, and raw slot reads for the `rbuf`
//! diagnostic listing.
//!
//! `get_*` returns `None` when the address is not registered; `set_*`
//! returns `false` when the buffer declines the write (unknown address it
//! cannot register, full arena). `toggle_*` returns the new state, or
//! `None` for an unknown address.

use crate::fgroup::FunctionGroups;

/// Slot-index sentinel for "no slot" (empty ring, end of free list).
pub const NO_SLOT: i32 = -1;

/// Raw view of one refresh-buffer slot, as dumped by the `rbuf` diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSlot {
    /// Locomotive address, most-significant byte.
    pub msb: u8,
    /// Locomotive address, least-significant byte.
    pub lsb: u8,
    /// Refresh cycles to spend on this entry per ring pass.
    pub num_refresh_cycle: u8,
    /// Refresh cycles spent on this entry in the current pass.
    pub refresh_cycle: u8,
    /// Combined direction + 128-step speed byte (direction in bit 7).
    pub dir_speed: u8,
    /// Function state F0-F4.
    pub f0_4: u8,
    /// Function state F5-F68 (packed, see [`FunctionGroups`]).
    pub f5_68: FunctionGroups,
    /// Previous slot in the ring, [`NO_SLOT`] if unlinked.
    pub prev: i32,
    /// Next slot in the ring, [`NO_SLOT`] if unlinked.
    pub next: i32,
}

impl RefreshSlot {
    /// Combined 14-bit locomotive address.
    pub fn addr(&self) -> u16 {
        ((self.msb as u16) << 8) | self.lsb as u16
    }
}

/// The dispatcher's seam into the refresh ring.
pub trait RefreshBuffer {
    /// Entry point of the ring, [`NO_SLOT`] when no locomotive is registered.
    fn first(&self) -> i32;

    /// Next slot the buffer would hand out on registration.
    fn next_free(&self) -> i32;

    /// Raw read of slot `idx` for diagnostics; `None` for an invalid index.
    fn slot(&self, idx: i32) -> Option<RefreshSlot>;

    /// Remove the locomotive `addr` from the ring. Returns `false` if it
    /// was not registered.
    fn deregister(&mut self, addr: u16) -> bool;

    /// Direction of locomotive `addr` (`true` = forward).
    fn dir(&self, addr: u16) -> Option<bool>;

    /// Set direction; registers the locomotive on first write.
    fn set_dir(&mut self, addr: u16, dir: bool) -> bool;

    /// Flip direction and return the new value.
    fn toggle_dir(&mut self, addr: u16) -> Option<bool>;

    /// 128-step speed payload of locomotive `addr`.
    fn speed128(&self, addr: u16) -> Option<u8>;

    /// Set the 128-step speed payload; registers the locomotive on first write.
    fn set_speed128(&mut self, addr: u16, speed: u8) -> bool;

    /// Function `no` (0-68) of locomotive `addr`.
    fn fct(&self, addr: u16, no: u8) -> Option<bool>;

    /// Set function `no`; registers the locomotive on first write.
    fn set_fct(&mut self, addr: u16, no: u8, on: bool) -> bool;

    /// Flip function `no` and return the new state.
    fn toggle_fct(&mut self, addr: u16, no: u8) -> Option<bool>;
}
