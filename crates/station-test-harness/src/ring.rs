//! In-memory refresh ring for tests and the simulation shell.
//!
//! An arena of slots addressed by index, joined into a circular doubly
//! linked list through explicit `prev`/`next` fields with a `first` cursor,
//! exactly the structure the dispatcher's `rbuf` diagnostic walks. A
//! locomotive is registered by the first write to any of its attributes and
//! stays in the ring until deregistered. Writes are declined (returning
//! `false`) only when the arena is full.

use station_core::fgroup::FunctionGroups;
use station_core::rbuf::{RefreshBuffer, RefreshSlot, NO_SLOT};

/// Direction bit within the combined direction+speed byte.
const DIR_BIT: u8 = 0x80;

/// Speed payload mask within the combined direction+speed byte.
const SPEED_MASK: u8 = 0x7F;

#[derive(Debug, Clone, Copy)]
struct Slot {
    msb: u8,
    lsb: u8,
    num_refresh_cycle: u8,
    refresh_cycle: u8,
    dir_speed: u8,
    f0_4: u8,
    f5_68: FunctionGroups,
    prev: i32,
    next: i32,
}

/// A [`RefreshBuffer`] backed by a fixed-capacity arena.
#[derive(Debug)]
pub struct SimRefreshBuffer {
    slots: Vec<Option<Slot>>,
    first: i32,
}

impl SimRefreshBuffer {
    /// Default arena capacity (number of simultaneously registered locos).
    pub const DEFAULT_CAPACITY: usize = 8;

    /// Create an empty ring with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an empty ring holding up to `capacity` locomotives.
    pub fn with_capacity(capacity: usize) -> Self {
        SimRefreshBuffer {
            slots: vec![None; capacity],
            first: NO_SLOT,
        }
    }

    /// Number of registered locomotives.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// `true` if no locomotive is registered.
    pub fn is_empty(&self) -> bool {
        self.first == NO_SLOT
    }

    /// Walk the ring for the slot holding `addr`.
    fn find(&self, addr: u16) -> Option<usize> {
        if self.first == NO_SLOT {
            return None;
        }
        let mut idx = self.first as usize;
        loop {
            let slot = self.slots[idx].as_ref()?;
            if ((slot.msb as u16) << 8) | slot.lsb as u16 == addr {
                return Some(idx);
            }
            idx = slot.next as usize;
            if idx as i32 == self.first {
                return None;
            }
        }
    }

    /// Find `addr` or register it in a free slot, linked in at the ring
    /// tail. Returns `None` when the arena is full.
    fn ensure(&mut self, addr: u16) -> Option<usize> {
        if let Some(idx) = self.find(addr) {
            return Some(idx);
        }
        let idx = self.slots.iter().position(|s| s.is_none())?;
        let mut slot = Slot {
            msb: (addr >> 8) as u8,
            lsb: (addr & 0xFF) as u8,
            num_refresh_cycle: 1,
            refresh_cycle: 0,
            dir_speed: 0,
            f0_4: 0,
            f5_68: FunctionGroups::new(),
            prev: idx as i32,
            next: idx as i32,
        };
        if self.first == NO_SLOT {
            self.first = idx as i32;
        } else {
            // Insert between the current tail and first.
            let first = self.first as usize;
            let tail = self.slots[first].as_ref().map(|s| s.prev)? as usize;
            slot.prev = tail as i32;
            slot.next = first as i32;
            if let Some(t) = self.slots[tail].as_mut() {
                t.next = idx as i32;
            }
            if let Some(f) = self.slots[first].as_mut() {
                f.prev = idx as i32;
            }
        }
        self.slots[idx] = Some(slot);
        Some(idx)
    }

    fn with_slot<T>(&mut self, addr: u16, f: impl FnOnce(&mut Slot) -> T) -> Option<T> {
        let idx = self.find(addr)?;
        self.slots[idx].as_mut().map(f)
    }

    fn with_registered<T>(&mut self, addr: u16, f: impl FnOnce(&mut Slot) -> T) -> Option<T> {
        let idx = self.ensure(addr)?;
        self.slots[idx].as_mut().map(f)
    }
}

impl Default for SimRefreshBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshBuffer for SimRefreshBuffer {
    fn first(&self) -> i32 {
        self.first
    }

    fn next_free(&self) -> i32 {
        self.slots
            .iter()
            .position(|s| s.is_none())
            .map_or(NO_SLOT, |idx| idx as i32)
    }

    fn slot(&self, idx: i32) -> Option<RefreshSlot> {
        let slot = self.slots.get(usize::try_from(idx).ok()?)?.as_ref()?;
        Some(RefreshSlot {
            msb: slot.msb,
            lsb: slot.lsb,
            num_refresh_cycle: slot.num_refresh_cycle,
            refresh_cycle: slot.refresh_cycle,
            dir_speed: slot.dir_speed,
            f0_4: slot.f0_4,
            f5_68: slot.f5_68,
            prev: slot.prev,
            next: slot.next,
        })
    }

    fn deregister(&mut self, addr: u16) -> bool {
        let Some(idx) = self.find(addr) else {
            return false;
        };
        let Some(slot) = self.slots[idx].take() else {
            return false;
        };
        if slot.next as usize == idx {
            // Only element.
            self.first = NO_SLOT;
        } else {
            let (prev, next) = (slot.prev as usize, slot.next as usize);
            if let Some(p) = self.slots[prev].as_mut() {
                p.next = slot.next;
            }
            if let Some(n) = self.slots[next].as_mut() {
                n.prev = slot.prev;
            }
            if self.first as usize == idx {
                self.first = slot.next;
            }
        }
        true
    }

    fn dir(&self, addr: u16) -> Option<bool> {
        let idx = self.find(addr)?;
        self.slots[idx]
            .as_ref()
            .map(|s| s.dir_speed & DIR_BIT != 0)
    }

    fn set_dir(&mut self, addr: u16, dir: bool) -> bool {
        self.with_registered(addr, |s| {
            if dir {
                s.dir_speed |= DIR_BIT;
            } else {
                s.dir_speed &= !DIR_BIT;
            }
        })
        .is_some()
    }

    fn toggle_dir(&mut self, addr: u16) -> Option<bool> {
        self.with_slot(addr, |s| {
            s.dir_speed ^= DIR_BIT;
            s.dir_speed & DIR_BIT != 0
        })
    }

    fn speed128(&self, addr: u16) -> Option<u8> {
        let idx = self.find(addr)?;
        self.slots[idx].as_ref().map(|s| s.dir_speed & SPEED_MASK)
    }

    fn set_speed128(&mut self, addr: u16, speed: u8) -> bool {
        self.with_registered(addr, |s| {
            s.dir_speed = (s.dir_speed & DIR_BIT) | (speed & SPEED_MASK);
        })
        .is_some()
    }

    fn fct(&self, addr: u16, no: u8) -> Option<bool> {
        let idx = self.find(addr)?;
        let slot = self.slots[idx].as_ref()?;
        match no {
            0..=4 => Some(slot.f0_4 & (1 << no) != 0),
            _ => slot.f5_68.get(no),
        }
    }

    fn set_fct(&mut self, addr: u16, no: u8, on: bool) -> bool {
        if no > station_core::dcc::FCT_MAX {
            return false;
        }
        self.with_registered(addr, |s| match no {
            0..=4 => {
                if on {
                    s.f0_4 |= 1 << no;
                } else {
                    s.f0_4 &= !(1 << no);
                }
                true
            }
            _ => s.f5_68.set(no, on),
        })
        .unwrap_or(false)
    }

    fn toggle_fct(&mut self, addr: u16, no: u8) -> Option<bool> {
        self.with_slot(addr, |s| match no {
            0..=4 => {
                s.f0_4 ^= 1 << no;
                Some(s.f0_4 & (1 << no) != 0)
            }
            _ => s.f5_68.toggle(no),
        })?
    }
}
