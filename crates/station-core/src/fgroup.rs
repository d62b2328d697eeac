//! Packed storage for locomotive function state F5-F68.
//!
//! The refresh buffer keeps the upper function state of each locomotive in
//! eight bytes of backing storage shared by several overlapping named
//! groupings (F5-F8, F9-F12, F5-F12 combined, then F13-F20 through F61-F68
//! as whole bytes). Readers of any grouping observe bits of the same
//! underlying bytes; the views below are shift/mask projections over one
//! array, never independent copies, so the bit layout is identical across
//! groupings.
//!
//! Layout: function `Fn` (5 <= n <= 68) lives in `byte[(n - 5) / 8]`,
//! `bit[(n - 5) % 8]`. F0-F4 are not stored here -- they travel in the
//! refresh slot's own single-byte field.

/// First function number covered by this storage.
pub const FGROUP_FIRST: u8 = 5;

/// Last function number covered by this storage.
pub const FGROUP_LAST: u8 = 68;

/// Packed F5-F68 function bits with named overlapping group views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunctionGroups([u8; 8]);

impl FunctionGroups {
    /// Create storage with all functions off.
    pub fn new() -> Self {
        FunctionGroups([0; 8])
    }

    /// F5-F8 as the low nibble of the first byte.
    pub fn f5_8(&self) -> u8 {
        self.0[0] & 0x0F
    }

    /// F9-F12 as the high nibble of the first byte, shifted down.
    pub fn f9_12(&self) -> u8 {
        self.0[0] >> 4
    }

    /// F5-F12 combined: the whole first byte.
    pub fn f5_12(&self) -> u8 {
        self.0[0]
    }

    /// F13-F20.
    pub fn f13_20(&self) -> u8 {
        self.0[1]
    }

    /// F21-F28.
    pub fn f21_28(&self) -> u8 {
        self.0[2]
    }

    /// F29-F36.
    pub fn f29_36(&self) -> u8 {
        self.0[3]
    }

    /// F37-F44.
    pub fn f37_44(&self) -> u8 {
        self.0[4]
    }

    /// F45-F52.
    pub fn f45_52(&self) -> u8 {
        self.0[5]
    }

    /// F53-F60.
    pub fn f53_60(&self) -> u8 {
        self.0[6]
    }

    /// F61-F68.
    pub fn f61_68(&self) -> u8 {
        self.0[7]
    }

    /// Read function `no` (5-68). Returns `None` outside that range.
    pub fn get(&self, no: u8) -> Option<bool> {
        let (byte, bit) = Self::locate(no)?;
        Some(self.0[byte] & (1 << bit) != 0)
    }

    /// Set function `no` (5-68) to `on`. Returns `false` outside that range.
    pub fn set(&mut self, no: u8, on: bool) -> bool {
        match Self::locate(no) {
            Some((byte, bit)) => {
                if on {
                    self.0[byte] |= 1 << bit;
                } else {
                    self.0[byte] &= !(1 << bit);
                }
                true
            }
            None => false,
        }
    }

    /// Flip function `no` (5-68) and return the new state.
    pub fn toggle(&mut self, no: u8) -> Option<bool> {
        let (byte, bit) = Self::locate(no)?;
        self.0[byte] ^= 1 << bit;
        Some(self.0[byte] & (1 << bit) != 0)
    }

    fn locate(no: u8) -> Option<(usize, u8)> {
        if !(FGROUP_FIRST..=FGROUP_LAST).contains(&no) {
            return None;
        }
        let offset = no - FGROUP_FIRST;
        Some(((offset / 8) as usize, offset % 8))
    }
}
