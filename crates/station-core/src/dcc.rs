//! NMRA DCC domain rules: value ranges, address splitting, CV arithmetic.
//!
//! Everything here is a pure function. The command handlers in
//! `station-cmd` run each parsed parameter through the matching check
//! before any request reaches the refresh buffer or the track channel.
//!
//! # Example
//!
//! ```
//! use station_core::dcc;
//!
//! assert!(dcc::check_loco_addr(1234));
//! assert!(!dcc::check_loco_addr(0));
//!
//! let (cv17, cv18) = dcc::cv1718(1234);
//! assert_eq!((cv17, cv18), (0xC4, 0xD2));
//! ```

/// Lowest addressable locomotive address.
pub const LOCO_ADDR_MIN: u16 = 1;

/// Highest addressable locomotive address (14-bit long addressing).
pub const LOCO_ADDR_MAX: u16 = 10239;

/// Lowest CV index in the user-facing protocol (1-based).
pub const CV_INDEX_MIN: u16 = 1;

/// Highest CV index in the user-facing protocol.
pub const CV_INDEX_MAX: u16 = 1024;

/// Highest function number carried by the refresh buffer (F0..F68).
pub const FCT_MAX: u8 = 68;

/// Returns `true` if `addr` is a valid locomotive address.
pub fn check_loco_addr(addr: u16) -> bool {
    (LOCO_ADDR_MIN..=LOCO_ADDR_MAX).contains(&addr)
}

/// Returns `true` if `idx` is a valid 1-based CV index.
pub fn check_cv_index(idx: u16) -> bool {
    (CV_INDEX_MIN..=CV_INDEX_MAX).contains(&idx)
}

/// Returns `true` if `value` is a legal CV value.
///
/// CVs are a full byte wide, so any `u8` passes; the check exists so the
/// handlers read the same way for every parameter kind and so a narrower
/// rule has one place to live.
pub fn check_cv_value(_value: u8) -> bool {
    true
}

/// Returns `true` if `bit` is a valid CV bit position (0-7).
pub fn check_bit(bit: u8) -> bool {
    bit <= 7
}

/// Returns `true` if `speed` is a legal 128-speed-step payload.
///
/// The speed payload is 7 bits (0 = stop, 1 = emergency stop, 2-127 =
/// steps 1-126); direction travels separately.
pub fn check_speed128(speed: u8) -> bool {
    speed <= 0x7F
}

/// Most-significant byte of a 14-bit locomotive or CV wire address.
pub fn msb(value: u16) -> u8 {
    (value >> 8) as u8
}

/// Least-significant byte of a 14-bit locomotive or CV wire address.
pub fn lsb(value: u16) -> u8 {
    (value & 0xFF) as u8
}

/// Map a 1-based CV index to its 0-based wire address.
///
/// CV addressing on the wire is zero-based: CV index 1 is transmitted as
/// address 0. The off-by-one is the protocol convention, not a bug.
///
/// `idx` must be a valid CV index (`idx >= 1`, see [`check_cv_index`]);
/// callers validate before converting.
///
/// # Example
///
/// ```
/// use station_core::dcc::cv_wire_addr;
///
/// assert_eq!(cv_wire_addr(1), 0);
/// assert_eq!(cv_wire_addr(29), 28);
/// ```
pub fn cv_wire_addr(idx: u16) -> u16 {
    debug_assert!(idx >= CV_INDEX_MIN, "CV index is 1-based");
    idx - 1
}

/// Compute the CV17/CV18 pair encoding a long address.
///
/// Per NMRA S-9.2.2: `CV17 = 0xC0 | (addr >> 8)`, `CV18 = addr & 0xFF`.
///
/// # Example
///
/// ```
/// use station_core::dcc::cv1718;
///
/// // 1234 == 0x04D2
/// assert_eq!(cv1718(1234), (0xC4, 0xD2));
/// ```
pub fn cv1718(addr: u16) -> (u8, u8) {
    (0xC0 | msb(addr), lsb(addr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loco_addr_boundaries() {
        assert!(!check_loco_addr(0));
        assert!(check_loco_addr(1));
        assert!(check_loco_addr(10239));
        assert!(!check_loco_addr(10240));
    }

    #[test]
    fn cv_index_boundaries() {
        assert!(!check_cv_index(0));
        assert!(check_cv_index(1));
        assert!(check_cv_index(1024));
        assert!(!check_cv_index(1025));
    }

    #[test]
    fn cv_value_full_byte() {
        assert!(check_cv_value(0));
        assert!(check_cv_value(255));
    }

    #[test]
    #[should_panic(expected = "CV index is 1-based")]
    fn cv_wire_addr_rejects_unvalidated_zero_index() {
        cv_wire_addr(0);
    }

    #[test]
    fn bit_boundaries() {
        assert!(check_bit(0));
        assert!(check_bit(7));
        assert!(!check_bit(8));
    }

    #[test]
    fn speed128_boundaries() {
        assert!(check_speed128(0));
        assert!(check_speed128(1));
        assert!(check_speed128(127));
        assert!(!check_speed128(128));
        assert!(!check_speed128(255));
    }

    #[test]
    fn address_split() {
        assert_eq!(msb(0x04D2), 0x04);
        assert_eq!(lsb(0x04D2), 0xD2);
        assert_eq!(msb(3), 0);
        assert_eq!(lsb(3), 3);
    }

    #[test]
    fn cv_wire_addr_is_zero_based() {
        assert_eq!(cv_wire_addr(1), 0);
        assert_eq!(cv_wire_addr(1024), 1023);
    }

    #[test]
    fn cv1718_reference_value() {
        // Long address 1234 (0x04D2) from the NMRA worked example.
        let (cv17, cv18) = cv1718(1234);
        assert_eq!(cv17, 196);
        assert_eq!(cv18, 210);
    }

    #[test]
    fn cv1718_short_value() {
        let (cv17, cv18) = cv1718(3);
        assert_eq!(cv17, 0xC0);
        assert_eq!(cv18, 3);
    }
}
