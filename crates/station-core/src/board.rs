//! Board identification and LED access.
//!
//! The dispatcher only needs to know which board variant it runs on, how
//! the board identifies itself, and how to drive the onboard LED. Real
//! firmware backs this with the RP2040 SDK; tests use the mock in
//! `station-test-harness`.

/// Board variant the station runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    /// Raspberry Pi Pico.
    Pico,
    /// Raspberry Pi Pico W (wireless-capable, has a MAC address).
    PicoW,
}

impl BoardKind {
    /// Protocol name of the board variant.
    pub fn name(&self) -> &'static str {
        match self {
            BoardKind::Pico => "pico",
            BoardKind::PicoW => "pico_w",
        }
    }
}

/// Access to board identity and the onboard LED.
pub trait Board {
    /// Which board variant this is.
    fn kind(&self) -> BoardKind;

    /// Unique board identifier (flash serial).
    fn id(&self) -> &str;

    /// MAC address, present only on wireless-capable boards.
    ///
    /// Implementations reporting [`BoardKind::PicoW`] must return
    /// `Some`; `None` is reserved for boards without a radio.
    fn mac(&self) -> Option<&str>;

    /// Drive the onboard LED.
    fn set_led(&mut self, on: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_kind_names() {
        assert_eq!(BoardKind::Pico.name(), "pico");
        assert_eq!(BoardKind::PicoW.name(), "pico_w");
    }
}
