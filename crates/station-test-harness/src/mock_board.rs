//! Mock board with an LED state log.

use station_core::board::{Board, BoardKind};

/// A mock [`Board`] recording every LED write.
#[derive(Debug)]
pub struct MockBoard {
    kind: BoardKind,
    id: String,
    mac: Option<String>,
    led_log: Vec<bool>,
}

impl MockBoard {
    /// A plain Pico with a fixed id.
    pub fn pico() -> Self {
        MockBoard {
            kind: BoardKind::Pico,
            id: "E661A4D41723262A".into(),
            mac: None,
            led_log: Vec::new(),
        }
    }

    /// A Pico W with a fixed id and MAC.
    pub fn pico_w() -> Self {
        MockBoard {
            kind: BoardKind::PicoW,
            id: "E661A4D41723262A".into(),
            mac: Some("28:CD:C1:00:12:34".into()),
            led_log: Vec::new(),
        }
    }

    /// The LED state after the most recent write, `None` if never driven.
    pub fn led(&self) -> Option<bool> {
        self.led_log.last().copied()
    }

    /// Every LED write, in order.
    pub fn led_log(&self) -> &[bool] {
        &self.led_log
    }
}

impl Board for MockBoard {
    fn kind(&self) -> BoardKind {
        self.kind
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn mac(&self) -> Option<&str> {
        self.mac.as_deref()
    }

    fn set_led(&mut self, on: bool) {
        self.led_log.push(on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_led_writes() {
        let mut board = MockBoard::pico();
        assert_eq!(board.led(), None);
        board.set_led(true);
        board.set_led(false);
        assert_eq!(board.led(), Some(false));
        assert_eq!(board.led_log(), &[true, false]);
    }

    #[test]
    fn kind_and_mac_stay_consistent() {
        // Wireless-capable boards always carry a MAC; plain boards never do.
        let pico = MockBoard::pico();
        assert_eq!(pico.kind(), BoardKind::Pico);
        assert_eq!(pico.mac(), None);

        let pico_w = MockBoard::pico_w();
        assert_eq!(pico_w.kind(), BoardKind::PicoW);
        assert!(pico_w.mac().is_some());
    }
}
