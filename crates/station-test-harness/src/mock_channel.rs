//! Mock track channel with a call log.
//!
//! Every request the dispatcher issues is recorded as a [`ChannelCall`], so
//! tests can assert the exact wire bytes (address MSB/LSB split, 0-based CV
//! addresses) without a bit-stream generator behind them.

use station_core::channel::TrackChannel;

/// One recorded request into the mock channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelCall {
    /// Track output enabled/disabled.
    SetEnabled(bool),
    /// Preamble sync-bit count changed.
    SetSyncBits(u16),
    /// CV byte programming packet.
    CvByte {
        addr_msb: u8,
        addr_lsb: u8,
        cv_msb: u8,
        cv_lsb: u8,
        value: u8,
    },
    /// CV bit programming packet.
    CvBit {
        addr_msb: u8,
        addr_lsb: u8,
        cv_msb: u8,
        cv_lsb: u8,
        bit: u8,
        flag: bool,
    },
    /// CV29 bit 5 (address-mode select) packet.
    Cv29Bit5 {
        addr_msb: u8,
        addr_lsb: u8,
        flag: bool,
    },
    /// Long-address assignment (CV17/18) packet.
    AssignLongAddr {
        addr_msb: u8,
        addr_lsb: u8,
        laddr_msb: u8,
        laddr_lsb: u8,
    },
}

/// A mock [`TrackChannel`] recording all requests.
#[derive(Debug, Default)]
pub struct MockChannel {
    calls: Vec<ChannelCall>,
    enabled: bool,
    sync_bits: u16,
}

impl MockChannel {
    /// Create a disabled mock channel with the default preamble length.
    pub fn new() -> Self {
        MockChannel {
            calls: Vec::new(),
            enabled: false,
            sync_bits: 17,
        }
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> &[ChannelCall] {
        &self.calls
    }

    /// The most recent call, if any.
    pub fn last_call(&self) -> Option<&ChannelCall> {
        self.calls.last()
    }

    /// Whether track output is currently enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

impl TrackChannel for MockChannel {
    fn set_enabled(&mut self, on: bool) {
        self.enabled = on;
        self.calls.push(ChannelCall::SetEnabled(on));
    }

    fn dcc_sync_bits(&self) -> u16 {
        self.sync_bits
    }

    fn set_dcc_sync_bits(&mut self, sync_bits: u16) -> u16 {
        self.sync_bits = sync_bits;
        self.calls.push(ChannelCall::SetSyncBits(sync_bits));
        self.sync_bits
    }

    fn cv_byte(&mut self, addr_msb: u8, addr_lsb: u8, cv_msb: u8, cv_lsb: u8, value: u8) {
        self.calls.push(ChannelCall::CvByte {
            addr_msb,
            addr_lsb,
            cv_msb,
            cv_lsb,
            value,
        });
    }

    fn cv_bit(&mut self, addr_msb: u8, addr_lsb: u8, cv_msb: u8, cv_lsb: u8, bit: u8, flag: bool) {
        self.calls.push(ChannelCall::CvBit {
            addr_msb,
            addr_lsb,
            cv_msb,
            cv_lsb,
            bit,
            flag,
        });
    }

    fn cv29_bit5(&mut self, addr_msb: u8, addr_lsb: u8, flag: bool) {
        self.calls.push(ChannelCall::Cv29Bit5 {
            addr_msb,
            addr_lsb,
            flag,
        });
    }

    fn assign_long_addr(&mut self, addr_msb: u8, addr_lsb: u8, laddr_msb: u8, laddr_lsb: u8) {
        self.calls.push(ChannelCall::AssignLongAddr {
            addr_msb,
            addr_lsb,
            laddr_msb,
            laddr_lsb,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut ch = MockChannel::new();
        ch.set_enabled(true);
        ch.cv_byte(0x04, 0xD2, 0, 28, 6);
        assert_eq!(ch.calls().len(), 2);
        assert_eq!(
            ch.last_call(),
            Some(&ChannelCall::CvByte {
                addr_msb: 0x04,
                addr_lsb: 0xD2,
                cv_msb: 0,
                cv_lsb: 28,
                value: 6,
            })
        );
        assert!(ch.enabled());
    }

    #[test]
    fn sync_bits_round_trip() {
        let mut ch = MockChannel::new();
        assert_eq!(ch.dcc_sync_bits(), 17);
        assert_eq!(ch.set_dcc_sync_bits(20), 20);
        assert_eq!(ch.dcc_sync_bits(), 20);
    }
}
