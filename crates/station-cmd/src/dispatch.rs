//! Dispatcher state and the per-command handlers.
//!
//! The [`Dispatcher`] is created once at system initialization around the
//! board, the refresh buffer, the track channel, and the temperature
//! sensor. It owns exactly two bits of state across calls -- the ENABLED
//! and LED flags -- and keeps the physical LED synchronized with their
//! conjunction. Everything else is a single request/response transaction:
//! validate the parameter count, parse and check each parameter in order
//! (short-circuiting on the first failure), execute the effect, write one
//! success line.
//!
//! Handlers never panic across the dispatch boundary and never mutate any
//! state before validation completes; the only post-validation outcomes are
//! `no_data` (query found nothing) and `no_change` (refresh buffer declined
//! the write).

use std::io::Write;

use tracing::debug;

use station_core::board::{Board, BoardKind};
use station_core::channel::TrackChannel;
use station_core::dcc;
use station_core::rbuf::{RefreshBuffer, NO_SLOT};
use station_core::sensor::{temp_celsius, TempSensor};
use station_core::Result;

use station_proto::params::{self, Ternary};
use station_proto::response::ResponseWriter;

use crate::status::CmdStatus;
use crate::table::{self, CommandId, COMMANDS};

/// Track output enabled.
const FLAG_ENABLED: u8 = 1 << 0;

/// LED allowed to light.
const FLAG_LED: u8 = 1 << 1;

#[inline]
fn check_num_prm(act: usize, min: usize, max: usize) -> bool {
    (min..=max).contains(&act)
}

/// The command dispatcher. One instance per station, process lifetime.
#[derive(Debug)]
pub struct Dispatcher<B, R, C, S> {
    board: B,
    rbuf: R,
    channel: C,
    sensor: S,
    flags: u8,
}

impl<B, R, C, S> Dispatcher<B, R, C, S>
where
    B: Board,
    R: RefreshBuffer,
    C: TrackChannel,
    S: TempSensor,
{
    /// Bind the collaborators and reset the flags.
    ///
    /// The channel starts disabled, the ENABLED flag cleared, the LED flag
    /// set. The physical LED is not touched until a flag changes.
    pub fn new(board: B, rbuf: R, mut channel: C, sensor: S) -> Self {
        channel.set_enabled(false);
        Dispatcher {
            board,
            rbuf,
            channel,
            sensor,
            flags: FLAG_LED,
        }
    }

    /// The board collaborator (used by tests and the shell).
    pub fn board(&self) -> &B {
        &self.board
    }

    /// The refresh-buffer collaborator.
    pub fn rbuf(&self) -> &R {
        &self.rbuf
    }

    /// The channel collaborator.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// The temperature-sensor collaborator.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    fn set_flag(&mut self, on: bool, flag: u8) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    fn get_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Push ENABLED AND LED to the physical LED. Called after any change
    /// to either flag.
    fn sync_led(&mut self) {
        self.board
            .set_led(self.get_flag(FLAG_ENABLED) && self.get_flag(FLAG_LED));
    }

    /// Dispatch one tokenized request and write its response.
    ///
    /// `prm[0]` is the command name, `prm[1..]` the parameters. Exactly one
    /// response is produced per request: the handler's success payload, or
    /// a single error line for every non-[`CmdStatus::Ok`] outcome. `Err`
    /// is reserved for writer I/O failures.
    pub fn dispatch<W: Write>(
        &mut self,
        prm: &[&str],
        writer: &mut ResponseWriter<W>,
    ) -> Result<()> {
        let rc = match prm.first().and_then(|name| table::resolve(name)) {
            None => CmdStatus::InvalidCommand,
            Some(id) => match id {
                CommandId::Help => self.cmd_help(prm, writer)?,
                CommandId::Board => self.cmd_board(prm, writer)?,
                CommandId::Led => self.cmd_led(prm, writer)?,
                CommandId::Temp => self.cmd_temp(prm, writer)?,
                CommandId::DccSyncBits => self.cmd_dcc_sync_bits(prm, writer)?,
                CommandId::Enabled => self.cmd_enabled(prm, writer)?,
                CommandId::Rbuf => self.cmd_rbuf(prm, writer)?,
                CommandId::DelLoco => self.cmd_del_loco(prm, writer)?,
                CommandId::LocoDir => self.cmd_loco_dir(prm, writer)?,
                CommandId::LocoSpeed128 => self.cmd_loco_speed128(prm, writer)?,
                CommandId::LocoFct => self.cmd_loco_fct(prm, writer)?,
                CommandId::LocoCvByte => self.cmd_loco_cv_byte(prm, writer)?,
                CommandId::LocoCvBit => self.cmd_loco_cv_bit(prm, writer)?,
                CommandId::LocoCv29Bit5 => self.cmd_loco_cv29_bit5(prm, writer)?,
                CommandId::LocoLaddr => self.cmd_loco_laddr(prm, writer)?,
                CommandId::LocoCv1718 => self.cmd_loco_cv1718(prm, writer)?,
            },
        };

        debug!(
            command = prm.first().copied().unwrap_or(""),
            status = %rc,
            "dispatched"
        );

        if rc != CmdStatus::Ok {
            writer.error(rc.token())?;
        }
        Ok(())
    }

    fn cmd_help<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 1, 1) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        for spec in COMMANDS {
            match spec.syntax {
                None => w.multi(format_args!("{} ({})", spec.name, spec.help))?,
                Some(syntax) => {
                    w.multi(format_args!("{} {} ({})", spec.name, syntax, spec.help))?
                }
            }
        }
        w.eor()?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_board<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 1, 1) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let kind = self.board.kind();
        match (kind, self.board.mac()) {
            (BoardKind::PicoW, Some(mac)) => {
                w.success(format_args!("{} {} {}", kind.name(), self.board.id(), mac))?
            }
            _ => w.success(format_args!("{} {}", kind.name(), self.board.id()))?,
        }
        Ok(CmdStatus::Ok)
    }

    fn cmd_led<W: Write>(&mut self, prm: &[&str], w: &mut ResponseWriter<W>) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 1, 2) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let on = match prm.len() {
            1 => self.get_flag(FLAG_LED),
            _ => {
                let Some(on) = params::parse_bool(prm[1]) else {
                    return Ok(CmdStatus::InvalidParam);
                };
                self.set_flag(on, FLAG_LED);
                self.sync_led();
                on
            }
        };

        w.success(format_args!("{}", params::bool_char(on)))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_temp<W: Write>(&mut self, prm: &[&str], w: &mut ResponseWriter<W>) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 1, 1) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let raw = self.sensor.read_raw();
        w.success(format_args!("{:.6}", temp_celsius(raw)))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_dcc_sync_bits<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 1, 2) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        // The count is passed through unclamped; range policy belongs to
        // the bit-stream generator, which reports the value it applied.
        let sync_bits = match prm.len() {
            1 => self.channel.dcc_sync_bits(),
            _ => {
                let Some(sync_bits) = params::parse_uint(prm[1]) else {
                    return Ok(CmdStatus::InvalidParam);
                };
                self.channel.set_dcc_sync_bits(sync_bits)
            }
        };

        w.success(format_args!("{sync_bits}"))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_enabled<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 1, 2) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        // The local flag is authoritative; the channel mirrors it.
        let on = match prm.len() {
            1 => self.get_flag(FLAG_ENABLED),
            _ => {
                let Some(on) = params::parse_bool(prm[1]) else {
                    return Ok(CmdStatus::InvalidParam);
                };
                self.channel.set_enabled(on);
                self.set_flag(on, FLAG_ENABLED);
                self.sync_led();
                on
            }
        };

        w.success(format_args!("{}", params::bool_char(on)))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_rbuf<W: Write>(&mut self, prm: &[&str], w: &mut ResponseWriter<W>) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 1, 1) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let first = self.rbuf.first();
        w.multi(format_args!("{} {}", first, self.rbuf.next_free()))?;

        if first != NO_SLOT {
            let mut idx = first;
            loop {
                let Some(entry) = self.rbuf.slot(idx) else {
                    break;
                };
                w.multi(format_args!(
                    "{} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {} {}",
                    idx,
                    entry.addr(),
                    entry.num_refresh_cycle,
                    entry.refresh_cycle,
                    entry.dir_speed,
                    entry.f0_4,
                    entry.f5_68.f5_8(),
                    entry.f5_68.f9_12(),
                    entry.f5_68.f5_12(),
                    entry.f5_68.f13_20(),
                    entry.f5_68.f21_28(),
                    entry.f5_68.f29_36(),
                    entry.f5_68.f37_44(),
                    entry.f5_68.f45_52(),
                    entry.f5_68.f53_60(),
                    entry.f5_68.f61_68(),
                    entry.prev,
                    entry.next
                ))?;
                idx = entry.next;
                if idx == first {
                    break;
                }
            }
        }

        w.eor()?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_del_loco<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 2, 2) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let Some(addr) = params::parse_uint(prm[1]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };

        if !self.rbuf.deregister(addr) {
            return Ok(CmdStatus::NoData);
        }

        w.success(format_args!("{addr}"))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_loco_dir<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 2, 3) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let Some(addr) = params::parse_uint(prm[1]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };

        let dir = match prm.len() {
            2 => match self.rbuf.dir(addr) {
                Some(dir) => dir,
                None => return Ok(CmdStatus::NoData),
            },
            _ => {
                let Some(ternary) = params::parse_ternary(prm[2]) else {
                    return Ok(CmdStatus::InvalidParam);
                };
                match ternary {
                    Ternary::False | Ternary::True => {
                        let dir = ternary == Ternary::True;
                        if !self.rbuf.set_dir(addr, dir) {
                            return Ok(CmdStatus::NoChange);
                        }
                        dir
                    }
                    Ternary::Toggle => match self.rbuf.toggle_dir(addr) {
                        Some(dir) => dir,
                        None => return Ok(CmdStatus::NoData),
                    },
                }
            }
        };

        w.success(format_args!("{}", params::bool_char(dir)))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_loco_speed128<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 2, 3) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let Some(addr) = params::parse_uint(prm[1]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };

        let speed128 = match prm.len() {
            2 => match self.rbuf.speed128(addr) {
                Some(speed) => speed,
                None => return Ok(CmdStatus::NoData),
            },
            _ => {
                let Some(speed) = params::parse_byte(prm[2]).filter(|s| dcc::check_speed128(*s))
                else {
                    return Ok(CmdStatus::InvalidParam);
                };
                if !self.rbuf.set_speed128(addr, speed) {
                    return Ok(CmdStatus::NoChange);
                }
                speed
            }
        };

        w.success(format_args!("{speed128}"))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_loco_fct<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 3, 4) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let Some(addr) = params::parse_uint(prm[1]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };
        let Some(no) = params::parse_byte(prm[2]) else {
            return Ok(CmdStatus::InvalidParam);
        };

        let fct = match prm.len() {
            3 => match self.rbuf.fct(addr, no) {
                Some(fct) => fct,
                None => return Ok(CmdStatus::NoData),
            },
            _ => {
                let Some(ternary) = params::parse_ternary(prm[3]) else {
                    return Ok(CmdStatus::InvalidParam);
                };
                match ternary {
                    Ternary::False | Ternary::True => {
                        let fct = ternary == Ternary::True;
                        if !self.rbuf.set_fct(addr, no, fct) {
                            return Ok(CmdStatus::NoChange);
                        }
                        fct
                    }
                    Ternary::Toggle => match self.rbuf.toggle_fct(addr, no) {
                        Some(fct) => fct,
                        None => return Ok(CmdStatus::NoData),
                    },
                }
            }
        };

        w.success(format_args!("{}", params::bool_char(fct)))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_loco_cv_byte<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 4, 4) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let Some(addr) = params::parse_uint(prm[1]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };
        let Some(idx) = params::parse_uint(prm[2]).filter(|i| dcc::check_cv_index(*i)) else {
            return Ok(CmdStatus::InvalidParam);
        };
        let Some(cv) = params::parse_byte(prm[3]).filter(|v| dcc::check_cv_value(*v)) else {
            return Ok(CmdStatus::InvalidParam);
        };

        // CV addressing on the wire is zero based: index 1 is address 0.
        let cv_addr = dcc::cv_wire_addr(idx);

        self.channel.cv_byte(
            dcc::msb(addr),
            dcc::lsb(addr),
            dcc::msb(cv_addr),
            dcc::lsb(cv_addr),
            cv,
        );

        w.success(format_args!("{cv}"))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_loco_cv_bit<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 5, 5) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let Some(addr) = params::parse_uint(prm[1]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };
        let Some(idx) = params::parse_uint(prm[2]).filter(|i| dcc::check_cv_index(*i)) else {
            return Ok(CmdStatus::InvalidParam);
        };
        let Some(bit) = params::parse_byte(prm[3]).filter(|b| dcc::check_bit(*b)) else {
            return Ok(CmdStatus::InvalidParam);
        };
        let Some(flag) = params::parse_bool(prm[4]) else {
            return Ok(CmdStatus::InvalidParam);
        };

        let cv_addr = dcc::cv_wire_addr(idx);

        self.channel.cv_bit(
            dcc::msb(addr),
            dcc::lsb(addr),
            dcc::msb(cv_addr),
            dcc::lsb(cv_addr),
            bit,
            flag,
        );

        w.success(format_args!("{}", params::bool_char(flag)))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_loco_cv29_bit5<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 3, 3) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let Some(addr) = params::parse_uint(prm[1]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };
        let Some(flag) = params::parse_bool(prm[2]) else {
            return Ok(CmdStatus::InvalidParam);
        };

        self.channel.cv29_bit5(dcc::msb(addr), dcc::lsb(addr), flag);

        w.success(format_args!("{}", params::bool_char(flag)))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_loco_laddr<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 3, 3) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let Some(addr) = params::parse_uint(prm[1]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };
        let Some(laddr) = params::parse_uint(prm[2]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };

        self.channel.assign_long_addr(
            dcc::msb(addr),
            dcc::lsb(addr),
            dcc::msb(laddr),
            dcc::lsb(laddr),
        );

        w.success(format_args!("{laddr}"))?;
        Ok(CmdStatus::Ok)
    }

    fn cmd_loco_cv1718<W: Write>(
        &mut self,
        prm: &[&str],
        w: &mut ResponseWriter<W>,
    ) -> Result<CmdStatus> {
        if !check_num_prm(prm.len(), 2, 2) {
            return Ok(CmdStatus::InvalidParamCount);
        }

        let Some(addr) = params::parse_uint(prm[1]).filter(|a| dcc::check_loco_addr(*a)) else {
            return Ok(CmdStatus::InvalidParam);
        };

        let (cv17, cv18) = dcc::cv1718(addr);

        w.success(format_args!("{cv17} {cv18}"))?;
        Ok(CmdStatus::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use station_test_harness::{
        ChannelCall, MockBoard, MockChannel, MockTempSensor, SimRefreshBuffer,
    };

    type TestDispatcher = Dispatcher<MockBoard, SimRefreshBuffer, MockChannel, MockTempSensor>;

    fn station() -> TestDispatcher {
        station_with(MockBoard::pico(), SimRefreshBuffer::new())
    }

    fn station_with(board: MockBoard, rbuf: SimRefreshBuffer) -> TestDispatcher {
        Dispatcher::new(board, rbuf, MockChannel::new(), MockTempSensor::default())
    }

    fn run(d: &mut TestDispatcher, line: &str) -> String {
        let mut out = Vec::new();
        let mut w = ResponseWriter::new(&mut out);
        let prm = params::tokenize(line);
        d.dispatch(&prm, &mut w).unwrap();
        drop(w);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn unknown_and_empty_requests_are_rejected() {
        let mut d = station();
        assert_eq!(run(&mut d, "bogus"), "- inv_cmd\n");
        assert_eq!(run(&mut d, ""), "- inv_cmd\n");
        // Case sensitive lookup.
        assert_eq!(run(&mut d, "Help"), "- inv_cmd\n");
    }

    #[test]
    fn init_disables_channel_without_driving_led() {
        let d = station();
        assert_eq!(d.channel().calls(), &[ChannelCall::SetEnabled(false)]);
        assert_eq!(d.board().led(), None);
    }

    #[test]
    fn help_lists_every_command_in_table_order() {
        let mut d = station();
        let out = run(&mut d, "help");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), COMMANDS.len() + 1);
        assert_eq!(*lines.last().unwrap(), ".");
        for (line, spec) in lines.iter().zip(COMMANDS) {
            let mut words = line.split_whitespace();
            assert_eq!(words.next(), Some(spec.name));
        }
    }

    #[test]
    fn help_takes_no_parameters() {
        let mut d = station();
        assert_eq!(run(&mut d, "help me"), "- inv_num_prm\n");
    }

    #[test]
    fn board_reports_kind_and_id() {
        let mut d = station();
        assert_eq!(run(&mut d, "board"), "+ pico E661A4D41723262A\n");
        assert_eq!(run(&mut d, "board x"), "- inv_num_prm\n");
    }

    #[test]
    fn board_pico_w_includes_mac() {
        let mut d = station_with(MockBoard::pico_w(), SimRefreshBuffer::new());
        assert_eq!(
            run(&mut d, "board"),
            "+ pico_w E661A4D41723262A 28:CD:C1:00:12:34\n"
        );
    }

    #[test]
    fn led_flag_defaults_on_and_round_trips() {
        let mut d = station();
        assert_eq!(run(&mut d, "led"), "+ t\n");
        assert_eq!(run(&mut d, "led f"), "+ f\n");
        assert_eq!(run(&mut d, "led"), "+ f\n");
        assert_eq!(run(&mut d, "led x"), "- inv_prm\n");
        assert_eq!(run(&mut d, "led t f"), "- inv_num_prm\n");
    }

    #[test]
    fn led_lights_only_while_enabled() {
        let mut d = station();
        // LED flag set, track disabled: stays dark.
        assert_eq!(run(&mut d, "led t"), "+ t\n");
        assert_eq!(d.board().led(), Some(false));
        assert_eq!(run(&mut d, "enabled t"), "+ t\n");
        assert_eq!(d.board().led(), Some(true));
        assert_eq!(run(&mut d, "led f"), "+ f\n");
        assert_eq!(d.board().led(), Some(false));
        assert_eq!(run(&mut d, "led t"), "+ t\n");
        assert_eq!(run(&mut d, "enabled f"), "+ f\n");
        assert_eq!(d.board().led(), Some(false));
    }

    #[test]
    fn enabled_drives_channel_and_defaults_off() {
        let mut d = station();
        assert_eq!(run(&mut d, "enabled"), "+ f\n");
        assert_eq!(run(&mut d, "enabled t"), "+ t\n");
        assert!(d.channel().enabled());
        assert_eq!(run(&mut d, "enabled"), "+ t\n");
        assert_eq!(run(&mut d, "enabled x"), "- inv_prm\n");
        assert_eq!(run(&mut d, "enabled t t"), "- inv_num_prm\n");
    }

    #[test]
    fn temp_reports_six_decimals() {
        let mut d = station();
        let expected = format!("+ {:.6}\n", temp_celsius(876));
        assert_eq!(run(&mut d, "temp"), expected);
        assert_eq!(d.sensor().reads(), 1);
        assert_eq!(run(&mut d, "temp 1"), "- inv_num_prm\n");
    }

    #[test]
    fn dcc_sync_bits_round_trips_through_channel() {
        let mut d = station();
        assert_eq!(run(&mut d, "dcc_sync_bits"), "+ 17\n");
        assert_eq!(run(&mut d, "dcc_sync_bits 20"), "+ 20\n");
        assert_eq!(d.channel().last_call(), Some(&ChannelCall::SetSyncBits(20)));
        assert_eq!(run(&mut d, "dcc_sync_bits"), "+ 20\n");
        // Counts wider than a byte pass through; the generator owns any
        // clamping and reports the applied value.
        assert_eq!(run(&mut d, "dcc_sync_bits 256"), "+ 256\n");
        assert_eq!(
            d.channel().last_call(),
            Some(&ChannelCall::SetSyncBits(256))
        );
        assert_eq!(run(&mut d, "dcc_sync_bits x"), "- inv_prm\n");
        assert_eq!(run(&mut d, "dcc_sync_bits 65536"), "- inv_prm\n");
        assert_eq!(run(&mut d, "dcc_sync_bits 20 20"), "- inv_num_prm\n");
    }

    #[test]
    fn rbuf_on_empty_ring_prints_header_and_eor() {
        let mut d = station();
        assert_eq!(run(&mut d, "rbuf"), "-1 0\n.\n");
        assert_eq!(run(&mut d, "rbuf x"), "- inv_num_prm\n");
    }

    #[test]
    fn rbuf_walks_each_loco_exactly_once() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_dir 3 t"), "+ t\n");
        assert_eq!(run(&mut d, "loco_speed128 1234 20"), "+ 20\n");
        let out = run(&mut d, "rbuf");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "0 2",
                "0 3 1 0 128 0 0 0 0 0 0 0 0 0 0 0 1 1",
                "1 1234 1 0 20 0 0 0 0 0 0 0 0 0 0 0 0 0",
                ".",
            ]
        );
    }

    #[test]
    fn del_loco_removes_a_registered_loco() {
        let mut d = station();
        assert_eq!(run(&mut d, "del_loco 3"), "- no_data\n");
        assert_eq!(run(&mut d, "loco_dir 3 t"), "+ t\n");
        assert_eq!(run(&mut d, "del_loco 3"), "+ 3\n");
        assert_eq!(run(&mut d, "rbuf"), "-1 0\n.\n");
        assert_eq!(run(&mut d, "del_loco 0"), "- inv_prm\n");
        assert_eq!(run(&mut d, "del_loco 10240"), "- inv_prm\n");
        assert_eq!(run(&mut d, "del_loco"), "- inv_num_prm\n");
        assert_eq!(run(&mut d, "del_loco 3 4"), "- inv_num_prm\n");
    }

    #[test]
    fn loco_dir_set_query_and_toggle() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_dir 3"), "- no_data\n");
        assert_eq!(run(&mut d, "loco_dir 3 ~"), "- no_data\n");
        assert_eq!(run(&mut d, "loco_dir 3 t"), "+ t\n");
        assert_eq!(run(&mut d, "loco_dir 3"), "+ t\n");
        assert_eq!(run(&mut d, "loco_dir 3 ~"), "+ f\n");
        assert_eq!(run(&mut d, "loco_dir 3 ~"), "+ t\n");
        assert_eq!(run(&mut d, "loco_dir 3 x"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_dir 10240 t"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_dir 99999 t"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_dir 3 t t"), "- inv_num_prm\n");
    }

    #[test]
    fn loco_speed128_accepts_payload_range_only() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_speed128 3"), "- no_data\n");
        assert_eq!(run(&mut d, "loco_speed128 3 127"), "+ 127\n");
        assert_eq!(run(&mut d, "loco_speed128 3"), "+ 127\n");
        assert_eq!(run(&mut d, "loco_speed128 3 128"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_speed128 0 5"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_speed128"), "- inv_num_prm\n");
    }

    #[test]
    fn speed_and_direction_share_a_slot_byte() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_dir 3 t"), "+ t\n");
        assert_eq!(run(&mut d, "loco_speed128 3 5"), "+ 5\n");
        assert_eq!(run(&mut d, "loco_dir 3"), "+ t\n");
        assert_eq!(run(&mut d, "loco_dir 3 f"), "+ f\n");
        assert_eq!(run(&mut d, "loco_speed128 3"), "+ 5\n");
    }

    #[test]
    fn writes_decline_when_the_ring_is_full() {
        let mut d = station_with(MockBoard::pico(), SimRefreshBuffer::with_capacity(1));
        assert_eq!(run(&mut d, "loco_dir 3 t"), "+ t\n");
        assert_eq!(run(&mut d, "loco_dir 4 t"), "- no_change\n");
        assert_eq!(run(&mut d, "loco_speed128 4 5"), "- no_change\n");
        // The registered loco is still writable.
        assert_eq!(run(&mut d, "loco_dir 3 f"), "+ f\n");
    }

    #[test]
    fn loco_fct_set_query_and_toggle() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_fct 3 0"), "- no_data\n");
        assert_eq!(run(&mut d, "loco_fct 3 0 ~"), "- no_data\n");
        assert_eq!(run(&mut d, "loco_fct 3 0 t"), "+ t\n");
        assert_eq!(run(&mut d, "loco_fct 3 0"), "+ t\n");
        assert_eq!(run(&mut d, "loco_fct 3 68 ~"), "+ t\n");
        assert_eq!(run(&mut d, "loco_fct 3 68 ~"), "+ f\n");
        assert_eq!(run(&mut d, "loco_fct 3 69 t"), "- no_change\n");
        assert_eq!(run(&mut d, "loco_fct 3 x t"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_fct 3"), "- inv_num_prm\n");
        assert_eq!(run(&mut d, "loco_fct 3 0 t t"), "- inv_num_prm\n");
    }

    #[test]
    fn loco_cv_byte_sends_zero_based_cv_address() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_cv_byte 1234 1 6"), "+ 6\n");
        assert_eq!(
            d.channel().last_call(),
            Some(&ChannelCall::CvByte {
                addr_msb: 4,
                addr_lsb: 210,
                cv_msb: 0,
                cv_lsb: 0,
                value: 6,
            })
        );
        assert_eq!(run(&mut d, "loco_cv_byte 3 29 6"), "+ 6\n");
        assert_eq!(
            d.channel().last_call(),
            Some(&ChannelCall::CvByte {
                addr_msb: 0,
                addr_lsb: 3,
                cv_msb: 0,
                cv_lsb: 28,
                value: 6,
            })
        );
        assert_eq!(run(&mut d, "loco_cv_byte 3 1024 255"), "+ 255\n");
        assert_eq!(
            d.channel().last_call(),
            Some(&ChannelCall::CvByte {
                addr_msb: 0,
                addr_lsb: 3,
                cv_msb: 3,
                cv_lsb: 255,
                value: 255,
            })
        );
        assert_eq!(run(&mut d, "loco_cv_byte 3 0 6"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_cv_byte 3 1025 6"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_cv_byte 3 1 256"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_cv_byte 3 1"), "- inv_num_prm\n");
        assert_eq!(run(&mut d, "loco_cv_byte 3 1 6 7"), "- inv_num_prm\n");
    }

    #[test]
    fn loco_cv_bit_checks_bit_position() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_cv_bit 3 29 5 t"), "+ t\n");
        assert_eq!(
            d.channel().last_call(),
            Some(&ChannelCall::CvBit {
                addr_msb: 0,
                addr_lsb: 3,
                cv_msb: 0,
                cv_lsb: 28,
                bit: 5,
                flag: true,
            })
        );
        assert_eq!(run(&mut d, "loco_cv_bit 3 29 8 t"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_cv_bit 3 29 5 ~"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_cv_bit 3 29 5"), "- inv_num_prm\n");
    }

    #[test]
    fn loco_cv29_bit5_targets_the_address_mode_bit() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_cv29_bit5 3 f"), "+ f\n");
        assert_eq!(
            d.channel().last_call(),
            Some(&ChannelCall::Cv29Bit5 {
                addr_msb: 0,
                addr_lsb: 3,
                flag: false,
            })
        );
        assert_eq!(run(&mut d, "loco_cv29_bit5 3"), "- inv_num_prm\n");
        assert_eq!(run(&mut d, "loco_cv29_bit5 0 t"), "- inv_prm\n");
    }

    #[test]
    fn loco_laddr_splits_both_addresses() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_laddr 3 1234"), "+ 1234\n");
        assert_eq!(
            d.channel().last_call(),
            Some(&ChannelCall::AssignLongAddr {
                addr_msb: 0,
                addr_lsb: 3,
                laddr_msb: 4,
                laddr_lsb: 210,
            })
        );
        assert_eq!(run(&mut d, "loco_laddr 3 0"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_laddr 3"), "- inv_num_prm\n");
    }

    #[test]
    fn loco_cv1718_reports_the_register_pair() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_cv1718 1234"), "+ 196 210\n");
        assert_eq!(run(&mut d, "loco_cv1718 1"), "+ 192 1\n");
        assert_eq!(run(&mut d, "loco_cv1718 10239"), "+ 231 255\n");
        assert_eq!(run(&mut d, "loco_cv1718 10240"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_cv1718"), "- inv_num_prm\n");
        assert_eq!(run(&mut d, "loco_cv1718 1234 5"), "- inv_num_prm\n");
        // Pure computation, nothing reaches the channel.
        assert_eq!(d.channel().calls(), &[ChannelCall::SetEnabled(false)]);
    }

    #[test]
    fn rejected_writes_leave_state_untouched() {
        let mut d = station();
        assert_eq!(run(&mut d, "loco_speed128 3 200"), "- inv_prm\n");
        assert_eq!(run(&mut d, "loco_dir 3 x"), "- inv_prm\n");
        // The bad writes did not register locomotive 3.
        assert_eq!(run(&mut d, "rbuf"), "-1 0\n.\n");
        assert_eq!(d.channel().calls(), &[ChannelCall::SetEnabled(false)]);
    }
}
