//! The command table.
//!
//! A static ordered list of command descriptors. Declaration order is
//! user-visible: it defines both the lookup scan order and the listing
//! order of `help`. The table is small and fixed, so [`resolve`] is a
//! case-sensitive linear scan rather than a hash lookup.

/// Identifier of a registered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    Help,
    Board,
    Led,
    Temp,
    DccSyncBits,
    Enabled,
    Rbuf,
    DelLoco,
    LocoDir,
    LocoSpeed128,
    LocoFct,
    LocoCvByte,
    LocoCvBit,
    LocoCv29Bit5,
    LocoLaddr,
    LocoCv1718,
}

/// One command descriptor: name, syntax hint, help text.
///
/// `syntax: None` means the command takes no parameters.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub syntax: Option<&'static str>,
    pub help: &'static str,
}

/// All commands, in declaration order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        id: CommandId::Help,
        name: "help",
        syntax: None,
        help: "list all commands",
    },
    CommandSpec {
        id: CommandId::Board,
        name: "board",
        syntax: None,
        help: "board type and id",
    },
    CommandSpec {
        id: CommandId::Led,
        name: "led",
        syntax: Some("[t|f]"),
        help: "get/set led flag",
    },
    CommandSpec {
        id: CommandId::Temp,
        name: "temp",
        syntax: None,
        help: "onboard temperature",
    },
    CommandSpec {
        id: CommandId::DccSyncBits,
        name: "dcc_sync_bits",
        syntax: Some("[count]"),
        help: "get/set dcc preamble sync bits",
    },
    CommandSpec {
        id: CommandId::Enabled,
        name: "enabled",
        syntax: Some("[t|f]"),
        help: "get/set track output enabled",
    },
    CommandSpec {
        id: CommandId::Rbuf,
        name: "rbuf",
        syntax: None,
        help: "dump refresh buffer",
    },
    CommandSpec {
        id: CommandId::DelLoco,
        name: "del_loco",
        syntax: Some("addr"),
        help: "deregister loco",
    },
    CommandSpec {
        id: CommandId::LocoDir,
        name: "loco_dir",
        syntax: Some("addr [t|f|~]"),
        help: "get/set loco direction",
    },
    CommandSpec {
        id: CommandId::LocoSpeed128,
        name: "loco_speed128",
        syntax: Some("addr [speed]"),
        help: "get/set loco 128-step speed",
    },
    CommandSpec {
        id: CommandId::LocoFct,
        name: "loco_fct",
        syntax: Some("addr no [t|f|~]"),
        help: "get/set loco function",
    },
    CommandSpec {
        id: CommandId::LocoCvByte,
        name: "loco_cv_byte",
        syntax: Some("addr cv value"),
        help: "program cv byte",
    },
    CommandSpec {
        id: CommandId::LocoCvBit,
        name: "loco_cv_bit",
        syntax: Some("addr cv bit t|f"),
        help: "program cv bit",
    },
    CommandSpec {
        id: CommandId::LocoCv29Bit5,
        name: "loco_cv29_bit5",
        syntax: Some("addr t|f"),
        help: "set cv29 bit 5 (long address select)",
    },
    CommandSpec {
        id: CommandId::LocoLaddr,
        name: "loco_laddr",
        syntax: Some("addr laddr"),
        help: "assign long address",
    },
    CommandSpec {
        id: CommandId::LocoCv1718,
        name: "loco_cv1718",
        syntax: Some("laddr"),
        help: "cv17/cv18 for long address",
    },
];

/// Resolve a command name to its identifier.
///
/// Case-sensitive linear scan in declaration order; `None` plays the role
/// of the "no command found" sentinel.
pub fn resolve(name: &str) -> Option<CommandId> {
    COMMANDS.iter().find(|spec| spec.name == name).map(|spec| spec.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_registered_name() {
        for spec in COMMANDS {
            assert_eq!(resolve(spec.name), Some(spec.id), "{}", spec.name);
        }
    }

    #[test]
    fn resolve_is_case_sensitive() {
        assert_eq!(resolve("HELP"), None);
        assert_eq!(resolve("Led"), None);
    }

    #[test]
    fn unknown_name_is_not_resolved() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("loco"), None);
        assert_eq!(resolve("loco_dir "), None);
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in COMMANDS.iter().enumerate() {
            for b in &COMMANDS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn parameterless_commands_carry_no_syntax() {
        for name in ["help", "board", "temp", "rbuf"] {
            let spec = COMMANDS.iter().find(|s| s.name == name).unwrap();
            assert!(spec.syntax.is_none(), "{name}");
        }
    }
}
