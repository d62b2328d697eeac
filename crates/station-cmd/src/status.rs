//! The closed result-code enumeration.
//!
//! Every handler produces a [`CmdStatus`]. [`CmdStatus::Ok`] means the
//! handler already wrote its success response; anything else makes the
//! dispatcher write a single error line carrying the fixed token below.
//! Command outcomes never surface as `Error` values or panics.

use std::fmt;

/// Outcome of one command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdStatus {
    /// Success; the handler wrote the response.
    Ok,
    /// Token 0 matched no command in the table.
    InvalidCommand,
    /// Parameter count outside the handler's declared range.
    InvalidParamCount,
    /// A parameter failed to parse or failed a domain check.
    InvalidParam,
    /// The refresh buffer declined the write.
    NoChange,
    /// A query found no matching record.
    NoData,
    /// The command is registered but has no handler.
    NotImplemented,
}

impl CmdStatus {
    /// The fixed protocol token for this result code.
    pub fn token(&self) -> &'static str {
        match self {
            CmdStatus::Ok => "ok",
            CmdStatus::InvalidCommand => "inv_cmd",
            CmdStatus::InvalidParamCount => "inv_num_prm",
            CmdStatus::InvalidParam => "inv_prm",
            CmdStatus::NoChange => "no_change",
            CmdStatus::NoData => "no_data",
            CmdStatus::NotImplemented => "not_impl",
        }
    }
}

impl fmt::Display for CmdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
