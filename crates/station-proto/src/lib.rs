//! station-proto: the textual command protocol.
//!
//! A request is one line of space-separated tokens; token 0 is the command
//! name, tokens 1..N are parameters. Responses are single success or error
//! lines, or multi-line diagnostic blocks closed by an end-of-response
//! marker. This crate owns the pure text layer: parameter parsing and
//! response framing. Framing of request lines on the wire (LF termination)
//! belongs to the transport side.
//!
//! # Modules
//!
//! - [`params`] -- boolean / unsigned / byte / ternary parsers and the
//!   protocol literals
//! - [`response`] -- success, error, multi-line, and end-of-response writing

pub mod params;
pub mod response;

pub use params::{
    bool_char, parse_bool, parse_byte, parse_ternary, parse_uint, tokenize, Ternary, PROT_FALSE,
    PROT_TOGGLE, PROT_TRUE,
};
pub use response::{ResponseWriter, EOR_MARKER, ERROR_MARKER, SUCCESS_MARKER};
