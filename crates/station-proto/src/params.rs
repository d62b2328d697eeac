//! Parameter codec: text tokens to typed values.
//!
//! All parsers are pure and total over their input -- a failed parse
//! returns `None` and never touches any state. The command handlers map
//! `None` to the `inv_prm` result code.
//!
//! Booleans are serialized as the single-character literals [`PROT_TRUE`]
//! and [`PROT_FALSE`]; ternary parameters additionally accept
//! [`PROT_TOGGLE`].

/// Protocol literal for `true`.
pub const PROT_TRUE: &str = "t";

/// Protocol literal for `false`.
pub const PROT_FALSE: &str = "f";

/// Protocol literal for `toggle` (ternary parameters only).
pub const PROT_TOGGLE: &str = "~";

/// The three-valued set/clear/toggle parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ternary {
    /// Clear the attribute.
    False,
    /// Set the attribute.
    True,
    /// Flip the attribute's current value.
    Toggle,
}

/// Parse a boolean parameter.
///
/// Accepts exactly the two canonical literals; anything else fails.
///
/// # Example
///
/// ```
/// use station_proto::params::parse_bool;
///
/// assert_eq!(parse_bool("t"), Some(true));
/// assert_eq!(parse_bool("f"), Some(false));
/// assert_eq!(parse_bool("true"), None);
/// ```
pub fn parse_bool(token: &str) -> Option<bool> {
    match token {
        PROT_TRUE => Some(true),
        PROT_FALSE => Some(false),
        _ => None,
    }
}

/// Parse a ternary (set/clear/toggle) parameter.
pub fn parse_ternary(token: &str) -> Option<Ternary> {
    match token {
        PROT_FALSE => Some(Ternary::False),
        PROT_TRUE => Some(Ternary::True),
        PROT_TOGGLE => Some(Ternary::Toggle),
        _ => None,
    }
}

/// Parse a non-negative decimal integer.
///
/// Fails on empty input, non-digit characters, a leading sign, or overflow.
pub fn parse_uint(token: &str) -> Option<u16> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<u16>().ok()
}

/// Parse a single byte (0-255) from decimal text.
pub fn parse_byte(token: &str) -> Option<u8> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<u8>().ok()
}

/// Serialize a boolean as its protocol literal.
pub fn bool_char(on: bool) -> &'static str {
    if on {
        PROT_TRUE
    } else {
        PROT_FALSE
    }
}

/// Split a request line into its tokens.
///
/// Tokens are separated by runs of spaces; leading and trailing whitespace
/// is ignored. Token 0 is the command name.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_ascii_whitespace().collect()
}
