//! Error types for the command station.
//!
//! All fallible operations across the workspace return [`Result<T>`], which
//! uses [`Error`] as the error type. Note that command-level outcomes
//! (invalid parameter, no data, ...) are not errors -- they are result codes
//! carried on the protocol surface by `station-cmd`. `Error` covers the
//! infrastructure failure modes underneath.

/// The error type for all station operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port, pseudo-terminal).
    #[error("transport error: {0}")]
    Transport(String),

    /// A protocol-level error (malformed request line, oversized frame).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Timed out waiting for data on the transport.
    #[error("timeout waiting for data")]
    Timeout,

    /// No connection has been established.
    #[error("not connected")]
    NotConnected,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_transport() {
        let e = Error::Transport("port busy".into());
        assert_eq!(e.to_string(), "transport error: port busy");
    }

    #[test]
    fn error_display_protocol() {
        let e = Error::Protocol("request line too long".into());
        assert_eq!(e.to_string(), "protocol error: request line too long");
    }

    #[test]
    fn error_display_timeout() {
        let e = Error::Timeout;
        assert_eq!(e.to_string(), "timeout waiting for data");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }
}
