use std::io;
use std::time::Duration;
use thiserror::Error;

/// Custom error types for the UHPPOTE client
#[derive(Error, Debug)]
pub enum Error {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid date: {0}")]
    DateFormat(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid frame length - expected {expected} bytes, received {actual}")]
    Length { expected: usize, actual: usize },

    #[error("Invalid message type - expected {expected:#04x}, received {actual:#04x}")]
    MsgTypeMismatch { expected: u8, actual: u8 },

    #[error("Field at offset {offset} ({width} bytes) does not fit in the frame")]
    FieldOverflow { offset: usize, width: usize },

    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("No reply within {0:?}")]
    Timeout(Duration),

    #[error("Unexpected {field} in reply: {value}")]
    UnexpectedValue { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// Creates a new date format error
    pub fn date_format(msg: impl Into<String>) -> Self {
        Error::DateFormat(msg.into())
    }

    /// Creates a new encoding error
    pub fn encoding(msg: impl Into<String>) -> Self {
        Error::Encoding(msg.into())
    }

    /// Creates a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Wraps a socket error with a description of the step that failed
    pub fn transport(context: &'static str, source: io::Error) -> Self {
        Error::Transport { context, source }
    }

    /// Reports a reply field that decoded cleanly but holds a value the
    /// operation cannot accept
    pub fn unexpected(field: &'static str, value: impl ToString) -> Self {
        Error::UnexpectedValue {
            field,
            value: value.to_string(),
        }
    }

    /// True for the distinguished "device did not answer" condition
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::format("odd length");
        assert!(matches!(err, Error::Format(_)));
        assert_eq!(err.to_string(), "Format error: odd length");
    }

    #[test]
    fn test_socket_errors_carry_context() {
        let err = Error::transport(
            "Failed to bind UDP socket",
            io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        );
        assert!(matches!(
            err,
            Error::Transport { context: "Failed to bind UDP socket", ref source }
                if source.kind() == io::ErrorKind::AddrInUse
        ));
    }

    #[test]
    fn test_mismatch_message() {
        let err = Error::MsgTypeMismatch {
            expected: 0x52,
            actual: 0x94,
        };
        assert_eq!(
            err.to_string(),
            "Invalid message type - expected 0x52, received 0x94"
        );
    }

    #[test]
    fn test_unexpected_value() {
        let err = Error::unexpected("unit", "0x02");
        assert_eq!(err.to_string(), "Unexpected unit in reply: 0x02");
        assert!(!err.is_timeout());
        assert!(Error::Timeout(Duration::from_millis(5000)).is_timeout());
    }

    #[test]
    fn test_transport_source() {
        use std::error::Error as _;

        let err = Error::transport(
            "Failed to write to UDP socket",
            io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Failed to write to UDP socket"));
    }
}
