use std::fmt;

/// Why an alias could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasMissing {
    /// The client was created without an LED map.
    NoAliases,
    /// The LED map does not contain the alias.
    Unknown,
}

impl fmt::Display for AliasMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasMissing::NoAliases => f.write_str("no aliases are defined"),
            AliasMissing::Unknown => f.write_str("alias is not defined"),
        }
    }
}

/// Errors from resolving an LED reference to a protocol index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The alias is not in the configured LED map (or there is no map).
    #[error("cannot resolve LED alias {alias:?}: {reason}")]
    AliasNotFound { alias: String, reason: AliasMissing },

    /// The zero-based index does not address a connected LED.
    #[error("LED (zero-)index {index} out of range (only {count} LEDs are connected)")]
    OutOfRange { index: i64, count: usize },
}

/// Errors that can occur in client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level error (resolve, connect, socket options).
    #[error("transport error: {0}")]
    Transport(#[from] lightpack_transport::TransportError),

    /// Framing or stream I/O error.
    #[error("frame error: {0}")]
    Frame(#[from] lightpack_frame::FrameError),

    /// LED reference could not be resolved.
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// The response has no `<name>:<payload>` structure.
    #[error("malformed response to {command}: {response:?}")]
    MalformedResponse { command: String, response: String },

    /// The LED count payload is not a non-negative integer.
    #[error("invalid LED count in response: {response:?}")]
    InvalidLedCount { response: String },
}

impl ClientError {
    /// Whether the error came from a read or write timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            ClientError::Frame(err) => err.is_timeout(),
            ClientError::Transport(err) => matches!(
                err.io_kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }

    /// Whether the connection is unusable after this error.
    ///
    /// Address errors and rejected commands leave the connection intact; the
    /// caller can retry with a corrected argument.
    pub fn is_connection_error(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Frame(err) => {
                !matches!(err, lightpack_frame::FrameError::EmbeddedNewline(_))
            }
            _ => false,
        }
    }
}

/// Error parsing a colour from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour {input:?} (use #RRGGBB, r,g,b or a colour name): {reason}")]
pub struct ParseColorError {
    pub input: String,
    pub reason: String,
}

pub type Result<T> = std::result::Result<T, ClientError>;
