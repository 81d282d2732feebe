/// Errors that can occur while framing commands or reading responses.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The command contains a line break and would be split into several commands.
    #[error("command contains an embedded line break: {0:?}")]
    EmbeddedNewline(String),

    /// No line terminator arrived within the configured maximum line length.
    #[error("response line too long ({size} bytes, max {max})")]
    LineTooLong { size: usize, max: usize },

    /// An I/O error occurred while reading or writing.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The daemon closed the connection before a response was received.
    #[error("connection closed by daemon")]
    ConnectionClosed,
}

impl FrameError {
    /// Whether this error is a read or write timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            FrameError::Io(err)
                if matches!(err.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock)
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
