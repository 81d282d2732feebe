use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use lightpack_transport::TcpConnection;
use tracing::trace;

use crate::codec::{decode_line, trim_line_ending, FrameConfig, Framing, READ_CHUNK_SIZE};
use crate::error::{FrameError, Result};

/// Reads response lines from any `Read` stream.
pub struct LineReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> LineReader<T> {
    /// Create a new line reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new line reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(READ_CHUNK_SIZE),
            config,
        }
    }

    /// Read the next response (blocking), without its trailing CR/LF.
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached before
    /// any response byte arrived.
    pub fn read_response(&mut self) -> Result<String> {
        match self.config.framing {
            Framing::Line => self.read_line(),
            Framing::SingleRead => self.read_once(),
        }
    }

    fn read_line(&mut self) -> Result<String> {
        loop {
            if let Some(line) = decode_line(&mut self.buf, self.config.max_line_len)? {
                return Ok(line);
            }

            let read = self.fill()?;
            if read == 0 {
                if self.buf.is_empty() {
                    return Err(FrameError::ConnectionClosed);
                }
                // Daemon closed mid-line; hand back what it did send.
                let rest = self.buf.split();
                let text = String::from_utf8_lossy(&rest);
                return Ok(trim_line_ending(&text).to_string());
            }
        }
    }

    fn read_once(&mut self) -> Result<String> {
        if self.buf.is_empty() {
            let read = self.fill()?;
            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }
        }
        let chunk = self.buf.split();
        let text = String::from_utf8_lossy(&chunk);
        Ok(trim_line_ending(&text).to_string())
    }

    fn fill(&mut self) -> Result<usize> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            match self.inner.read(&mut chunk) {
                Ok(n) => {
                    trace!(bytes = n, "read from daemon");
                    self.buf.extend_from_slice(&chunk[..n]);
                    return Ok(n);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current line reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl LineReader<TcpConnection> {
    /// Create a line reader for `TcpConnection` and apply read timeout from config.
    pub fn with_config_tcp(inner: TcpConnection, config: FrameConfig) -> Result<Self> {
        inner
            .set_read_timeout(config.read_timeout)
            .map_err(transport_to_frame_error)?;
        Ok(Self::with_config(inner, config))
    }
}

pub(crate) fn transport_to_frame_error(err: lightpack_transport::TransportError) -> FrameError {
    match err {
        lightpack_transport::TransportError::Io(io)
        | lightpack_transport::TransportError::Resolve { source: io, .. }
        | lightpack_transport::TransportError::Connect { source: io, .. } => FrameError::Io(io),
    }
}
