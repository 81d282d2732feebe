use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use lightpack_transport::TcpConnection;

use crate::codec::{encode_command, FrameConfig};
use crate::error::{FrameError, Result};
use crate::reader::transport_to_frame_error;

const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Writes newline-terminated commands to any `Write` stream.
pub struct LineWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> LineWriter<T> {
    /// Create a new line writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Encode and send a command, then flush.
    ///
    /// The command is validated before anything is written, so a rejected
    /// command leaves the stream untouched.
    pub fn send(&mut self, command: &str) -> Result<()> {
        self.buf.clear();
        encode_command(command, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl LineWriter<TcpConnection> {
    /// Create a line writer for `TcpConnection` and apply write timeout from config.
    pub fn with_config_tcp(inner: TcpConnection, config: &FrameConfig) -> Result<Self> {
        inner
            .set_write_timeout(config.write_timeout)
            .map_err(transport_to_frame_error)?;
        Ok(Self::new(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_appends_newline() {
        let mut writer = LineWriter::new(Vec::new());
        writer.send("getprofiles").unwrap();
        writer.send("setstatus:on").unwrap();
        assert_eq!(writer.get_ref().as_slice(), b"getprofiles\nsetstatus:on\n");
    }

    #[test]
    fn rejected_command_writes_nothing() {
        let mut writer = LineWriter::new(Vec::new());
        let err = writer.send("setprofile:x\nunlock").unwrap_err();
        assert!(matches!(err, FrameError::EmbeddedNewline(_)));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn short_writes_are_completed() {
        let mut writer = LineWriter::new(OneBytePerWrite::default());
        writer.send("setcolor:1-255,0,0").unwrap();
        assert_eq!(writer.get_ref().written, b"setcolor:1-255,0,0\n");
        assert_eq!(writer.get_ref().flushes, 1);
    }

    #[test]
    fn zero_write_means_closed() {
        let mut writer = LineWriter::new(ClosedSink);
        let err = writer.send("lock").unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn broken_pipe_propagates() {
        let mut writer = LineWriter::new(BrokenPipe);
        let err = writer.send("lock").unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
    }

    #[derive(Default)]
    struct OneBytePerWrite {
        written: Vec<u8>,
        flushes: usize,
    }

    impl Write for OneBytePerWrite {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            match buf.first() {
                Some(b) => {
                    self.written.push(*b);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
