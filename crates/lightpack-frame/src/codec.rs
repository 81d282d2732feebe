use std::time::Duration;

use bytes::{BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// Size of a single blocking read from the daemon.
pub const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Default cap on a buffered response line in [`Framing::Line`] mode: 64 KiB.
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// How the reader decides that a response is complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// Keep reading until a `\n` terminator has been buffered.
    ///
    /// Bytes that follow the terminator are kept for the next response.
    #[default]
    Line,
    /// Perform exactly one read of up to [`READ_CHUNK_SIZE`] bytes and treat
    /// whatever arrived as the whole response.
    ///
    /// Responses larger than one chunk, or split across TCP segments, are
    /// truncated in this mode.
    SingleRead,
}

/// Configuration for the line codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Response delimiting strategy. Default: [`Framing::Line`].
    pub framing: Framing,
    /// Maximum buffered line length in bytes. Default: 64 KiB.
    pub max_line_len: usize,
    /// Read timeout for blocking operations.
    pub read_timeout: Option<Duration>,
    /// Write timeout for blocking operations.
    pub write_timeout: Option<Duration>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            framing: Framing::default(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

/// Encode a command into the wire format (`<command>\n`).
///
/// Commands must not contain `\r` or `\n`; the daemon would execute each line
/// as its own command.
pub fn encode_command(command: &str, dst: &mut BytesMut) -> Result<()> {
    if command.contains(['\r', '\n']) {
        return Err(FrameError::EmbeddedNewline(command.to_string()));
    }
    dst.reserve(command.len() + 1);
    dst.put_slice(command.as_bytes());
    dst.put_u8(b'\n');
    Ok(())
}

/// Decode one line from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a terminator yet.
/// On success, consumes the line (and its terminator) from the buffer and
/// returns it without trailing CR/LF.
pub fn decode_line(src: &mut BytesMut, max_line_len: usize) -> Result<Option<String>> {
    let Some(pos) = src.iter().position(|b| *b == b'\n') else {
        if src.len() > max_line_len {
            return Err(FrameError::LineTooLong {
                size: src.len(),
                max: max_line_len,
            });
        }
        return Ok(None);
    };

    if pos > max_line_len {
        return Err(FrameError::LineTooLong {
            size: pos,
            max: max_line_len,
        });
    }

    let line = src.split_to(pos + 1);
    let text = String::from_utf8_lossy(&line);
    Ok(Some(trim_line_ending(&text).to_string()))
}

/// Strip every trailing `\r` and `\n`.
pub fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// A single response line from the daemon.
///
/// Responses look like `<name>:<payload>`. Only the first `:` separates the
/// name; the payload may itself contain colons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    raw: String,
}

impl Response {
    /// Wrap a response line (already stripped of its terminator).
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The full response line.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consume the response and return the raw line.
    pub fn into_string(self) -> String {
        self.raw
    }

    /// The part before the first `:`, if the line has one.
    pub fn name(&self) -> Option<&str> {
        self.raw.split_once(':').map(|(name, _)| name)
    }

    /// The part after the first `:`, if the line has one.
    pub fn payload(&self) -> Option<&str> {
        self.raw.split_once(':').map(|(_, payload)| payload)
    }

    /// The payload as a `;`-separated list.
    ///
    /// Trailing `;` separators are ignored. An empty payload is an empty list.
    pub fn items(&self) -> Option<Vec<&str>> {
        let payload = self.payload()?;
        let payload = payload.trim_end_matches(';');
        if payload.is_empty() {
            return Some(Vec::new());
        }
        Some(payload.split(';').collect())
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for Response {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_appends_newline() {
        let mut buf = BytesMut::new();
        encode_command("setcolor:1-255,0,0", &mut buf).unwrap();
        assert_eq!(buf.as_ref(), b"setcolor:1-255,0,0\n");
    }

    #[test]
    fn encode_rejects_embedded_newline() {
        let mut buf = BytesMut::new();
        let err = encode_command("setprofile:a\nlock", &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::EmbeddedNewline(_)));
        assert!(buf.is_empty());

        let err = encode_command("lock\r", &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::EmbeddedNewline(_)));
    }

    #[test]
    fn decode_strips_crlf_and_keeps_remainder() {
        let mut buf = BytesMut::from(&b"getstatus:on\r\ngetprofile:Mov"[..]);
        let line = decode_line(&mut buf, DEFAULT_MAX_LINE_LEN).unwrap();
        assert_eq!(line.as_deref(), Some("getstatus:on"));
        assert_eq!(buf.as_ref(), b"getprofile:Mov");

        assert_eq!(decode_line(&mut buf, DEFAULT_MAX_LINE_LEN).unwrap(), None);
    }

    #[test]
    fn decode_bare_lf() {
        let mut buf = BytesMut::from(&b"ok\n"[..]);
        let line = decode_line(&mut buf, DEFAULT_MAX_LINE_LEN).unwrap();
        assert_eq!(line.as_deref(), Some("ok"));
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_rejects_unterminated_oversized_line() {
        let mut buf = BytesMut::from(&[b'a'; 32][..]);
        let err = decode_line(&mut buf, 16).unwrap_err();
        assert!(matches!(err, FrameError::LineTooLong { size: 32, max: 16 }));
    }

    #[test]
    fn trim_only_touches_the_end() {
        assert_eq!(trim_line_ending("\r\nok\r\n\r\n"), "\r\nok");
        assert_eq!(trim_line_ending("ok"), "ok");
    }

    #[test]
    fn response_payload_splits_on_first_colon() {
        let resp = Response::new("getprofile:Movie: dark room");
        assert_eq!(resp.name(), Some("getprofile"));
        assert_eq!(resp.payload(), Some("Movie: dark room"));
    }

    #[test]
    fn response_without_separator() {
        let resp = Response::new("ok");
        assert_eq!(resp.name(), None);
        assert_eq!(resp.payload(), None);
        assert_eq!(resp.items(), None);
    }

    #[test]
    fn response_items_drop_trailing_separators() {
        let resp = Response::new("getprofiles:Movie;Game;Default;");
        assert_eq!(resp.items().unwrap(), vec!["Movie", "Game", "Default"]);

        let resp = Response::new("getprofiles:Movie;Game;;");
        assert_eq!(resp.items().unwrap(), vec!["Movie", "Game"]);

        let resp = Response::new("getprofiles:Movie;Game");
        assert_eq!(resp.items().unwrap(), vec!["Movie", "Game"]);
    }

    #[test]
    fn response_items_empty_payload() {
        assert_eq!(Response::new("getprofiles:").items().unwrap(), Vec::<&str>::new());
        assert_eq!(Response::new("getprofiles:;").items().unwrap(), Vec::<&str>::new());
        assert_eq!(Response::new("getprofiles:;;").items().unwrap(), Vec::<&str>::new());
    }
}
