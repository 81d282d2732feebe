use std::fmt;
use std::time::Duration;

use lightpack_frame::{FrameConfig, Framing, DEFAULT_MAX_LINE_LEN};
use lightpack_transport::{DEFAULT_HOST, DEFAULT_PORT};

use crate::led::LedMap;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for a [`Client`](crate::Client).
#[derive(Clone)]
pub struct ClientConfig {
    /// Daemon host name or IP. Default: `localhost`.
    pub host: String,
    /// Daemon TCP port. Default: 3636.
    pub port: u16,
    /// LED aliases. Without a map, alias references cannot be resolved.
    pub led_map: Option<LedMap>,
    /// API key sent once after the greeting.
    /// Treated as credential material and redacted in debug output.
    pub api_key: Option<String>,
    /// Bound on each TCP connect attempt. `None` waits for the OS.
    pub connect_timeout: Option<Duration>,
    /// Bound on each blocking read. `None` blocks forever.
    pub read_timeout: Option<Duration>,
    /// Bound on each blocking write. `None` blocks forever.
    pub write_timeout: Option<Duration>,
    /// How a response is delimited on the read side.
    pub framing: Framing,
    /// Longest response line accepted in [`Framing::Line`] mode.
    pub max_line_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            led_map: None,
            api_key: None,
            connect_timeout: Some(DEFAULT_TIMEOUT),
            read_timeout: Some(DEFAULT_TIMEOUT),
            write_timeout: Some(DEFAULT_TIMEOUT),
            framing: Framing::default(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_led_map(mut self, led_map: LedMap) -> Self {
        self.led_map = Some(led_map);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Apply the same bound to connect, read and write.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self.read_timeout = timeout;
        self.write_timeout = timeout;
        self
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    /// Codec settings derived from this configuration.
    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            framing: self.framing,
            max_line_len: self.max_line_len,
            read_timeout: self.read_timeout,
            write_timeout: self.write_timeout,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("ClientConfig");
        dbg.field("host", &self.host)
            .field("port", &self.port)
            .field("led_map", &self.led_map);
        if let Some(key) = &self.api_key {
            dbg.field("api_key", &format_args!("<redacted:{} bytes>", key.len()));
        } else {
            dbg.field("api_key", &Option::<String>::None);
        }
        dbg.field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .field("framing", &self.framing)
            .field("max_line_len", &self.max_line_len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_daemon_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3636);
        assert!(config.led_map.is_none());
        assert!(config.api_key.is_none());
        assert_eq!(config.framing, Framing::Line);
    }

    #[test]
    fn builder_sets_fields() {
        let config = ClientConfig::new("10.0.0.5", 4000)
            .with_led_map(LedMap::new(["a"]))
            .with_api_key("k")
            .with_timeout(None)
            .with_framing(Framing::SingleRead);
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 4000);
        assert_eq!(config.led_map.as_ref().map(LedMap::len), Some(1));
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.read_timeout, None);

        let frame = config.frame_config();
        assert_eq!(frame.framing, Framing::SingleRead);
        assert_eq!(frame.write_timeout, None);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ClientConfig::default().with_api_key("{hunter2}");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted:9 bytes>"));
    }
}
