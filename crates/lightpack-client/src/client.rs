use std::fmt::Display;
use std::io::{Read, Write};

use lightpack_frame::{FrameError, LineReader, LineWriter, Response};
use lightpack_transport::TcpConnection;
use tracing::{debug, warn};

use crate::color::ToRgb255;
use crate::command;
use crate::error::{ClientError, Result};
use crate::led::{resolve_alias, resolve_index, LedMap, LedRef};

/// A connected Lightpack client.
///
/// Created by [`connect`](crate::connect) or
/// [`connect_with_config`](crate::connect_with_config); consumed by
/// [`disconnect`](Client::disconnect). Each command is one blocking write
/// followed by one blocking read.
pub struct Client<T = TcpConnection> {
    reader: LineReader<T>,
    writer: LineWriter<T>,
    led_map: Option<LedMap>,
    count_leds: Option<usize>,
    greeting: String,
    broken: bool,
}

impl<T: Read + Write> Client<T> {
    pub(crate) fn from_parts(
        reader: LineReader<T>,
        writer: LineWriter<T>,
        led_map: Option<LedMap>,
        greeting: String,
    ) -> Self {
        Self {
            reader,
            writer,
            led_map,
            count_leds: None,
            greeting,
            broken: false,
        }
    }

    /// The greeting line the daemon sent on connect.
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// The LED aliases this client resolves.
    pub fn led_map(&self) -> Option<&LedMap> {
        self.led_map.as_ref()
    }

    /// The LED count from the most recent `getcountleds`, if any.
    pub fn cached_led_count(&self) -> Option<usize> {
        self.count_leds
    }

    /// Send a raw command and return the raw response without its CR/LF.
    ///
    /// Server-reported failures are not interpreted.
    ///
    /// After a failed read or write (including a timeout) the stream may hold
    /// a late reply, so the client refuses every later command with
    /// [`FrameError::ConnectionClosed`].
    pub fn send_command(&mut self, command: &str) -> Result<String> {
        if self.broken {
            return Err(FrameError::ConnectionClosed.into());
        }
        debug!(command = %command::redacted(command), "sending command");
        match self.exchange(command) {
            Ok(response) => {
                debug!(%response, "received response");
                Ok(response)
            }
            Err(err) => {
                if !matches!(err, FrameError::EmbeddedNewline(_)) {
                    warn!(error = %err, "connection out of step; refusing further commands");
                    self.broken = true;
                }
                Err(err.into())
            }
        }
    }

    fn exchange(&mut self, command: &str) -> std::result::Result<String, FrameError> {
        self.writer.send(command)?;
        self.reader.read_response()
    }

    /// Whether an earlier read or write failed and the client no longer
    /// sends commands.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Send a command whose response carries nothing the caller needs.
    fn execute(&mut self, command: &str) -> Result<()> {
        self.send_command(command).map(drop)
    }

    fn query(&mut self, command: &str) -> Result<Response> {
        self.send_command(command).map(Response::new)
    }

    fn query_payload(&mut self, command: &str) -> Result<String> {
        let response = self.query(command)?;
        match response.payload() {
            Some(payload) => Ok(payload.to_string()),
            None => Err(malformed(command, response)),
        }
    }

    /// Names of all profiles known to the daemon, in daemon order.
    pub fn get_profiles(&mut self) -> Result<Vec<String>> {
        let response = self.query(command::GET_PROFILES)?;
        match response.items() {
            Some(items) => Ok(items.into_iter().map(str::to_string).collect()),
            None => Err(malformed(command::GET_PROFILES, response)),
        }
    }

    /// Name of the active profile.
    pub fn get_profile(&mut self) -> Result<String> {
        self.query_payload(command::GET_PROFILE)
    }

    /// Device status, `on` or `off` by convention.
    pub fn get_status(&mut self) -> Result<String> {
        self.query_payload(command::GET_STATUS)
    }

    /// Status of the API, e.g. `idle` or `busy`.
    pub fn get_api_status(&mut self) -> Result<String> {
        self.query_payload(command::GET_API_STATUS)
    }

    /// Number of LEDs the device drives.
    ///
    /// With `fresh` set, or when nothing is cached yet, the daemon is asked and
    /// the cache replaced. Otherwise the cached value is returned without any
    /// traffic.
    pub fn get_count_leds(&mut self, fresh: bool) -> Result<usize> {
        if let (false, Some(count)) = (fresh, self.count_leds) {
            return Ok(count);
        }
        let payload = self.query_payload(command::GET_COUNT_LEDS)?;
        let count = payload
            .trim()
            .parse::<usize>()
            .map_err(|_| ClientError::InvalidLedCount { response: payload })?;
        self.count_leds = Some(count);
        Ok(count)
    }

    /// Resolve an LED reference to its one-based protocol index.
    ///
    /// Index references are bounds-checked against the cached LED count,
    /// which is fetched first if nothing is cached.
    pub fn resolve_led(&mut self, led: &LedRef) -> Result<usize> {
        match led {
            LedRef::Alias(alias) => Ok(resolve_alias(self.led_map.as_ref(), alias)?),
            LedRef::Index(index) => {
                let count = self.get_count_leds(false)?;
                Ok(resolve_index(*index, count)?)
            }
        }
    }

    fn color_def(&mut self, led: LedRef, rgb: &impl ToRgb255) -> Result<String> {
        let index = self.resolve_led(&led)?;
        Ok(command::color_def(index, rgb.to_rgb255()))
    }

    /// Set one LED.
    pub fn set_color(&mut self, led: impl Into<LedRef>, rgb: impl ToRgb255) -> Result<()> {
        let def = self.color_def(led.into(), &rgb)?;
        self.execute(&command::set_color(&[def]))
    }

    /// Set several LEDs with one `setcolor` round trip.
    ///
    /// Every reference is resolved before anything is sent; one bad
    /// reference means nothing is sent.
    pub fn set_colors<I, L, C>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<LedRef>,
        C: ToRgb255,
    {
        let defs = pairs
            .into_iter()
            .map(|(led, rgb)| self.color_def(led.into(), &rgb))
            .collect::<Result<Vec<_>>>()?;
        self.execute(&command::set_color(&defs))
    }

    /// Set every LED (per the cached count) to one colour, in one round trip.
    pub fn set_color_to_all(&mut self, rgb: impl ToRgb255) -> Result<()> {
        let count = self.get_count_leds(false)?;
        let rgb = rgb.to_rgb255();
        let defs = (0..count)
            .map(|i| command::color_def(i + 1, rgb))
            .collect::<Vec<_>>();
        self.execute(&command::set_color(&defs))
    }

    /// Alias of [`set_color`](Client::set_color).
    pub fn set_colour(&mut self, led: impl Into<LedRef>, rgb: impl ToRgb255) -> Result<()> {
        self.set_color(led, rgb)
    }

    /// Alias of [`set_colors`](Client::set_colors).
    pub fn set_colours<I, L, C>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<LedRef>,
        C: ToRgb255,
    {
        self.set_colors(pairs)
    }

    /// Alias of [`set_color_to_all`](Client::set_color_to_all).
    pub fn set_colour_to_all(&mut self, rgb: impl ToRgb255) -> Result<()> {
        self.set_color_to_all(rgb)
    }

    pub fn set_gamma(&mut self, gamma: impl Display) -> Result<()> {
        self.execute(&command::with_arg(command::SET_GAMMA, gamma))
    }

    pub fn set_smooth(&mut self, smooth: impl Display) -> Result<()> {
        self.execute(&command::with_arg(command::SET_SMOOTH, smooth))
    }

    pub fn set_brightness(&mut self, brightness: impl Display) -> Result<()> {
        self.execute(&command::with_arg(command::SET_BRIGHTNESS, brightness))
    }

    /// Activate a profile by name.
    pub fn set_profile(&mut self, profile: &str) -> Result<()> {
        self.execute(&command::with_arg(command::SET_PROFILE, profile))
    }

    /// Take control of the LEDs.
    ///
    /// While locked the daemon stops its own updates (screen capture, moods)
    /// so colours set by this client stay put.
    pub fn lock(&mut self) -> Result<()> {
        self.execute(command::LOCK)
    }

    /// Release control back to the daemon.
    pub fn unlock(&mut self) -> Result<()> {
        self.execute(command::UNLOCK)
    }

    pub fn turn_on(&mut self) -> Result<()> {
        self.execute(&command::with_arg(command::SET_STATUS, command::STATUS_ON))
    }

    pub fn turn_off(&mut self) -> Result<()> {
        self.execute(&command::with_arg(command::SET_STATUS, command::STATUS_OFF))
    }

    /// Unlock, then close the connection.
    ///
    /// The unlock is best-effort: a daemon that was never locked, or a
    /// connection that already failed, does not make this fail.
    pub fn disconnect(mut self) {
        if self.broken {
            debug!("skipping unlock on a failed connection");
        } else if let Err(err) = self.unlock() {
            warn!(error = %err, "unlock during disconnect failed");
        }
        drop(self.reader.into_inner());
        drop(self.writer.into_inner());
        debug!("disconnected from lightpack daemon");
    }
}

impl Client<TcpConnection> {
    /// Address of the daemon.
    pub fn peer_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(self.reader.get_ref().peer_addr()?)
    }
}

impl<T> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("greeting", &self.greeting)
            .field("led_map", &self.led_map)
            .field("count_leds", &self.count_leds)
            .field("broken", &self.broken)
            .finish_non_exhaustive()
    }
}

fn malformed(command: &str, response: Response) -> ClientError {
    ClientError::MalformedResponse {
        command: command.to_string(),
        response: response.into_string(),
    }
}
