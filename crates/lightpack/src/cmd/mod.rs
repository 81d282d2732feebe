use std::time::Duration;

use clap::{Args, Subcommand};
use lightpack_client::{Client, ClientConfig, Framing, LedMap, LedRef, Rgb};

use crate::exit::{client_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod color;
pub mod device;
pub mod query;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List profile names.
    Profiles,
    /// Show the active profile.
    Profile,
    /// Show whether the device is on or off.
    Status,
    /// Show the number of LEDs.
    Count,
    /// Show the API status (idle or busy).
    ApiStatus,
    /// Show everything the daemon reports in one snapshot.
    Info,
    /// Set individual LEDs, e.g. `0=#ff0000 top=0,0,255`.
    SetColor(SetColorArgs),
    /// Set every LED to one colour.
    Fill(FillArgs),
    /// Set gamma correction.
    Gamma(ValueArgs),
    /// Set smoothing.
    Smooth(ValueArgs),
    /// Set brightness.
    Brightness(ValueArgs),
    /// Activate a profile.
    UseProfile(UseProfileArgs),
    /// Turn the LEDs on.
    On,
    /// Turn the LEDs off.
    Off,
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Version(args) => version::run(args),
        Command::Profiles => query::profiles(connection, format),
        Command::Profile => query::profile(connection, format),
        Command::Status => query::status(connection, format),
        Command::Count => query::count(connection, format),
        Command::ApiStatus => query::api_status(connection, format),
        Command::Info => query::info(connection, format),
        Command::SetColor(args) => color::set_color(args, connection, format),
        Command::Fill(args) => color::fill(args, connection, format),
        Command::Gamma(args) => device::gamma(args, connection, format),
        Command::Smooth(args) => device::smooth(args, connection, format),
        Command::Brightness(args) => device::brightness(args, connection, format),
        Command::UseProfile(args) => device::use_profile(args, connection, format),
        Command::On => device::turn_on(connection, format),
        Command::Off => device::turn_off(connection, format),
    }
}

/// Where the daemon is and how to talk to it.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Daemon host name or IP.
    #[arg(long, global = true, env = "LIGHTPACK_HOST", default_value = "localhost")]
    pub host: String,
    /// Daemon TCP port.
    #[arg(long, global = true, env = "LIGHTPACK_PORT", default_value_t = 3636)]
    pub port: u16,
    /// API key, if the daemon requires one.
    #[arg(long, global = true, env = "LIGHTPACK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// LED aliases in LED order (comma-separated).
    #[arg(
        long,
        global = true,
        env = "LIGHTPACK_LED_MAP",
        value_delimiter = ','
    )]
    pub led_map: Option<Vec<String>>,
    /// Connect/read/write timeout (e.g. 5s, 500ms).
    #[arg(long, global = true, default_value = "5s")]
    pub timeout: String,
    /// Treat one socket read as a whole response instead of reading to end of line.
    #[arg(long, global = true)]
    pub single_read: bool,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> CliResult<ClientConfig> {
        let timeout = parse_duration(&self.timeout)?;
        let mut config = ClientConfig::new(&self.host, self.port).with_timeout(Some(timeout));
        if let Some(aliases) = &self.led_map {
            config = config.with_led_map(LedMap::new(aliases.iter().map(|a| a.trim())));
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        if self.single_read {
            config = config.with_framing(Framing::SingleRead);
        }
        Ok(config)
    }

    pub fn connect(&self) -> CliResult<Client> {
        let config = self.to_config()?;
        lightpack_client::connect_with_config(&config)
            .map_err(|err| client_error("connect failed", err))
    }
}

/// `LED=COLOR`, where LED is a zero-based index or an alias.
#[derive(Debug, Clone, PartialEq)]
pub struct LedAssignment {
    pub led: LedRef,
    pub color: Rgb,
}

fn parse_assignment(input: &str) -> Result<LedAssignment, String> {
    let (led, color) = input
        .split_once('=')
        .ok_or_else(|| format!("expected LED=COLOR, got {input:?}"))?;
    let led = led.trim();
    if led.is_empty() {
        return Err(format!("missing LED in {input:?}"));
    }
    let Ok(led) = led.parse::<LedRef>();
    let color = color.parse::<Rgb>().map_err(|err| err.to_string())?;
    Ok(LedAssignment { led, color })
}

#[derive(Args, Debug)]
pub struct SetColorArgs {
    /// LED assignments: `LED=COLOR` (COLOR is #RRGGBB, r,g,b or a name).
    #[arg(required = true, value_name = "LED=COLOR", value_parser = parse_assignment)]
    pub assignments: Vec<LedAssignment>,
    /// Keep the lock (and the colours) until Ctrl-C.
    #[arg(long)]
    pub hold: bool,
}

#[derive(Args, Debug)]
pub struct FillArgs {
    /// Colour for every LED (#RRGGBB, r,g,b or a name).
    pub color: Rgb,
    /// Keep the lock (and the colours) until Ctrl-C.
    #[arg(long)]
    pub hold: bool,
}

#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Value passed to the daemon as-is.
    pub value: String,
}

#[derive(Args, Debug)]
pub struct UseProfileArgs {
    /// Profile name.
    pub name: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn parse_assignment_index_and_alias() {
        assert_eq!(
            parse_assignment("0=#ff0000").unwrap(),
            LedAssignment {
                led: LedRef::Index(0),
                color: Rgb::new(255, 0, 0),
            }
        );
        assert_eq!(
            parse_assignment("top=0,0,255").unwrap(),
            LedAssignment {
                led: LedRef::Alias("top".into()),
                color: Rgb::new(0, 0, 255),
            }
        );
    }

    #[test]
    fn parse_assignment_rejects_malformed() {
        assert!(parse_assignment("0").is_err());
        assert!(parse_assignment("=red").is_err());
        assert!(parse_assignment("0=nope").is_err());
    }

    #[test]
    fn connection_args_build_config() {
        let args = ConnectionArgs {
            host: "10.0.0.2".into(),
            port: 4000,
            api_key: Some("k".into()),
            led_map: Some(vec!["left".into(), " right".into()]),
            timeout: "250ms".into(),
            single_read: true,
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.host, "10.0.0.2");
        assert_eq!(config.port, 4000);
        assert_eq!(config.read_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.framing, Framing::SingleRead);
        assert_eq!(
            config.led_map.unwrap().aliases(),
            ["left".to_string(), "right".to_string()]
        );
    }
}
