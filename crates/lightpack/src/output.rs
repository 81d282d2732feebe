use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct QueryOutput<'a, V: Serialize> {
    command: &'a str,
    value: V,
}

#[derive(Serialize)]
struct AckOutput<'a> {
    command: &'a str,
    ok: bool,
}

/// Everything the daemon reports about the device in one snapshot.
#[derive(Serialize)]
pub struct DeviceInfo {
    pub host: String,
    pub port: u16,
    pub greeting: String,
    pub status: String,
    pub api_status: String,
    pub profile: String,
    pub profiles: Vec<String>,
    pub led_count: usize,
}

pub fn print_value(command: &str, value: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&QueryOutput { command, value }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["COMMAND", "VALUE"]);
            table.add_row(vec![command, value]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{command}: {value}"),
        OutputFormat::Raw => println!("{value}"),
    }
}

pub fn print_count(command: &str, value: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&QueryOutput { command, value }),
        _ => print_value(command, &value.to_string(), format),
    }
}

pub fn print_list(command: &str, items: &[String], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&QueryOutput {
            command,
            value: items,
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["#", "PROFILE"]);
            for (i, item) in items.iter().enumerate() {
                table.add_row(vec![(i + 1).to_string(), item.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{command}:");
            for item in items {
                println!("  {item}");
            }
        }
        OutputFormat::Raw => {
            for item in items {
                println!("{item}");
            }
        }
    }
}

/// Confirmation for commands whose daemon reply is discarded.
///
/// Only machine-readable output gets a record; humans get silence.
pub fn print_ack(command: &str, format: OutputFormat) {
    if let OutputFormat::Json = format {
        print_json(&AckOutput { command, ok: true });
    }
}

pub fn print_info(info: &DeviceInfo, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(info),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "VALUE"]);
            table
                .add_row(vec!["daemon".to_string(), format!("{}:{}", info.host, info.port)])
                .add_row(vec!["greeting".to_string(), info.greeting.clone()])
                .add_row(vec!["status".to_string(), info.status.clone()])
                .add_row(vec!["api status".to_string(), info.api_status.clone()])
                .add_row(vec!["profile".to_string(), info.profile.clone()])
                .add_row(vec!["profiles".to_string(), info.profiles.join(", ")])
                .add_row(vec!["leds".to_string(), info.led_count.to_string()]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("Lightpack Info:");
            println!("  Daemon:     {}:{}", info.host, info.port);
            println!("  Greeting:   {}", info.greeting);
            println!("  Status:     {}", info.status);
            println!("  API status: {}", info.api_status);
            println!("  Profile:    {}", info.profile);
            println!("  Profiles:   {}", info.profiles.join(", "));
            println!("  LEDs:       {}", info.led_count);
        }
        OutputFormat::Raw => {
            for line in raw_info_lines(info) {
                println!("{line}");
            }
        }
    }
}

/// One `key=value` line per field, profiles joined with `;` as on the wire.
fn raw_info_lines(info: &DeviceInfo) -> Vec<String> {
    vec![
        format!("host={}", info.host),
        format!("port={}", info.port),
        format!("greeting={}", info.greeting),
        format!("status={}", info.status),
        format!("api_status={}", info.api_status),
        format!("profile={}", info.profile),
        format!("profiles={}", info.profiles.join(";")),
        format!("led_count={}", info.led_count),
    ]
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_output_shape() {
        let out = QueryOutput {
            command: "getstatus",
            value: "on",
        };
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"command":"getstatus","value":"on"}"#
        );
    }

    #[test]
    fn raw_info_keeps_every_field() {
        let info = DeviceInfo {
            host: "localhost".into(),
            port: 3636,
            greeting: "Lightpack API v1.4".into(),
            status: "on".into(),
            api_status: "idle".into(),
            profile: "Movie".into(),
            profiles: vec!["Movie".into(), "Game".into()],
            led_count: 10,
        };
        assert_eq!(
            raw_info_lines(&info),
            vec![
                "host=localhost",
                "port=3636",
                "greeting=Lightpack API v1.4",
                "status=on",
                "api_status=idle",
                "profile=Movie",
                "profiles=Movie;Game",
                "led_count=10",
            ]
        );
    }

    #[test]
    fn list_output_shape() {
        let items = vec!["Movie".to_string(), "Game".to_string()];
        let out = QueryOutput {
            command: "getprofiles",
            value: &items,
        };
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"command":"getprofiles","value":["Movie","Game"]}"#
        );
    }
}
