use lightpack_client::{command, Client, Result};

use crate::cmd::{ConnectionArgs, UseProfileArgs, ValueArgs};
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{print_ack, OutputFormat};

pub fn gamma(args: ValueArgs, connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    locked(connection, format, command::SET_GAMMA, |client| {
        client.set_gamma(&args.value)
    })
}

pub fn smooth(args: ValueArgs, connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    locked(connection, format, command::SET_SMOOTH, |client| {
        client.set_smooth(&args.value)
    })
}

pub fn brightness(
    args: ValueArgs,
    connection: &ConnectionArgs,
    format: OutputFormat,
) -> CliResult<i32> {
    locked(connection, format, command::SET_BRIGHTNESS, |client| {
        client.set_brightness(&args.value)
    })
}

pub fn use_profile(
    args: UseProfileArgs,
    connection: &ConnectionArgs,
    format: OutputFormat,
) -> CliResult<i32> {
    locked(connection, format, command::SET_PROFILE, |client| {
        client.set_profile(&args.name)
    })
}

pub fn turn_on(connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    locked(connection, format, command::SET_STATUS, Client::turn_on)
}

pub fn turn_off(connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    locked(connection, format, command::SET_STATUS, Client::turn_off)
}

/// The daemon ignores setters from clients that do not hold the lock.
fn locked<F>(connection: &ConnectionArgs, format: OutputFormat, name: &str, op: F) -> CliResult<i32>
where
    F: FnOnce(&mut Client) -> Result<()>,
{
    let mut client = connection.connect()?;
    client
        .lock()
        .map_err(|err| client_error("lock failed", err))?;
    op(&mut client).map_err(|err| client_error(&format!("{name} failed"), err))?;
    client.disconnect();

    print_ack(name, format);
    Ok(SUCCESS)
}
