use lightpack_client::command;
use tracing::debug;

use crate::cmd::ConnectionArgs;
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{print_count, print_info, print_list, print_value, DeviceInfo, OutputFormat};

pub fn profiles(connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connection.connect()?;
    let profiles = client
        .get_profiles()
        .map_err(|err| client_error("getprofiles failed", err))?;
    client.disconnect();

    print_list(command::GET_PROFILES, &profiles, format);
    Ok(SUCCESS)
}

pub fn profile(connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connection.connect()?;
    let profile = client
        .get_profile()
        .map_err(|err| client_error("getprofile failed", err))?;
    client.disconnect();

    print_value(command::GET_PROFILE, &profile, format);
    Ok(SUCCESS)
}

pub fn status(connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connection.connect()?;
    let status = client
        .get_status()
        .map_err(|err| client_error("getstatus failed", err))?;
    client.disconnect();

    print_value(command::GET_STATUS, &status, format);
    Ok(SUCCESS)
}

pub fn count(connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connection.connect()?;
    let count = client
        .get_count_leds(true)
        .map_err(|err| client_error("getcountleds failed", err))?;
    client.disconnect();

    print_count(command::GET_COUNT_LEDS, count, format);
    Ok(SUCCESS)
}

pub fn api_status(connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connection.connect()?;
    let status = client
        .get_api_status()
        .map_err(|err| client_error("getstatusapi failed", err))?;
    client.disconnect();

    print_value(command::GET_API_STATUS, &status, format);
    Ok(SUCCESS)
}

pub fn info(connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connection.connect()?;
    let info = DeviceInfo {
        host: connection.host.clone(),
        port: connection.port,
        greeting: client.greeting().to_string(),
        status: client
            .get_status()
            .map_err(|err| client_error("getstatus failed", err))?,
        api_status: client
            .get_api_status()
            .map_err(|err| client_error("getstatusapi failed", err))?,
        profile: client
            .get_profile()
            .map_err(|err| client_error("getprofile failed", err))?,
        profiles: client
            .get_profiles()
            .map_err(|err| client_error("getprofiles failed", err))?,
        led_count: client
            .get_count_leds(true)
            .map_err(|err| client_error("getcountleds failed", err))?,
    };
    debug!(leds = info.led_count, "device snapshot collected");
    client.disconnect();

    print_info(&info, format);
    Ok(SUCCESS)
}
