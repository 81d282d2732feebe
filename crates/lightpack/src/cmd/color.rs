use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lightpack_client::{command, Client};
use tracing::info;

use crate::cmd::{ConnectionArgs, FillArgs, SetColorArgs};
use crate::exit::{client_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_ack, OutputFormat};

const HOLD_POLL: Duration = Duration::from_millis(100);

pub fn set_color(args: SetColorArgs, connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connection.connect()?;
    client
        .lock()
        .map_err(|err| client_error("lock failed", err))?;
    client
        .set_colors(args.assignments.iter().map(|a| (&a.led, a.color)))
        .map_err(|err| client_error("setcolor failed", err))?;

    finish(client, args.hold, format)
}

pub fn fill(args: FillArgs, connection: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connection.connect()?;
    client
        .lock()
        .map_err(|err| client_error("lock failed", err))?;
    client
        .set_color_to_all(args.color)
        .map_err(|err| client_error("setcolor failed", err))?;

    finish(client, args.hold, format)
}

fn finish(client: Client, hold: bool, format: OutputFormat) -> CliResult<i32> {
    print_ack(command::SET_COLOR, format);
    if hold {
        let running = Arc::new(AtomicBool::new(true));
        install_ctrlc_handler(running.clone())?;
        info!("holding colours; press Ctrl-C to release");
        while running.load(Ordering::SeqCst) {
            thread::sleep(HOLD_POLL);
        }
    }
    client.disconnect();
    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            INTERNAL,
            format!("failed to install Ctrl-C handler: {err}"),
        )
    })
}
