//! Sweep a red dot across the LEDs, then hand control back to the daemon.
//!
//! ```text
//! cargo run -p lightpack --example color-sweep -- 127.0.0.1 3636
//! ```

use std::thread;
use std::time::Duration;

use lightpack::{ClientConfig, Rgb};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "localhost".to_string());
    let port = match args.next() {
        Some(port) => port.parse()?,
        None => lightpack::transport::DEFAULT_PORT,
    };

    let config = ClientConfig::new(host, port).with_timeout(Some(Duration::from_secs(2)));
    let mut client = lightpack::connect_with_config(&config)?;
    println!("{}", client.greeting());

    client.lock()?;
    let count = client.get_count_leds(true)?;
    for lit in 0..count {
        let frame = (0..count).map(|i| {
            let color = if i == lit { Rgb::new(255, 0, 0) } else { Rgb::BLACK };
            (i, color)
        });
        client.set_colors(frame)?;
        thread::sleep(Duration::from_millis(80));
    }
    client.set_color_to_all(Rgb::BLACK)?;
    client.disconnect();

    Ok(())
}
