//! Client for the Lightpack/Prismatik LED control protocol.
//!
//! This is the layer applications use. Connect to the daemon, query the
//! device, and set LED colours addressed by zero-based index or by alias.
//!
//! ```no_run
//! use lightpack_client::{ClientConfig, LedMap, Rgb};
//!
//! let config = ClientConfig::default()
//!     .with_led_map(LedMap::new(["top-left", "top", "top-right"]));
//! let mut client = lightpack_client::connect_with_config(&config)?;
//! client.lock()?;
//! client.set_colors([("top", Rgb::new(255, 0, 0)), ("top-left", Rgb::new(0, 0, 255))])?;
//! client.set_color(2, Rgb::new(0, 255, 0))?;
//! client.disconnect();
//! # Ok::<(), lightpack_client::ClientError>(())
//! ```
//!
//! A [`Client`] allows one outstanding command at a time. Every command takes
//! `&mut self`; share a client between threads only behind a lock held for
//! the whole command.

pub mod client;
pub mod color;
pub mod command;
pub mod config;
pub mod connector;
pub mod error;
pub mod led;

pub use client::Client;
pub use color::{Rgb, ToRgb255};
pub use config::ClientConfig;
pub use connector::{connect, connect_with_config, handshake};
pub use error::{AddressError, AliasMissing, ClientError, ParseColorError, Result};
pub use led::{resolve_alias, resolve_index, LedMap, LedRef};
pub use lightpack_frame::Framing;
