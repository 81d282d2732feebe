//! Control Lightpack ambient lighting through the Prismatik daemon.
//!
//! lightpack speaks the daemon's line-based TCP API: query profiles, status
//! and LED count, and set per-LED colours, gamma, smoothing, brightness and
//! the active profile.
//!
//! # Crate Structure
//!
//! - [`transport`]: TCP connect with timeouts
//! - [`frame`]: Newline command framing and response parsing
//! - [`client`]: The protocol client, LED addressing and colours
//!
//! The most used client types are re-exported at the crate root.

/// Re-export transport types.
pub mod transport {
    pub use lightpack_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use lightpack_frame::*;
}

/// Re-export client types.
pub mod client {
    pub use lightpack_client::*;
}

pub use lightpack_client::{
    connect, connect_with_config, AddressError, Client, ClientConfig, ClientError, Framing,
    LedMap, LedRef, Rgb, ToRgb255,
};
