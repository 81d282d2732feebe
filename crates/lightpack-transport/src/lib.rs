//! Blocking TCP transport for the Lightpack control protocol.
//!
//! This is the lowest layer of the lightpack crates. It resolves the daemon
//! address, opens the socket (optionally bounded by a connect timeout) and
//! hands back a [`TcpConnection`] that the framing layer reads and writes.

pub mod error;
pub mod tcp;

pub use error::{Result, TransportError};
pub use tcp::{TcpConnection, TcpTransport, DEFAULT_HOST, DEFAULT_PORT};
