use std::io::{Read, Write};

use lightpack_frame::{LineReader, LineWriter};
use lightpack_transport::{TcpConnection, TcpTransport};
use tracing::debug;

use crate::client::Client;
use crate::command;
use crate::config::ClientConfig;
use crate::error::Result;

/// Connect to a daemon with default settings and no aliases or API key.
pub fn connect(host: &str, port: u16) -> Result<Client> {
    connect_with_config(&ClientConfig::new(host, port))
}

/// Connect with explicit configuration.
///
/// Fails if the address cannot be resolved or connected, or if the greeting
/// cannot be read. No retry is attempted.
pub fn connect_with_config(config: &ClientConfig) -> Result<Client> {
    let stream = TcpTransport::connect(&config.host, config.port, config.connect_timeout)?;
    let reader_stream = stream.try_clone()?;

    let frame_config = config.frame_config();
    let reader = LineReader::with_config_tcp(reader_stream, frame_config.clone())?;
    let writer = LineWriter::with_config_tcp(stream, &frame_config)?;

    handshake(reader, writer, config)
}

/// Read the greeting and authenticate over an already connected stream pair.
///
/// The greeting is kept on the client; the API key response is discarded.
pub fn handshake<T: Read + Write>(
    mut reader: LineReader<T>,
    mut writer: LineWriter<T>,
    config: &ClientConfig,
) -> Result<Client<T>> {
    let greeting = reader.read_response()?;
    debug!(%greeting, "daemon greeting");

    if let Some(key) = &config.api_key {
        writer.send(&command::with_arg(command::API_KEY, key))?;
        let response = reader.read_response()?;
        debug!(%response, "api key response");
    }

    Ok(Client::from_parts(
        reader,
        writer,
        config.led_map.clone(),
        greeting,
    ))
}

impl Client<TcpConnection> {
    /// Same as [`connect_with_config`].
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        connect_with_config(config)
    }
}
