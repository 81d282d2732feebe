//! Newline command framing and response parsing for the Lightpack control protocol.
//!
//! Every command is a single ASCII line terminated by `\n`. Every response is
//! a single line of the form `<name>:<payload>`, terminated by `\r\n`. List
//! payloads separate items with `;` and usually carry a trailing `;`.
//!
//! The protocol has no length prefix, so how a response is delimited on the
//! read side is configurable through [`Framing`].

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_line, encode_command, trim_line_ending, FrameConfig, Framing, Response,
    DEFAULT_MAX_LINE_LEN, READ_CHUNK_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::LineReader;
pub use writer::LineWriter;
