//! Reading requests off a client connection.
//!
//! Bytes are accumulated in a per-connection buffer until at least one complete
//! RESP value is available, so requests split across several TCP reads and
//! several pipelined requests in a single read are both handled.

use bytes::BytesMut;
use thiserror::Error;
use tokio::io::AsyncReadExt;

use crate::resp::{RespError, RespValue};

/// Errors that can occur while reading and parsing commands from network streams.
#[derive(Error, Debug, PartialEq)]
pub enum CommandReadError {
    #[error("I/O error: {0}")]
    IoError(String),
    #[error("Connection closed")]
    ConnectionClosed,
    #[error("RESP parse error")]
    RespParseError(#[from] RespError),
}

impl CommandReadError {
    pub fn as_string(&self) -> String {
        match self {
            CommandReadError::IoError(msg) => RespValue::Error(format!("ERR {}", msg)).encode(),
            CommandReadError::ConnectionClosed => {
                RespValue::Error("ERR connection closed".to_string()).encode()
            }
            CommandReadError::RespParseError(err) => err.as_string(),
        }
    }
}

/// Reads from `stream` until `buffer` holds at least one complete RESP value
/// and returns every complete value it holds.
///
/// Incomplete trailing bytes stay in `buffer` for the next call. On a protocol
/// error the buffer is cleared, since there is no reliable way to find the
/// start of the next request.
///
/// # Returns
///
/// * `Ok(Vec<RespValue>)` - One or more parsed values
/// * `Err(CommandReadError::IoError)` - If reading from the stream fails
/// * `Err(CommandReadError::ConnectionClosed)` - If the peer closed the connection
/// * `Err(CommandReadError::RespParseError)` - If the bytes are not valid RESP
pub async fn read_and_parse_resp<R>(
    stream: &mut R,
    buffer: &mut BytesMut,
) -> Result<Vec<RespValue>, CommandReadError>
where
    R: AsyncReadExt + Unpin,
{
    loop {
        let parsed_input = parse_buffered(buffer)?;

        if !parsed_input.is_empty() {
            return Ok(parsed_input);
        }

        let number_of_bytes = stream
            .read_buf(buffer)
            .await
            .map_err(|e| CommandReadError::IoError(e.to_string()))?;

        if number_of_bytes == 0 {
            return Err(CommandReadError::ConnectionClosed);
        }
    }
}

fn parse_buffered(buffer: &mut BytesMut) -> Result<Vec<RespValue>, CommandReadError> {
    let mut parsed_input = Vec::new();

    loop {
        match RespValue::decode(buffer) {
            Ok(Some(value)) => parsed_input.push(value),
            Ok(None) => return Ok(parsed_input),
            Err(e) => {
                buffer.clear();
                return Err(e.into());
            }
        }
    }
}
