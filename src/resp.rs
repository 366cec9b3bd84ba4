//! Redis Serialization Protocol (RESP) values.
//!
//! Requests arrive as arrays of bulk strings and replies are built from the
//! same value type, so a single enum covers both directions.

use bytes::{Buf, BytesMut};
use thiserror::Error;

/// Requests are flat arrays; replies nest two levels deep.
const MAX_NESTING_DEPTH: usize = 32;
const MAX_BULK_LENGTH: usize = 512 * 1024 * 1024;

#[derive(Error, Debug, PartialEq)]
pub enum RespError {
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
    #[error("unknown RESP type '{0}'")]
    UnknownRespType(char),
    #[error("failed to parse integer")]
    FailedToParseInteger,
    #[error("invalid bulk string")]
    InvalidBulkString,
    #[error("invalid array")]
    InvalidArray,
}

impl RespError {
    pub fn as_string(&self) -> String {
        RespValue::Error(format!("ERR Protocol error: {}", self)).encode()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    SimpleString(String),
    Error(String),
    Integer(i64),
    BulkString(String),
    NullBulkString,
    Array(Vec<RespValue>),
}

impl RespValue {
    pub fn encode(&self) -> String {
        match self {
            RespValue::SimpleString(s) => format!("+{}\r\n", s),
            RespValue::Error(e) => format!("-{}\r\n", e),
            RespValue::Integer(i) => format!(":{}\r\n", i),
            RespValue::BulkString(s) => format!("${}\r\n{}\r\n", s.len(), s),
            RespValue::NullBulkString => "$-1\r\n".to_string(),
            RespValue::Array(elements) => {
                let mut encoded = format!("*{}\r\n", elements.len());

                for element in elements {
                    encoded.push_str(&element.encode());
                }

                encoded
            }
        }
    }

    /// Takes one complete value off the front of `buffer`.
    ///
    /// Returns `Ok(None)` and leaves `buffer` untouched when it does not hold a
    /// complete value yet. Arrays nested deeper than 32 levels and bulk strings
    /// longer than 512 MB are rejected as soon as their header is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use redis_streams::resp::RespValue;
    ///
    /// let mut buffer = BytesMut::from(&b"*1\r\n$4\r\nPING\r\n*1\r\n$4\r\nPI"[..]);
    ///
    /// assert_eq!(
    ///     RespValue::decode(&mut buffer),
    ///     Ok(Some(RespValue::Array(vec![RespValue::BulkString("PING".to_string())])))
    /// );
    /// assert_eq!(RespValue::decode(&mut buffer), Ok(None));
    /// assert_eq!(&buffer[..], b"*1\r\n$4\r\nPI");
    /// ```
    pub fn decode(buffer: &mut BytesMut) -> Result<Option<RespValue>, RespError> {
        match Self::parse_value(buffer, 0, 0)? {
            Some((value, consumed)) => {
                buffer.advance(consumed);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn parse_value(
        bytes: &[u8],
        start: usize,
        depth: usize,
    ) -> Result<Option<(RespValue, usize)>, RespError> {
        let Some((line, next)) = Self::parse_line(bytes, start)? else {
            return Ok(None);
        };

        let Some(type_char) = line.chars().next() else {
            return Err(RespError::UnknownRespType(' '));
        };
        let content = &line[type_char.len_utf8()..];

        match type_char {
            '+' => Ok(Some((RespValue::SimpleString(content.to_string()), next))),
            '-' => Ok(Some((RespValue::Error(content.to_string()), next))),
            ':' => {
                let value = content
                    .parse::<i64>()
                    .map_err(|_| RespError::FailedToParseInteger)?;

                Ok(Some((RespValue::Integer(value), next)))
            }
            '$' => {
                let length = content
                    .parse::<i64>()
                    .map_err(|_| RespError::InvalidBulkString)?;

                if length == -1 {
                    return Ok(Some((RespValue::NullBulkString, next)));
                }

                let length = usize::try_from(length)
                    .ok()
                    .filter(|&length| length <= MAX_BULK_LENGTH)
                    .ok_or(RespError::InvalidBulkString)?;
                let end = next + length;

                if bytes.len() < end + 2 {
                    return Ok(None);
                }

                if &bytes[end..end + 2] != b"\r\n" {
                    return Err(RespError::InvalidBulkString);
                }

                let bulk_string =
                    std::str::from_utf8(&bytes[next..end]).map_err(|_| RespError::InvalidUtf8)?;

                Ok(Some((RespValue::BulkString(bulk_string.to_string()), end + 2)))
            }
            '*' => {
                if depth >= MAX_NESTING_DEPTH {
                    return Err(RespError::InvalidArray);
                }

                let array_length = content
                    .parse::<usize>()
                    .map_err(|_| RespError::InvalidArray)?;

                let mut array_elements = Vec::with_capacity(array_length.min(64));
                let mut position = next;

                while array_elements.len() < array_length {
                    let Some((element, element_end)) =
                        Self::parse_value(bytes, position, depth + 1)?
                    else {
                        return Ok(None);
                    };

                    array_elements.push(element);
                    position = element_end;
                }

                Ok(Some((RespValue::Array(array_elements), position)))
            }
            other => Err(RespError::UnknownRespType(other)),
        }
    }

    /// Finds the CRLF-terminated line starting at `start`.
    fn parse_line(bytes: &[u8], start: usize) -> Result<Option<(&str, usize)>, RespError> {
        let Some(remaining) = bytes.get(start..) else {
            return Ok(None);
        };

        let Some(position) = remaining.windows(2).position(|window| window == b"\r\n") else {
            return Ok(None);
        };

        let line =
            std::str::from_utf8(&remaining[..position]).map_err(|_| RespError::InvalidUtf8)?;

        Ok(Some((line, start + position + 2)))
    }
}
