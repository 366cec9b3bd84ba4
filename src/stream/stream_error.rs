use thiserror::Error;

use crate::resp::RespValue;

#[derive(Error, Debug, PartialEq)]
pub enum StreamError {
    #[error("Invalid stream ID specified as stream command argument: {0}")]
    InvalidStreamId(String),
    #[error("The ID specified in XADD must be greater than 0-0")]
    IdMustBeGreaterThanZero,
    #[error("The ID specified in XADD is equal or smaller than the target stream top item")]
    IdNotGreaterThanTop,
    #[error("The start ID of the range cannot be bigger than the end ID")]
    InvalidRange,
    #[error("no such key: {0}")]
    KeyNotFound(String),
}

impl StreamError {
    pub fn as_string(&self) -> String {
        RespValue::Error(format!("ERR {}", self)).encode()
    }
}
