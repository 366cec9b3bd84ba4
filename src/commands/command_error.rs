use thiserror::Error;

use crate::{resp::RespValue, stream::StreamError};

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("invalid command")]
    InvalidCommand,
    #[error("invalid command argument")]
    InvalidCommandArgument,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("invalid PING command")]
    InvalidPingCommand,
    #[error("invalid ECHO command")]
    InvalidEchoCommand,
    #[error("invalid GET command")]
    InvalidGetCommand,
    #[error("invalid SET command")]
    InvalidSetCommand,
    #[error("invalid SET command argument")]
    InvalidSetCommandArgument,
    #[error("invalid SET command expiration")]
    InvalidSetCommandExpiration,
    #[error("invalid TYPE command")]
    InvalidTypeCommand,
    #[error("invalid XADD command")]
    InvalidXAddCommand,
    #[error("invalid XRANGE command")]
    InvalidXRangeCommand,
    #[error("invalid XREAD command")]
    InvalidXReadCommand,
    #[error("invalid XREAD command option")]
    InvalidXReadOption,
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl CommandError {
    pub fn as_string(&self) -> String {
        match self {
            CommandError::InvalidCommand => {
                RespValue::Error("ERR Invalid command".to_string()).encode()
            }
            CommandError::InvalidCommandArgument => {
                RespValue::Error("ERR Invalid command argument".to_string()).encode()
            }
            CommandError::UnknownCommand(name) => {
                RespValue::Error(format!("ERR unknown command '{}'", name)).encode()
            }
            CommandError::InvalidPingCommand => {
                RespValue::Error("ERR Invalid PING command".to_string()).encode()
            }
            CommandError::InvalidEchoCommand => {
                RespValue::Error("ERR Invalid ECHO command".to_string()).encode()
            }
            CommandError::InvalidGetCommand => {
                RespValue::Error("ERR Invalid GET command".to_string()).encode()
            }
            CommandError::InvalidSetCommand => {
                RespValue::Error("ERR Invalid SET command".to_string()).encode()
            }
            CommandError::InvalidSetCommandArgument => {
                RespValue::Error("ERR Invalid SET command argument".to_string()).encode()
            }
            CommandError::InvalidSetCommandExpiration => {
                RespValue::Error("ERR Invalid SET command expiration".to_string()).encode()
            }
            CommandError::InvalidTypeCommand => {
                RespValue::Error("ERR Invalid TYPE command".to_string()).encode()
            }
            CommandError::InvalidXAddCommand => {
                RespValue::Error("ERR Invalid XADD command".to_string()).encode()
            }
            CommandError::InvalidXRangeCommand => {
                RespValue::Error("ERR Invalid XRANGE command".to_string()).encode()
            }
            CommandError::InvalidXReadCommand => {
                RespValue::Error("ERR Invalid XREAD command".to_string()).encode()
            }
            CommandError::InvalidXReadOption => {
                RespValue::Error("ERR Invalid XREAD command option".to_string()).encode()
            }
            CommandError::Stream(err) => err.as_string(),
        }
    }
}
