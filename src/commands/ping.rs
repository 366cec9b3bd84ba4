use crate::{commands::command_error::CommandError, resp::RespValue};

pub struct PingArguments {
    message: Option<String>,
}

impl PingArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() > 1 {
            return Err(CommandError::InvalidPingCommand);
        }

        Ok(Self {
            message: arguments.into_iter().next(),
        })
    }
}

/// Handles the Redis PING command.
///
/// Replies `PONG`, or echoes the optional message back as a bulk string.
pub fn ping(arguments: Vec<String>) -> Result<RespValue, CommandError> {
    let ping_arguments = PingArguments::parse(arguments)?;

    match ping_arguments.message {
        Some(message) => Ok(RespValue::BulkString(message)),
        None => Ok(RespValue::SimpleString("PONG".to_string())),
    }
}
