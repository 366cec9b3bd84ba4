use crate::{commands::command_error::CommandError, resp::RespValue};

/// Handles the Redis ECHO command.
///
/// The ECHO command returns the exact string provided as an argument.
///
/// # Arguments
///
/// * `arguments` - A vector containing exactly one string argument to echo back
///
/// # Returns
///
/// * `Ok(RespValue::BulkString)` - The echoed argument
/// * `Err(CommandError::InvalidEchoCommand)` - If the number of arguments is not exactly 1
pub fn echo(arguments: Vec<String>) -> Result<RespValue, CommandError> {
    let [message]: [String; 1] = arguments
        .try_into()
        .map_err(|_| CommandError::InvalidEchoCommand)?;

    Ok(RespValue::BulkString(message))
}
