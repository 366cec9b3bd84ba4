use std::sync::Arc;

use crate::{commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue};

/// Handles the Redis GET command.
///
/// Retrieves the value associated with a key from the key-value store.
/// Expired keys are removed by the store and read as missing.
///
/// # Returns
///
/// * `Ok(RespValue::BulkString)` - The stored value
/// * `Ok(RespValue::NullBulkString)` - If the key doesn't exist or has expired
/// * `Err(CommandError::InvalidGetCommand)` - If the number of arguments is not exactly 1
pub async fn get(
    store: Arc<KeyValueStore>,
    arguments: Vec<String>,
) -> Result<RespValue, CommandError> {
    if arguments.len() != 1 {
        return Err(CommandError::InvalidGetCommand);
    }

    match store.get(&arguments[0]).await {
        Some(value) => Ok(RespValue::BulkString(value)),
        None => Ok(RespValue::NullBulkString),
    }
}
