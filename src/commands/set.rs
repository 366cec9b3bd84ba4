use std::sync::Arc;

use crate::{commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue};

/// Represents the parsed arguments for SET command
#[derive(Debug, PartialEq)]
pub struct SetArguments {
    /// The key name to store the value under
    key: String,
    /// The value to be stored under the given key
    value: String,
    /// Time to live in milliseconds, 0 when the key never expires
    ttl_millis: u64,
}

impl SetArguments {
    /// Parses command arguments into a SetArguments structure.
    ///
    /// # Arguments
    ///
    /// * `arguments` - A vector of strings representing the command arguments:
    ///   - Format 1: `[key, value]` - For permanent storage
    ///   - Format 2: `[key, value, "PX", milliseconds]` - For expiring storage
    ///
    /// # Returns
    ///
    /// * `Ok(SetArguments)` - Successfully parsed arguments
    /// * `Err(CommandError::InvalidSetCommand)` - If the number of arguments is not 2 or 4
    /// * `Err(CommandError::InvalidSetCommandArgument)` - If the expiration option is not "PX"
    /// * `Err(CommandError::InvalidSetCommandExpiration)` - If the expiration time is not a positive integer
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 2 && arguments.len() != 4 {
            return Err(CommandError::InvalidSetCommand);
        }

        let mut ttl_millis = 0;

        if arguments.len() == 4 {
            if arguments[2].to_lowercase() != "px" {
                return Err(CommandError::InvalidSetCommandArgument);
            }

            ttl_millis = match arguments[3].parse::<u64>() {
                Ok(expiration_time) if expiration_time > 0 => expiration_time,
                _ => return Err(CommandError::InvalidSetCommandExpiration),
            };
        }

        Ok(Self {
            key: arguments[0].clone(),
            value: arguments[1].clone(),
            ttl_millis,
        })
    }
}

/// Handles the Redis SET command.
///
/// Stores a key-value pair, replacing any previous value, with an optional
/// expiration given in milliseconds through the PX option.
pub async fn set(
    store: Arc<KeyValueStore>,
    arguments: Vec<String>,
) -> Result<RespValue, CommandError> {
    let set_arguments = SetArguments::parse(arguments)?;

    store
        .set(
            &set_arguments.key,
            &set_arguments.value,
            set_arguments.ttl_millis,
        )
        .await;

    Ok(RespValue::SimpleString("OK".to_string()))
}
