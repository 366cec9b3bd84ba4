use std::sync::Arc;

use crate::{
    commands::command_error::CommandError, key_value_store::KeyValueStore, resp::RespValue,
    stream_store::StreamStore,
};

#[derive(Debug, PartialEq)]
pub struct TypeArguments {
    key: String,
}

impl TypeArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 1 {
            return Err(CommandError::InvalidTypeCommand);
        }

        Ok(Self {
            key: arguments[0].clone(),
        })
    }
}

/// Handles the Redis TYPE command.
///
/// String keys win over stream keys of the same name; the stores are
/// checked one after the other, never locked together.
pub async fn type_command(
    store: Arc<KeyValueStore>,
    stream_store: Arc<StreamStore>,
    arguments: Vec<String>,
) -> Result<RespValue, CommandError> {
    let type_arguments = TypeArguments::parse(arguments)?;

    if store.get(&type_arguments.key).await.is_some() {
        return Ok(RespValue::SimpleString("string".to_string()));
    }

    if stream_store.exists(&type_arguments.key).await {
        return Ok(RespValue::SimpleString("stream".to_string()));
    }

    Ok(RespValue::SimpleString("none".to_string()))
}
