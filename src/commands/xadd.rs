use std::sync::Arc;

use crate::{commands::command_error::CommandError, resp::RespValue, stream_store::StreamStore};

/// Represents the parsed arguments for the XADD command.
///
/// Format: `XADD key id field value [field value ...]`
#[derive(Debug, PartialEq)]
pub struct XaddArguments {
    key: String,
    /// `*`, `<ms>-*` or `<ms>-<seq>`; validated by the stream itself
    id_spec: String,
    /// Field/value pairs in the order they were given
    fields: Vec<(String, String)>,
}

impl XaddArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() < 4 || arguments.len() % 2 != 0 {
            return Err(CommandError::InvalidXAddCommand);
        }

        let mut arguments = arguments.into_iter();
        let (Some(key), Some(id_spec)) = (arguments.next(), arguments.next()) else {
            return Err(CommandError::InvalidXAddCommand);
        };

        let mut fields = Vec::new();

        while let (Some(field), Some(value)) = (arguments.next(), arguments.next()) {
            fields.push((field, value));
        }

        Ok(Self {
            key,
            id_spec,
            fields,
        })
    }
}

/// Handles the Redis XADD command.
///
/// Appends an entry to the stream stored at `key`, creating the stream on the
/// first successful insert, and replies with the ID the entry was stored under.
///
/// # Returns
///
/// * `Ok(RespValue::BulkString)` - The assigned ID, e.g. `1526919030474-0`
/// * `Err(CommandError::InvalidXAddCommand)` - If there are no field/value pairs or one is incomplete
/// * `Err(CommandError::Stream)` - If the ID is malformed, `0-0` or not above the stream's top item
pub async fn xadd(
    stream_store: Arc<StreamStore>,
    arguments: Vec<String>,
) -> Result<RespValue, CommandError> {
    let xadd_arguments = XaddArguments::parse(arguments)?;

    let id = stream_store
        .xadd(
            &xadd_arguments.key,
            &xadd_arguments.id_spec,
            xadd_arguments.fields,
        )
        .await?;

    Ok(RespValue::BulkString(id.to_string()))
}
