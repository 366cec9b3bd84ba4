use std::sync::Arc;

use crate::{commands::command_error::CommandError, resp::RespValue, stream_store::StreamStore};

/// Represents the parsed arguments for the XREAD command.
///
/// Format: `XREAD STREAMS key1 key2 ... id1 id2 ...`
#[derive(Debug, PartialEq)]
pub struct XreadArguments {
    keys: Vec<String>,
    /// The ID after which to start reading, one per key
    stream_ids: Vec<String>,
}

impl XreadArguments {
    /// Parses command arguments into structured XreadArguments.
    ///
    /// Only the non-blocking form is served; `BLOCK` and any other option
    /// before `STREAMS` is rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(XreadArguments)` - Successfully parsed arguments
    /// * `Err(CommandError::InvalidXReadCommand)` - If less than 3 arguments or uneven key/ID lists
    /// * `Err(CommandError::InvalidXReadOption)` - If the first argument is not `STREAMS`
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() < 3 {
            return Err(CommandError::InvalidXReadCommand);
        }

        if arguments[0].to_lowercase() != "streams" {
            return Err(CommandError::InvalidXReadOption);
        }

        let data = &arguments[1..];

        if data.len() % 2 != 0 {
            return Err(CommandError::InvalidXReadCommand);
        }

        let (keys, stream_ids) = data.split_at(data.len() / 2);

        Ok(Self {
            keys: keys.to_vec(),
            stream_ids: stream_ids.to_vec(),
        })
    }
}

/// Handles the Redis XREAD command.
///
/// Returns, for every key, the entries with an ID strictly greater than the
/// one given for it. Keys holding no stream come back with an empty entry
/// list. An unparsable ID fails the whole command.
pub async fn xread(
    stream_store: Arc<StreamStore>,
    arguments: Vec<String>,
) -> Result<RespValue, CommandError> {
    let xread_arguments = XreadArguments::parse(arguments)?;

    let response = stream_store
        .xread(&xread_arguments.keys, &xread_arguments.stream_ids)
        .await?;

    Ok(response)
}
