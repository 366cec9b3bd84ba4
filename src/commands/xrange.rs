use std::sync::Arc;

use crate::{commands::command_error::CommandError, resp::RespValue, stream_store::StreamStore};

pub struct XrangeArguments {
    key: String,
    start_stream_id: String,
    end_stream_id: String,
}

impl XrangeArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 3 {
            return Err(CommandError::InvalidXRangeCommand);
        }

        let key = arguments[0].clone();
        let start_stream_id = arguments[1].clone();
        let end_stream_id = arguments[2].clone();

        Ok(Self {
            key,
            start_stream_id,
            end_stream_id,
        })
    }
}

/// Handles the Redis XRANGE command.
///
/// Both bounds are inclusive. A bound may be a full `ms-seq` ID, a bare
/// millisecond timestamp covering every sequence of that millisecond, or `-`
/// and `+` for the lowest and highest possible IDs.
pub async fn xrange(
    stream_store: Arc<StreamStore>,
    arguments: Vec<String>,
) -> Result<RespValue, CommandError> {
    let xrange_arguments = XrangeArguments::parse(arguments)?;

    let entries = stream_store
        .xrange(
            &xrange_arguments.key,
            &xrange_arguments.start_stream_id,
            &xrange_arguments.end_stream_id,
        )
        .await?;

    Ok(entries)
}
