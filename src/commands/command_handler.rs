use std::sync::Arc;

use crate::{
    commands::{
        command_error::CommandError, echo::echo, get::get, ping::ping, set::set,
        type_command::type_command, xadd::xadd, xrange::xrange, xread::xread,
    },
    key_value_store::KeyValueStore,
    resp::RespValue,
    stream_store::StreamStore,
};

/// A request decoded from a RESP array of bulk strings.
#[derive(Debug, PartialEq, Clone)]
pub struct CommandHandler {
    /// Command name, uppercased
    pub name: String,
    pub arguments: Vec<String>,
}

impl CommandHandler {
    pub fn new(input: RespValue) -> Result<Self, CommandError> {
        let RespValue::Array(elements) = input else {
            return Err(CommandError::InvalidCommand);
        };

        let mut elements = elements.into_iter();

        let name = match elements.next() {
            Some(RespValue::BulkString(s)) => s.to_uppercase(),
            _ => return Err(CommandError::InvalidCommandArgument),
        };

        let mut arguments: Vec<String> = Vec::new();

        for element in elements {
            let arg = match element {
                RespValue::BulkString(s) => Ok(s),
                _ => Err(CommandError::InvalidCommandArgument),
            }?;

            arguments.push(arg);
        }

        Ok(Self { name, arguments })
    }

    pub async fn handle_command(
        &self,
        store: Arc<KeyValueStore>,
        stream_store: Arc<StreamStore>,
    ) -> Result<RespValue, CommandError> {
        match self.name.as_str() {
            "PING" => ping(self.arguments.clone()),
            "ECHO" => echo(self.arguments.clone()),
            "GET" => get(store, self.arguments.clone()).await,
            "SET" => set(store, self.arguments.clone()).await,
            "TYPE" => type_command(store, stream_store, self.arguments.clone()).await,
            "XADD" => xadd(stream_store, self.arguments.clone()).await,
            "XRANGE" => xrange(stream_store, self.arguments.clone()).await,
            "XREAD" => xread(stream_store, self.arguments.clone()).await,
            _ => Err(CommandError::UnknownCommand(self.name.clone())),
        }
    }
}
