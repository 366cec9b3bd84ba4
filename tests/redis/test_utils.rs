use std::sync::Arc;

use redis_streams::{
    commands::{CommandError, CommandHandler},
    key_value_store::KeyValueStore,
    resp::RespValue,
    stream::{Clock, FixedClock},
    stream_store::StreamStore,
};

/// Test utilities for simplifying Redis command tests
pub struct TestUtils;

/// Test environment containing both stores and the clock streams read
pub struct TestEnv {
    pub store: Arc<KeyValueStore>,
    pub stream_store: Arc<StreamStore>,
    pub clock: Arc<FixedClock>,
}

impl TestEnv {
    /// Create a new test environment whose clock is frozen at `millis`
    pub fn new_at(millis: u64) -> Self {
        let clock = Arc::new(FixedClock::new(millis));
        let stream_clock: Arc<dyn Clock> = Arc::clone(&clock) as Arc<dyn Clock>;

        Self {
            store: Arc::new(KeyValueStore::new()),
            stream_store: Arc::new(StreamStore::new(stream_clock)),
            clock,
        }
    }

    pub fn new() -> Self {
        Self::new_at(1526919030474)
    }

    /// Execute a command and return the encoded reply
    async fn exec_command(&self, command: RespValue) -> Result<String, CommandError> {
        let command_handler = CommandHandler::new(command)?;

        command_handler
            .handle_command(Arc::clone(&self.store), Arc::clone(&self.stream_store))
            .await
            .map(|response| response.encode())
    }

    /// Execute a command and assert it succeeds with expected result
    pub async fn exec_command_ok(&self, command: RespValue, expected_response: &str) {
        let result = self.exec_command(command.clone()).await;

        assert_eq!(
            result,
            Ok(expected_response.to_string()),
            "executing {:?}",
            command
        );
    }

    /// Execute a command and assert it fails
    pub async fn exec_command_err(&self, command: RespValue, expected_error: CommandError) {
        let result = self.exec_command(command.clone()).await;

        assert_eq!(result, Err(expected_error), "executing {:?}", command);
    }
}

impl TestUtils {
    fn command(parts: &[&str]) -> RespValue {
        RespValue::Array(
            parts
                .iter()
                .map(|part| RespValue::BulkString(part.to_string()))
                .collect(),
        )
    }

    /// Create a PING command
    pub fn ping_command() -> RespValue {
        Self::command(&["PING"])
    }

    /// Create an ECHO command
    pub fn echo_command(message: &str) -> RespValue {
        Self::command(&["ECHO", message])
    }

    /// Create a GET command
    pub fn get_command(key: &str) -> RespValue {
        Self::command(&["GET", key])
    }

    /// Create a SET command
    pub fn set_command(key: &str, value: &str) -> RespValue {
        Self::command(&["SET", key, value])
    }

    /// Create a SET command with PX expiration
    pub fn set_command_with_expiration(key: &str, value: &str, expiration_ms: u64) -> RespValue {
        Self::command(&["SET", key, value, "PX", &expiration_ms.to_string()])
    }

    /// Create a TYPE command
    pub fn type_command(key: &str) -> RespValue {
        Self::command(&["TYPE", key])
    }

    /// Create a XADD command
    pub fn xadd_command(key: &str, stream_id: &str, entries: &[&str]) -> RespValue {
        let mut parts = vec!["XADD", key, stream_id];
        parts.extend_from_slice(entries);

        Self::command(&parts)
    }

    /// Create a XRANGE command
    pub fn xrange_command(key: &str, start_stream_id: &str, end_stream_id: &str) -> RespValue {
        Self::command(&["XRANGE", key, start_stream_id, end_stream_id])
    }

    /// Create a XREAD STREAMS command
    pub fn xread_command(keys: &[&str], start_stream_ids: &[&str]) -> RespValue {
        let mut parts = vec!["XREAD", "STREAMS"];
        parts.extend_from_slice(keys);
        parts.extend_from_slice(start_stream_ids);

        Self::command(&parts)
    }

    /// Create an arbitrary command, used for malformed input
    pub fn invalid_command(args: &[&str]) -> RespValue {
        Self::command(args)
    }

    /// Create expected bulk string response
    pub fn expected_bulk_string(value: &str) -> String {
        format!("${}\r\n{}\r\n", value.len(), value)
    }

    /// Create expected simple string response
    pub fn expected_simple_string(value: &str) -> String {
        format!("+{}\r\n", value)
    }

    /// Create expected null response
    pub fn expected_null() -> String {
        "$-1\r\n".to_string()
    }

    /// Create expected error response
    pub fn expected_error(message: &str) -> String {
        format!("-{}\r\n", message)
    }

    /// Create the expected encoding of one stream entry
    pub fn expected_stream_entry(stream_id: &str, fields: &[&str]) -> String {
        let mut response = format!(
            "*2\r\n{}*{}\r\n",
            Self::expected_bulk_string(stream_id),
            fields.len()
        );

        for field in fields {
            response.push_str(&Self::expected_bulk_string(field));
        }

        response
    }

    /// Create the expected encoding of a list of already encoded entries
    pub fn expected_stream_entries(entries: &[String]) -> String {
        format!("*{}\r\n{}", entries.len(), entries.concat())
    }

    /// Create the expected encoding of one `[key, entries]` XREAD item
    pub fn expected_xread_stream(key: &str, entries: &[String]) -> String {
        format!(
            "*2\r\n{}{}",
            Self::expected_bulk_string(key),
            Self::expected_stream_entries(entries)
        )
    }
}
