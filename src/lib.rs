//! A Redis-compatible server built around the stream data type.
//!
//! Streams are kept in a digit trie keyed by the millisecond part of each
//! entry ID, which keeps inserts monotonic and range scans ordered without a
//! separate index. Alongside streams the server supports:
//!
//! - Basic key-value operations (GET, SET with PX expiry)
//! - Stream operations (XADD, XRANGE, XREAD)
//! - Server commands (PING, ECHO, TYPE)
//!
//! The server speaks the Redis Serialization Protocol (RESP) and serves
//! connections from a fixed pool of Tokio tasks.

pub mod commands;
pub mod connection;
pub mod input;
pub mod key_value_store;
pub mod resp;
pub mod server;
pub mod stream;
pub mod stream_store;
