//! The stream data type.
//!
//! A stream is an append-only log of [`Record`]s addressed by `timestamp-sequence`
//! identifiers. Each stream is indexed by a [`NumericTrie`] keyed on the decimal
//! digits of the timestamp, which keeps IDs strictly increasing and answers range
//! queries without scanning every entry.

mod clock;
mod numeric_trie;
mod record;
mod stream_error;
mod stream_id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use numeric_trie::NumericTrie;
pub use record::{Record, records_to_resp};
pub use stream_error::StreamError;
pub use stream_id::{RangeBound, StreamId, StreamIdSpec, increment_id};
