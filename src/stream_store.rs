use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    resp::RespValue,
    stream::{
        Clock, NumericTrie, RangeBound, Record, StreamError, StreamId, SystemClock, increment_id,
        records_to_resp,
    },
};

/// All streams of the server, one [`NumericTrie`] per key.
///
/// A single lock covers every stream and is held for the whole of each public
/// operation, so inserts and reads are linearized across all keys.
pub struct StreamStore {
    streams: Mutex<HashMap<String, NumericTrie>>,
    clock: Arc<dyn Clock>,
}

impl StreamStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        StreamStore {
            streams: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Appends an entry to the stream at `key`, creating the stream if needed.
    pub async fn xadd(
        &self,
        key: &str,
        id_spec: &str,
        fields: Vec<(String, String)>,
    ) -> Result<StreamId, StreamError> {
        let mut streams_guard = self.streams.lock().await;

        match streams_guard.get_mut(key) {
            Some(trie) => trie.insert(id_spec, fields),
            None => {
                // A rejected first entry must not leave an empty stream behind.
                let mut trie = NumericTrie::new(Arc::clone(&self.clock));
                let id = trie.insert(id_spec, fields)?;

                tracing::debug!(key, "created stream");
                streams_guard.insert(key.to_string(), trie);

                Ok(id)
            }
        }
    }

    /// Returns the entries of `key` between `begin` and `end`, both inclusive,
    /// shaped as the XRANGE reply.
    ///
    /// `-` and `+` stand for the smallest and the biggest possible IDs.
    ///
    /// # Errors
    ///
    /// * `StreamError::KeyNotFound` - If nothing was ever added to `key`
    /// * `StreamError::InvalidStreamId` - If a bound is malformed
    /// * `StreamError::InvalidRange` - If `begin` is after `end`
    pub async fn xrange(&self, key: &str, begin: &str, end: &str) -> Result<RespValue, StreamError> {
        let streams_guard = self.streams.lock().await;

        let records = range_sorted(&streams_guard, key, parse_bound(begin)?, parse_bound(end)?)?;

        Ok(records_to_resp(&records))
    }

    /// Reads every entry strictly after the given ID, for each key.
    ///
    /// `keys[i]` is paired with `ids[i]`; when the slices differ in length only
    /// the overlapping pairs are read. A key that holds no stream contributes an
    /// empty entry list.
    ///
    /// The reply is `[[key, [[id, [field, value, ...]], ...]], ...]` in the order
    /// the keys were given.
    pub async fn xread(&self, keys: &[String], ids: &[String]) -> Result<RespValue, StreamError> {
        let streams_guard = self.streams.lock().await;

        let mut response = Vec::with_capacity(keys.len().min(ids.len()));

        for (key, id) in keys.iter().zip(ids.iter()) {
            let begin = RangeBound::parse(&increment_id(id)?)?;

            let records = match range_sorted(&streams_guard, key, begin, StreamId::MAX.into()) {
                Ok(records) => records,
                Err(StreamError::KeyNotFound(_)) => Vec::new(),
                Err(e) => return Err(e),
            };

            response.push(RespValue::Array(vec![
                RespValue::BulkString(key.clone()),
                records_to_resp(&records),
            ]));
        }

        Ok(RespValue::Array(response))
    }

    pub async fn exists(&self, key: &str) -> bool {
        let streams_guard = self.streams.lock().await;

        streams_guard.contains_key(key)
    }
}

impl Default for StreamStore {
    fn default() -> Self {
        StreamStore::new(Arc::new(SystemClock))
    }
}

fn parse_bound(bound: &str) -> Result<RangeBound, StreamError> {
    match bound {
        "-" => Ok(StreamId::MIN.into()),
        "+" => Ok(StreamId::MAX.into()),
        bound => RangeBound::parse(bound),
    }
}

fn range_sorted<'a>(
    streams: &'a HashMap<String, NumericTrie>,
    key: &str,
    begin: RangeBound,
    end: RangeBound,
) -> Result<Vec<&'a Record>, StreamError> {
    let Some(trie) = streams.get(key) else {
        return Err(StreamError::KeyNotFound(key.to_string()));
    };

    let mut records = trie.range_between(begin, end)?;
    records.sort_by_key(|record| record.id);

    Ok(records)
}
