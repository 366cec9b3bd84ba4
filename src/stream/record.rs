use crate::{resp::RespValue, stream::stream_id::StreamId};

/// A single stream entry.
///
/// Fields keep the order in which they were given to XADD; repeated field
/// names are stored as they came.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: StreamId,
    pub fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(id: StreamId, fields: Vec<(String, String)>) -> Self {
        Record { id, fields }
    }

    /// Shapes the entry as `[id, [field1, value1, field2, value2, ...]]`.
    pub fn to_resp(&self) -> RespValue {
        let mut flattened_fields = Vec::with_capacity(self.fields.len() * 2);

        for (key, value) in self.fields.iter() {
            flattened_fields.push(RespValue::BulkString(key.clone()));
            flattened_fields.push(RespValue::BulkString(value.clone()));
        }

        RespValue::Array(vec![
            RespValue::BulkString(self.id.to_string()),
            RespValue::Array(flattened_fields),
        ])
    }
}

/// Converts stream entries to the RESP array returned by XRANGE.
///
/// The entries are shaped in the order given; callers sort them first.
pub fn records_to_resp(records: &[&Record]) -> RespValue {
    RespValue::Array(records.iter().map(|record| record.to_resp()).collect())
}
