use std::{collections::BTreeMap, sync::Arc};

use crate::stream::{
    clock::Clock,
    record::Record,
    stream_error::StreamError,
    stream_id::{RangeBound, StreamId, StreamIdSpec},
};

const DIGIT_COUNT: usize = 10;

#[derive(Debug, Default)]
struct Node {
    children: [Option<Box<Node>>; DIGIT_COUNT],
    /// Only nodes that terminate a timestamp carry data.
    data: Option<BTreeMap<u64, Record>>,
    /// Kept so auto sequences do not have to scan `data`.
    biggest_sequence: u64,
    /// Length of the longest digit path below this node.
    height: usize,
}

impl Node {
    /// Largest child digit whose subtree reaches as deep as this node does.
    fn tallest_child_digit(&self) -> Option<usize> {
        self.children
            .iter()
            .enumerate()
            .rev()
            .find_map(|(digit, child)| match child {
                Some(child) if child.height + 1 == self.height => Some(digit),
                _ => None,
            })
    }
}

/// Index of a single stream, keyed on the decimal digits of entry timestamps.
///
/// Each level of the trie holds one digit of the timestamp, most significant
/// first. The node reached by the last digit is a leaf holding every entry with
/// that timestamp, keyed by sequence number.
///
/// Timestamps are always walked in their canonical form (no leading zeros), so
/// a longer digit path is always a bigger timestamp. `depth` records the longest
/// path created so far and is what lets an insert detect that it would go
/// backwards.
pub struct NumericTrie {
    root: Node,
    depth: usize,
    clock: Arc<dyn Clock>,
}

impl NumericTrie {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        NumericTrie {
            root: Node::default(),
            depth: 0,
            clock,
        }
    }

    /// Longest timestamp, in digits, stored so far.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Appends an entry and returns the ID it was stored under.
    ///
    /// `key_spec` is `*`, `<timestamp>-*` or `<timestamp>-<sequence>`. The
    /// resolved ID must be strictly greater than every ID already in the trie;
    /// a rejected insert leaves the trie untouched.
    ///
    /// # Errors
    ///
    /// * `StreamError::InvalidStreamId` - If `key_spec` is malformed
    /// * `StreamError::IdMustBeGreaterThanZero` - If `key_spec` is `0-0`
    /// * `StreamError::IdNotGreaterThanTop` - If the ID does not move the stream forward
    pub fn insert(
        &mut self,
        key_spec: &str,
        fields: Vec<(String, String)>,
    ) -> Result<StreamId, StreamError> {
        let (timestamp, explicit_sequence) = match StreamIdSpec::parse(key_spec)? {
            StreamIdSpec::Auto => (self.clock.now_millis(), None),
            StreamIdSpec::AutoSequence(timestamp) => (timestamp, None),
            StreamIdSpec::Explicit(id) => (id.timestamp, Some(id.sequence)),
        };

        let digits = timestamp_digits(timestamp);
        let biggest_sequence = self.validate_path(&digits)?;

        let sequence = match (explicit_sequence, biggest_sequence) {
            (Some(sequence), _) => sequence,
            (None, Some(biggest)) => biggest
                .checked_add(1)
                .ok_or(StreamError::IdNotGreaterThanTop)?,
            (None, None) if timestamp == 0 => 1,
            (None, None) => 0,
        };

        if let Some(biggest) = biggest_sequence {
            if sequence <= biggest {
                return Err(StreamError::IdNotGreaterThanTop);
            }
        }

        let id = StreamId::new(timestamp, sequence);
        let path_length = digits.len();
        let mut current = &mut self.root;

        for (level, &digit) in digits.iter().enumerate() {
            current.height = current.height.max(path_length - level);
            current = &mut **current.children[digit].get_or_insert_with(Box::default);
        }

        current
            .data
            .get_or_insert_with(BTreeMap::new)
            .insert(sequence, Record::new(id, fields));
        current.biggest_sequence = sequence;
        self.depth = self.depth.max(path_length);

        Ok(id)
    }

    /// Checks that `digits` does not go below the tallest recorded timestamp.
    ///
    /// Returns the biggest sequence of the leaf already stored at `digits`, if
    /// there is one.
    fn validate_path(&self, digits: &[usize]) -> Result<Option<u64>, StreamError> {
        if digits.len() < self.depth {
            return Err(StreamError::IdNotGreaterThanTop);
        }

        // Only a timestamp as long as the tallest one can collide with it.
        let mut on_tallest_path = digits.len() == self.depth;
        let mut current = Some(&self.root);

        for &digit in digits {
            let Some(node) = current else {
                break;
            };

            if on_tallest_path {
                if let Some(tallest_digit) = node.tallest_child_digit() {
                    if digit < tallest_digit {
                        return Err(StreamError::IdNotGreaterThanTop);
                    }

                    on_tallest_path = digit == tallest_digit;
                }
            }

            current = node.children[digit].as_deref();
        }

        Ok(current.and_then(|node| node.data.as_ref().map(|_| node.biggest_sequence)))
    }

    /// Returns the entries whose IDs fall within `[begin, end]`.
    ///
    /// Both bounds are `<timestamp>-<sequence>` or a bare `<timestamp>`, in
    /// which case the sequence is unrestricted on that end. Entries come out in
    /// trie order; callers that present them sort by ID.
    ///
    /// # Errors
    ///
    /// * `StreamError::InvalidStreamId` - If a bound is malformed
    /// * `StreamError::InvalidRange` - If the begin timestamp is bigger than the end timestamp
    pub fn range(&self, begin: &str, end: &str) -> Result<Vec<&Record>, StreamError> {
        self.range_between(RangeBound::parse(begin)?, RangeBound::parse(end)?)
    }

    pub fn range_between(
        &self,
        begin: RangeBound,
        end: RangeBound,
    ) -> Result<Vec<&Record>, StreamError> {
        if begin.timestamp > end.timestamp {
            return Err(StreamError::InvalidRange);
        }

        let mut found = Vec::new();
        collect_in_range(&self.root, 0, begin.lower(), end.upper(), &mut found);

        Ok(found)
    }
}

fn collect_in_range<'a>(
    node: &'a Node,
    value: u64,
    begin: StreamId,
    end: StreamId,
    found: &mut Vec<&'a Record>,
) {
    for (digit, child) in node.children.iter().enumerate() {
        let Some(child) = child else {
            continue;
        };

        // Siblings are visited in ascending order, so once one overshoots the
        // end timestamp every later sibling does too.
        let Some(child_value) = value
            .checked_mul(10)
            .and_then(|shifted| shifted.checked_add(digit as u64))
        else {
            break;
        };

        if child_value > end.timestamp {
            break;
        }

        if let Some(data) = &child.data {
            if child_value >= begin.timestamp {
                found.extend(data.iter().filter_map(|(&sequence, record)| {
                    if child_value == begin.timestamp && sequence < begin.sequence {
                        return None;
                    }

                    if child_value == end.timestamp && sequence > end.sequence {
                        return None;
                    }

                    Some(record)
                }));
            }
        }

        collect_in_range(child, child_value, begin, end, found);
    }
}

fn timestamp_digits(timestamp: u64) -> Vec<usize> {
    timestamp
        .to_string()
        .bytes()
        .map(|byte| usize::from(byte - b'0'))
        .collect()
}
