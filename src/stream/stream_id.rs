use std::fmt;

use crate::stream::stream_error::StreamError;

/// A fully resolved stream entry ID, ordered by timestamp and then sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamId {
    pub timestamp: u64,
    pub sequence: u64,
}

impl StreamId {
    /// Smallest ID a stream can ever hold, `0-0` is reserved.
    pub const MIN: StreamId = StreamId::new(0, 1);
    pub const MAX: StreamId = StreamId::new(u64::MAX, u64::MAX);

    pub const fn new(timestamp: u64, sequence: u64) -> Self {
        StreamId {
            timestamp,
            sequence,
        }
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.timestamp, self.sequence)
    }
}

/// The ID argument of XADD before the stream resolves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamIdSpec {
    /// `*`: timestamp from the clock, sequence picked by the stream.
    Auto,
    /// `<timestamp>-*`: sequence picked by the stream.
    AutoSequence(u64),
    /// `<timestamp>-<sequence>`.
    Explicit(StreamId),
}

impl StreamIdSpec {
    /// Parses an XADD ID argument.
    ///
    /// The ID must contain exactly one hyphen separating a decimal timestamp from
    /// either a decimal sequence or `*`. The special ID `0-0` is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use redis_streams::stream::{StreamId, StreamIdSpec};
    ///
    /// assert_eq!(StreamIdSpec::parse("*"), Ok(StreamIdSpec::Auto));
    /// assert_eq!(StreamIdSpec::parse("100-*"), Ok(StreamIdSpec::AutoSequence(100)));
    /// assert_eq!(
    ///     StreamIdSpec::parse("100-5"),
    ///     Ok(StreamIdSpec::Explicit(StreamId::new(100, 5)))
    /// );
    /// assert!(StreamIdSpec::parse("0-0").is_err());
    /// ```
    pub fn parse(spec: &str) -> Result<Self, StreamError> {
        if spec == "*" {
            return Ok(StreamIdSpec::Auto);
        }

        let split_spec = spec.split('-').collect::<Vec<&str>>();

        if split_spec.len() != 2 {
            return Err(StreamError::InvalidStreamId(spec.to_string()));
        }

        let timestamp = parse_decimal(split_spec[0], spec)?;

        if split_spec[1] == "*" {
            return Ok(StreamIdSpec::AutoSequence(timestamp));
        }

        let sequence = parse_decimal(split_spec[1], spec)?;

        if timestamp == 0 && sequence == 0 {
            return Err(StreamError::IdMustBeGreaterThanZero);
        }

        Ok(StreamIdSpec::Explicit(StreamId::new(timestamp, sequence)))
    }
}

/// One end of an XRANGE query.
///
/// The sequence part may be left out (`1526985054069`), which leaves that end
/// unrestricted on the sequence: the smallest sequence for a lower bound and the
/// largest for an upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBound {
    pub timestamp: u64,
    pub sequence: Option<u64>,
}

impl RangeBound {
    pub fn parse(bound: &str) -> Result<Self, StreamError> {
        match bound.split_once('-') {
            None => Ok(RangeBound {
                timestamp: parse_decimal(bound, bound)?,
                sequence: None,
            }),
            Some((timestamp, sequence)) => Ok(RangeBound {
                timestamp: parse_decimal(timestamp, bound)?,
                sequence: Some(parse_decimal(sequence, bound)?),
            }),
        }
    }

    pub fn lower(&self) -> StreamId {
        StreamId::new(self.timestamp, self.sequence.unwrap_or(0))
    }

    pub fn upper(&self) -> StreamId {
        StreamId::new(self.timestamp, self.sequence.unwrap_or(u64::MAX))
    }
}

impl From<StreamId> for RangeBound {
    fn from(id: StreamId) -> Self {
        RangeBound {
            timestamp: id.timestamp,
            sequence: Some(id.sequence),
        }
    }
}

/// Turns a last-seen ID into the first ID strictly after it.
///
/// The ID is split on its last hyphen, the sequence is bumped by one and the
/// timestamp text is kept as given.
///
/// # Examples
///
/// ```
/// use redis_streams::stream::increment_id;
///
/// assert_eq!(increment_id("0-0"), Ok("0-1".to_string()));
/// assert!(increment_id("11-").is_err());
/// ```
pub fn increment_id(id: &str) -> Result<String, StreamError> {
    let Some((timestamp, sequence)) = id.rsplit_once('-') else {
        return Err(StreamError::InvalidStreamId(id.to_string()));
    };

    let next_sequence = parse_decimal(sequence, id)?
        .checked_add(1)
        .ok_or_else(|| StreamError::InvalidStreamId(id.to_string()))?;

    Ok(format!("{}-{}", timestamp, next_sequence))
}

fn parse_decimal(digits: &str, id: &str) -> Result<u64, StreamError> {
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(StreamError::InvalidStreamId(id.to_string()));
    }

    digits
        .parse::<u64>()
        .map_err(|_| StreamError::InvalidStreamId(id.to_string()))
}
