//! Validity windows.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::TypeError;
use crate::xdr::io::{get_u64, put_u64};
use crate::xdr::{XdrDecode, XdrEncode, XdrError};

/// Closed window of Unix timestamps (seconds) during which a transaction may
/// be applied. `max_time == 0` means "no upper bound" on the network side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl TimeBounds {
    /// Builds a window, rejecting one that closes before it opens.
    pub fn new(min_time: u64, max_time: u64) -> Result<Self, TypeError> {
        if max_time != 0 && min_time > max_time {
            return Err(TypeError::InvertedTimeBounds { min_time, max_time });
        }
        Ok(Self { min_time, max_time })
    }

    /// Valid from now-ish (no lower bound) until `ttl` from the current time.
    pub fn valid_for(ttl: Duration) -> Self {
        let now = Utc::now().timestamp().max(0) as u64;
        Self {
            min_time: 0,
            max_time: now.saturating_add(ttl.as_secs()),
        }
    }
}

impl XdrEncode for TimeBounds {
    fn encode(&self, out: &mut Vec<u8>) {
        put_u64(out, self.min_time);
        put_u64(out, self.max_time);
    }
}

impl XdrDecode for TimeBounds {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Self {
            min_time: get_u64(input)?,
            max_time: get_u64(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::to_xdr;

    #[test]
    fn encodes_two_u64s() {
        let tb = TimeBounds::new(1, 2).unwrap();
        assert_eq!(
            to_xdr(&tb),
            [0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 2]
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert!(TimeBounds::new(10, 5).is_err());
        // Zero upper bound is "open ended", not inverted.
        assert!(TimeBounds::new(10, 0).is_ok());
    }

    #[test]
    fn valid_for_ends_in_the_future() {
        let tb = TimeBounds::valid_for(Duration::from_secs(300));
        let now = Utc::now().timestamp() as u64;
        assert_eq!(tb.min_time, 0);
        assert!(tb.max_time >= now + 299);
    }
}
