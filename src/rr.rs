//! Resource record values exchanged with the control server.

use std::fmt;
use std::time::Duration;

/// One DNS resource record as the control protocol sees it.
///
/// Records are plain values: two records with the same fields are the same
/// record, and no server-side identity is tracked. The record type is kept as
/// the protocol's textual tag (`A`, `AAAA`, `MX`, `SRV`, ...) rather than an
/// enum, because the server accepts and returns arbitrary tags.
///
/// For `MX` listings the value holds the priority field, and for `SRV` it
/// holds the space-joined `priority weight port target` tuple, matching what
/// the server reports on its `151` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Host or domain label the record belongs to.
    pub name: String,
    /// Record type tag, e.g. `A` or `SRV`.
    pub rtype: String,
    /// Record data.
    pub value: String,
    /// Time to live; [`TimeToLive::ZERO`] when the server reported none.
    pub ttl: TimeToLive,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        rtype: impl Into<String>,
        value: impl Into<String>,
        ttl: TimeToLive,
    ) -> Self {
        Record {
            name: name.into(),
            rtype: rtype.into(),
            value: value.into(),
            ttl,
        }
    }
}

/// Record time-to-live in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeToLive(u32);

impl TimeToLive {
    pub const MAX: TimeToLive = TimeToLive(u32::MAX);
    pub const MIN: TimeToLive = TimeToLive(u32::MIN);
    pub const ZERO: TimeToLive = TimeToLive(0u32);

    pub fn from_secs(secs: u32) -> Self {
        TimeToLive(secs)
    }

    pub fn as_secs(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TimeToLive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TimeToLive {
    fn from(value: u32) -> Self {
        TimeToLive(value)
    }
}

impl From<TimeToLive> for u32 {
    fn from(value: TimeToLive) -> Self {
        value.0
    }
}

impl From<Duration> for TimeToLive {
    fn from(value: Duration) -> Self {
        TimeToLive(value.as_secs().try_into().unwrap_or(u32::MAX))
    }
}

impl From<TimeToLive> for Duration {
    fn from(value: TimeToLive) -> Self {
        Duration::from_secs(value.0 as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_duration_round_trip() {
        let ttl = TimeToLive::from_secs(300);
        assert_eq!(Duration::from(ttl), Duration::from_secs(300));
        assert_eq!(TimeToLive::from(Duration::from_secs(300)), ttl);
    }

    #[test]
    fn ttl_saturates_oversized_durations() {
        let ttl = TimeToLive::from(Duration::from_secs(u64::MAX));
        assert_eq!(ttl, TimeToLive::MAX);
    }

    #[test]
    fn records_compare_by_value() {
        let a = Record::new("example.com", "A", "93.184.216.34", 300.into());
        let b = Record::new("example.com", "A", "93.184.216.34", 300.into());
        assert_eq!(a, b);
    }
}
