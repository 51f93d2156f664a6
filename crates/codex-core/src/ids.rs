//! Timestamps and run identifiers.
//!
//! Both are pure functions of an instant. `stamp` reads the clock once so
//! that an event's `Timestamp` and `RunId` always describe the same second.
//!
//! Run ids have one-second resolution: two events stamped within the same
//! second share a run id. That matches the existing log files and is
//! acceptable for low-frequency audit events.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::traits::Clock;

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for deterministic records in tests and
/// replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The timestamp and run id shared by one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub timestamp: String,
    pub run_id: String,
}

/// Render `at` as strict ISO-8601 UTC with milliseconds,
/// e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render `at` as `RUN-YYYYMMDD-HHMMSS`.
pub fn format_run_id(at: DateTime<Utc>) -> String {
    format!("RUN-{}", at.format("%Y%m%d-%H%M%S"))
}

/// Current instant as an ISO-8601 string.
pub fn now_iso(clock: &dyn Clock) -> String {
    format_timestamp(clock.now())
}

/// A run id for the current instant.
pub fn new_run_id(clock: &dyn Clock) -> String {
    format_run_id(clock.now())
}

/// Read `clock` once and derive both identifiers from that instant.
pub fn stamp(clock: &dyn Clock) -> Stamp {
    let at = clock.now();
    Stamp {
        timestamp: format_timestamp(at),
        run_id: format_run_id(at),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn fixed() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn timestamp_is_iso_8601_with_millis() {
        assert_eq!(now_iso(&fixed()), "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn run_id_is_compact_date_and_time() {
        assert_eq!(new_run_id(&fixed()), "RUN-20240501-120000");
    }

    #[test]
    fn stamp_derives_both_from_one_instant() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999);
        let s = stamp(&FixedClock(at));
        assert_eq!(s.timestamp, "2023-12-31T23:59:59.999Z");
        assert_eq!(s.run_id, "RUN-20231231-235959");
    }

    #[test]
    fn system_clock_run_id_has_expected_shape() {
        let id = new_run_id(&SystemClock);
        // RUN- + 8 digits + '-' + 6 digits
        assert_eq!(id.len(), 19);
        assert!(id.starts_with("RUN-"));
        let (date, time) = id[4..].split_at(8);
        assert!(date.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(&time[..1], "-");
        assert!(time[1..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn system_clock_timestamp_parses_back() {
        let ts = now_iso(&SystemClock);
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
