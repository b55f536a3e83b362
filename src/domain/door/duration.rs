//! Open-duration arithmetic and its spoken phrasing.

use crate::domain::foundation::Timestamp;

use super::{DoorState, DoorStatus};

/// Whole minutes the door has been open as of `now`.
///
/// Zero unless the status is open and an open transition has been recorded.
/// Floors toward negative infinity, so clock skew yields a negative value
/// rather than a spurious zero.
pub fn open_duration_minutes(state: &DoorState, now: Timestamp) -> i64 {
    if state.status == DoorStatus::Open && state.last_opened_time.is_set() {
        now.seconds_since(&state.last_opened_time).div_euclid(60)
    } else {
        0
    }
}

/// Renders a duration for speech: "45 minutes", "2 hours and 15 minutes".
///
/// Returns an empty string for zero or negative durations.
pub fn phrase_duration(duration_minutes: i64) -> String {
    if duration_minutes <= 0 {
        return String::new();
    }
    if duration_minutes < 60 {
        return format!("{} minutes", duration_minutes);
    }
    format!(
        "{} hours and {} minutes",
        duration_minutes / 60,
        duration_minutes % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DeviceId;

    fn open_since(opened: i64) -> DoorState {
        let mut state = DoorState::new(DeviceId::new("dev-1").unwrap());
        state.status = DoorStatus::Open;
        state.last_opened_time = Timestamp::from_unix_secs(opened);
        state
    }

    #[test]
    fn phrases_minutes_below_an_hour() {
        assert_eq!(phrase_duration(45), "45 minutes");
        assert_eq!(phrase_duration(1), "1 minutes");
        assert_eq!(phrase_duration(59), "59 minutes");
    }

    #[test]
    fn phrases_hours_and_minutes() {
        assert_eq!(phrase_duration(135), "2 hours and 15 minutes");
        assert_eq!(phrase_duration(60), "1 hours and 0 minutes");
    }

    #[test]
    fn zero_or_negative_renders_nothing() {
        assert_eq!(phrase_duration(0), "");
        assert_eq!(phrase_duration(-5), "");
    }

    #[test]
    fn duration_floors_partial_minutes() {
        let state = open_since(1_000);
        assert_eq!(open_duration_minutes(&state, Timestamp::from_unix_secs(1_119)), 1);
        assert_eq!(open_duration_minutes(&state, Timestamp::from_unix_secs(1_000 + 7_260)), 121);
    }

    #[test]
    fn duration_is_zero_when_not_open() {
        let mut state = open_since(1_000);
        state.status = DoorStatus::Closed;
        assert_eq!(open_duration_minutes(&state, Timestamp::from_unix_secs(99_999)), 0);
    }

    #[test]
    fn duration_is_zero_without_open_time() {
        let mut state = open_since(0);
        state.last_opened_time = Timestamp::UNSET;
        assert_eq!(open_duration_minutes(&state, Timestamp::from_unix_secs(99_999)), 0);
    }

    #[test]
    fn clock_skew_gives_negative_duration() {
        let state = open_since(1_000);
        assert_eq!(open_duration_minutes(&state, Timestamp::from_unix_secs(970)), -1);
    }
}
