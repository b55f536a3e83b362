//! Open-door alert message.

use crate::domain::foundation::Timestamp;

/// Subject and body of the notification sent when the door stays open too long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorAlert {
    pub subject: String,
    pub body: String,
}

impl DoorAlert {
    /// Builds the alert for a door open `duration_minutes` as of `now`.
    pub fn open_too_long(duration_minutes: i64, now: Timestamp) -> Self {
        let when = now
            .to_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| now.as_unix_secs().to_string());

        Self {
            subject: format!("Garage Door Open Alert - {} mins", duration_minutes),
            body: format!(
                "GARAGE DOOR ALERT\n\nYour garage door has been open for {}.\n\nTime: {}",
                alert_duration(duration_minutes),
                when
            ),
        }
    }
}

/// Unlike the spoken phrase, always renders something, including "0 minutes".
fn alert_duration(duration_minutes: i64) -> String {
    let hours = duration_minutes / 60;
    if hours > 0 {
        format!("{} hours and {} minutes", hours, duration_minutes % 60)
    } else {
        format!("{} minutes", duration_minutes)
    }
}
