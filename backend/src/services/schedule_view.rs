//! Display helpers for detail and card views: the coming week's hours,
//! the status badge text and the active date range.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use super::availability::AvailabilityStatus;
use crate::models::{weekday_name, DailyWindow, HoursOfOperation, WeeklySchedule};

/// One row of the upcoming-week table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub weekday: &'static str,
    /// `None` renders as "Closed".
    pub window: Option<DailyWindow>,
}

/// Seven rows starting at `from`.
pub fn upcoming_schedule(hours: &HoursOfOperation, from: NaiveDate) -> Vec<ScheduleDay> {
    let week = WeeklySchedule::from_hours(hours);
    (0..7u64)
        .filter_map(|offset| from.checked_add_days(Days::new(offset)))
        .map(|date| ScheduleDay {
            date,
            weekday: weekday_name(date.weekday()),
            window: week.window(date.weekday()),
        })
        .collect()
}

/// Badge text for a resolved status as seen on `today`.
pub fn status_label(status: &AvailabilityStatus, today: Weekday) -> String {
    match status {
        AvailabilityStatus::Open { closes_at } => format!("Open · Closes at {}", closes_at),
        AvailabilityStatus::Closed { next_open: None } => "Closed".to_string(),
        AvailabilityStatus::Closed {
            next_open: Some(next),
        } => {
            if next.day == today && next.days_ahead == 0 {
                format!("Opens at {}", next.time)
            } else {
                format!("Opens at {} on {}", next.time, weekday_name(next.day))
            }
        }
    }
}

/// "Jan 26 - Feb 03, 2025" style label for an active date range.
pub fn date_range_label(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    let start = start?;
    let label = match end {
        Some(end) if end.year() == start.year() => format!(
            "{} - {}",
            start.format("%b %d"),
            end.format("%b %d, %Y")
        ),
        Some(end) => format!("{} - {}", start.format("%b %d, %Y"), end.format("%b %d, %Y")),
        None => start.format("%b %d, %Y").to_string(),
    };
    Some(label)
}
