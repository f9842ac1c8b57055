//! Open-now resolution against a weekly schedule.
//!
//! [`resolve`] answers "is it open at this instant, and if not, when does it
//! next open". [`is_open_at`] is the boolean used by the open-now filter and
//! additionally honors an entity's active date range. Neither reads the
//! clock; the caller passes the reference instant as local wall time.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Serialize, Serializer};

use crate::models::{weekday_name, ClockTime, HoursOfOperation, LocatedEntity, WeeklySchedule};

/// The next time a location opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextOpening {
    pub day: Weekday,
    pub time: ClockTime,
    /// 0 for later today, 1..=6 for the coming days.
    pub days_ahead: u8,
}

/// Result of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Open { closes_at: ClockTime },
    /// `next_open` is `None` when none of the next six days has valid hours
    /// and today's window, if any, is already over.
    Closed { next_open: Option<NextOpening> },
}

impl AvailabilityStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, AvailabilityStatus::Open { .. })
    }

    pub fn closes_at(&self) -> Option<ClockTime> {
        match self {
            AvailabilityStatus::Open { closes_at } => Some(*closes_at),
            AvailabilityStatus::Closed { .. } => None,
        }
    }

    pub fn next_opening(&self) -> Option<NextOpening> {
        match self {
            AvailabilityStatus::Closed { next_open } => *next_open,
            AvailabilityStatus::Open { .. } => None,
        }
    }

    pub fn next_open_day(&self) -> Option<&'static str> {
        self.next_opening().map(|n| weekday_name(n.day))
    }

    pub fn next_open_time(&self) -> Option<ClockTime> {
        self.next_opening().map(|n| n.time)
    }
}

#[derive(Serialize)]
struct StatusView {
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    closes_at: Option<String>,
    next_open_day: Option<&'static str>,
    next_open_time: Option<String>,
}

impl Serialize for AvailabilityStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let view = StatusView {
            state: if self.is_open() { "open" } else { "closed" },
            closes_at: self.closes_at().map(|t| t.to_string()),
            next_open_day: self.next_open_day(),
            next_open_time: self.next_open_time().map(|t| t.to_string()),
        };
        view.serialize(serializer)
    }
}

/// Resolve availability from raw hours at `at`.
pub fn resolve(hours: &HoursOfOperation, at: NaiveDateTime) -> AvailabilityStatus {
    resolve_week(&WeeklySchedule::from_hours(hours), at)
}

/// Resolve availability from an already parsed week.
///
/// Today is checked at minute resolution (open inclusive, close exclusive).
/// Before today's opening the answer is "opens later today". After closing,
/// or when today has no hours, the following six days are scanned for the
/// first one with valid hours.
pub fn resolve_week(week: &WeeklySchedule, at: NaiveDateTime) -> AvailabilityStatus {
    let today = at.weekday();
    let now = at.time();

    if let Some(window) = week.window(today) {
        if now < window.open.as_naive_time() {
            return AvailabilityStatus::Closed {
                next_open: Some(NextOpening {
                    day: today,
                    time: window.open,
                    days_ahead: 0,
                }),
            };
        }
        if window.contains(now) {
            return AvailabilityStatus::Open {
                closes_at: window.close,
            };
        }
    }

    AvailabilityStatus::Closed {
        next_open: scan_forward(week, today),
    }
}

fn scan_forward(week: &WeeklySchedule, today: Weekday) -> Option<NextOpening> {
    let mut day = today;
    for days_ahead in 1..=6u8 {
        day = day.succ();
        if let Some(window) = week.window(day) {
            return Some(NextOpening {
                day,
                time: window.open,
                days_ahead,
            });
        }
    }
    None
}

/// True when the entity is inside its active date range on `at`'s date and
/// `at` falls in that day's window.
pub fn is_open_at(entity: &LocatedEntity, at: NaiveDateTime) -> bool {
    if !entity.is_active_on(at.date()) {
        return false;
    }
    WeeklySchedule::from_hours(&entity.hours_of_operation)
        .window(at.weekday())
        .is_some_and(|window| window.contains(at.time()))
}
