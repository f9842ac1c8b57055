//! Weekly operating hours.
//!
//! Hours arrive as a map from weekday name to either a not-open sentinel
//! (`"Not Open"`, `"closed"`, blank) or an interval string such as
//! `"9:00 AM - 5:00 PM"`. Anything that does not parse is treated as a day
//! without a valid window; nothing here returns an error.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

/// Weekday names in `num_days_from_sunday` order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const NOT_OPEN_SENTINELS: [&str; 2] = ["not open", "closed"];

/// Full English name of a weekday ("Monday").
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// True for values that explicitly mark a day as closed.
pub fn is_not_open_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || NOT_OPEN_SENTINELS
            .iter()
            .any(|s| value.eq_ignore_ascii_case(s))
}

/// Time of day written on a 12-hour clock, e.g. `9:00 AM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build from a 24-hour hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse `H:MM AM|PM`.
    ///
    /// 12 AM is midnight, 12 PM is noon, other PM hours add twelve. The
    /// meridiem is required and case-insensitive. Returns `None` for anything
    /// else.
    pub fn parse_12h(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();
        let clock = parts.next()?;
        let meridiem = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let (hour_str, minute_str) = clock.split_once(':')?;
        if hour_str.is_empty() || hour_str.len() > 2 || !is_ascii_digits(hour_str) {
            return None;
        }
        if minute_str.len() != 2 || !is_ascii_digits(minute_str) {
            return None;
        }
        let hour: u32 = hour_str.parse().ok()?;
        let minute: u32 = minute_str.parse().ok()?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }

        let is_pm = if meridiem.eq_ignore_ascii_case("AM") {
            false
        } else if meridiem.eq_ignore_ascii_case("PM") {
            true
        } else {
            return None;
        };

        let hour24 = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        Self::from_hm(hour24, minute)
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }

    /// Hour on the 24-hour clock.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

fn is_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (is_pm, hour) = self.0.hour12();
        write!(
            f,
            "{}:{:02} {}",
            hour,
            self.0.minute(),
            if is_pm { "PM" } else { "AM" }
        )
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One day's operating window, open inclusive and close exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyWindow {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl DailyWindow {
    /// Parse `"<open> - <close>"`.
    ///
    /// The value must split on `" - "` into exactly two non-empty halves,
    /// both halves must parse, and open must be strictly before close.
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value.trim().split(" - ").collect();
        if parts.len() != 2 || parts.iter().any(|p| p.trim().is_empty()) {
            return None;
        }
        let open = ClockTime::parse_12h(parts[0])?;
        let close = ClockTime::parse_12h(parts[1])?;
        if open >= close {
            return None;
        }
        Some(Self { open, close })
    }

    /// `open <= time < close`
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.open.as_naive_time() <= time && time < self.close.as_naive_time()
    }
}

impl fmt::Display for DailyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.open, self.close)
    }
}

/// Raw weekday-name to hours-string map, as supplied by the directory data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoursOfOperation(BTreeMap<String, String>);

impl HoursOfOperation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hours string for a weekday, replacing any existing entry for
    /// that day regardless of key casing.
    pub fn insert(&mut self, day: Weekday, value: impl Into<String>) {
        let name = weekday_name(day);
        self.0.retain(|k, _| !k.trim().eq_ignore_ascii_case(name));
        self.0.insert(name.to_string(), value.into());
    }

    /// Hours string for a weekday; keys match case-insensitively.
    pub fn get(&self, day: Weekday) -> Option<&str> {
        let name = weekday_name(day);
        self.0
            .iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HoursOfOperation {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parsed week, one optional window per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeeklySchedule {
    days: [Option<DailyWindow>; 7],
}

impl WeeklySchedule {
    pub fn from_hours(hours: &HoursOfOperation) -> Self {
        let mut days = [None; 7];
        for (idx, slot) in days.iter_mut().enumerate() {
            let day = weekday_from_sunday_index(idx);
            let Some(value) = hours.get(day) else {
                continue;
            };
            if is_not_open_sentinel(value) {
                continue;
            }
            *slot = DailyWindow::parse(value);
            if slot.is_none() {
                debug!(day = weekday_name(day), value, "unparseable hours entry treated as not open");
            }
        }
        Self { days }
    }

    pub fn window(&self, day: Weekday) -> Option<DailyWindow> {
        self.days[day.num_days_from_sunday() as usize]
    }

    /// No day of the week has a valid window.
    pub fn is_indefinitely_closed(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }
}

fn weekday_from_sunday_index(idx: usize) -> Weekday {
    // Weekday::Sun.succ() repeated idx times
    (0..idx).fold(Weekday::Sun, |d, _| d.succ())
}
