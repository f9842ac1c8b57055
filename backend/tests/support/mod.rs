#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use relief_map::models::{HoursOfOperation, LocatedEntity};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process-global environment so parallel tests do not race.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn instant(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, s).expect("valid time")
}

/// Week of 2025-01-26 (Sunday) .. 2025-02-01 (Saturday).
pub const SUNDAY: u32 = 26;
pub const MONDAY: u32 = 27;
pub const TUESDAY: u32 = 28;
pub const WEDNESDAY: u32 = 29;
pub const THURSDAY: u32 = 30;

/// Instant in the reference week (January 2025; day 32 wraps to Feb 1).
pub fn jan_2025(day: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    if day > 31 {
        instant(2025, 2, day - 31, h, min, s)
    } else {
        instant(2025, 1, day, h, min, s)
    }
}

pub fn hours(pairs: &[(&str, &str)]) -> HoursOfOperation {
    pairs.iter().copied().collect()
}

pub fn all_days(value: &str) -> HoursOfOperation {
    hours(&[
        ("Sunday", value),
        ("Monday", value),
        ("Tuesday", value),
        ("Wednesday", value),
        ("Thursday", value),
        ("Friday", value),
        ("Saturday", value),
    ])
}

pub fn site(id: i64, lat: f64, lon: f64) -> LocatedEntity {
    LocatedEntity::new(id, format!("Site {}", id)).with_position(lat, lon)
}
