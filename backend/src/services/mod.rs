//! Service layer: availability resolution, directory filtering and the
//! view helpers built on them.

pub mod availability;
pub mod directory;
pub mod schedule_view;

pub use availability::{is_open_at, resolve, resolve_week, AvailabilityStatus, NextOpening};
pub use directory::{filter_entities, search_first, suggestions, DirectoryFilter};
pub use schedule_view::{date_range_label, status_label, upcoming_schedule, ScheduleDay};
