//! # relief-map
//!
//! Map-side logic for a disaster-relief resource directory.
//!
//! The directory lists resources, donation drives and volunteer opportunities.
//! This crate holds the two pieces of it that do real work, plus the small
//! helpers the map and card views are built from:
//!
//! - **Clustering**: group markers under a zoom-dependent radius with a
//!   greedy, order-preserving first-fit pass
//! - **Availability**: decide whether a location is open at an instant and,
//!   if not, when it next opens, from a weekly hours table and an optional
//!   active date range
//! - **Directory**: category / open-now filtering, free-text search and
//!   type-ahead suggestions
//! - **Views**: the coming week's hours, status badge text and date labels
//!
//! ## Architecture
//!
//! - [`models`]: entities, weekly hours, category styles
//! - [`algorithms`]: the marker clusterer
//! - [`services`]: availability resolution, directory filtering, view helpers
//! - [`parsing`]: normalization of raw backend records
//! - [`config`]: TOML configuration
//!
//! Everything is synchronous and pure. Nothing reads the clock; callers pass
//! the reference instant explicitly. Bad input data never produces an error:
//! records with unusable coordinates are left off the map and unparseable
//! hours read as closed.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use relief_map::algorithms::cluster_entities;
//! use relief_map::models::{HoursOfOperation, LocatedEntity};
//! use relief_map::services::availability;
//!
//! let hours: HoursOfOperation = [("Monday", "9:00 AM - 5:00 PM")].into_iter().collect();
//! let entities = vec![
//!     LocatedEntity::new(1, "Pantry").with_position(34.0, -118.0).with_hours(hours),
//!     LocatedEntity::new(2, "Clinic").with_position(34.0001, -118.0001),
//! ];
//!
//! let clusters = cluster_entities(&entities, 16);
//! assert_eq!(clusters.len(), 1);
//!
//! let monday_noon = NaiveDate::from_ymd_opt(2025, 1, 27)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//! assert!(availability::is_open_at(&entities[0], monday_noon));
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod services;

pub use error::{ReliefError, ReliefResult};
