//! Normalization of raw directory records into [`LocatedEntity`].
//!
//! Records come from a hand-curated backend and are inconsistent: numbers
//! arrive as strings, dates in several shapes, keys in two casings. Every
//! per-field problem degrades to an absent value (logged at debug); only a
//! document that is not JSON, or not a list/object of lists, is an error.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{ReliefError, ReliefResult};
use crate::models::{normalize_types, EntityId, EntityKind, HoursOfOperation, LocatedEntity};

/// Accepted spellings per field, canonical key first.
const ID: &[&str] = &["id"];
const NAME: &[&str] = &["name", "title"];
const ORGANIZATION_NAME: &[&str] = &["organization_name", "organizationName"];
const ADDRESS: &[&str] = &["address"];
const LATITUDE: &[&str] = &["latitude", "lat"];
const LONGITUDE: &[&str] = &["longitude", "lng", "lon"];
const TYPES: &[&str] = &["types", "categories"];
const HOURS: &[&str] = &["hours_of_operation", "hoursOfOperation"];
const START_DATE: &[&str] = &["start_date", "startDate"];
const END_DATE: &[&str] = &["end_date", "endDate"];

/// Raw record as served by the directory API.
///
/// Fields are looked up by key so that a record carrying several spellings
/// of the same field still reads; the first non-null spelling wins.
struct RawRecord<'a>(&'a Map<String, Value>);

impl<'a> RawRecord<'a> {
    fn field(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }
}

const GROUPS: [(&str, EntityKind); 3] = [
    ("resources", EntityKind::Resource),
    ("donations", EntityKind::Donation),
    ("volunteering", EntityKind::Volunteer),
];

/// Parse a directory document.
///
/// Accepts either a bare array of records (all treated as resources) or an
/// object with `resources`, `donations` and `volunteering` arrays.
///
/// # Errors
///
/// Invalid JSON, or a top-level value that is neither an array nor an object.
pub fn parse_directory_str(json: &str) -> ReliefResult<Vec<LocatedEntity>> {
    let document: Value = serde_json::from_str(json)?;

    let entities = match document {
        Value::Array(records) => parse_records(&records, EntityKind::Resource),
        Value::Object(groups) => parse_groups(&groups)?,
        other => {
            return Err(ReliefError::InvalidInput(format!(
                "expected an array or an object of arrays, found {}",
                json_type_name(&other)
            )))
        }
    };

    info!(count = entities.len(), "parsed directory records");
    Ok(entities)
}

/// Read and parse a directory document from disk.
pub fn parse_directory_file<P: AsRef<Path>>(path: P) -> ReliefResult<Vec<LocatedEntity>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ReliefError::io(path, e))?;
    parse_directory_str(&content)
}

fn parse_groups(groups: &Map<String, Value>) -> ReliefResult<Vec<LocatedEntity>> {
    if !GROUPS.iter().any(|(key, _)| groups.contains_key(*key)) {
        return Err(ReliefError::InvalidInput(
            "object input needs at least one of 'resources', 'donations', 'volunteering'"
                .to_string(),
        ));
    }

    let mut entities = Vec::new();
    for (key, kind) in GROUPS {
        match groups.get(key) {
            Some(Value::Array(records)) => entities.extend(parse_records(records, kind)),
            Some(Value::Null) | None => {}
            Some(other) => {
                return Err(ReliefError::InvalidInput(format!(
                    "'{}' must be an array, found {}",
                    key,
                    json_type_name(other)
                )))
            }
        }
    }
    Ok(entities)
}

fn parse_records(records: &[Value], kind: EntityKind) -> Vec<LocatedEntity> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, value)| parse_record(value, kind, index))
        .collect()
}

/// Normalize one record. Returns `None` only for values that are not objects.
pub fn parse_record(value: &Value, kind: EntityKind, index: usize) -> Option<LocatedEntity> {
    let Some(fields) = value.as_object() else {
        debug!(index, "skipping non-object record");
        return None;
    };
    let raw = RawRecord(fields);

    let id = raw
        .field(ID)
        .and_then(entity_id)
        .unwrap_or(EntityId::Int(index as i64));

    Some(LocatedEntity {
        kind,
        name: raw.field(NAME).and_then(text).unwrap_or_default(),
        organization_name: raw.field(ORGANIZATION_NAME).and_then(text),
        address: raw.field(ADDRESS).and_then(text),
        latitude: raw.field(LATITUDE).and_then(number),
        longitude: raw.field(LONGITUDE).and_then(number),
        types: raw.field(TYPES).map(types).unwrap_or_default(),
        hours_of_operation: raw.field(HOURS).map(hours).unwrap_or_default(),
        start_date: raw.field(START_DATE).and_then(|v| date(v, &id, "start_date")),
        end_date: raw.field(END_DATE).and_then(|v| date(v, &id, "end_date")),
        id,
    })
}

fn entity_id(value: &Value) -> Option<EntityId> {
    match value {
        Value::Number(n) => n.as_i64().map(EntityId::Int),
        Value::String(s) if !s.trim().is_empty() => Some(EntityId::Str(s.trim().to_string())),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn types(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => normalize_types(items.iter().filter_map(Value::as_str)),
        Value::String(s) => normalize_types([s.as_str()]),
        _ => Vec::new(),
    }
}

fn hours(value: &Value) -> HoursOfOperation {
    match value {
        Value::Object(days) => days
            .iter()
            .filter_map(|(day, v)| v.as_str().map(|s| (day.as_str(), s)))
            .collect(),
        _ => HoursOfOperation::default(),
    }
}

fn date(value: &Value, id: &EntityId, field: &str) -> Option<NaiveDate> {
    let s = match value {
        Value::String(s) if !s.trim().is_empty() => s.trim(),
        _ => return None,
    };
    let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            s.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        });
    if parsed.is_none() {
        debug!(id = %id, field, value = s, "unparseable date treated as absent");
    }
    parsed
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
