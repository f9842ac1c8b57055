//! Located directory entities: resources, donation drives and volunteer
//! opportunities placed on the map.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::hours::HoursOfOperation;

/// Stable identifier, unique within its source list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Str(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(i) => write!(f, "{}", i),
            EntityId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(v: i64) -> Self {
        EntityId::Int(v)
    }
}

impl From<&str> for EntityId {
    fn from(v: &str) -> Self {
        EntityId::Str(v.to_string())
    }
}

impl From<String> for EntityId {
    fn from(v: String) -> Self {
        EntityId::Str(v)
    }
}

/// Which directory list an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[default]
    Resource,
    Donation,
    Volunteer,
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "resource" | "resources" => Ok(EntityKind::Resource),
            "donation" | "donations" => Ok(EntityKind::Donation),
            "volunteer" | "volunteering" => Ok(EntityKind::Volunteer),
            other => Err(format!(
                "Unknown entity kind '{}'. Use resources, donations, or volunteering.",
                other
            )),
        }
    }
}

/// WGS-84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and inside `[-90, 90] x [-180, 180]`.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Planar distance in degree space, `sqrt(dLat² + dLon²)`.
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        let d_lat = self.latitude - other.latitude;
        let d_lon = self.longitude - other.longitude;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }
}

/// A resource, donation drive, or volunteer opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedEntity {
    pub id: EntityId,
    #[serde(default)]
    pub kind: EntityKind,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub hours_of_operation: HoursOfOperation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl LocatedEntity {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::default(),
            name: name.into(),
            organization_name: None,
            address: None,
            latitude: None,
            longitude: None,
            types: Vec::new(),
            hours_of_operation: HoursOfOperation::default(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Replace the category set; see [`normalize_types`].
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = normalize_types(types);
        self
    }

    pub fn with_hours(mut self, hours: HoursOfOperation) -> Self {
        self.hours_of_operation = hours;
        self
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_organization_name(mut self, organization_name: impl Into<String>) -> Self {
        self.organization_name = Some(organization_name.into());
        self
    }

    /// Coordinates when both are present and valid.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let coords = Coordinates::new(self.latitude?, self.longitude?);
        coords.is_valid().then_some(coords)
    }

    /// Organization name when present, else the entity name.
    pub fn display_name(&self) -> &str {
        self.organization_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.name)
    }

    /// Inclusive date-only check against `[start_date, end_date]`.
    ///
    /// A missing start means already started; a missing end means never ends.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if matches!(self.start_date, Some(start) if date < start) {
            return false;
        }
        if matches!(self.end_date, Some(end) if date > end) {
            return false;
        }
        true
    }

    pub fn has_any_type(&self, wanted: &[String]) -> bool {
        self.types.iter().any(|t| wanted.iter().any(|w| w == t))
    }
}

/// Trim labels, drop blanks and drop duplicates keeping first occurrence.
pub fn normalize_types<I, S>(types: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for t in types {
        let t = t.into().trim().to_string();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
