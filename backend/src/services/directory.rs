//! Directory filtering, free-text search and search suggestions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::availability::is_open_at;
use crate::models::{EntityKind, LocatedEntity};

/// Map sidebar selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFilter {
    /// Restrict to one list; `None` keeps every kind.
    #[serde(default)]
    pub kind: Option<EntityKind>,
    /// Keep entities sharing at least one of these; empty keeps all.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Keep only entities open at the reference instant.
    #[serde(default)]
    pub open_now: bool,
}

impl DirectoryFilter {
    pub fn matches(&self, entity: &LocatedEntity, at: NaiveDateTime) -> bool {
        if self.kind.is_some_and(|k| k != entity.kind) {
            return false;
        }
        if !self.categories.is_empty() && !entity.has_any_type(&self.categories) {
            return false;
        }
        !self.open_now || is_open_at(entity, at)
    }
}

/// Apply a filter, preserving input order.
pub fn filter_entities<'a>(
    entities: &'a [LocatedEntity],
    filter: &DirectoryFilter,
    at: NaiveDateTime,
) -> Vec<&'a LocatedEntity> {
    let kept: Vec<&LocatedEntity> = entities.iter().filter(|e| filter.matches(e, at)).collect();
    debug!(
        input = entities.len(),
        kept = kept.len(),
        open_now = filter.open_now,
        categories = filter.categories.len(),
        "filtered directory"
    );
    kept
}

fn matches_query(entity: &LocatedEntity, lower_query: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(lower_query);
    entity.organization_name.as_deref().is_some_and(hit) || hit(&entity.name)
}

fn normalized_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// First entity whose organization name or name contains `query`,
/// case-insensitively. A blank query matches nothing.
pub fn search_first<'a>(entities: &'a [LocatedEntity], query: &str) -> Option<&'a LocatedEntity> {
    let query = normalized_query(query)?;
    entities.iter().find(|e| matches_query(e, &query))
}

/// Up to `limit` matches for type-ahead, in input order.
pub fn suggestions<'a>(
    entities: &'a [LocatedEntity],
    query: &str,
    limit: usize,
) -> Vec<&'a LocatedEntity> {
    let Some(query) = normalized_query(query) else {
        return Vec::new();
    };
    entities
        .iter()
        .filter(|e| matches_query(e, &query))
        .take(limit)
        .collect()
}
