//! DTOs for the events adapter.

use time::OffsetDateTime;

/// DTO for creating a club event.
#[derive(Debug, Clone)]
pub struct EventCreate {
    pub title: String,
    pub starts_at: OffsetDateTime,
    pub venue: Option<String>,
    pub description: Option<String>,
}

/// Partial update for an event.
///
/// `venue` and `description` are three-state: None = no change,
/// Some(None) = clear, Some(Some(v)) = set.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub starts_at: Option<OffsetDateTime>,
    pub venue: Option<Option<String>>,
    pub description: Option<Option<String>>,
}
