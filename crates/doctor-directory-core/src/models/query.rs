//! Search, filter and sort selection.

use serde::{Deserialize, Serialize};

/// Consultation mode filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    /// No filter
    #[default]
    Any,
    Video,
    Clinic,
}

impl ConsultationType {
    /// Value used in the location string; `None` for the unset member.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            ConsultationType::Any => None,
            ConsultationType::Video => Some("video"),
            ConsultationType::Clinic => Some("clinic"),
        }
    }

    /// Parse a location string value. Unrecognized values mean no filter.
    pub fn from_param(value: &str) -> Self {
        match value {
            "video" => ConsultationType::Video,
            "clinic" => ConsultationType::Clinic,
            _ => ConsultationType::Any,
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep fetch order
    #[default]
    Unsorted,
    /// Fee, lowest first
    Fees,
    /// Experience, most experienced first
    Experience,
}

impl SortKey {
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortKey::Unsorted => None,
            SortKey::Fees => Some("fees"),
            SortKey::Experience => Some("experience"),
        }
    }

    pub fn from_param(value: &str) -> Self {
        match value {
            "fees" => SortKey::Fees,
            "experience" => SortKey::Experience,
            _ => SortKey::Unsorted,
        }
    }
}

/// Everything that decides which records are visible and in what order.
///
/// Values are replaced, never edited in place: see [`QueryState::apply`]
/// in the `state` module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Free-text name filter
    pub search_query: String,
    /// Selected specialty tags, no duplicates, selection order kept
    pub selected_specialties: Vec<String>,
    pub consultation: ConsultationType,
    pub sort: SortKey,
}

impl QueryState {
    /// True when every field is at its default.
    pub fn is_default(&self) -> bool {
        *self == QueryState::default()
    }

    pub fn is_specialty_selected(&self, tag: &str) -> bool {
        self.selected_specialties.iter().any(|s| s == tag)
    }
}
