//! Query-state transitions and the session store.
//!
//! Every change to the search/filter/sort selection goes through
//! [`QueryState::apply`], which returns a new state. The store then
//! re-derives the visible list and re-encodes the location string.

pub mod location;
mod store;

pub use store::*;

use serde::{Deserialize, Serialize};

use crate::models::{ConsultationType, QueryState, SortKey};

/// A single user-driven change to the query state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryAction {
    SetSearch(String),
    /// Remove the tag if selected, append it otherwise. An empty tag is ignored.
    ToggleSpecialty(String),
    SetConsultation(ConsultationType),
    SetSort(SortKey),
}

impl QueryState {
    /// Pure transition: returns the state after `action`.
    pub fn apply(&self, action: QueryAction) -> QueryState {
        let mut next = self.clone();
        match action {
            QueryAction::SetSearch(query) => next.search_query = query,
            QueryAction::ToggleSpecialty(tag) if tag.is_empty() => {}
            QueryAction::ToggleSpecialty(tag) => {
                if next.is_specialty_selected(&tag) {
                    next.selected_specialties.retain(|s| *s != tag);
                } else {
                    next.selected_specialties.push(tag);
                }
            }
            QueryAction::SetConsultation(mode) => next.consultation = mode,
            QueryAction::SetSort(key) => next.sort = key,
        }
        next
    }
}
