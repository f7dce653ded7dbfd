//! Doctor Directory Core Library
//!
//! Searchable, filterable, sortable practitioner directory whose query state
//! lives in a shareable location string.
//!
//! # Architecture
//!
//! ```text
//!   Location string ──decode──┐
//!                             ▼
//!   Endpoint ──fetch once──▶ DirectoryStore ◀── QueryAction (search / toggle / mode / sort)
//!                             │
//!              ┌──────────────┼───────────────┐
//!              ▼              ▼               ▼
//!      Filter/Sort       Location          Suggestions
//!       Pipeline          encode         (full list, ≤3)
//!              │
//!              ▼
//!          PageView (cards + filter panel)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Doctor, QueryState, ConsultationType, SortKey)
//! - [`pipeline`]: Pure filter/sort derivation and autocomplete
//! - [`state`]: Reducer, location codec and session store
//! - [`fetch`]: One-shot retrieval of the record list
//! - [`view`]: Page view model and text rendering
//! - [`config`]: Endpoint and client settings

pub mod config;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use config::DirectoryConfig;
pub use fetch::{FetchError, HttpFetcher};
pub use models::{ConsultationType, Doctor, QueryState, SortKey};
pub use pipeline::{derive, suggest};
pub use state::{DirectoryStore, LoadState, QueryAction};
pub use view::PageView;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DirectoryError {
    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FetchError> for DirectoryError {
    fn from(e: FetchError) -> Self {
        DirectoryError::FetchError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DirectoryError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DirectoryError::Internal(format!("Lock poisoned: {}", e))
    }
}

/// Narrow a count or position to the `u32` the FFI carries.
fn ffi_u32(n: usize) -> Result<u32, DirectoryError> {
    u32::try_from(n).map_err(|_| DirectoryError::Internal(format!("{} does not fit in u32", n)))
}

fn ensure_loading(store: &DirectoryStore) -> Result<(), DirectoryError> {
    match store.load_state() {
        LoadState::Loading => Ok(()),
        _ => Err(DirectoryError::InvalidInput("directory already loaded".into())),
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a directory session hydrated from the page's location string.
///
/// The host performs the HTTP request and hands the response to
/// [`DirectoryCore::ingest_response`].
#[uniffi::export]
pub fn open_directory(location: String) -> Arc<DirectoryCore> {
    Arc::new(DirectoryCore {
        store: Arc::new(Mutex::new(DirectoryStore::from_location(&location))),
    })
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
///
/// Each call holds the lock for its whole transition, so calls from the
/// host are applied strictly one after another.
#[derive(uniffi::Object)]
pub struct DirectoryCore {
    store: Arc<Mutex<DirectoryStore>>,
}

#[uniffi::export]
impl DirectoryCore {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Feed the upstream response. Returns the number of records on success.
    ///
    /// A failed response still moves the session to its terminal error state.
    /// Once the session is terminal, further responses are rejected.
    pub fn ingest_response(&self, status: u16, body: String) -> Result<u32, DirectoryError> {
        let mut store = self.store.lock()?;
        ensure_loading(&store)?;
        match fetch::parse_response(status, &body) {
            Ok(doctors) => {
                let count = ffi_u32(doctors.len())?;
                store.finish_loading(Ok(doctors));
                Ok(count)
            }
            Err(e) => {
                let message = e.to_string();
                store.finish_loading(Err(e));
                Err(DirectoryError::FetchError(message))
            }
        }
    }

    /// Report a transport failure seen by the host. Rejected once the session is terminal.
    pub fn mark_failed(&self, reason: String) -> Result<(), DirectoryError> {
        let mut store = self.store.lock()?;
        ensure_loading(&store)?;
        store.finish_loading(Err(FetchError::Transport(reason)));
        Ok(())
    }

    pub fn load_status(&self) -> Result<FfiLoadStatus, DirectoryError> {
        let store = self.store.lock()?;
        Ok(match store.load_state() {
            LoadState::Loading => FfiLoadStatus::Loading,
            LoadState::Ready(_) => FfiLoadStatus::Ready,
            LoadState::Failed(_) => FfiLoadStatus::Failed,
        })
    }

    // =========================================================================
    // Search Bar
    // =========================================================================

    /// Update the search-bar text. Returns the suggestions now shown.
    pub fn set_search_draft(&self, text: String) -> Result<Vec<String>, DirectoryError> {
        let mut store = self.store.lock()?;
        store.set_draft(text);
        Ok(store.suggestions().to_vec())
    }

    /// Apply the suggestion at `index` as the search query.
    pub fn select_suggestion(&self, index: u32) -> Result<String, DirectoryError> {
        let mut store = self.store.lock()?;
        store
            .select_suggestion(index as usize)
            .ok_or_else(|| DirectoryError::InvalidInput(format!("No suggestion at index {}", index)))
    }

    /// Apply `query` directly as the search query.
    pub fn submit_search(&self, query: String) -> Result<(), DirectoryError> {
        let mut store = self.store.lock()?;
        store.set_draft(query);
        store.submit_draft();
        Ok(())
    }

    pub fn suggestions(&self) -> Result<Vec<String>, DirectoryError> {
        let store = self.store.lock()?;
        Ok(store.suggestions().to_vec())
    }

    // =========================================================================
    // Filters and Sort
    // =========================================================================

    pub fn toggle_specialty(&self, specialty: String) -> Result<(), DirectoryError> {
        let mut store = self.store.lock()?;
        store.dispatch(QueryAction::ToggleSpecialty(specialty));
        Ok(())
    }

    pub fn set_consultation(&self, mode: FfiConsultation) -> Result<(), DirectoryError> {
        let mut store = self.store.lock()?;
        store.dispatch(QueryAction::SetConsultation(mode.into()));
        Ok(())
    }

    pub fn set_sort(&self, order: FfiSortOrder) -> Result<(), DirectoryError> {
        let mut store = self.store.lock()?;
        store.dispatch(QueryAction::SetSort(order.into()));
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Current location string, without a leading `?`.
    pub fn location(&self) -> Result<String, DirectoryError> {
        let store = self.store.lock()?;
        Ok(store.location().to_string())
    }

    /// Cards for the visible records, in display order.
    pub fn visible_cards(&self) -> Result<Vec<FfiDoctorCard>, DirectoryError> {
        let store = self.store.lock()?;
        let records = store.records();
        store
            .visible_positions()
            .iter()
            .map(|&i| FfiDoctorCard::try_from(view::DoctorCard::new(i, &records[i])))
            .collect()
    }

    /// Checkbox options for every specialty in the full list.
    pub fn specialty_options(&self) -> Result<Vec<FfiFilterOption>, DirectoryError> {
        let store = self.store.lock()?;
        let query = store.query();
        Ok(store
            .all_specialties()
            .iter()
            .map(|tag| FfiFilterOption {
                label: tag.clone(),
                test_id: view::specialty_test_id(tag),
                checked: query.is_specialty_selected(tag),
            })
            .collect())
    }

    /// Whole page rendered as text.
    pub fn render_text(&self) -> Result<String, DirectoryError> {
        let store = self.store.lock()?;
        Ok(PageView::from_store(&store).to_string())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiLoadStatus {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiConsultation {
    Any,
    Video,
    Clinic,
}

impl From<FfiConsultation> for ConsultationType {
    fn from(mode: FfiConsultation) -> Self {
        match mode {
            FfiConsultation::Any => ConsultationType::Any,
            FfiConsultation::Video => ConsultationType::Video,
            FfiConsultation::Clinic => ConsultationType::Clinic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSortOrder {
    Unsorted,
    FeesAscending,
    ExperienceDescending,
}

impl From<FfiSortOrder> for SortKey {
    fn from(order: FfiSortOrder) -> Self {
        match order {
            FfiSortOrder::Unsorted => SortKey::Unsorted,
            FfiSortOrder::FeesAscending => SortKey::Fees,
            FfiSortOrder::ExperienceDescending => SortKey::Experience,
        }
    }
}

/// FFI-safe doctor card.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctorCard {
    pub key: u32,
    pub name: String,
    pub specialties: String,
    pub experience: String,
    pub fee: String,
    pub consultation_modes: String,
}

impl TryFrom<view::DoctorCard> for FfiDoctorCard {
    type Error = DirectoryError;

    fn try_from(card: view::DoctorCard) -> Result<Self, Self::Error> {
        Ok(Self {
            key: ffi_u32(card.key)?,
            name: card.name,
            specialties: card.specialties,
            experience: card.experience,
            fee: card.fee,
            consultation_modes: card.consultation_modes,
        })
    }
}

/// FFI-safe filter checkbox.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFilterOption {
    pub label: String,
    pub test_id: String,
    pub checked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"[
        {"name": "Dr. A", "speciality": ["Cardiology"], "experience": 5, "fee": 500, "video": true, "clinic": false},
        {"name": "Dr. B", "speciality": [], "experience": 10, "fee": 300, "video": false, "clinic": true}
    ]"#;

    #[test]
    fn test_ffi_session_flow() {
        let core = open_directory("?sort=fees".into());
        assert_eq!(core.load_status().unwrap(), FfiLoadStatus::Loading);

        assert_eq!(core.ingest_response(200, BODY.into()).unwrap(), 2);
        assert_eq!(core.load_status().unwrap(), FfiLoadStatus::Ready);

        let names: Vec<String> = core.visible_cards().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Dr. B", "Dr. A"]);

        core.toggle_specialty("Cardiology".into()).unwrap();
        core.set_consultation(FfiConsultation::Video).unwrap();
        assert_eq!(core.location().unwrap(), "specialties=Cardiology&consultation=video&sort=fees");

        let options = core.specialty_options().unwrap();
        assert_eq!(options.len(), 1);
        assert!(options[0].checked);
    }

    #[test]
    fn test_ffi_suggestion_selection() {
        let core = open_directory(String::new());
        core.ingest_response(200, BODY.into()).unwrap();

        assert_eq!(core.set_search_draft("dr".into()).unwrap(), vec!["Dr. A", "Dr. B"]);
        assert_eq!(core.select_suggestion(0).unwrap(), "Dr. A");
        assert!(core.suggestions().unwrap().is_empty());
        assert_eq!(core.location().unwrap(), "search=Dr.+A");

        assert!(matches!(core.select_suggestion(0), Err(DirectoryError::InvalidInput(_))));

        core.submit_search(String::new()).unwrap();
        assert_eq!(core.visible_cards().unwrap().len(), 2);
        assert_eq!(core.location().unwrap(), "");
    }

    #[test]
    fn test_ffi_failed_response_is_terminal() {
        let core = open_directory(String::new());
        assert!(matches!(
            core.ingest_response(502, String::new()),
            Err(DirectoryError::FetchError(_))
        ));
        assert_eq!(core.load_status().unwrap(), FfiLoadStatus::Failed);
        assert_eq!(core.render_text().unwrap(), "Failed to load doctors\n");

        core.set_sort(FfiSortOrder::ExperienceDescending).unwrap();
        assert_eq!(core.location().unwrap(), "sort=experience");
        assert!(core.visible_cards().unwrap().is_empty());
    }

    #[test]
    fn test_ffi_mark_failed() {
        let core = open_directory(String::new());
        core.mark_failed("offline".into()).unwrap();
        assert_eq!(core.load_status().unwrap(), FfiLoadStatus::Failed);
    }

    #[test]
    fn test_ffi_response_after_failure_is_rejected() {
        let core = open_directory(String::new());
        core.mark_failed("offline".into()).unwrap();

        assert!(matches!(
            core.ingest_response(200, BODY.into()),
            Err(DirectoryError::InvalidInput(_))
        ));
        assert_eq!(core.load_status().unwrap(), FfiLoadStatus::Failed);
        assert!(core.visible_cards().unwrap().is_empty());
    }

    #[test]
    fn test_ffi_second_response_is_rejected() {
        let core = open_directory(String::new());
        assert_eq!(core.ingest_response(200, BODY.into()).unwrap(), 2);

        assert!(matches!(
            core.ingest_response(200, "[]".into()),
            Err(DirectoryError::InvalidInput(_))
        ));
        assert!(matches!(
            core.mark_failed("late".into()),
            Err(DirectoryError::InvalidInput(_))
        ));
        assert_eq!(core.load_status().unwrap(), FfiLoadStatus::Ready);
        assert_eq!(core.visible_cards().unwrap().len(), 2);
    }

    #[test]
    fn test_ffi_u32_rejects_overflow() {
        assert_eq!(ffi_u32(7).unwrap(), 7);
        assert_eq!(ffi_u32(u32::MAX as usize).unwrap(), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            ffi_u32(u32::MAX as usize + 1),
            Err(DirectoryError::Internal(_))
        ));
    }
}
