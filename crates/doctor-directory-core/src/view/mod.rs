//! Presentation model for the directory page.
//!
//! A [`PageView`] is a pure function of a [`DirectoryStore`]: it holds no
//! state of its own. Hosts either walk the structs directly or use the
//! plain-text [`Display`](std::fmt::Display) rendering.

mod render;

use crate::models::{ConsultationType, Doctor, SortKey};
use crate::state::{DirectoryStore, LoadState};

pub const LOADING_TEXT: &str = "Loading...";
pub const LOAD_FAILED_TEXT: &str = "Failed to load doctors";
pub const NO_RESULTS_TEXT: &str = "No doctors found matching your criteria";
pub const NO_SPECIALTIES_TEXT: &str = "No specialties listed";
pub const SEARCH_PLACEHOLDER: &str = "Search Symptoms, Doctors, Specialists, Clinics";

/// One practitioner card.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorCard {
    /// Position in the fetched list, the render key
    pub key: usize,
    pub name: String,
    pub specialties: String,
    pub experience: String,
    pub fee: String,
    /// Offered modes, e.g. "Video Consult, In Clinic"; empty when neither
    pub consultation_modes: String,
}

impl DoctorCard {
    pub fn new(key: usize, doctor: &Doctor) -> Self {
        let specialties = if doctor.specialties().is_empty() {
            NO_SPECIALTIES_TEXT.to_string()
        } else {
            doctor.specialties().join(", ")
        };

        let modes: Vec<&str> = [
            doctor.video.then_some("Video Consult"),
            doctor.clinic.then_some("In Clinic"),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            key,
            name: doctor.name.clone(),
            specialties,
            experience: format!("{} years exp.", doctor.experience),
            fee: format!("₹{}", doctor.fee),
            consultation_modes: modes.join(", "),
        }
    }
}

/// A radio button or checkbox in the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub test_id: String,
    pub checked: bool,
}

impl FilterOption {
    fn new(label: impl Into<String>, test_id: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            test_id: test_id.into(),
            checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanelView {
    pub sort: Vec<FilterOption>,
    pub consultation: Vec<FilterOption>,
    /// One checkbox per distinct specialty in the full list
    pub specialties: Vec<FilterOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarView {
    pub draft: String,
    pub placeholder: &'static str,
    /// Empty while the suggestion list is closed
    pub suggestions: Vec<String>,
}

/// Whole page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    Failed,
    Ready {
        search: SearchBarView,
        filters: FilterPanelView,
        cards: Vec<DoctorCard>,
        /// Shown instead of an empty grid
        empty_message: Option<&'static str>,
    },
}

impl PageView {
    pub fn from_store(store: &DirectoryStore) -> Self {
        match store.load_state() {
            LoadState::Loading => PageView::Loading,
            LoadState::Failed(_) => PageView::Failed,
            LoadState::Ready(records) => {
                let cards: Vec<DoctorCard> = store
                    .visible_positions()
                    .iter()
                    .map(|&i| DoctorCard::new(i, &records[i]))
                    .collect();
                let empty_message = cards.is_empty().then_some(NO_RESULTS_TEXT);

                PageView::Ready {
                    search: SearchBarView {
                        draft: store.search_bar().draft.clone(),
                        placeholder: SEARCH_PLACEHOLDER,
                        suggestions: store.suggestions().to_vec(),
                    },
                    filters: filter_panel(store),
                    cards,
                    empty_message,
                }
            }
        }
    }
}

fn filter_panel(store: &DirectoryStore) -> FilterPanelView {
    let query = store.query();

    let sort = vec![
        FilterOption::new("Price (Low-High)", "sort-fees", query.sort == SortKey::Fees),
        FilterOption::new(
            "Experience (Most Experienced first)",
            "sort-experience",
            query.sort == SortKey::Experience,
        ),
    ];

    let consultation = vec![
        FilterOption::new(
            "Video Consultation",
            "filter-video-consult",
            query.consultation == ConsultationType::Video,
        ),
        FilterOption::new(
            "In-Clinic Consultation",
            "filter-in-clinic",
            query.consultation == ConsultationType::Clinic,
        ),
    ];

    let specialties = store
        .all_specialties()
        .iter()
        .map(|tag| {
            FilterOption::new(
                tag.as_str(),
                specialty_test_id(tag),
                query.is_specialty_selected(tag),
            )
        })
        .collect();

    FilterPanelView {
        sort,
        consultation,
        specialties,
    }
}

/// Test id for a specialty checkbox: `/` in the tag becomes `-`.
pub fn specialty_test_id(tag: &str) -> String {
    format!("filter-specialty-{}", tag.replace('/', "-"))
}
