//! Session store: loaded records, query state, location string and search bar.

use crate::fetch::FetchError;
use crate::models::{Doctor, QueryState};
use crate::pipeline;

use super::{location, QueryAction};

/// Progress of the one-shot fetch. `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(Vec<Doctor>),
    /// Failure detail, kept for logs only
    Failed(String),
}

/// In-progress text in the search bar and its suggestion list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBar {
    pub draft: String,
    pub suggestions: Vec<String>,
    pub open: bool,
}

/// All state behind one directory page.
///
/// The location string is rewritten after every transition, so
/// `location::decode(store.location()) == *store.query()` always holds.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    load: LoadState,
    query: QueryState,
    visible: Vec<usize>,
    location: String,
    specialties: Vec<String>,
    search_bar: SearchBar,
}

impl DirectoryStore {
    /// Hydrate a store from the page's initial location string.
    pub fn from_location(initial: &str) -> Self {
        let query = location::decode(initial);
        let canonical = location::encode(&query);
        tracing::debug!(initial, canonical = %canonical, "Hydrated query state");

        Self {
            load: LoadState::Loading,
            search_bar: SearchBar {
                draft: query.search_query.clone(),
                ..Default::default()
            },
            query,
            visible: Vec::new(),
            location: canonical,
            specialties: Vec::new(),
        }
    }

    /// Record the outcome of the fetch. Ignored once loading has finished.
    pub fn finish_loading(&mut self, result: Result<Vec<Doctor>, FetchError>) {
        if !matches!(self.load, LoadState::Loading) {
            tracing::warn!("Ignoring fetch result after loading already finished");
            return;
        }

        match result {
            Ok(doctors) => {
                tracing::info!(count = doctors.len(), "Directory ready");
                self.specialties = pipeline::all_specialties(&doctors);
                self.visible = pipeline::derive_positions(&doctors, &self.query);
                self.search_bar.suggestions = pipeline::suggest(&doctors, &self.search_bar.draft);
                self.load = LoadState::Ready(doctors);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load doctors");
                self.load = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Apply a transition, then re-encode the location string and re-derive
    /// the visible list.
    ///
    /// The stored query is the one decoded back from the new location, so a
    /// reload of that location shows the same page.
    pub fn dispatch(&mut self, action: QueryAction) {
        tracing::debug!(?action, "Dispatching query action");
        let next = self.query.apply(action);
        self.location = location::encode(&next);
        self.query = location::decode(&self.location);
        if self.query != next {
            tracing::warn!(location = %self.location, "Query state changed by location round trip");
        }
        self.visible = pipeline::derive_positions(self.records(), &self.query);
    }

    /// Update the search-bar text and recompute suggestions.
    ///
    /// Does not change the applied search query.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.search_bar.draft = text.into();
        self.search_bar.suggestions = pipeline::suggest(self.records(), &self.search_bar.draft);
        self.search_bar.open = !self.search_bar.suggestions.is_empty();
    }

    /// Apply the suggestion at `index` as the search query and close the list.
    ///
    /// Returns the chosen name, or `None` when no such suggestion is shown.
    pub fn select_suggestion(&mut self, index: usize) -> Option<String> {
        if !self.search_bar.open {
            return None;
        }
        let name = self.search_bar.suggestions.get(index)?.clone();
        self.search_bar.draft = name.clone();
        self.search_bar.open = false;
        self.dispatch(QueryAction::SetSearch(name.clone()));
        Some(name)
    }

    /// Apply the current draft as the search query and close the list.
    pub fn submit_draft(&mut self) {
        self.search_bar.open = false;
        let query = self.search_bar.draft.clone();
        self.dispatch(QueryAction::SetSearch(query));
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Canonical location string for the current query, without a leading `?`.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Full fetched list; empty until loading succeeds.
    pub fn records(&self) -> &[Doctor] {
        match &self.load {
            LoadState::Ready(doctors) => doctors.as_slice(),
            _ => &[],
        }
    }

    /// Positions of visible records in display order.
    pub fn visible_positions(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible(&self) -> Vec<&Doctor> {
        let records = self.records();
        self.visible.iter().map(|&i| &records[i]).collect()
    }

    /// Distinct specialties across the full list.
    pub fn all_specialties(&self) -> &[String] {
        &self.specialties
    }

    pub fn search_bar(&self) -> &SearchBar {
        &self.search_bar
    }

    /// Suggestions currently shown; empty while the list is closed.
    pub fn suggestions(&self) -> &[String] {
        if self.search_bar.open {
            self.search_bar.suggestions.as_slice()
        } else {
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsultationType, SortKey};

    fn roster() -> Vec<Doctor> {
        let mut a = Doctor::new("Dr. A", 5, 500.0);
        a.speciality = Some(vec!["Cardiology".into()]);
        a.video = true;
        let mut b = Doctor::new("Dr. B", 10, 300.0);
        b.speciality = Some(vec![]);
        b.clinic = true;
        vec![a, b]
    }

    fn ready_store(location: &str) -> DirectoryStore {
        let mut store = DirectoryStore::from_location(location);
        store.finish_loading(Ok(roster()));
        store
    }

    #[test]
    fn test_hydrate_canonicalizes_location() {
        let store = DirectoryStore::from_location("?sort=fees&page=3&consultation=phone");
        assert_eq!(store.query().sort, SortKey::Fees);
        assert_eq!(store.query().consultation, ConsultationType::Any);
        assert_eq!(store.location(), "sort=fees");
        assert!(matches!(store.load_state(), LoadState::Loading));
        assert!(store.visible().is_empty());
    }

    #[test]
    fn test_loading_applies_hydrated_state() {
        let store = ready_store("sort=fees");
        let names: Vec<&str> = store.visible().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. B", "Dr. A"]);
        assert_eq!(store.all_specialties(), ["Cardiology".to_string()]);
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut store = DirectoryStore::from_location("");
        store.finish_loading(Err(FetchError::Status(503)));
        assert!(matches!(store.load_state(), LoadState::Failed(_)));

        store.finish_loading(Ok(roster()));
        assert!(matches!(store.load_state(), LoadState::Failed(_)));
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_dispatch_updates_visible_and_location() {
        let mut store = ready_store("");
        store.dispatch(QueryAction::ToggleSpecialty("Cardiology".into()));

        assert_eq!(store.visible_positions(), &[0]);
        assert_eq!(store.location(), "specialties=Cardiology");

        store.dispatch(QueryAction::ToggleSpecialty("Cardiology".into()));
        assert_eq!(store.visible_positions(), &[0, 1]);
        assert_eq!(store.location(), "");
    }

    #[test]
    fn test_location_always_decodes_to_query() {
        let mut store = ready_store("");
        let actions = [
            QueryAction::SetSearch("dr".into()),
            QueryAction::SetConsultation(ConsultationType::Clinic),
            QueryAction::ToggleSpecialty("Cardiology".into()),
            QueryAction::SetSort(SortKey::Experience),
            QueryAction::SetSearch(String::new()),
        ];
        for action in actions {
            store.dispatch(action);
            assert_eq!(location::decode(store.location()), *store.query());
        }
    }

    #[test]
    fn test_comma_tag_from_data_survives_reload() {
        let mut ent = Doctor::new("Dr. C", 7, 400.0);
        ent.speciality = Some(vec!["Ear, Nose and Throat".into()]);
        let mut records = roster();
        records.push(ent);

        let mut store = DirectoryStore::from_location("");
        store.finish_loading(Ok(records.clone()));
        store.dispatch(QueryAction::ToggleSpecialty("Ear, Nose and Throat".into()));
        assert_eq!(store.visible_positions(), &[2]);

        let mut reloaded = DirectoryStore::from_location(store.location());
        reloaded.finish_loading(Ok(records));
        assert_eq!(reloaded.query(), store.query());
        assert_eq!(reloaded.visible_positions(), &[2]);
    }

    #[test]
    fn test_empty_tag_leaves_page_unfiltered() {
        let mut store = ready_store("");
        store.dispatch(QueryAction::ToggleSpecialty(String::new()));

        assert_eq!(store.location(), "");
        assert!(store.query().selected_specialties.is_empty());
        assert_eq!(store.visible_positions(), &[0, 1]);
    }

    #[test]
    fn test_draft_does_not_filter_until_selected() {
        let mut store = ready_store("");
        store.set_draft("Dr");

        assert_eq!(store.suggestions(), ["Dr. A".to_string(), "Dr. B".to_string()]);
        assert_eq!(store.visible_positions(), &[0, 1]);
        assert_eq!(store.query().search_query, "");

        assert_eq!(store.select_suggestion(1).as_deref(), Some("Dr. B"));
        assert!(store.suggestions().is_empty());
        assert_eq!(store.search_bar().draft, "Dr. B");
        assert_eq!(store.visible_positions(), &[1]);
        assert_eq!(store.location(), "search=Dr.+B");
    }

    #[test]
    fn test_select_out_of_range_or_closed() {
        let mut store = ready_store("");
        assert_eq!(store.select_suggestion(0), None);

        store.set_draft("dr. a");
        assert_eq!(store.select_suggestion(5), None);
        assert_eq!(store.query().search_query, "");
    }

    #[test]
    fn test_submit_draft_applies_raw_text() {
        let mut store = ready_store("");
        store.set_draft("zzz");
        assert!(store.suggestions().is_empty());

        store.submit_draft();
        assert_eq!(store.query().search_query, "zzz");
        assert!(store.visible().is_empty());
    }

    #[test]
    fn test_hydrated_search_seeds_draft() {
        let store = ready_store("search=dr.+a");
        assert_eq!(store.search_bar().draft, "dr. a");
        assert_eq!(store.visible_positions(), &[0]);
        // suggestion list stays closed until the user types
        assert!(store.suggestions().is_empty());
    }
}
