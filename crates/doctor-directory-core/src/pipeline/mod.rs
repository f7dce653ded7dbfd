//! Filter/sort pipeline over the fetched record list.
//!
//! Pipeline: Name Filter → Specialty Filter → Consultation Filter → Sort
//!
//! The pipeline works on positions into the full list. Positions double as
//! the render key for each card, since records carry no identifier.

mod filter;
mod autocomplete;

pub use filter::*;
pub use autocomplete::*;

use std::collections::HashSet;

use crate::models::{Doctor, QueryState};

/// Positions of the visible records, in display order.
pub fn derive_positions(records: &[Doctor], state: &QueryState) -> Vec<usize> {
    let all: Vec<usize> = (0..records.len()).collect();

    // Step 1: name filter
    let named = by_name(records, all, &state.search_query);

    // Step 2: specialty filter
    let tagged = by_specialty(records, named, &state.selected_specialties);

    // Step 3: consultation filter
    let offered = by_consultation(records, tagged, state.consultation);

    // Step 4: sort
    let ordered = sort_by_key(records, offered, state.sort);

    tracing::debug!(
        total = records.len(),
        visible = ordered.len(),
        "Derived visible records"
    );
    ordered
}

/// Visible records, in display order.
pub fn derive<'a>(records: &'a [Doctor], state: &QueryState) -> Vec<&'a Doctor> {
    derive_positions(records, state)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Distinct non-empty specialty tags across the full list, in first-seen order.
pub fn all_specialties(records: &[Doctor]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(|d| d.specialties())
        .filter(|tag| !tag.is_empty() && seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsultationType, SortKey};

    fn roster() -> Vec<Doctor> {
        let mut a = Doctor::new("Dr. Neha Gupta", 12, 800.0);
        a.speciality = Some(vec!["Dermatologist".into(), "Cosmetologist".into()]);
        a.video = true;
        a.clinic = true;
        let mut b = Doctor::new("Dr. Vikram Singh", 20, 1000.0);
        b.speciality = Some(vec!["Dermatologist".into()]);
        b.clinic = true;
        let mut c = Doctor::new("Dr. Neil Mathew", 4, 300.0);
        c.speciality = Some(vec!["Dentist".into()]);
        c.video = true;
        let d = Doctor::new("Dr. Nisha Verma", 9, 450.0);
        vec![a, b, c, d]
    }

    #[test]
    fn test_default_state_keeps_everything_in_order() {
        let records = roster();
        let positions = derive_positions(&records, &QueryState::default());
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_all_stages_combined() {
        let records = roster();
        let state = QueryState {
            search_query: "ne".into(),
            selected_specialties: vec!["Dermatologist".into(), "Dentist".into()],
            consultation: ConsultationType::Video,
            sort: SortKey::Fees,
        };

        let names: Vec<&str> = derive(&records, &state).iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. Neil Mathew", "Dr. Neha Gupta"]);
    }

    #[test]
    fn test_experience_sort_after_filter() {
        let records = roster();
        let state = QueryState {
            selected_specialties: vec!["Dermatologist".into()],
            sort: SortKey::Experience,
            ..Default::default()
        };
        assert_eq!(derive_positions(&records, &state), vec![1, 0]);
    }

    #[test]
    fn test_all_specialties_first_seen_order() {
        let records = roster();
        assert_eq!(
            all_specialties(&records),
            vec!["Dermatologist", "Cosmetologist", "Dentist"]
        );
    }

    #[test]
    fn test_all_specialties_skips_blank_tags() {
        let mut records = roster();
        records[3].speciality = Some(vec![String::new(), "Dentist".into()]);
        assert_eq!(
            all_specialties(&records),
            vec!["Dermatologist", "Cosmetologist", "Dentist"]
        );
    }

    #[test]
    fn test_empty_records() {
        assert!(derive(&[], &QueryState::default()).is_empty());
        assert!(all_specialties(&[]).is_empty());
    }
}
