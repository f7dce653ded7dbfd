//! Individual filter stages and the final sort.
//!
//! Each stage takes positions into the full record list and returns a new
//! `Vec` of positions, so the record list itself is never reordered.

use std::cmp::Ordering;

use crate::models::{ConsultationType, Doctor, SortKey};

/// Keep records whose name contains `query`, ignoring case. Empty query keeps all.
pub fn by_name(records: &[Doctor], positions: Vec<usize>, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return positions;
    }
    let needle = query.to_lowercase();
    positions
        .into_iter()
        .filter(|&i| records[i].name_contains(&needle))
        .collect()
}

/// Keep records sharing at least one tag with `selected`. Empty selection keeps all.
pub fn by_specialty(records: &[Doctor], positions: Vec<usize>, selected: &[String]) -> Vec<usize> {
    if selected.is_empty() {
        return positions;
    }
    positions
        .into_iter()
        .filter(|&i| records[i].has_any_specialty(selected))
        .collect()
}

/// Keep records offering the requested consultation mode.
pub fn by_consultation(
    records: &[Doctor],
    positions: Vec<usize>,
    mode: ConsultationType,
) -> Vec<usize> {
    match mode {
        ConsultationType::Any => positions,
        ConsultationType::Video => positions.into_iter().filter(|&i| records[i].video).collect(),
        ConsultationType::Clinic => positions.into_iter().filter(|&i| records[i].clinic).collect(),
    }
}

/// Stable sort of `positions` by the chosen key.
pub fn sort_by_key(records: &[Doctor], mut positions: Vec<usize>, key: SortKey) -> Vec<usize> {
    let compare: fn(&Doctor, &Doctor) -> Ordering = match key {
        SortKey::Unsorted => return positions,
        SortKey::Fees => |a: &Doctor, b: &Doctor| a.fee.total_cmp(&b.fee),
        SortKey::Experience => |a: &Doctor, b: &Doctor| b.experience.cmp(&a.experience),
    };
    // slice::sort_by is stable, ties keep filter order
    positions.sort_by(|&a, &b| compare(&records[a], &records[b]));
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Doctor> {
        let mut a = Doctor::new("Dr. Meera Shah", 8, 700.0);
        a.speciality = Some(vec!["Dentist".into()]);
        a.video = true;
        let mut b = Doctor::new("Dr. Arjun Patel", 15, 400.0);
        b.speciality = Some(vec!["Cardiologist".into(), "General Physician".into()]);
        b.clinic = true;
        let mut c = Doctor::new("Dr. Kavya Iyer", 8, 400.0);
        c.video = true;
        c.clinic = true;
        vec![a, b, c]
    }

    #[test]
    fn test_by_name_empty_query_is_identity() {
        let r = records();
        assert_eq!(by_name(&r, vec![2, 0, 1], ""), vec![2, 0, 1]);
    }

    #[test]
    fn test_by_name_matches_substring() {
        let r = records();
        assert_eq!(by_name(&r, vec![0, 1, 2], "PATEL"), vec![1]);
        assert_eq!(by_name(&r, vec![0, 1, 2], "dr."), vec![0, 1, 2]);
    }

    #[test]
    fn test_by_specialty_excludes_untagged() {
        let r = records();
        let selected = vec!["Dentist".to_string(), "General Physician".to_string()];
        assert_eq!(by_specialty(&r, vec![0, 1, 2], &selected), vec![0, 1]);
    }

    #[test]
    fn test_by_consultation() {
        let r = records();
        assert_eq!(by_consultation(&r, vec![0, 1, 2], ConsultationType::Video), vec![0, 2]);
        assert_eq!(by_consultation(&r, vec![0, 1, 2], ConsultationType::Clinic), vec![1, 2]);
        assert_eq!(by_consultation(&r, vec![0, 1, 2], ConsultationType::Any), vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_fees_is_stable() {
        let r = records();
        // records 1 and 2 share a fee of 400
        assert_eq!(sort_by_key(&r, vec![0, 1, 2], SortKey::Fees), vec![1, 2, 0]);
        assert_eq!(sort_by_key(&r, vec![0, 2, 1], SortKey::Fees), vec![2, 1, 0]);
    }

    #[test]
    fn test_sort_experience_descending_is_stable() {
        let r = records();
        // records 0 and 2 share 8 years
        assert_eq!(sort_by_key(&r, vec![0, 1, 2], SortKey::Experience), vec![1, 0, 2]);
        assert_eq!(sort_by_key(&r, vec![2, 1, 0], SortKey::Experience), vec![1, 2, 0]);
    }
}
