//! Shareable location string (URL query) codec for [`QueryState`].
//!
//! Keys, in encoding order: `search`, `specialties`, `consultation`, `sort`.
//! A field at its default is omitted entirely, so the default state encodes
//! to the empty string.
//!
//! Specialties are comma-joined. A `,` or `%` inside a tag is written as
//! `%2C` or `%25` before joining, so tags from the data round-trip intact.

use url::form_urlencoded;

use crate::models::{ConsultationType, QueryState, SortKey};

pub const SEARCH_KEY: &str = "search";
pub const SPECIALTIES_KEY: &str = "specialties";
pub const CONSULTATION_KEY: &str = "consultation";
pub const SORT_KEY: &str = "sort";

/// Encode a state as `application/x-www-form-urlencoded` pairs, without a leading `?`.
pub fn encode(state: &QueryState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    if !state.search_query.is_empty() {
        out.append_pair(SEARCH_KEY, &state.search_query);
    }
    if !state.selected_specialties.is_empty() {
        let joined: Vec<String> = state
            .selected_specialties
            .iter()
            .map(|tag| escape_tag(tag))
            .collect();
        out.append_pair(SPECIALTIES_KEY, &joined.join(","));
    }
    if let Some(mode) = state.consultation.as_param() {
        out.append_pair(CONSULTATION_KEY, mode);
    }
    if let Some(sort) = state.sort.as_param() {
        out.append_pair(SORT_KEY, sort);
    }
    out.finish()
}

/// Rebuild a state from a location string. Never fails.
///
/// The first occurrence of each key wins; unknown keys are ignored.
pub fn decode(location: &str) -> QueryState {
    let query = location.strip_prefix('?').unwrap_or(location);

    let mut search = None;
    let mut specialties = None;
    let mut consultation = None;
    let mut sort = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match &*key {
            SEARCH_KEY => &mut search,
            SPECIALTIES_KEY => &mut specialties,
            CONSULTATION_KEY => &mut consultation,
            SORT_KEY => &mut sort,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    QueryState {
        search_query: search.unwrap_or_default(),
        selected_specialties: specialties.as_deref().map(split_tags).unwrap_or_default(),
        consultation: consultation
            .as_deref()
            .map(ConsultationType::from_param)
            .unwrap_or_default(),
        sort: sort.as_deref().map(SortKey::from_param).unwrap_or_default(),
    }
}

/// Split a comma-joined tag list, dropping empty segments and repeats.
fn split_tags(joined: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in joined.split(',').filter(|t| !t.is_empty()).map(unescape_tag) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn escape_tag(tag: &str) -> String {
    tag.replace('%', "%25").replace(',', "%2C")
}

/// Inverse of [`escape_tag`]. Any other `%` sequence is kept as written.
fn unescape_tag(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;
    while let Some(at) = rest.find('%') {
        out.push_str(&rest[..at]);
        let tail = &rest[at..];
        if tail.as_bytes().get(1..3).is_some_and(|hex| hex.eq_ignore_ascii_case(b"2c")) {
            out.push(',');
            rest = &tail[3..];
        } else if tail.starts_with("%25") {
            out.push('%');
            rest = &tail[3..];
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
