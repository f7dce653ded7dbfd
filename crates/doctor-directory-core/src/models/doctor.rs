//! Practitioner record as published by the directory endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// A single practitioner in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    /// Display name, also the search key
    pub name: String,
    /// Specialty tags; `None` when the source omitted the field or sent a non-array
    #[serde(default, deserialize_with = "lenient_tags")]
    pub speciality: Option<Vec<String>>,
    /// Years of practice
    pub experience: u32,
    /// Consultation fee in rupees
    pub fee: f64,
    /// Offers video consultation
    #[serde(default)]
    pub video: bool,
    /// Offers in-clinic consultation
    #[serde(default)]
    pub clinic: bool,
}

impl Doctor {
    /// Create a record with no specialties and no consultation modes.
    pub fn new(name: impl Into<String>, experience: u32, fee: f64) -> Self {
        Self {
            name: name.into(),
            speciality: None,
            experience,
            fee,
            video: false,
            clinic: false,
        }
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `needle_lower` must already be lower-cased; callers lower the query
    /// once per derive instead of once per record.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }

    /// Specialty tags, empty when the record has none.
    pub fn specialties(&self) -> &[String] {
        self.speciality.as_deref().unwrap_or(&[])
    }

    /// True when at least one of this record's tags is in `selected`.
    ///
    /// A record without a specialty list never matches.
    pub fn has_any_specialty(&self, selected: &[String]) -> bool {
        match &self.speciality {
            Some(tags) => tags.iter().any(|t| selected.contains(t)),
            None => false,
        }
    }
}

/// Accept any JSON value for `speciality`, keeping it only when it is an array.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|v| match v {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}
