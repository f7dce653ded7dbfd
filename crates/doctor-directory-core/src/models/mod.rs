//! Domain models for the practitioner directory.

mod doctor;
mod query;

pub use doctor::*;
pub use query::*;
