//! Outbound adapters for persistence and formatting collaborators.

pub mod highlight;
pub mod persistence;
