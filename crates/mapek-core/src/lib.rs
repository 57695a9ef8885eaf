//! mapek-core
//!
//! Pure domain types for the adaptive dashboard layer: interaction events,
//! usage summaries, layout plans, the rules knowledge base, and S3 key
//! conventions. No AWS SDK dependency.

pub mod error;
pub mod identifiers;
pub mod knowledge;
pub mod models;
pub mod s3_keys;
