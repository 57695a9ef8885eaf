//! mapek-engine
//!
//! Usage analysis and layout planning over recorded interaction events.
//!
//! Public API:
//! - `recorder::build_event()`: validate a raw event into a `UserActionEvent`
//! - `analyzer::summarize()`: count events into a `UsageSummary`
//! - `planner::decide()`: turn a summary into section order, density, explanation
//! - `AdaptationEngine`: the three store-backed operations: record, generate, fetch latest

pub mod analyzer;
pub mod engine;
pub mod error;
pub mod planner;
pub mod recorder;

pub use crate::engine::AdaptationEngine;
pub use crate::error::EngineError;
