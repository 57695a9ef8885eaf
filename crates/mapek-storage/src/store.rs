use std::future::Future;

use mapek_core::models::event::UserActionEvent;
use mapek_core::models::plan::AdaptationPlan;

use crate::error::StorageError;

/// Append-only persistence for events and plans.
///
/// Nothing is ever updated or deleted through this trait.
pub trait AdaptationStore: Send + Sync {
    /// Append one event.
    fn append_event(
        &self,
        event: &UserActionEvent,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Every event of `user_id` with `occurred_at >= since`, oldest first.
    fn list_events(
        &self,
        user_id: &str,
        since: jiff::Timestamp,
    ) -> impl Future<Output = Result<Vec<UserActionEvent>, StorageError>> + Send;

    /// Append one plan.
    fn insert_plan(
        &self,
        plan: &AdaptationPlan,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// The newest plan stored for exactly this (user, patient) scope.
    /// `patient_id = None` means the user-level scope, not "any patient".
    fn latest_plan(
        &self,
        user_id: &str,
        patient_id: Option<&str>,
    ) -> impl Future<Output = Result<Option<AdaptationPlan>, StorageError>> + Send;
}
