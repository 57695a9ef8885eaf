use std::sync::Arc;

use tokio::sync::RwLock;

use mapek_core::models::event::UserActionEvent;
use mapek_core::models::plan::AdaptationPlan;

use crate::error::StorageError;
use crate::store::AdaptationStore;

#[derive(Default)]
struct Tables {
    events: Vec<UserActionEvent>,
    plans: Vec<AdaptationPlan>,
}

/// In-process store with the same append-only semantics as [`crate::S3Store`].
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn event_count(&self) -> usize {
        self.tables.read().await.events.len()
    }

    pub async fn plan_count(&self) -> usize {
        self.tables.read().await.plans.len()
    }
}

impl AdaptationStore for MemoryStore {
    async fn append_event(&self, event: &UserActionEvent) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        if tables.events.iter().any(|e| e.id == event.id) {
            return Err(StorageError::AlreadyExists {
                key: event.id.to_string(),
            });
        }
        tables.events.push(event.clone());
        Ok(())
    }

    async fn list_events(
        &self,
        user_id: &str,
        since: jiff::Timestamp,
    ) -> Result<Vec<UserActionEvent>, StorageError> {
        let tables = self.tables.read().await;
        let mut events: Vec<UserActionEvent> = tables
            .events
            .iter()
            .filter(|e| e.user_id == user_id && e.occurred_at >= since)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.occurred_at);
        Ok(events)
    }

    async fn insert_plan(&self, plan: &AdaptationPlan) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        if tables.plans.iter().any(|p| p.id == plan.id) {
            return Err(StorageError::AlreadyExists {
                key: plan.id.to_string(),
            });
        }
        tables.plans.push(plan.clone());
        Ok(())
    }

    async fn latest_plan(
        &self,
        user_id: &str,
        patient_id: Option<&str>,
    ) -> Result<Option<AdaptationPlan>, StorageError> {
        let tables = self.tables.read().await;
        // `max_by_key` keeps the last of equal maxima, so a later insert wins ties.
        Ok(tables
            .plans
            .iter()
            .filter(|p| p.user_id == user_id && p.patient_id.as_deref() == patient_id)
            .max_by_key(|p| p.generated_at)
            .cloned())
    }
}
