use aws_sdk_s3::Client;

use mapek_core::models::event::UserActionEvent;
use mapek_core::models::plan::AdaptationPlan;
use mapek_core::s3_keys;

use crate::error::StorageError;
use crate::json;
use crate::objects;
use crate::store::AdaptationStore;

/// Stores each event and plan as its own JSON object in S3.
#[derive(Clone)]
pub struct S3Store {
    pub s3: Client,
    pub bucket: String,
}

impl S3Store {
    pub fn new(s3: Client, bucket: impl Into<String>) -> Self {
        Self {
            s3,
            bucket: bucket.into(),
        }
    }
}

impl AdaptationStore for S3Store {
    async fn append_event(&self, event: &UserActionEvent) -> Result<(), StorageError> {
        let key = s3_keys::event(&event.user_id, event.occurred_at, event.id);
        json::append_json(&self.s3, &self.bucket, &key, event).await?;
        tracing::debug!(key = %key, "event appended");
        Ok(())
    }

    async fn list_events(
        &self,
        user_id: &str,
        since: jiff::Timestamp,
    ) -> Result<Vec<UserActionEvent>, StorageError> {
        let prefix = s3_keys::events_prefix(user_id);
        let marker = s3_keys::events_start_after(user_id, since);
        let keys = objects::list_objects(&self.s3, &self.bucket, &prefix, Some(&marker)).await?;

        let mut events = Vec::with_capacity(keys.len());
        for key in keys.iter().filter(|k| s3_keys::is_direct_child(&prefix, k)) {
            let event: UserActionEvent = json::load_json(&self.s3, &self.bucket, key).await?;
            // Keys clamp pre-epoch times to zero, so re-check the window here.
            if event.occurred_at >= since && event.user_id == user_id {
                events.push(event);
            }
        }

        tracing::debug!(user_id = %user_id, count = events.len(), "events loaded");
        Ok(events)
    }

    async fn insert_plan(&self, plan: &AdaptationPlan) -> Result<(), StorageError> {
        let key = s3_keys::plan(
            &plan.user_id,
            plan.patient_id.as_deref(),
            plan.generated_at,
            plan.id,
        );
        json::append_json(&self.s3, &self.bucket, &key, plan).await?;
        tracing::debug!(key = %key, "plan stored");
        Ok(())
    }

    async fn latest_plan(
        &self,
        user_id: &str,
        patient_id: Option<&str>,
    ) -> Result<Option<AdaptationPlan>, StorageError> {
        let prefix = s3_keys::plans_prefix(user_id, patient_id);
        let keys = objects::list_objects(&self.s3, &self.bucket, &prefix, None).await?;

        let Some(key) = keys
            .into_iter()
            .filter(|k| s3_keys::is_direct_child(&prefix, k))
            .max()
        else {
            return Ok(None);
        };

        let plan: AdaptationPlan = json::load_json(&self.s3, &self.bucket, &key).await?;
        if !plan.has_complete_order() {
            return Err(StorageError::CorruptPlan { key });
        }
        if plan.user_id != user_id || plan.patient_id.as_deref() != patient_id {
            return Err(StorageError::ScopeMismatch { key });
        }
        Ok(Some(plan))
    }
}
