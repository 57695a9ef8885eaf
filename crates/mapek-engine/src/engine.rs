use std::sync::Arc;

use jiff::Timestamp;
use uuid::Uuid;

use mapek_core::identifiers;
use mapek_core::knowledge::{AdaptationRules, NoSpecialtyDefaults, SpecialtyDefaults};
use mapek_core::models::event::UserActionEvent;
use mapek_core::models::layout::{EffectiveLayout, LayoutSource};
use mapek_core::models::plan::AdaptationPlan;
use mapek_core::models::summary::UsageSummary;
use mapek_storage::AdaptationStore;

use crate::analyzer;
use crate::error::EngineError;
use crate::planner;
use crate::recorder;

/// Record, analyze and plan against one store.
///
/// Holds no mutable state: every call is an independent read/compute/write.
pub struct AdaptationEngine<S> {
    store: S,
    rules: AdaptationRules,
    specialties: Arc<dyn SpecialtyDefaults>,
}

impl<S: AdaptationStore> AdaptationEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            rules: AdaptationRules::default(),
            specialties: Arc::new(NoSpecialtyDefaults),
        }
    }

    pub fn with_rules(mut self, rules: AdaptationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_specialty_defaults(mut self, specialties: impl SpecialtyDefaults + 'static) -> Self {
        self.specialties = Arc::new(specialties);
        self
    }

    pub fn rules(&self) -> &AdaptationRules {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and append one event, returning its id.
    pub async fn record_event(
        &self,
        user_id: &str,
        category: &str,
        detail: serde_json::Value,
        patient_id: Option<&str>,
    ) -> Result<Uuid, EngineError> {
        let event = self
            .record_at(user_id, category, detail, patient_id, Timestamp::now())
            .await?;
        Ok(event.id)
    }

    /// Validate and append one event stamped with `occurred_at`.
    pub async fn record_at(
        &self,
        user_id: &str,
        category: &str,
        detail: serde_json::Value,
        patient_id: Option<&str>,
        occurred_at: Timestamp,
    ) -> Result<UserActionEvent, EngineError> {
        let event = recorder::build_event(user_id, category, detail, patient_id, occurred_at)?;
        self.store.append_event(&event).await?;

        tracing::debug!(
            event_id = %event.id,
            user_id = %event.user_id,
            category = %event.category(),
            "user action recorded"
        );
        Ok(event)
    }

    /// Summarize the user's events over `window_days` (rules default when
    /// `None`) ending now.
    pub async fn analyze(
        &self,
        user_id: &str,
        patient_id: Option<&str>,
        window_days: Option<u32>,
    ) -> Result<UsageSummary, EngineError> {
        self.analyze_at(user_id, patient_id, window_days, Timestamp::now())
            .await
    }

    pub async fn analyze_at(
        &self,
        user_id: &str,
        patient_id: Option<&str>,
        window_days: Option<u32>,
        now: Timestamp,
    ) -> Result<UsageSummary, EngineError> {
        identifiers::check_scope(user_id, patient_id)?;
        let window_days = window_days.unwrap_or(self.rules.default_window_days);
        let since = analyzer::window_start(now, window_days);
        let events = self.store.list_events(user_id, since).await?;
        Ok(analyzer::summarize(
            &events,
            user_id,
            patient_id,
            since,
            window_days,
        ))
    }

    /// Analyze, plan and persist a new plan for (user, patient).
    pub async fn generate_plan(
        &self,
        user_id: &str,
        patient_id: Option<&str>,
        window_days: Option<u32>,
    ) -> Result<AdaptationPlan, EngineError> {
        self.generate_plan_at(user_id, patient_id, window_days, Timestamp::now())
            .await
    }

    pub async fn generate_plan_at(
        &self,
        user_id: &str,
        patient_id: Option<&str>,
        window_days: Option<u32>,
        now: Timestamp,
    ) -> Result<AdaptationPlan, EngineError> {
        let summary = self.analyze_at(user_id, patient_id, window_days, now).await?;
        let plan = planner::plan(
            user_id,
            patient_id,
            &summary,
            &self.rules,
            self.specialties.as_ref(),
            now,
        );
        self.store.insert_plan(&plan).await?;

        tracing::info!(
            plan_id = %plan.id,
            user_id = %user_id,
            patient_id = ?patient_id,
            density = plan.suggestion_density.as_str(),
            adapted = plan.differs_from_default(),
            "adaptation plan generated"
        );
        Ok(plan)
    }

    /// The newest plan for (user, patient), falling back to the newest
    /// user-level plan. `None` means the caller should use the defaults.
    pub async fn get_latest_plan(
        &self,
        user_id: &str,
        patient_id: Option<&str>,
    ) -> Result<Option<AdaptationPlan>, EngineError> {
        identifiers::check_scope(user_id, patient_id)?;
        if let Some(patient_id) = patient_id
            && let Some(plan) = self.store.latest_plan(user_id, Some(patient_id)).await?
        {
            return Ok(Some(plan));
        }
        Ok(self.store.latest_plan(user_id, None).await?)
    }

    /// The layout a renderer should draw. Never fails: a storage error or
    /// an unusable id degrades to the default layout, as does `use_defaults`
    /// (UI reset).
    pub async fn effective_layout(
        &self,
        user_id: &str,
        patient_id: Option<&str>,
        use_defaults: bool,
    ) -> EffectiveLayout {
        if use_defaults {
            return EffectiveLayout::defaults(LayoutSource::Default);
        }

        match self.get_latest_plan(user_id, patient_id).await {
            Ok(Some(plan)) => EffectiveLayout::from_plan(plan),
            Ok(None) => EffectiveLayout::defaults(LayoutSource::Default),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    "failed to load adaptation plan, using default layout"
                );
                EffectiveLayout::defaults(LayoutSource::Fallback)
            }
        }
    }
}
