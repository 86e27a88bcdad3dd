use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::adaptive::{self, AdjustmentAction, DifficultyAdjustment};
use crate::config::EngineConfig;
use crate::generators::{self, GenerateError, ModelId, QuestionOutput};
use crate::level::DifficultyLevel;
use crate::params::ParameterStore;
use crate::sampler::ValueSampler;
use crate::session::{PerformanceRecord, SessionSnapshot, SessionStore};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No fallback generator is substituted for an unknown id.
    #[error("unknown model id: {0}")]
    UnknownModel(String),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// A generated question with its engine-assigned identity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question_id: String,
    pub model_id: ModelId,
    pub level: DifficultyLevel,
    pub output: QuestionOutput,
}

/// One attempt outcome as reported by the caller.
#[derive(Debug, Clone)]
pub struct AttemptInput {
    pub question_id: String,
    pub model_id: String,
    pub level: DifficultyLevel,
    pub is_correct: bool,
    pub time_spent_ms: i64,
    pub hint_used: bool,
    pub attempts_required: u32,
}

/// Facade over the generator registry, the session store and the adaptive
/// controller. The controller itself stays pure; this type persists the
/// adjustments it returns.
pub struct QuestionEngine {
    config: EngineConfig,
    store: Arc<SessionStore>,
    params: ParameterStore,
}

impl QuestionEngine {
    pub fn new(config: EngineConfig) -> Self {
        let store = Arc::new(SessionStore::new(DifficultyLevel::default()));
        Self::with_store(config, store)
    }

    /// Injectable store so tests and embedders can isolate session state.
    pub fn with_store(config: EngineConfig, store: Arc<SessionStore>) -> Self {
        Self {
            config,
            store,
            params: ParameterStore::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn parameter_store(&self) -> &ParameterStore {
        &self.params
    }

    /// Generation contract: `model_id` selects a registered generator;
    /// unknown ids are an error, never a silent substitution.
    pub fn generate(&self, model_id: &str, params: &Value) -> Result<QuestionOutput, EngineError> {
        let mut sampler = ValueSampler::new();
        self.generate_with(model_id, params, &mut sampler)
    }

    /// Deterministic variant for test harnesses.
    pub fn generate_seeded(
        &self,
        model_id: &str,
        params: &Value,
        seed: u64,
    ) -> Result<QuestionOutput, EngineError> {
        let mut sampler = ValueSampler::seeded(seed);
        self.generate_with(model_id, params, &mut sampler)
    }

    fn generate_with(
        &self,
        model_id: &str,
        params: &Value,
        sampler: &mut ValueSampler,
    ) -> Result<QuestionOutput, EngineError> {
        let model = ModelId::parse(model_id)
            .ok_or_else(|| EngineError::UnknownModel(model_id.to_string()))?;
        Ok(generators::generate(model, params, sampler)?)
    }

    /// Generates from the level's curated or default parameter set and
    /// assigns a question id.
    pub fn generate_for_level(
        &self,
        model_id: &str,
        level: DifficultyLevel,
    ) -> Result<GeneratedQuestion, EngineError> {
        let model = ModelId::parse(model_id)
            .ok_or_else(|| EngineError::UnknownModel(model_id.to_string()))?;
        let params = self.params.params_for(model, level);
        let mut sampler = ValueSampler::new();
        let output = generators::generate(model, &params, &mut sampler)?;
        Ok(GeneratedQuestion {
            question_id: Uuid::new_v4().to_string(),
            model_id: model,
            level,
            output,
        })
    }

    /// Appends a performance record to the session's log (creating the
    /// session on first reference) and rolls the streak.
    pub fn record_attempt(&self, session_id: &str, input: AttemptInput) {
        let record = PerformanceRecord {
            question_id: input.question_id,
            model_id: input.model_id,
            level: input.level,
            is_correct: input.is_correct,
            time_spent_ms: input.time_spent_ms,
            hint_used: input.hint_used,
            attempts_required: input.attempts_required,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        let session = self.store.get_or_create(session_id);
        let mut guard = session.lock();
        guard.record_attempt(record);
        debug!(
            session_id,
            streak = guard.streak_count,
            attempts = guard.records.len(),
            "attempt recorded"
        );
    }

    /// Evaluates the controller against a session snapshot and persists the
    /// resulting adjustment (level change; confidence mode on lock).
    pub fn recommend(&self, session_id: &str) -> DifficultyAdjustment {
        let session = self.store.get_or_create(session_id);
        let mut guard = session.lock();

        if !guard.adaptive_mode {
            return DifficultyAdjustment {
                action: AdjustmentAction::Maintain,
                from_level: guard.current_level,
                to_level: guard.current_level,
                reason: "adaptive mode is disabled for this session".to_string(),
                confidence: 1.0,
                recommendation: "re-enable adaptive mode to resume automatic adjustment"
                    .to_string(),
            };
        }

        let recent = guard.recent_records(crate::session::SNAPSHOT_WINDOW).to_vec();
        let adjustment = adaptive::recommend(
            guard.current_level,
            &recent,
            guard.streak_count,
            guard.confidence_mode,
        );

        guard.current_level = adjustment.to_level;
        if adjustment.action == AdjustmentAction::Lock {
            guard.confidence_mode = true;
        }
        guard.touch();
        debug!(
            session_id,
            action = adjustment.action.as_str(),
            from = %adjustment.from_level,
            to = %adjustment.to_level,
            reason = %adjustment.reason,
            "difficulty adjustment"
        );
        adjustment
    }

    /// Difficulty query contract: the level the learner should see next for
    /// a model. Recommendations are session-scoped; the model id gives the
    /// query its context in logs and future curated lookups.
    pub fn recommended_level(&self, session_id: &str, model_id: &str) -> DifficultyLevel {
        let adjustment = self.recommend(session_id);
        debug!(
            session_id,
            model_id,
            level = %adjustment.to_level,
            "recommended level"
        );
        adjustment.to_level
    }

    /// The only exit from a lock: confidence mode is toggled explicitly,
    /// never by the rule engine.
    pub fn set_confidence_mode(&self, session_id: &str, enabled: bool) {
        let session = self.store.get_or_create(session_id);
        let mut guard = session.lock();
        guard.confidence_mode = enabled;
        guard.touch();
    }

    pub fn set_adaptive_mode(&self, session_id: &str, enabled: bool) {
        let session = self.store.get_or_create(session_id);
        let mut guard = session.lock();
        guard.adaptive_mode = enabled;
        guard.touch();
    }

    pub fn reset_session(&self, session_id: &str) -> bool {
        self.store.reset(session_id)
    }

    pub fn session_snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        self.store.snapshot(session_id)
    }
}

impl Default for QuestionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
