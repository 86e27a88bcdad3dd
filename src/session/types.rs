use serde::{Deserialize, Serialize};

use crate::level::DifficultyLevel;

/// One recorded attempt. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub question_id: String,
    pub model_id: String,
    pub level: DifficultyLevel,
    pub is_correct: bool,
    pub time_spent_ms: i64,
    pub hint_used: bool,
    pub attempts_required: u32,
    pub timestamp: i64,
}

/// Mutable per-learner state plus the append-only attempt log.
#[derive(Debug, Clone)]
pub struct StudentSession {
    pub session_id: String,
    pub current_level: DifficultyLevel,
    /// Signed run length: positive for consecutive correct answers,
    /// negative for consecutive incorrect ones.
    pub streak_count: i32,
    pub adaptive_mode: bool,
    pub confidence_mode: bool,
    pub records: Vec<PerformanceRecord>,
    pub created_at: i64,
    pub last_active: i64,
}

impl StudentSession {
    pub fn new(session_id: impl Into<String>, level: DifficultyLevel) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            session_id: session_id.into(),
            current_level: level,
            streak_count: 0,
            adaptive_mode: true,
            confidence_mode: false,
            records: Vec::new(),
            created_at: now,
            last_active: now,
        }
    }

    /// Appends a record and rolls the signed streak forward.
    pub fn record_attempt(&mut self, record: PerformanceRecord) {
        self.streak_count = if record.is_correct {
            if self.streak_count > 0 {
                self.streak_count + 1
            } else {
                1
            }
        } else if self.streak_count < 0 {
            self.streak_count - 1
        } else {
            -1
        };
        self.last_active = record.timestamp.max(self.last_active);
        self.records.push(record);
    }

    pub fn correct_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_correct).count()
    }

    /// Most recent `n` records, oldest first.
    pub fn recent_records(&self, n: usize) -> &[PerformanceRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn touch(&mut self) {
        self.last_active = chrono::Utc::now().timestamp_millis();
    }
}

/// Read-only view handed to the controller and to stats consumers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub current_level: DifficultyLevel,
    pub streak_count: i32,
    pub adaptive_mode: bool,
    pub confidence_mode: bool,
    pub total_attempts: usize,
    pub correct_attempts: usize,
    pub accuracy: f64,
    /// Tail of the log, oldest first, capped at the controller's widest
    /// evaluation window.
    pub recent_records: Vec<PerformanceRecord>,
}

impl SessionSnapshot {
    pub fn of(session: &StudentSession, window: usize) -> Self {
        let total = session.records.len();
        let correct = session.correct_count();
        Self {
            session_id: session.session_id.clone(),
            current_level: session.current_level,
            streak_count: session.streak_count,
            adaptive_mode: session.adaptive_mode,
            confidence_mode: session.confidence_mode,
            total_attempts: total,
            correct_attempts: correct,
            accuracy: if total > 0 {
                correct as f64 / total as f64
            } else {
                0.0
            },
            recent_records: session.recent_records(window).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(is_correct: bool) -> PerformanceRecord {
        PerformanceRecord {
            question_id: "q".to_string(),
            model_id: "ADDITION".to_string(),
            level: DifficultyLevel::new(2, 1),
            is_correct,
            time_spent_ms: 4000,
            hint_used: false,
            attempts_required: 1,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    #[test]
    fn streak_runs_are_signed() {
        let mut session = StudentSession::new("s1", DifficultyLevel::default());
        session.record_attempt(record(true));
        session.record_attempt(record(true));
        assert_eq!(session.streak_count, 2);
        session.record_attempt(record(false));
        assert_eq!(session.streak_count, -1);
        session.record_attempt(record(false));
        assert_eq!(session.streak_count, -2);
        session.record_attempt(record(true));
        assert_eq!(session.streak_count, 1);
    }

    #[test]
    fn snapshot_reports_accuracy_and_tail() {
        let mut session = StudentSession::new("s2", DifficultyLevel::default());
        for i in 0..12 {
            session.record_attempt(record(i % 2 == 0));
        }
        let snapshot = SessionSnapshot::of(&session, 10);
        assert_eq!(snapshot.total_attempts, 12);
        assert_eq!(snapshot.correct_attempts, 6);
        assert_eq!(snapshot.recent_records.len(), 10);
        assert!((snapshot.accuracy - 0.5).abs() < 1e-9);
    }
}
