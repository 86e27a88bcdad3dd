/// Attempt ceiling for constrained rejection sampling (no-carry operands,
/// non-zero slopes). On exhaustion generators fall back to a documented
/// relaxed result instead of failing.
pub const SAMPLE_RETRY_LIMIT: usize = 50;

/// Maximum number of combinations captured by exhaustive enumeration.
pub const COMBINATION_LIMIT: usize = 10;

/// Attempt ceiling when sampling sets of distinct values.
pub const UNIQUE_SET_RETRY_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Idle seconds before a session is eligible for eviction.
    pub session_ttl_secs: u64,
    /// Interval between cleanup sweeps when the worker is running.
    pub cleanup_interval_secs: u64,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: 2 * 60 * 60,
            cleanup_interval_secs: 10 * 60,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let session_ttl_secs = std::env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(defaults.session_ttl_secs);

        let cleanup_interval_secs = std::env::var("SESSION_CLEANUP_INTERVAL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(defaults.cleanup_interval_secs);

        let log_level = std::env::var("RUST_LOG").unwrap_or(defaults.log_level);

        Self {
            session_ttl_secs,
            cleanup_interval_secs,
            log_level,
        }
    }
}
