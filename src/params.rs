use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use crate::generators::{self, ModelId};
use crate::level::DifficultyLevel;

/// Association between a (model, level) pair and a concrete parameter set.
///
/// Curated overrides (maintained externally, registered here) take priority;
/// everything else falls back to the generator's year-keyed defaults.
pub struct ParameterStore {
    curated: RwLock<HashMap<(ModelId, DifficultyLevel), Value>>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self {
            curated: RwLock::new(HashMap::new()),
        }
    }

    pub fn set_curated(&self, model: ModelId, level: DifficultyLevel, params: Value) {
        self.curated.write().insert((model, level), params);
    }

    pub fn clear_curated(&self, model: ModelId, level: DifficultyLevel) -> bool {
        self.curated.write().remove(&(model, level)).is_some()
    }

    pub fn params_for(&self, model: ModelId, level: DifficultyLevel) -> Value {
        if let Some(curated) = self.curated.read().get(&(model, level)) {
            return curated.clone();
        }
        generators::default_params(model, level.year)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_year_defaults() {
        let store = ParameterStore::new();
        let level = DifficultyLevel::new(2, 3);
        let params = store.params_for(ModelId::Addition, level);
        assert_eq!(params["max_value"], 20.0);
    }

    #[test]
    fn curated_overrides_take_priority() {
        let store = ParameterStore::new();
        let level = DifficultyLevel::new(2, 3);
        store.set_curated(
            ModelId::Addition,
            level,
            serde_json::json!({ "max_value": 15.0 }),
        );
        assert_eq!(store.params_for(ModelId::Addition, level)["max_value"], 15.0);

        // Other levels keep the defaults.
        let other = store.params_for(ModelId::Addition, DifficultyLevel::new(2, 1));
        assert_eq!(other["max_value"], 20.0);

        assert!(store.clear_curated(ModelId::Addition, level));
        assert_eq!(store.params_for(ModelId::Addition, level)["max_value"], 20.0);
    }
}
