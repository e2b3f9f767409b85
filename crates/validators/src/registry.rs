use crate::rules::{Email, Equals, Exists, Max, Null, Required, Unique};
use crate::Evaluator;
use std::collections::HashMap;
use std::sync::Arc;

/// Rule name -> evaluator.
#[derive(Clone)]
pub struct RuleRegistry {
    evaluators: HashMap<String, Arc<dyn Evaluator>>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl RuleRegistry {
    /// A registry with no rules at all.
    pub fn empty() -> Self {
        RuleRegistry {
            evaluators: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("required", Required);
        registry.register("null", Null);
        registry.register("email", Email);
        registry.register("equals", Equals);
        registry.register("max", Max);
        registry.register("exists", Exists);
        registry.register("unique", Unique);
        registry
    }

    /// Add an evaluator, replacing any existing one with the same name.
    pub fn register<E>(&mut self, name: impl Into<String>, evaluator: E) -> &mut Self
    where
        E: Evaluator + 'static,
    {
        self.evaluators.insert(name.into(), Arc::new(evaluator));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Evaluator>> {
        self.evaluators.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.evaluators.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.evaluators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
