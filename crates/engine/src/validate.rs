use models::{Record, RuleSpecMap, ValidationResult};
use parser::parse_rules;
use std::sync::Arc;
use store::LookupStore;
use validators::{ConfigError, Evaluator, RuleContext, RuleRegistry, ValidationError};

/// One resolved rule application, ready to run.
struct Step<'a> {
    field: &'a str,
    rule: String,
    param: Option<String>,
    evaluator: Arc<dyn Evaluator>,
}

/// Runs rule specifications against records.
///
/// The engine holds no per-call state: every `validate` call builds its own
/// failure list, so one engine can serve concurrent callers.
#[derive(Clone)]
pub struct ValidationEngine {
    registry: RuleRegistry,
    store: Option<Arc<dyn LookupStore>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(RuleRegistry::with_builtins())
    }
}

impl ValidationEngine {
    /// An engine without a lookup store. Rules that need one fail with
    /// [`ConfigError::NotInitialized`].
    pub fn new(registry: RuleRegistry) -> Self {
        ValidationEngine {
            registry,
            store: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn LookupStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    // Resolve every rule up front so an unknown rule anywhere in the spec
    // aborts before any store lookup is made.
    fn plan<'a>(&self, rules: &'a RuleSpecMap) -> Result<Vec<Step<'a>>, ConfigError> {
        let mut steps = Vec::new();
        for (field, spec) in rules {
            for parsed in parse_rules(spec) {
                let evaluator =
                    self.registry
                        .get(&parsed.name)
                        .ok_or_else(|| ConfigError::UnknownRule {
                            field: field.clone(),
                            rule: parsed.name.clone(),
                        })?;
                steps.push(Step {
                    field,
                    rule: parsed.name,
                    param: parsed.parameter,
                    evaluator,
                });
            }
        }
        Ok(steps)
    }

    /// Validate `record` against `rules`.
    ///
    /// Fields run in the map's order and each field's rules left to right,
    /// one at a time. Every rule runs; failures are collected, never
    /// short-circuited. Configuration and store errors abort the call.
    pub async fn validate(
        &self,
        record: &Record,
        rules: &RuleSpecMap,
    ) -> Result<ValidationResult, ValidationError> {
        let steps = self.plan(rules).map_err(|e| {
            logging::error(&format!("Validation aborted: {}", e));
            e
        })?;

        let mut result = ValidationResult::new();
        let store = self.store.as_deref();

        for step in &steps {
            let value = record.get(step.field);
            logging::debug(&format!(
                "Evaluating '{}' on '{}' (value: {})",
                step.rule, step.field, value
            ));

            let ctx = RuleContext {
                rule: &step.rule,
                key: step.field,
                value: &value,
                param: step.param.as_deref(),
                store,
            };

            match step.evaluator.evaluate(&ctx).await {
                Ok(outcome) => {
                    if let Some(failure) = outcome.into_failure() {
                        result.add_failure(failure);
                    }
                }
                Err(e) => {
                    logging::error(&format!(
                        "Validation aborted at '{}' on '{}': {}",
                        step.rule, step.field, e
                    ));
                    return Err(e);
                }
            }
        }

        logging::debug(&format!(
            "Validated {} field(s), {} rule(s): {} failure(s)",
            rules.len(),
            steps.len(),
            result.errors.len()
        ));

        Ok(result)
    }
}
