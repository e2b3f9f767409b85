//! Built-in rules.
//!
//! | rule       | parameter               |
//! |------------|-------------------------|
//! | `required` | none                    |
//! | `null`     | none                    |
//! | `email`    | none                    |
//! | `equals`   | literal                 |
//! | `max`      | maximum length          |
//! | `exists`   | `<collection>,<tenant>` |
//! | `unique`   | `<collection>,<column>` |
//!
//! `max` and `unique` let missing and empty values through; pair them with
//! `required` when absence must fail.

mod email;
mod equals;
mod lookup;
mod max;
mod presence;

pub use email::{is_email, Email};
pub use equals::Equals;
pub use lookup::{Exists, Unique};
pub use max::Max;
pub use presence::{Null, Required};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{Evaluator, Outcome, RuleContext, ValidationError};
    use models::FieldValue;
    use store::LookupStore;

    pub async fn run<E: Evaluator>(
        evaluator: &E,
        rule: &str,
        key: &str,
        value: FieldValue,
        param: Option<&str>,
        store: Option<&dyn LookupStore>,
    ) -> Result<Outcome, ValidationError> {
        let ctx = RuleContext {
            rule,
            key,
            value: &value,
            param,
            store,
        };
        evaluator.evaluate(&ctx).await
    }

    pub fn message(outcome: Outcome) -> String {
        outcome
            .into_failure()
            .map(|f| f.error)
            .unwrap_or_else(|| "<pass>".to_string())
    }
}
