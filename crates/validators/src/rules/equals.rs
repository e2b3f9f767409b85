use crate::{Evaluator, Outcome, RuleContext, ValidationError};
use async_trait::async_trait;

/// Strict equality with the literal parameter. `null` and missing values
/// never equal a parameter.
pub struct Equals;

#[async_trait]
impl Evaluator for Equals {
    async fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Outcome, ValidationError> {
        let expected = ctx.require_param()?;

        if ctx.value.as_str() == Some(expected) {
            return Ok(Outcome::Pass);
        }
        Ok(ctx.fail(format!(
            "The {} attribute must equal {}.",
            ctx.key, expected
        )))
    }
}
