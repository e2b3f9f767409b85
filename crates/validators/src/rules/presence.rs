use crate::{Evaluator, Outcome, RuleContext, ValidationError};
use async_trait::async_trait;

/// Passes unless the value is `null` or missing. The empty string passes.
pub struct Required;

#[async_trait]
impl Evaluator for Required {
    async fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Outcome, ValidationError> {
        if ctx.value.is_present() {
            return Ok(Outcome::Pass);
        }
        Ok(ctx.fail(format!("The {} attribute is required", ctx.key)))
    }
}

/// Passes only when the value is `null` or missing.
pub struct Null;

#[async_trait]
impl Evaluator for Null {
    async fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Outcome, ValidationError> {
        if !ctx.value.is_present() {
            return Ok(Outcome::Pass);
        }
        Ok(ctx.fail(format!("The {} attribute must be null.", ctx.key)))
    }
}
