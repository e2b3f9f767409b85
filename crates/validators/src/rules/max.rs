use crate::{Evaluator, Outcome, RuleContext, ValidationError};
use async_trait::async_trait;

/// Maximum length in characters. Missing and empty values pass.
pub struct Max;

#[async_trait]
impl Evaluator for Max {
    async fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Outcome, ValidationError> {
        let param = ctx.require_param()?;
        let max: usize = param
            .parse()
            .map_err(|_| ctx.malformed("expected a non-negative integer length"))?;

        let within = match ctx.value.as_str() {
            Some(s) if !s.is_empty() => s.chars().count() <= max,
            _ => true,
        };

        if within {
            return Ok(Outcome::Pass);
        }
        // No trailing period in this message
        Ok(ctx.fail(format!("The {} has a max length of {}", ctx.key, param)))
    }
}
