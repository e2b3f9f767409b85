use crate::{Evaluator, Outcome, RuleContext, ValidationError};
use async_trait::async_trait;
use validator::ValidateEmail;

/// E-mail shape check (HTML5 address grammar, internationalized domains
/// accepted).
pub fn is_email(value: &str) -> bool {
    value.validate_email()
}

/// Passes when the value has e-mail shape. `null` and missing values fail.
pub struct Email;

#[async_trait]
impl Evaluator for Email {
    async fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Outcome, ValidationError> {
        if ctx.value.as_str().is_some_and(is_email) {
            return Ok(Outcome::Pass);
        }
        Ok(ctx.fail(format!("The {} attribute must be a valid email.", ctx.key)))
    }
}
