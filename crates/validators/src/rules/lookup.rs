use crate::{ConfigError, Evaluator, Outcome, RuleContext, ValidationError};
use async_trait::async_trait;
use store::{Item, PrimaryKey};

/// `<collection>,<second>` parameter shared by the lookup rules.
#[derive(Debug, PartialEq, Eq)]
struct CollectionParam<'a> {
    collection: &'a str,
    second: &'a str,
}

// The first two comma-separated parts are used and any further parts are
// ignored. Fewer than two parts, or an empty one of the two, is malformed:
// no store accepts an empty table name or key value.
fn parse_collection_param<'a>(
    ctx: &RuleContext<'a>,
    second_name: &str,
) -> Result<CollectionParam<'a>, ConfigError> {
    let param = ctx.require_param()?;

    let mut parts = param.split(',');
    match (parts.next(), parts.next()) {
        (Some(collection), Some(second)) if !collection.is_empty() && !second.is_empty() => {
            Ok(CollectionParam { collection, second })
        }
        _ => Err(ctx.malformed(format!("expected '<collection>,<{}>'", second_name))),
    }
}

// An item with nothing in its projection is the same as no item.
fn found(item: &Option<Item>) -> bool {
    item.as_ref().is_some_and(|item| !item.is_empty())
}

/// Passes when the collection holds an item keyed by
/// `{tenant_id: <tenant>, <field>: value}`.
///
/// Missing and `null` values are looked up as they are; there is no bypass.
pub struct Exists;

#[async_trait]
impl Evaluator for Exists {
    async fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Outcome, ValidationError> {
        let param = parse_collection_param(ctx, "tenant_id")?;
        let store = ctx.require_store()?;

        let key = PrimaryKey::new()
            .with("tenant_id", param.second)
            .with(ctx.key, ctx.value.clone());
        let projection = [ctx.key.to_string()];

        logging::debug(&format!(
            "exists: looking up '{}' = {} in '{}'",
            ctx.key, ctx.value, param.collection
        ));
        let item = store.get(param.collection, &key, &projection).await?;

        if found(&item) {
            return Ok(Outcome::Pass);
        }
        Ok(ctx.fail(format!("The {} does not exist.", ctx.key)))
    }
}

/// Passes when no item in the collection is keyed by `{<column>: value}`.
/// Missing and empty values pass without a lookup.
pub struct Unique;

#[async_trait]
impl Evaluator for Unique {
    async fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Outcome, ValidationError> {
        let param = parse_collection_param(ctx, "column")?;

        if !ctx.value.is_truthy() {
            return Ok(Outcome::Pass);
        }

        let store = ctx.require_store()?;
        let key = PrimaryKey::new().with(param.second, ctx.value.clone());
        let projection = [ctx.key.to_string()];

        logging::debug(&format!(
            "unique: looking up '{}' = {} in '{}'",
            param.second, ctx.value, param.collection
        ));
        let item = store.get(param.collection, &key, &projection).await?;

        if !found(&item) {
            return Ok(Outcome::Pass);
        }
        Ok(ctx.fail(format!("The {} attribute already exists.", ctx.key)))
    }
}
