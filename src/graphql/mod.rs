use async_graphql::{EmptyMutation, EmptySubscription, Schema, SchemaBuilder};

use crate::config::Config;
use crate::db::Snapshot;
use crate::graphql::query::QueryRoot;

pub mod query;

pub type CornerSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn schema_builder() -> SchemaBuilder<QueryRoot, EmptyMutation, EmptySubscription> {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
}

/// A schema answering queries against `ledger`. The config's minimum value,
/// if any, applies wherever a query doesn't pass its own.
pub fn build_schema(ledger: Snapshot, config: Option<Config>) -> CornerSchema {
    let builder = schema_builder().data(ledger);

    match config {
        Some(config) => builder.data(config).finish(),
        None => builder.finish(),
    }
}
