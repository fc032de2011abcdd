use async_graphql::{EmptySubscription, Schema};

use super::mutations::MutationRoot;
use super::queries::QueryRoot;
use crate::catalog::CatalogService;

/// GraphQL Schema type
pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema around a catalog service
pub fn build_schema(catalog: CatalogService) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(catalog)
        .finish()
}
