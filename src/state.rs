use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::catalog::CatalogService;
use crate::graphql::CatalogSchema;

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub graphql_schema: CatalogSchema,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        let graphql_schema = crate::graphql::build_schema(catalog.clone());
        Self {
            catalog,
            graphql_schema,
        }
    }
}
