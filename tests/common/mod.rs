use tempfile::TempDir;
use wanderly::catalog::{CatalogService, SqliteCatalogRepository};
use wanderly::config::Config;
use wanderly::db;
use wanderly::state::AppState;

/// Seeded on-disk catalog; keep the `TempDir` alive for the test's duration
pub fn seeded_state() -> (TempDir, AppState) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let pool = db::create_pool(&db_path).expect("Failed to create test database");
    db::run_migrations(&pool).expect("Failed to run migrations");
    db::seed_fixtures(&pool).expect("Failed to seed fixtures");

    let config = Config::default();
    let catalog = CatalogService::new(
        SqliteCatalogRepository::shared(pool),
        config.viewer.user_id.clone(),
        config.map.clone(),
    );
    (temp_dir, AppState::new(catalog))
}
