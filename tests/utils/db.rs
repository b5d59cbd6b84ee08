/// PostgreSQL test utilities
///
/// Database-backed tests only run when TEST_DATABASE_URL is set; without it
/// they return early.
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tecapp::shared::Database;

static DATABASE: OnceLock<Option<Arc<Database>>> = OnceLock::new();
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Shared, migrated database for tests, or `None` when not configured
pub fn test_database() -> Option<Arc<Database>> {
    DATABASE
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let url = std::env::var("TEST_DATABASE_URL").ok()?;
            let database = Database::new(&url, Some(4)).expect("Failed to create test pool");
            database
                .run_migrations()
                .expect("Failed to run test migrations");
            Some(Arc::new(database))
        })
        .clone()
}

/// Acquire test lock to ensure database tests run serially
pub fn acquire_test_lock() -> MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Unique suffix so repeated runs never collide on business keys
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
