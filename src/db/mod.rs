use std::time::Duration;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{r2d2, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod errors;
mod menu;
mod orders;
mod restaurants;
mod users;
pub mod schema;

pub use errors::RepositoryError;
pub use menu::MenuOperations;
pub use orders::{CancelOutcome, OrderOperations};
pub use restaurants::RestaurantOperations;
pub use users::UserOperations;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Builds the shared pool without probing the store, so the service comes up
/// even when the database is unreachable; requests then fail with a
/// connection pool error that surfaces as 503.
pub fn establish_connection_pool(database_url: &str) -> Pool<ConnectionManager<PgConnection>> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    let connect_timeout_secs: u64 = std::env::var("DB_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(30);

    Pool::builder()
        .max_size(20)
        .connection_timeout(Duration::from_secs(connect_timeout_secs))
        .build_unchecked(manager)
}

pub fn run_db_migrations(
    pool: Pool<ConnectionManager<PgConnection>>,
) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(&pool)?;
    conn.connection()
        .run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|e| RepositoryError::Internal(format!("Failed to run migrations: {e}")))
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<PgConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
