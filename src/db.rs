use std::thread;
use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub fn create_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().build(manager)
}

/// Build the pool, retrying a fixed number of times while the database is
/// still coming up. The last error is returned once attempts run out.
pub fn connect_with_retry(
    database_url: &str,
    attempts: u32,
    delay: Duration,
) -> Result<DbPool, PoolError> {
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match create_pool(database_url) {
            Ok(pool) => {
                log::info!("Connected to database");
                return Ok(pool);
            }
            Err(e) if attempt < attempts => {
                log::warn!(
                    "Database connection attempt {}/{} failed: {}; retrying in {}s",
                    attempt,
                    attempts,
                    e,
                    delay.as_secs()
                );
                attempt += 1;
                thread::sleep(delay);
            }
            Err(e) => {
                log::error!("Giving up on database after {} attempts", attempts);
                return Err(e);
            }
        }
    }
}
