// db/db.rs
use sqlx::{Pool, Postgres};

/// Handle to the persistent store. Constructed once in `main` and passed to
/// every component, so tests can run against their own isolated instance.
#[derive(Debug, Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }
}
