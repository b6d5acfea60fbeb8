use sqlx::{Pool, Postgres};

#[derive(Debug, Clone)]
pub struct DBClient {
    pub(crate) pool: Pool<Postgres>,
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }
}
