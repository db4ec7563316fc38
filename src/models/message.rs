use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted entity. Created once on insert, never mutated or deleted;
/// the database is the sole source of truth.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: i32,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Inbound DTO for message creation. The timestamp is never
/// client-supplied.
#[derive(Deserialize, Debug)]
pub struct PostMessage {
    pub text: String,
}

#[derive(Serialize, Debug)]
pub struct MessagesCount {
    pub count: i64,
}
