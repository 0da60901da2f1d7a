use chrono::{DateTime, Utc};

/// A persisted nota row.
#[derive(Debug, Clone)]
pub struct Nota {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// A persisted tarea row. `created_at` is assigned on insert and never
/// changes afterwards.
#[derive(Debug, Clone)]
pub struct Tarea {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
