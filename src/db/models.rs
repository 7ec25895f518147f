use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    /// Deadline as submitted, minute precision (`YYYY-MM-DDTHH:MM`).
    pub date_tbd: Option<String>,
    pub done: bool,
    pub filename: Option<String>,
    pub file_data: Option<Vec<u8>>,
    pub user_id: i64,
}

impl Todo {
    pub fn has_attachment(&self) -> bool {
        self.filename.is_some() && self.file_data.is_some()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: String,
    pub created_at: String,
}

/// Fields of a task submission, validated before insert.
#[derive(Debug, Default)]
pub struct NewTodo {
    pub title: String,
    pub content: Option<String>,
    pub date_tbd: Option<String>,
    pub filename: Option<String>,
    pub file_data: Option<Vec<u8>>,
}
