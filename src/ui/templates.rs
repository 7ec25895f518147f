// Askama template definitions

use askama::Template;

use crate::db::Todo;

// Task fields flattened for templates (using String instead of Option)
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub date_tbd: String, // "-" if no deadline
    pub has_file: bool,
}

pub struct TaskView {
    pub id: i64,
    pub title: String,
    pub content: String,  // empty string if no content
    pub date_tbd: String, // "-" if no deadline
    pub done: bool,
    pub filename: String, // empty string if no attachment
    pub has_file: bool,
}

impl From<&Todo> for TaskRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            date_tbd: todo.date_tbd.clone().unwrap_or_else(|| "-".to_string()),
            has_file: todo.has_attachment(),
        }
    }
}

impl From<Todo> for TaskView {
    fn from(todo: Todo) -> Self {
        let has_file = todo.has_attachment();
        Self {
            id: todo.id,
            title: todo.title,
            content: todo.content.unwrap_or_default(),
            date_tbd: todo.date_tbd.unwrap_or_else(|| "-".to_string()),
            done: todo.done,
            filename: todo.filename.unwrap_or_default(),
            has_file,
        }
    }
}

// Login form, shown on "/" for anonymous visitors
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

// Registration form
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// Task list, shown on "/" for authenticated users
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub username: String,
    pub current_time: String,
    pub tasks: Vec<TaskRow>,
}

// Read-only task detail
#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub task: TaskView,
}
