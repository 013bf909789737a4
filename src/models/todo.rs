use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row handed to the `toDoItems` output binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ToDoRecord {
    #[serde(rename = "Id")]
    #[sqlx(rename = "Id")]
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub url: String,
}

impl ToDoRecord {
    /// A fresh, not yet completed item titled after `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            url: String::new(),
        }
    }
}
