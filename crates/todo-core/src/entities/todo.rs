//! Todo entity - the resource guarded by the auth layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Snowflake,
    pub task: String,
    pub completed: bool,
    #[serde(rename = "startdate")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "enddate")]
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(id: Snowflake, task: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            task: task.into(),
            completed: false,
            start_date: None,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the todo is past its end date without being completed
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.end_date.is_some_and(|end| end < now)
    }
}
