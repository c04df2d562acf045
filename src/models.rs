use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Due times are stored and displayed as text in this form.
pub const DUE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A single to-do record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub name: String,
    pub time: String,
    pub completed: bool,
}

impl Todo {
    pub fn icon(&self) -> &'static str {
        if self.completed { "✓" } else { "○" }
    }
}

/// Format a due time into its stored textual form.
pub fn format_due(due: NaiveDateTime) -> String {
    due.format(DUE_FORMAT).to_string()
}
