//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record rendered by the list view.
//! - Define priority classification and partial-update payloads.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and never empty when created through `TaskItem::new`.
//! - Priority is display-only metadata; it never affects ordering.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned to a task at creation.
pub type TaskId = Uuid;

/// Urgency classification shown next to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities in display order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Stable lowercase form used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Capitalized label for badges and pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parses the wire form, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for task construction and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::EmptyText => write!(f, "task text must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One user-visible task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskItem")]
pub struct TaskItem {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
}

#[derive(Deserialize)]
struct RawTaskItem {
    id: TaskId,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Priority,
}

impl TryFrom<RawTaskItem> for TaskItem {
    type Error = TaskValidationError;

    fn try_from(raw: RawTaskItem) -> Result<Self, Self::Error> {
        let item = Self {
            id: raw.id,
            text: raw.text.trim().to_string(),
            completed: raw.completed,
            priority: raw.priority,
        };
        item.validate()?;
        Ok(item)
    }
}

impl TaskItem {
    /// Creates an incomplete task with a generated ID.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is empty after trimming.
    pub fn new(text: &str, priority: Priority) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), text, priority)
    }

    /// Creates an incomplete task with a caller-provided ID.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    /// - `EmptyText` when `text` is empty after trimming.
    pub fn with_id(id: TaskId, text: &str, priority: Priority) -> Result<Self, TaskValidationError> {
        let item = Self {
            id,
            text: text.trim().to_string(),
            completed: false,
            priority,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks the identity and text invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Merges the present fields of `patch` into this task.
    ///
    /// Text is applied as given; callers trim and check it beforehand.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// Partial update for an existing task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub priority: Option<Priority>,
}

impl TaskPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            priority: None,
        }
    }

    pub fn priority(priority: Priority) -> Self {
        Self {
            text: None,
            priority: Some(priority),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.priority.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, TaskItem, TaskPatch, TaskValidationError};
    use uuid::Uuid;

    #[test]
    fn new_trims_text_and_sets_defaults() {
        let item = TaskItem::new("  Buy milk \n", Priority::Medium).unwrap();
        assert_eq!(item.text, "Buy milk");
        assert!(!item.completed);
        assert!(!item.id.is_nil());
    }

    #[test]
    fn new_rejects_whitespace_text() {
        assert_eq!(
            TaskItem::new(" \t ", Priority::Low).unwrap_err(),
            TaskValidationError::EmptyText
        );
    }

    #[test]
    fn with_id_rejects_nil_uuid() {
        let err = TaskItem::with_id(Uuid::nil(), "x", Priority::Low).unwrap_err();
        assert_eq!(err, TaskValidationError::NilId);
    }

    #[test]
    fn priority_parse_is_lenient_about_case() {
        assert_eq!(Priority::parse(" HIGH "), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut item = TaskItem::new("draft", Priority::Low).unwrap();
        item.apply(TaskPatch::priority(Priority::High));
        assert_eq!(item.text, "draft");
        assert_eq!(item.priority, Priority::High);

        item.apply(TaskPatch::text("final"));
        assert_eq!(item.text, "final");
        assert_eq!(item.priority, Priority::High);
    }
}
