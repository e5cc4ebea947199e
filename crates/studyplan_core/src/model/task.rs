//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical study task record and its priority scale.
//! - Own the completion toggle so `completed_at` always follows `completed`.
//!
//! # Invariants
//! - `id` and `created_at` are immutable after creation.
//! - `completed_at` is `Some` exactly when the latest toggle marked the task
//!   complete; toggling back to incomplete clears it.
//! - `due_date` carries no time-of-day; comparisons happen per calendar day.

use crate::model::validation::{require_text, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Task urgency scale.
///
/// Variant order encodes rank, so `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric rank used by priority ordering (`high=3`, `medium=2`, `low=1`).
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses the wire label of a priority.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Canonical study task record.
///
/// Serialized with camelCase keys (`dueDate`, `createdAt`, `completedAt`) so
/// stored planner blobs keep their historical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub subject: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// User-editable task fields, as collected by a create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
}

impl TaskDraft {
    /// Creates a draft with an empty description.
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        priority: Priority,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            subject: subject.into(),
            priority,
            due_date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks required text fields.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank.
    /// - `EmptySubject` when the subject is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, ValidationError::EmptyTitle)?;
        require_text(&self.subject, ValidationError::EmptySubject)
    }
}

impl Task {
    /// Creates an incomplete task with a generated ID.
    pub fn new(draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), draft, created_at)
    }

    /// Creates an incomplete task with a caller-provided ID.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: TaskId, draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            subject: draft.subject,
            priority: draft.priority,
            due_date: draft.due_date,
            completed: false,
            created_at,
            completed_at: None,
        }
    }

    /// Replaces editable fields, keeping identity and completion state.
    pub fn apply_draft(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.subject = draft.subject;
        self.priority = draft.priority;
        self.due_date = draft.due_date;
    }

    /// Flips completion; stamps `completed_at` on completion, clears it otherwise.
    pub fn toggle_completion(&mut self, at: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_at = if self.completed { Some(at) } else { None };
    }

    /// Returns the editable fields of this task.
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            subject: self.subject.clone(),
            priority: self.priority,
            due_date: self.due_date,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, ValidationError::EmptyTitle)?;
        require_text(&self.subject, ValidationError::EmptySubject)
    }
}
