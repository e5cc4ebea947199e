//! Study goal domain model.
//!
//! # Responsibility
//! - Define the canonical goal record and its bounded progress value.
//!
//! # Invariants
//! - `Progress` can only hold values in `0..=100`; every constructor clamps.
//! - `tasks` is an informational link list and is not kept in sync with the
//!   task collection.

use crate::model::task::TaskId;
use crate::model::validation::{require_text, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Stable identifier for a goal.
pub type GoalId = Uuid;

/// Goal completion percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Builds a progress value, clamping out-of-range input.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Adds a signed step and clamps the result.
    pub fn saturating_add(self, delta: i32) -> Self {
        Self::new(i64::from(self.0) + i64::from(delta))
    }

    pub fn is_complete(self) -> bool {
        self.0 >= 100
    }
}

// Stored blobs may hold fractional or out-of-range numbers; clamp instead of
// rejecting the whole collection.
impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        if raw.is_nan() {
            return Ok(Self::MIN);
        }
        Ok(Self::new(raw.round().clamp(0.0, 100.0) as i64))
    }
}

/// Canonical study goal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGoal {
    pub id: GoalId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default, deserialize_with = "deserialize_task_links")]
    pub tasks: Vec<TaskId>,
    pub created_at: DateTime<Utc>,
}

/// User-editable goal fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub target_date: NaiveDate,
    pub progress: Progress,
    pub tasks: Vec<TaskId>,
}

impl GoalDraft {
    /// Creates a draft with zero progress and no linked tasks.
    pub fn new(title: impl Into<String>, target_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            target_date,
            progress: Progress::MIN,
            tasks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, ValidationError::EmptyTitle)
    }
}

impl StudyGoal {
    /// Creates a goal with a generated ID.
    pub fn new(draft: GoalDraft, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), draft, created_at)
    }

    pub fn with_id(id: GoalId, draft: GoalDraft, created_at: DateTime<Utc>) -> Self {
        let mut tasks = draft.tasks;
        dedup_task_links(&mut tasks);
        Self {
            id,
            title: draft.title,
            description: draft.description,
            target_date: draft.target_date,
            progress: draft.progress,
            tasks,
            created_at,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, ValidationError::EmptyTitle)
    }
}

/// Drops repeated task links, keeping the first occurrence of each.
pub(crate) fn dedup_task_links(ids: &mut Vec<TaskId>) {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.retain(|id| seen.insert(*id));
}

fn deserialize_task_links<'de, D>(deserializer: D) -> Result<Vec<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut ids = Vec::<TaskId>::deserialize(deserializer)?;
    dedup_task_links(&mut ids);
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::{GoalDraft, Progress, StudyGoal};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn progress_clamps_at_both_ends() {
        assert_eq!(Progress::new(-40).value(), 0);
        assert_eq!(Progress::new(250).value(), 100);
        assert_eq!(Progress::new(95).saturating_add(10), Progress::MAX);
        assert_eq!(Progress::new(5).saturating_add(-20), Progress::MIN);
        assert_eq!(Progress::new(50).saturating_add(i32::MIN).value(), 0);
        assert_eq!(Progress::new(50).saturating_add(i32::MAX).value(), 100);
    }

    #[test]
    fn progress_deserialize_clamps_and_rounds() {
        let over: Progress = serde_json::from_str("130").unwrap();
        let under: Progress = serde_json::from_str("-5").unwrap();
        let fractional: Progress = serde_json::from_str("42.6").unwrap();
        assert_eq!(over.value(), 100);
        assert_eq!(under.value(), 0);
        assert_eq!(fractional.value(), 43);
    }

    #[test]
    fn new_goal_drops_duplicate_task_links() {
        let linked = Uuid::new_v4();
        let mut draft = GoalDraft::new(
            "Pass calculus",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        draft.tasks = vec![linked, linked];

        let goal = StudyGoal::new(draft, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(goal.tasks, vec![linked]);
        assert!(!goal.is_complete());
    }

    #[test]
    fn stored_goal_drops_duplicate_task_links() {
        let linked = "11111111-2222-4333-8444-555555555555";
        let value = serde_json::json!({
            "id": "aaaaaaaa-2222-4333-8444-555555555555",
            "title": "Pass calculus",
            "targetDate": "2024-06-01",
            "progress": 10,
            "tasks": [linked, linked],
            "createdAt": "2024-01-01T00:00:00Z"
        });

        let goal: StudyGoal = serde_json::from_value(value).unwrap();
        assert_eq!(goal.tasks, vec![Uuid::parse_str(linked).unwrap()]);
    }
}
