//! Entity store for tasks and goals.
//!
//! # Responsibility
//! - Own the canonical task and goal collections for one session.
//! - Persist each collection as a JSON array under a fixed blob key.
//! - Apply the create/update/delete/toggle/progress mutations.
//!
//! # Invariants
//! - Loading never fails: absent or malformed blobs yield empty collections.
//! - Mutations against unknown IDs are silent no-ops reported as `Ok(false)`.
//! - A mutation is applied in memory before it is persisted; when persisting
//!   fails the in-memory snapshot keeps the change and the error is returned.
//! - Goal progress stays within `0..=100` on every path.

use crate::clock::{Clock, SystemClock};
use crate::config::{GOALS_KEY, TASKS_KEY};
use crate::model::goal::{dedup_task_links, GoalDraft, GoalId, StudyGoal};
use crate::model::task::{Task, TaskDraft, TaskId};
use crate::model::validation::ValidationError;
use crate::repo::blob_repo::{BlobError, BlobStore};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity store mutation failure.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    /// Blob backend rejected the write.
    Blob(BlobError),
    /// Collection could not be encoded as JSON.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Blob(err) => write!(f, "failed to persist planner data: {err}"),
            Self::Encode(err) => write!(f, "failed to encode planner data: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Blob(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<BlobError> for StoreError {
    fn from(value: BlobError) -> Self {
        Self::Blob(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Session-scoped owner of the planner collections.
pub struct PlannerStore<S: BlobStore, C: Clock = SystemClock> {
    blobs: S,
    clock: C,
    tasks: Vec<Task>,
    goals: Vec<StudyGoal>,
}

impl<S: BlobStore> PlannerStore<S> {
    /// Loads collections from `blobs`, stamping new records with system time.
    pub fn load(blobs: S) -> Self {
        Self::load_with_clock(blobs, SystemClock)
    }
}

impl<S: BlobStore, C: Clock> PlannerStore<S, C> {
    /// Loads collections from `blobs` using an explicit clock.
    pub fn load_with_clock(blobs: S, clock: C) -> Self {
        let tasks = load_collection(&blobs, TASKS_KEY);
        let goals = load_collection(&blobs, GOALS_KEY);
        debug!(
            "event=store_load module=store status=ok tasks={} goals={}",
            tasks.len(),
            goals.len()
        );
        Self {
            blobs,
            clock,
            tasks,
            goals,
        }
    }

    /// Re-reads both collections, discarding unsaved in-memory state.
    pub fn reload(&mut self) {
        self.tasks = load_collection(&self.blobs, TASKS_KEY);
        self.goals = load_collection(&self.blobs, GOALS_KEY);
    }

    /// Current task snapshot in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Current goal snapshot in insertion order.
    pub fn goals(&self) -> &[StudyGoal] {
        &self.goals
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn goal(&self, id: GoalId) -> Option<&StudyGoal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    /// Creates an incomplete task with a fresh ID and `created_at = now`.
    ///
    /// # Errors
    /// - `Validation` for blank title/subject; nothing is stored.
    /// - `Blob`/`Encode` when persisting fails; the task stays in memory.
    pub fn create_task(&mut self, draft: TaskDraft) -> StoreResult<Task> {
        draft.validate()?;
        let task = Task::new(draft, self.clock.now());
        self.tasks.push(task.clone());
        debug!("event=task_create module=store status=ok task_id={}", task.id);
        self.persist_tasks()?;
        Ok(task)
    }

    /// Replaces the task with the same ID.
    ///
    /// `created_at` is kept from the stored record, and `completed_at` is
    /// brought in line with `completed`: cleared when incomplete, otherwise
    /// taken from the incoming record, then the stored one, then the clock.
    pub fn update_task(&mut self, task: &Task) -> StoreResult<bool> {
        let now = self.clock.now();
        let Some(slot) = self.tasks.iter_mut().find(|slot| slot.id == task.id) else {
            return Ok(false);
        };
        task.validate()?;

        let mut replacement = task.clone();
        replacement.created_at = slot.created_at;
        replacement.completed_at = if replacement.completed {
            replacement.completed_at.or(slot.completed_at).or(Some(now))
        } else {
            None
        };
        *slot = replacement;
        debug!("event=task_update module=store status=ok task_id={}", task.id);
        self.persist_tasks()?;
        Ok(true)
    }

    /// Applies form edits to an existing task, keeping ID and completion state.
    pub fn edit_task(&mut self, id: TaskId, draft: TaskDraft) -> StoreResult<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        draft.validate()?;
        task.apply_draft(draft);
        debug!("event=task_edit module=store status=ok task_id={id}");
        self.persist_tasks()?;
        Ok(true)
    }

    pub fn delete_task(&mut self, id: TaskId) -> StoreResult<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        debug!("event=task_delete module=store status=ok task_id={id}");
        self.persist_tasks()?;
        Ok(true)
    }

    /// Flips completion, stamping or clearing `completed_at`.
    pub fn toggle_task_completion(&mut self, id: TaskId) -> StoreResult<bool> {
        let now = self.clock.now();
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        task.toggle_completion(now);
        debug!(
            "event=task_toggle module=store status=ok task_id={id} completed={}",
            task.completed
        );
        self.persist_tasks()?;
        Ok(true)
    }

    pub fn create_goal(&mut self, draft: GoalDraft) -> StoreResult<StudyGoal> {
        draft.validate()?;
        let goal = StudyGoal::new(draft, self.clock.now());
        self.goals.push(goal.clone());
        debug!("event=goal_create module=store status=ok goal_id={}", goal.id);
        self.persist_goals()?;
        Ok(goal)
    }

    /// Replaces the goal with the same ID, keeping its stored `created_at`.
    pub fn update_goal(&mut self, goal: &StudyGoal) -> StoreResult<bool> {
        let Some(slot) = self.goals.iter_mut().find(|slot| slot.id == goal.id) else {
            return Ok(false);
        };
        goal.validate()?;

        let mut replacement = goal.clone();
        replacement.created_at = slot.created_at;
        dedup_task_links(&mut replacement.tasks);
        *slot = replacement;
        debug!("event=goal_update module=store status=ok goal_id={}", goal.id);
        self.persist_goals()?;
        Ok(true)
    }

    pub fn delete_goal(&mut self, id: GoalId) -> StoreResult<bool> {
        let before = self.goals.len();
        self.goals.retain(|goal| goal.id != id);
        if self.goals.len() == before {
            return Ok(false);
        }
        debug!("event=goal_delete module=store status=ok goal_id={id}");
        self.persist_goals()?;
        Ok(true)
    }

    /// Steps goal progress by `delta`, clamped to `0..=100`.
    pub fn adjust_goal_progress(&mut self, id: GoalId, delta: i32) -> StoreResult<bool> {
        let Some(goal) = self.goals.iter_mut().find(|goal| goal.id == id) else {
            return Ok(false);
        };
        goal.progress = goal.progress.saturating_add(delta);
        debug!(
            "event=goal_progress module=store status=ok goal_id={id} progress={}",
            goal.progress.value()
        );
        self.persist_goals()?;
        Ok(true)
    }

    fn persist_tasks(&self) -> StoreResult<()> {
        persist_collection(&self.blobs, TASKS_KEY, &self.tasks)
    }

    fn persist_goals(&self) -> StoreResult<()> {
        persist_collection(&self.blobs, GOALS_KEY, &self.goals)
    }
}

fn load_collection<T: DeserializeOwned>(blobs: &impl BlobStore, key: &str) -> Vec<T> {
    let raw = match blobs.get_blob(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("event=store_load module=store status=fallback key={key} reason=read_failed error={err}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => items,
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback key={key} reason=malformed line={} column={}",
                err.line(),
                err.column()
            );
            Vec::new()
        }
    }
}

fn persist_collection<T: Serialize>(
    blobs: &impl BlobStore,
    key: &str,
    items: &[T],
) -> StoreResult<()> {
    let encoded = serde_json::to_string(items)?;
    blobs.put_blob(key, &encoded).map_err(|err| {
        error!("event=store_persist module=store status=error key={key} error={err}");
        StoreError::from(err)
    })
}
