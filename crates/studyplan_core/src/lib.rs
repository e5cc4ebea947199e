//! Core logic for the study planner.
//! Owns the task/goal model, blob persistence and every derived view the UI renders.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{PlannerConfig, GOALS_KEY, TASKS_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::goal::{GoalDraft, GoalId, Progress, StudyGoal};
pub use model::task::{Priority, Task, TaskDraft, TaskId};
pub use model::validation::ValidationError;
pub use repo::blob_repo::{BlobError, BlobResult, BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use service::planner_store::{PlannerStore, StoreError, StoreResult};
pub use view::calendar::{
    calendar_month, month_grid, tasks_on_date, CalendarDay, MonthGrid, YearMonth,
};
pub use view::classify::{due_state, is_due_soon, is_overdue, DueState};
pub use view::goals::{adjust_progress, goal_summary, GoalSummary, PROGRESS_STEP};
pub use view::stats::{dashboard_summary, subject_stats, DashboardSummary, SubjectStats};
pub use view::tasks::{
    count_by_filter, filter_tasks, sort_tasks, upcoming_in_window, SortKey, TaskCounts,
    TaskFilter,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
