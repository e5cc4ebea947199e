use chrono::{NaiveDate, TimeZone, Utc};
use studyplan_core::{GoalDraft, Priority, Progress, StudyGoal, Task, TaskDraft};
use uuid::Uuid;

fn draft() -> TaskDraft {
    TaskDraft::new(
        "Problem set 3",
        "Calculus",
        Priority::High,
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
    )
    .with_description("Integrals by parts")
}

#[test]
fn task_new_sets_defaults() {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
    let task = Task::new(draft(), created);

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "Problem set 3");
    assert_eq!(task.description, "Integrals by parts");
    assert!(!task.completed);
    assert_eq!(task.completed_at, None);
    assert_eq!(task.created_at, created);
}

#[test]
fn toggling_twice_restores_incomplete_without_timestamp() {
    let mut task = Task::new(draft(), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    let done_at = Utc.with_ymd_and_hms(2024, 3, 4, 17, 0, 0).unwrap();

    task.toggle_completion(done_at);
    assert!(task.completed);
    assert_eq!(task.completed_at, Some(done_at));

    task.toggle_completion(Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap());
    assert!(!task.completed);
    assert_eq!(task.completed_at, None);
}

#[test]
fn task_serialization_uses_camel_case_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let task = Task::with_id(id, draft(), Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap());

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["priority"], "high");
    assert_eq!(json["dueDate"], "2024-03-05");
    assert_eq!(json["completed"], false);
    assert_eq!(json["createdAt"], "2024-03-01T08:30:00Z");
    assert!(json.get("completedAt").is_none());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn task_deserializes_browser_style_record() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Lab report",
        "description": "",
        "subject": "Chemistry",
        "priority": "medium",
        "dueDate": "2024-02-20",
        "completed": true,
        "createdAt": "2024-02-01T10:15:30.123Z",
        "completedAt": "2024-02-19T21:00:00.000Z"
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 2, 20).unwrap());
    assert!(task.completed);
    assert_eq!(
        task.completed_at,
        Some(Utc.with_ymd_and_hms(2024, 2, 19, 21, 0, 0).unwrap())
    );
}

#[test]
fn task_deserialize_rejects_unknown_priority() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Lab report",
        "subject": "Chemistry",
        "priority": "urgent",
        "dueDate": "2024-02-20",
        "createdAt": "2024-02-01T10:15:30Z"
    });

    assert!(serde_json::from_value::<Task>(value).is_err());
}

#[test]
fn goal_deserialization_clamps_stored_progress() {
    let value = serde_json::json!({
        "id": "aaaaaaaa-2222-4333-8444-555555555555",
        "title": "Finish syllabus",
        "description": "",
        "targetDate": "2024-06-30",
        "progress": 140,
        "tasks": [],
        "createdAt": "2024-01-01T00:00:00.000Z"
    });

    let goal: StudyGoal = serde_json::from_value(value).unwrap();
    assert_eq!(goal.progress, Progress::MAX);
    assert!(goal.is_complete());

    let json = serde_json::to_value(&goal).unwrap();
    assert_eq!(json["progress"], 100);
    assert_eq!(json["targetDate"], "2024-06-30");
}

#[test]
fn goal_draft_requires_title() {
    let draft = GoalDraft::new("  ", NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    assert!(draft.validate().is_err());
}
