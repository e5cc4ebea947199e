use rusqlite::Connection;
use studyplan_core::db::{open_db, open_db_in_memory};
use studyplan_core::{BlobError, BlobStore, SqliteBlobStore};

#[test]
fn get_absent_key_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBlobStore::try_new(&conn).unwrap();

    assert_eq!(store.get_blob("studyPlanner_tasks").unwrap(), None);
}

#[test]
fn put_replaces_previous_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBlobStore::try_new(&conn).unwrap();

    store.put_blob("studyPlanner_goals", "[]").unwrap();
    store.put_blob("studyPlanner_goals", "[{\"x\":1}]").unwrap();

    assert_eq!(
        store.get_blob("studyPlanner_goals").unwrap().as_deref(),
        Some("[{\"x\":1}]")
    );
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_blobs;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn delete_reports_whether_a_value_existed() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBlobStore::try_new(&conn).unwrap();

    store.put_blob("k", "v").unwrap();
    assert!(store.delete_blob("k").unwrap());
    assert!(!store.delete_blob("k").unwrap());
    assert_eq!(store.get_blob("k").unwrap(), None);
}

#[test]
fn values_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.db");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteBlobStore::try_new(&conn).unwrap();
        store.put_blob("studyPlanner_tasks", "[]").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteBlobStore::try_new(&conn).unwrap();
    assert_eq!(
        store.get_blob("studyPlanner_tasks").unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteBlobStore::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        BlobError::SchemaNotReady { found: 0, .. }
    ));
}

#[test]
fn blank_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteBlobStore::try_new(&conn).unwrap();

    assert!(matches!(
        store.get_blob(""),
        Err(BlobError::InvalidKey(_))
    ));
}
