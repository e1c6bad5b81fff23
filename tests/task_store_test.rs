mod helpers;

use taskboard::adapters::sqlite::{SqliteMentorCallNoteEndpoint, SqliteTaskStore};
use taskboard::domain::errors::DomainError;
use taskboard::domain::models::{DueDate, NewTask, Priority, TaskKey, TaskPatch};
use taskboard::domain::ports::{MentorCallNoteEndpoint, TaskStore};

use helpers::database::{setup_test_db, teardown_test_db};

fn new_task(name: &str, priority: Priority, due: Option<&str>) -> NewTask {
    NewTask {
        name: name.to_string(),
        description: format!("{name} details"),
        due_date: due.map(DueDate::new),
        priority,
    }
}

#[tokio::test]
async fn test_create_list_update_delete_round() {
    let pool = setup_test_db().await;
    let store = SqliteTaskStore::new(pool.clone());

    let report = store
        .create_task(&new_task("Write report", Priority::High, Some("2024-01-10")))
        .await
        .expect("failed to create task");
    let review = store
        .create_task(&new_task("Review PR", Priority::Low, Some("2024-01-05")))
        .await
        .expect("failed to create task");
    assert_ne!(report.key, review.key);

    let updated = store
        .update_task(&review.key, &TaskPatch::completed(true))
        .await
        .expect("failed to update task");
    assert!(updated.completed);
    assert_eq!(updated.priority, Priority::Low);
    assert_eq!(updated.description, "Review PR details");

    store.delete_task(&report.key).await.expect("failed to delete task");

    let listed = store.list_tasks().await.expect("failed to list tasks");
    assert_eq!(listed, vec![updated]);

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_status_codes_at_store_boundary() {
    let pool = setup_test_db().await;
    let store = SqliteTaskStore::new(pool.clone());

    let err = store
        .create_task(&new_task("", Priority::Medium, None))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = store.delete_task(&TaskKey::new("missing")).await.unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = store
        .update_task(
            &TaskKey::new("missing"),
            &TaskPatch {
                name: Some("x".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TaskNotFound(_)));

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_storage_rejects_unknown_priority() {
    let pool = setup_test_db().await;

    let result = sqlx::query(
        "INSERT INTO tasks (id, name, description, priority, completed, created_at, updated_at)
         VALUES ('x', 'n', '', 'urgent', 0, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_unparseable_due_date_survives_storage() {
    let pool = setup_test_db().await;
    let store = SqliteTaskStore::new(pool.clone());

    let created = store
        .create_task(&new_task("Someday", Priority::Low, Some("whenever")))
        .await
        .unwrap();
    let listed = store.list_tasks().await.unwrap();
    assert_eq!(listed[0].due_date, Some(DueDate::new("whenever")));
    assert_eq!(listed[0].key, created.key);

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_note_endpoint_is_independent_of_tasks() {
    let pool = setup_test_db().await;
    let endpoint = SqliteMentorCallNoteEndpoint::new(pool.clone());
    let store = SqliteTaskStore::new(pool.clone());

    let note = endpoint
        .create_note(&DueDate::new("2024-02-01"), "Discussed career goals")
        .await
        .unwrap();
    assert!(store.list_tasks().await.unwrap().is_empty());

    endpoint.delete_note(&note.id).await.unwrap();
    let err = endpoint.delete_note(&note.id).await.unwrap_err();
    assert_eq!(err.status_code(), 404);

    teardown_test_db(pool).await;
}
