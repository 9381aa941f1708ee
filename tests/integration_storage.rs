#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, clippy::must_use_candidate, unreachable_pub)]
use portfolio_server::domain::submission::NewSubmission;
use portfolio_server::domain::validation::{ContactForm, ValidationRules};
use portfolio_server::storage::{PgSubmissionStore, StoreError, SubmissionStore};
use uuid::Uuid;

mod common;

fn new_submission(name: &str) -> NewSubmission {
    let form =
        ContactForm { name: name.to_string(), email: "a@b.com".to_string(), message: "hello there world".to_string() };
    ValidationRules::default().validate(form).unwrap()
}

async fn store() -> Option<PgSubmissionStore> {
    common::get_test_pool().await.map(PgSubmissionStore::new)
}

#[tokio::test]
async fn test_pg_create_assigns_id_and_unread() {
    let Some(store) = store().await else { return };
    let name = format!("Alice {}", Uuid::new_v4());

    let created = store.create(new_submission(&name)).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.name, name);
    assert_eq!(created.email, "a@b.com");
    assert_eq!(created.message, "hello there world");
    assert!(!created.is_read);
    store.ping().await.unwrap();
}

#[tokio::test]
async fn test_pg_list_is_newest_first() {
    let Some(store) = store().await else { return };
    let marker = Uuid::new_v4().to_string();

    let older = store.create(new_submission(&format!("older {marker}"))).await.unwrap();
    let newer = store.create(new_submission(&format!("newer {marker}"))).await.unwrap();

    let ids: Vec<i64> =
        store.list_all().await.unwrap().into_iter().filter(|s| s.name.ends_with(&marker)).map(|s| s.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[tokio::test]
async fn test_pg_toggle_twice_restores_flag() {
    let Some(store) = store().await else { return };
    let created = store.create(new_submission(&format!("Alice {}", Uuid::new_v4()))).await.unwrap();

    let once = store.toggle_read(created.id).await.unwrap();
    assert!(once.is_read);
    assert_eq!(once.created_at, created.created_at);

    let twice = store.toggle_read(created.id).await.unwrap();
    assert!(!twice.is_read);
}

#[tokio::test]
async fn test_pg_missing_id_is_not_found() {
    let Some(store) = store().await else { return };

    assert!(matches!(store.toggle_read(i64::MAX).await, Err(StoreError::NotFound)));
    assert!(matches!(store.delete(i64::MAX).await, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_pg_delete_is_permanent() {
    let Some(store) = store().await else { return };
    let created = store.create(new_submission(&format!("Alice {}", Uuid::new_v4()))).await.unwrap();

    store.delete(created.id).await.unwrap();

    assert!(store.list_all().await.unwrap().iter().all(|s| s.id != created.id));
    assert!(matches!(store.toggle_read(created.id).await, Err(StoreError::NotFound)));
    assert!(matches!(store.delete(created.id).await, Err(StoreError::NotFound)));
}
