use super::*;
use crate::services::memory_store::MemoryStore;

fn new_user(email: &str) -> NewUser {
    NewUser { email: email.to_owned(), password_hash: "$argon2id$fake".into(), name: "Alice".into(), role: Role::User }
}

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_str_round_trip() {
    for role in [Role::User, Role::Admin] {
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
    }
    assert_eq!("owner".parse::<Role>(), Err(UnknownRole("owner".to_owned())));
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
}

// =============================================================================
// UserSummary
// =============================================================================

#[test]
fn user_summary_omits_sensitive_fields() {
    let record = UserRecord {
        id: Uuid::nil(),
        email: "a@x.com".into(),
        password_hash: "$argon2id$secret".into(),
        name: "A".into(),
        role: Role::User,
        phone: None,
        bio: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
    };
    let json = serde_json::to_value(UserSummary::from(&record)).unwrap();
    assert_eq!(json, serde_json::json!({ "id": Uuid::nil(), "name": "A", "role": "user" }));
}

// =============================================================================
// StoreError classification
// =============================================================================

#[test]
fn pool_timeout_is_unavailable() {
    assert!(matches!(StoreError::from(sqlx::Error::PoolTimedOut), StoreError::Unavailable(_)));
    assert!(matches!(StoreError::from(sqlx::Error::PoolClosed), StoreError::Unavailable(_)));
}

#[test]
fn row_not_found_is_db_error() {
    assert!(matches!(StoreError::from(sqlx::Error::RowNotFound), StoreError::Db(_)));
}

// =============================================================================
// MemoryStore
// =============================================================================

#[tokio::test]
async fn insert_enforces_email_uniqueness() {
    let store = MemoryStore::new();
    store.insert(new_user("a@x.com")).await.unwrap();
    let err = store.insert(new_user("a@x.com")).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail));
}

#[tokio::test]
async fn find_by_email_and_id() {
    let store = MemoryStore::new();
    let created = store.insert(new_user("a@x.com")).await.unwrap();
    let by_email = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);
    assert!(store.find_by_id(created.id).await.unwrap().is_some());
    assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn update_profile_applies_only_provided_fields() {
    let store = MemoryStore::new();
    let created = store.insert(new_user("a@x.com")).await.unwrap();
    let update = ProfileUpdate { name: None, phone: Some("555".into()), bio: None };
    let updated = store.update_profile(created.id, &update).await.unwrap();
    assert_eq!(updated.name, "Alice");
    assert_eq!(updated.phone.as_deref(), Some("555"));
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let store = MemoryStore::new();
    let err = store.update_password(Uuid::new_v4(), "x").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn revocation_is_idempotent_and_purgeable() {
    let store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    store.revoke("t1", now - time::Duration::seconds(1)).await.unwrap();
    store.revoke("t1", now - time::Duration::seconds(1)).await.unwrap();
    store.revoke("t2", now + time::Duration::hours(1)).await.unwrap();
    assert_eq!(store.revoked_count(), 2);
    assert!(store.is_revoked("t1").await.unwrap());

    assert_eq!(store.purge_expired(now).await.unwrap(), 1);
    assert!(!store.is_revoked("t1").await.unwrap());
    assert!(store.is_revoked("t2").await.unwrap());
}
