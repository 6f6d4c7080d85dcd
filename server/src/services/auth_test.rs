use super::*;
use crate::services::memory_store::MemoryStore;

fn passwords() -> Arc<Passwords> {
    Arc::new(Passwords::fast())
}

fn registration(email: &str, password: &str) -> Registration {
    Registration { name: "A".into(), email: email.into(), password: password.into() }
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials { email: email.into(), password: password.into() }
}

#[tokio::test]
async fn register_then_authenticate_succeeds() {
    let store = MemoryStore::new();
    let passwords = passwords();
    let created = register(&store, &passwords, registration("a@x.com", "secret1")).await.unwrap();
    assert_eq!(created.role, Role::User);
    assert_ne!(created.password_hash, "secret1");

    let user = authenticate(&store, &passwords, credentials("a@x.com", "secret1")).await.unwrap();
    assert_eq!(user.id, created.id);
}

#[tokio::test]
async fn register_duplicate_email_is_email_taken() {
    let store = MemoryStore::new();
    let passwords = passwords();
    register(&store, &passwords, registration("a@x.com", "secret1")).await.unwrap();
    let err = register(&store, &passwords, registration("a@x.com", "other12")).await.unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let store = MemoryStore::new();
    let passwords = passwords();
    register(&store, &passwords, registration("a@x.com", "secret1")).await.unwrap();

    let wrong = authenticate(&store, &passwords, credentials("a@x.com", "nope123")).await.unwrap_err();
    let unknown = authenticate(&store, &passwords, credentials("b@x.com", "secret1")).await.unwrap_err();
    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[tokio::test]
async fn malformed_stored_hash_is_invalid_credentials() {
    let store = MemoryStore::new();
    store
        .insert(NewUser { email: "a@x.com".into(), password_hash: "garbage".into(), name: "A".into(), role: Role::User })
        .await
        .unwrap();
    let err = authenticate(&store, &passwords(), credentials("a@x.com", "secret1")).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn change_password_requires_old_password() {
    let store = MemoryStore::new();
    let passwords = passwords();
    let user = register(&store, &passwords, registration("a@x.com", "secret1")).await.unwrap();

    let bad = PasswordChange { old_password: "wrong".into(), new_password: "newpass1".into() };
    assert!(matches!(change_password(&store, &passwords, &user, bad).await, Err(AuthError::WrongPassword)));

    let good = PasswordChange { old_password: "secret1".into(), new_password: "newpass1".into() };
    change_password(&store, &passwords, &user, good).await.unwrap();

    assert!(authenticate(&store, &passwords, credentials("a@x.com", "secret1")).await.is_err());
    assert!(authenticate(&store, &passwords, credentials("a@x.com", "newpass1")).await.is_ok());
}
