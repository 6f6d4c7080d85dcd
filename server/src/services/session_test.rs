use super::*;
use crate::services::memory_store::MemoryStore;
use crate::services::store::{NewUser, Role};
use time::Duration;

const SECRET: &[u8] = b"test-session-secret-0123456789abcdef";
const TTL: i64 = 24 * 60 * 60;

fn keys() -> SessionKeys {
    SessionKeys::new(SECRET, TTL)
}

fn t0() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

async fn seed(store: &MemoryStore) -> UserRecord {
    store
        .insert(NewUser { email: "a@x.com".into(), password_hash: "h".into(), name: "A".into(), role: Role::User })
        .await
        .unwrap()
}

// =============================================================================
// bytes_to_hex / generate_token_id
// =============================================================================

#[test]
fn bytes_to_hex_pads_and_concatenates() {
    assert_eq!(bytes_to_hex(&[]), "");
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

#[test]
fn generate_token_id_is_32_hex_chars() {
    let id = generate_token_id();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_id_two_calls_differ() {
    assert_ne!(generate_token_id(), generate_token_id());
}

// =============================================================================
// SessionKeys
// =============================================================================

#[test]
fn issue_then_verify_returns_same_claims() {
    let keys = keys();
    let user_id = Uuid::new_v4();
    let issued = keys.issue(user_id, t0()).unwrap();
    assert_eq!(issued.claims.sub, user_id);
    assert_eq!(issued.claims.exp - issued.claims.iat, TTL);

    let claims = keys.verify(&issued.token, t0()).unwrap();
    assert_eq!(claims, issued.claims);
}

#[test]
fn token_accepted_until_expiry_and_rejected_strictly_after() {
    let keys = keys();
    let issued = keys.issue(Uuid::new_v4(), t0()).unwrap();

    assert!(keys.verify(&issued.token, t0() + Duration::seconds(TTL - 1)).is_ok());
    assert!(keys.verify(&issued.token, t0() + Duration::seconds(TTL)).is_ok());
    assert!(matches!(
        keys.verify(&issued.token, t0() + Duration::seconds(TTL + 1)),
        Err(TokenError::Expired)
    ));
}

#[test]
fn token_signed_with_other_secret_is_invalid() {
    let other = SessionKeys::new(b"another-secret-another-secret-xx", TTL);
    let issued = other.issue(Uuid::new_v4(), t0()).unwrap();
    assert!(matches!(keys().verify(&issued.token, t0()), Err(TokenError::Invalid(_))));
}

#[test]
fn token_with_swapped_signature_is_invalid() {
    let keys = keys();
    let victim = keys.issue(Uuid::new_v4(), t0()).unwrap();
    let attacker = keys.issue(Uuid::new_v4(), t0()).unwrap();
    let (victim_body, _) = victim.token.rsplit_once('.').unwrap();
    let (_, attacker_sig) = attacker.token.rsplit_once('.').unwrap();
    let forged = format!("{victim_body}.{attacker_sig}");
    assert!(matches!(keys.verify(&forged, t0()), Err(TokenError::Invalid(_))));
}

#[test]
fn garbage_token_is_invalid() {
    assert!(matches!(keys().verify("not.a.token", t0()), Err(TokenError::Invalid(_))));
    assert!(matches!(keys().verify("", t0()), Err(TokenError::Invalid(_))));
}

#[test]
fn claims_expires_at_matches_exp() {
    let issued = keys().issue(Uuid::new_v4(), t0()).unwrap();
    assert_eq!(issued.claims.expires_at(), t0() + Duration::seconds(TTL));
}

// =============================================================================
// validate_session
// =============================================================================

#[tokio::test]
async fn validate_session_resolves_existing_user() {
    let store = MemoryStore::new();
    let user = seed(&store).await;
    let keys = keys();
    let now = OffsetDateTime::now_utc();
    let issued = keys.issue(user.id, now).unwrap();

    let session = validate_session(&keys, &store, &store, &issued.token, now).await.unwrap().unwrap();
    assert_eq!(session.user.id, user.id);
    assert_eq!(session.claims.jti, issued.claims.jti);
}

#[tokio::test]
async fn validate_session_rejects_revoked_token() {
    let store = MemoryStore::new();
    let user = seed(&store).await;
    let keys = keys();
    let now = OffsetDateTime::now_utc();
    let issued = keys.issue(user.id, now).unwrap();

    revoke_session(&store, &issued.claims, now).await.unwrap();
    assert!(validate_session(&keys, &store, &store, &issued.token, now).await.unwrap().is_none());
}

#[tokio::test]
async fn validate_session_rejects_deleted_user() {
    let store = MemoryStore::new();
    let user = seed(&store).await;
    let keys = keys();
    let now = OffsetDateTime::now_utc();
    let issued = keys.issue(user.id, now).unwrap();

    store.remove_user(user.id);
    assert!(validate_session(&keys, &store, &store, &issued.token, now).await.unwrap().is_none());
}

#[tokio::test]
async fn validate_session_rejects_expired_token() {
    let store = MemoryStore::new();
    let user = seed(&store).await;
    let keys = keys();
    let issued = keys.issue(user.id, t0()).unwrap();
    let later = t0() + Duration::seconds(TTL + 1);
    assert!(validate_session(&keys, &store, &store, &issued.token, later).await.unwrap().is_none());
}

#[tokio::test]
async fn revoke_session_purges_stale_entries() {
    let store = MemoryStore::new();
    let keys = keys();
    let old = keys.issue(Uuid::new_v4(), t0()).unwrap();
    let now = t0() + Duration::seconds(TTL + 10);
    let fresh = keys.issue(Uuid::new_v4(), now).unwrap();

    store.revoke(&old.claims.jti, old.claims.expires_at()).await.unwrap();
    revoke_session(&store, &fresh.claims, now).await.unwrap();

    assert_eq!(store.revoked_count(), 1);
    assert!(store.is_revoked(&fresh.claims.jti).await.unwrap());
}
