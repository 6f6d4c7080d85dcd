use super::test_helpers::*;
use crate::services::store::Role;
use time::OffsetDateTime;

#[test]
fn keys_use_configured_ttl() {
    let (state, _) = test_app_state();
    assert_eq!(state.keys.ttl_secs(), state.session.ttl_secs);
}

#[tokio::test]
async fn clones_share_the_same_store() {
    let (state, store) = test_app_state();
    let clone = state.clone();
    let user = seed_user(&clone, "a@x.com", "secret1", Role::User).await;
    let found = state.users.find_by_id(user.id).await.unwrap();
    assert!(found.is_some());

    state.revocations.revoke("jti-1", OffsetDateTime::now_utc()).await.unwrap();
    assert_eq!(store.revoked_count(), 1);
}
