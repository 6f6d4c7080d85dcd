use super::*;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_is_logged_out() {
    let state = AuthState::default();
    assert!(!state.is_logged_in);
    assert!(state.name.is_empty());
}

#[test]
fn auth_state_default_is_loading() {
    let state = AuthState::default();
    assert!(state.loading);
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn set_session_records_name_and_finishes_loading() {
    let mut state = AuthState::default();
    state.set_session(true, "Alice");
    assert_eq!(state, AuthState { is_logged_in: true, name: "Alice".to_owned(), loading: false });
}

#[test]
fn set_session_logged_out_drops_name() {
    let mut state = AuthState::default();
    state.set_session(false, "Alice");
    assert!(!state.is_logged_in);
    assert!(state.name.is_empty());
    assert!(!state.loading);
}

#[test]
fn clear_session_resets_logged_in_state() {
    let mut state = AuthState::default();
    state.set_session(true, "Alice");
    state.clear_session();
    assert_eq!(state, AuthState { is_logged_in: false, name: String::new(), loading: false });
}

// =============================================================
// Logout outcome
// =============================================================

#[test]
fn after_logout_success_clears_session() {
    let mut state = AuthState::default();
    state.set_session(true, "Alice");
    assert_eq!(state.after_logout(&Ok(())), None);
    assert!(!state.is_logged_in);
    assert!(state.name.is_empty());
}

#[test]
fn after_logout_failure_keeps_session_and_reports() {
    let mut state = AuthState::default();
    state.set_session(true, "Alice");
    let message = state.after_logout(&Err("Service unavailable".to_owned()));
    assert_eq!(message.as_deref(), Some("Logout failed: Service unavailable"));
    assert_eq!(state, AuthState { is_logged_in: true, name: "Alice".to_owned(), loading: false });
}
