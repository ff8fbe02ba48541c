use super::*;

#[test]
fn default_is_loading_and_signed_out() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(!state.signed_in);
    assert!(!state.should_redirect());
}

#[test]
fn resolved_without_session_redirects() {
    assert!(AuthState::resolved(false).should_redirect());
    assert!(!AuthState::resolved(true).should_redirect());
}

#[test]
fn sign_out_clears_identity() {
    let mut state = AuthState { signed_in: true, loading: false, email: Some("hr@example.com".into()) };
    state.sign_out();
    assert_eq!(state, AuthState::resolved(false));
}
