use super::*;
use crate::net::types::UserProfile;

fn alice() -> UserProfile {
    UserProfile {
        id: 1,
        email: "alice@example.com".into(),
        username: "alice".into(),
        full_name: None,
        is_active: true,
    }
}

#[test]
fn protected_route_waits_while_initializing() {
    assert_eq!(evaluate(&SessionState::initializing(), Route::Dashboard), GuardDecision::Pending);
}

#[test]
fn protected_route_renders_when_authenticated() {
    let state = SessionState::authenticated(alice());
    assert_eq!(evaluate(&state, Route::Dashboard), GuardDecision::Render(Route::Dashboard));
}

#[test]
fn protected_route_redirects_to_login_when_unauthenticated() {
    assert_eq!(
        evaluate(&SessionState::unauthenticated(), Route::Dashboard),
        GuardDecision::Redirect(Route::Login)
    );
}

#[test]
fn guest_routes_redirect_authenticated_users_to_dashboard() {
    let state = SessionState::authenticated(alice());
    assert_eq!(evaluate(&state, Route::Login), GuardDecision::Redirect(Route::Dashboard));
    assert_eq!(evaluate(&state, Route::Register), GuardDecision::Redirect(Route::Dashboard));
    assert_eq!(evaluate(&SessionState::initializing(), Route::Login), GuardDecision::Render(Route::Login));
    assert_eq!(evaluate(&SessionState::unauthenticated(), Route::Register), GuardDecision::Render(Route::Register));
}

#[test]
fn home_always_renders() {
    for state in [SessionState::initializing(), SessionState::unauthenticated(), SessionState::authenticated(alice())] {
        assert_eq!(evaluate(&state, Route::Home), GuardDecision::Render(Route::Home));
    }
}

#[test]
fn route_paths_round_trip() {
    for route in Route::ALL {
        assert_eq!(Route::from_path(route.path()), Some(route));
    }
    assert_eq!(Route::from_path("/dashboard/"), Some(Route::Dashboard));
    assert_eq!(Route::from_path("/login?next=/dashboard"), Some(Route::Login));
    assert_eq!(Route::from_path(""), Some(Route::Home));
    assert_eq!(Route::from_path("/trips"), None);
}

#[tokio::test]
async fn route_guard_follows_state_changes() {
    let (tx, rx) = watch::channel(SessionState::initializing());
    let mut guard = RouteGuard::new(Route::Dashboard, rx);
    assert_eq!(guard.decision(), GuardDecision::Pending);

    tx.send_replace(SessionState::authenticated(alice()));
    assert_eq!(guard.changed().await, Some(GuardDecision::Render(Route::Dashboard)));

    tx.send_replace(SessionState::unauthenticated());
    assert_eq!(guard.changed().await, Some(GuardDecision::Redirect(Route::Login)));

    drop(tx);
    assert_eq!(guard.changed().await, None);
}

#[tokio::test]
async fn resolved_skips_pending() {
    let (tx, rx) = watch::channel(SessionState::initializing());
    let mut guard = RouteGuard::new(Route::Dashboard, rx);

    let waiter = tokio::spawn(async move { guard.resolved().await });
    tx.send_replace(SessionState::unauthenticated());
    assert_eq!(waiter.await.unwrap(), Some(GuardDecision::Redirect(Route::Login)));
}
