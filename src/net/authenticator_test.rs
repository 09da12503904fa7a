use super::*;
use crate::credential::MemoryCredentialStore;

fn build(authenticator: &RequestAuthenticator) -> reqwest::Request {
    let request = reqwest::Client::new().get("http://localhost:8000/api/v1/auth/me");
    authenticator.authorize(request).build().unwrap()
}

#[test]
fn attaches_bearer_when_credential_present() {
    let store = Arc::new(MemoryCredentialStore::with_credential(Credential::new("test-token-123")));
    let request = build(&RequestAuthenticator::new(store));
    assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer test-token-123");
}

#[test]
fn leaves_request_untouched_without_credential() {
    let store = Arc::new(MemoryCredentialStore::new());
    let request = build(&RequestAuthenticator::new(store));
    assert!(request.headers().get(AUTHORIZATION).is_none());
}

#[test]
fn reads_store_on_every_request() {
    let store = Arc::new(MemoryCredentialStore::new());
    let authenticator = RequestAuthenticator::new(store.clone());

    assert!(build(&authenticator).headers().get(AUTHORIZATION).is_none());
    store.set(Credential::new("fresh"));
    assert_eq!(build(&authenticator).headers().get(AUTHORIZATION).unwrap(), "Bearer fresh");
    store.clear();
    assert!(build(&authenticator).headers().get(AUTHORIZATION).is_none());
}

#[test]
fn header_value_is_marked_sensitive() {
    let store = Arc::new(MemoryCredentialStore::with_credential(Credential::new("abc")));
    let value = RequestAuthenticator::new(store).authorization().unwrap();
    assert!(value.is_sensitive());
}

#[test]
fn invalid_token_is_dropped() {
    let store = Arc::new(MemoryCredentialStore::with_credential(Credential::new("bad\ntoken")));
    let request = build(&RequestAuthenticator::new(store));
    assert!(request.headers().get(AUTHORIZATION).is_none());
}
