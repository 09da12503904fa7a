use super::*;

#[test]
fn validate_login_requires_both_fields() {
    assert_eq!(validate_login("", "pw"), Err(ValidationError::MissingFields));
    assert_eq!(validate_login("alice", ""), Err(ValidationError::MissingFields));
    let req = validate_login("alice", "pw").unwrap();
    assert_eq!(req.username, "alice");
    assert_eq!(req.password, "pw");
}

#[test]
fn validate_registration_checks_in_order() {
    assert_eq!(validate_registration("", "alice", "secret1", "secret1"), Err(ValidationError::MissingFields));
    assert_eq!(validate_registration("a@b.com", "alice", "secret1", ""), Err(ValidationError::MissingFields));
    assert_eq!(validate_registration("not-an-email", "alice", "abc", "xyz"), Err(ValidationError::InvalidEmail));
    assert_eq!(validate_registration("a@b.com", "alice", "abc", "abc"), Err(ValidationError::PasswordTooShort));
    assert_eq!(
        validate_registration("a@b.com", "alice", "secret1", "secret2"),
        Err(ValidationError::PasswordMismatch)
    );
}

#[test]
fn validate_registration_accepts_good_input() {
    let req = validate_registration("a@b.com", "alice", "secret1", "secret1").unwrap();
    assert_eq!(req.email, "a@b.com");
    assert_eq!(req.username, "alice");
    assert_eq!(req.password, "secret1");
}

#[test]
fn password_length_counts_utf16_units() {
    // Each of these is one char but two UTF-16 code units.
    let three = "\u{1F600}\u{1F600}\u{1F600}";
    assert!(validate_registration("a@b.com", "alice", three, three).is_ok());
    assert_eq!(
        validate_registration("a@b.com", "alice", "\u{1F600}\u{1F600}", "\u{1F600}\u{1F600}"),
        Err(ValidationError::PasswordTooShort)
    );
    assert!(validate_registration("a@b.com", "alice", "ééééé", "ééééé").is_err());
    assert!(validate_registration("a@b.com", "alice", "éééééé", "éééééé").is_ok());
}

#[test]
fn email_shape() {
    assert!(is_valid_email("a@b.com"));
    assert!(is_valid_email("first.last@mail.example.org"));
    assert!(is_valid_email("a@b.c.d"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("@b.com"));
    assert!(!is_valid_email("a@.com"));
    assert!(!is_valid_email("a@b."));
    assert!(is_valid_email("a@b.com."));
    assert!(!is_valid_email("a b@c.com"));
    assert!(!is_valid_email("a@@b.com"));
    assert!(!is_valid_email("a@b@c.com"));
}

#[test]
fn failure_message_prefers_server_detail() {
    let err = ApiError::Status { status: 400, detail: "Username already registered".into() };
    assert_eq!(failure_message(&err, REGISTER_FAILED_MESSAGE), "Username already registered");
}

#[test]
fn failure_message_falls_back() {
    let err = ApiError::Transport("connection refused".into());
    assert_eq!(failure_message(&err, LOGIN_FAILED_MESSAGE), LOGIN_FAILED_MESSAGE);
    assert_eq!(failure_message(&ApiError::Unauthorized, LOGIN_FAILED_MESSAGE), LOGIN_FAILED_MESSAGE);
}

#[test]
fn failure_message_shows_validation_text() {
    let err = ApiError::from(ValidationError::PasswordMismatch);
    assert_eq!(failure_message(&err, REGISTER_FAILED_MESSAGE), "Passwords do not match.");
}
