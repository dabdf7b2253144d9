use super::*;
use crate::net::api::ApiError;

#[test]
fn validate_login_input_trims_username_only() {
    assert_eq!(
        validate_login_input("  alice  ", " pass word "),
        Ok(("alice".to_owned(), " pass word ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "secret"), Err(MISSING_CREDENTIALS));
    assert_eq!(validate_login_input("alice", ""), Err(MISSING_CREDENTIALS));
}

#[test]
fn unauthorized_failure_reads_as_bad_credentials() {
    let error = AuthError::Api(ApiError::Status { status: 401, detail: Some("Incorrect username or password".to_owned()) });
    assert_eq!(login_failure_message(&error), "Incorrect username or password.");
}

#[test]
fn busy_failure_reads_as_in_progress() {
    assert_eq!(login_failure_message(&AuthError::Busy), "A sign-in is already in progress.");
}

#[test]
fn other_failures_include_the_cause() {
    let error = AuthError::Api(ApiError::Status { status: 500, detail: None });
    assert_eq!(login_failure_message(&error), "Sign-in failed: backend returned 500");
    assert_eq!(
        login_failure_message(&AuthError::MissingToken),
        "Sign-in failed: token response did not include an access token"
    );
}
