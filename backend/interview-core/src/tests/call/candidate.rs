use crate::call::controller::validate_candidate;
use crate::error::call::CallError;

use models::Candidate;

#[test]
fn given_name_and_email_when_validating_then_ok() {
    let candidate = Candidate::new("Ada", "ada@example.com");
    assert!(validate_candidate(&candidate).is_ok());
}

/// **VALUE**: Verifies a blank name is rejected before any call is registered.
///
/// **BUG THIS CATCHES**: Would catch whitespace-only names slipping through and
/// showing up as empty rows in the response list.
#[test]
fn given_blank_name_when_validating_then_name_required() {
    // GIVEN: A candidate whose name is whitespace
    let candidate = Candidate::new("   ", "ada@example.com");

    // WHEN: Validating
    let err = validate_candidate(&candidate).unwrap_err();

    // THEN: Rejected with the name message
    match err {
        CallError::Candidate { message, .. } => assert_eq!(message, "Name is required"),
        other => panic!("Expected Candidate error, got {other:?}"),
    }
}

#[test]
fn given_malformed_emails_when_validating_then_rejected() {
    for email in ["", "ada", "ada@", "ada@example", "a da@example.com", "@example.com"] {
        let candidate = Candidate::new("Ada", email);
        let err = validate_candidate(&candidate).unwrap_err();
        assert!(
            err.to_string().contains("Invalid email"),
            "Expected '{email}' to be rejected, got {err}"
        );
    }
}
