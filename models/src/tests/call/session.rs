use crate::{CallRegistration, CallRegistrationRequest, Candidate, InterviewSettingsBuilder};

/// **VALUE**: Verifies the dynamic data handed to the voice agent.
///
/// **WHY THIS MATTERS**: The agent's prompt is templated on these fields;
/// an unnamed candidate must read as "not provided", not an empty string.
///
/// **BUG THIS CATCHES**: Would catch questions joined without the `, ` separator
/// or a missing name fallback.
#[test]
fn given_anonymous_candidate_when_building_registration_then_name_is_not_provided() {
    // GIVEN: Settings with two questions and a nameless candidate
    let settings = InterviewSettingsBuilder::default()
        .with_id("int-1")
        .with_interviewer_id("agent-7")
        .with_objective("Assess Rust")
        .with_question("Ownership?")
        .with_question("Lifetimes?")
        .with_duration_minutes(10)
        .build()
        .unwrap();
    let candidate = Candidate::new("", "a@b.co");

    // WHEN: Building the registration request
    let request = CallRegistrationRequest::new(&settings, &candidate);

    // THEN: Fields are templated
    assert_eq!(request.interviewer_id, "agent-7");
    assert_eq!(request.dynamic_data.mins, "10");
    assert_eq!(request.dynamic_data.questions, "Ownership?, Lifetimes?");
    assert_eq!(request.dynamic_data.name, "not provided");
}

/// **VALUE**: Verifies the access token is read from JSON but redacted in Debug output.
///
/// **BUG THIS CATCHES**: Would catch the token leaking into logs via `{:?}`.
#[test]
fn given_registration_json_when_deserialized_then_token_is_redacted_in_debug() {
    let registration: CallRegistration =
        serde_json::from_str(r#"{"call_id":"call-1","access_token":"secret-token"}"#).unwrap();

    assert_eq!(registration.access_token.expose(), "secret-token");
    assert!(!format!("{registration:?}").contains("secret-token"));
}
