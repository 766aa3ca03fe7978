use crate::{InterviewSettingsBuilder, ModelError};

/// **VALUE**: Verifies that builder validation rejects a missing interview id.
///
/// **WHY THIS MATTERS**: Response records are keyed by interview id. Without one
/// every saved response would be orphaned.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Required field validation is removed
/// - The builder allows incomplete construction
#[test]
fn given_missing_id_when_building_then_returns_validation_error() {
    // GIVEN: Builder without an id
    let builder = InterviewSettingsBuilder::default().with_interviewer_id("agent-1");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Interview ID is required");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

/// **VALUE**: Verifies that a zero interview duration is rejected.
///
/// **WHY THIS MATTERS**: A zero-minute interview would expire on the first tick
/// and drop the candidate straight into the coding round.
///
/// **BUG THIS CATCHES**: Would catch the zero check being deleted during refactoring.
#[test]
fn given_zero_duration_when_building_then_returns_validation_error() {
    // GIVEN: Builder with zero minutes
    let builder = InterviewSettingsBuilder::default()
        .with_id("int-1")
        .with_interviewer_id("agent-1")
        .with_duration_minutes(0);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Interview duration must be non-zero");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

/// **VALUE**: Verifies defaults for unset durations.
///
/// **WHY THIS MATTERS**: Interviews created without explicit timings run a
/// one-minute call and a 45-minute coding round.
///
/// **BUG THIS CATCHES**: Would catch defaults drifting from the documented values.
#[test]
fn given_minimal_builder_when_building_then_uses_default_durations() {
    // WHEN: Building with only required fields
    let settings = InterviewSettingsBuilder::default()
        .with_id("int-1")
        .with_interviewer_id("agent-1")
        .build()
        .unwrap();

    // THEN: Defaults apply
    assert_eq!(settings.duration_secs(), 60);
    assert_eq!(settings.coding_round_secs(), 45 * 60);
    assert_eq!(settings.respondents, None);
    assert!(!settings.is_anonymous);
}
