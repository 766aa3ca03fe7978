use crate::{CallEvent, Speaker, TranscriptEntry};

/// **VALUE**: Verifies voice SDK events deserialize from their snake_case names.
///
/// **WHY THIS MATTERS**: Events cross a process boundary as JSON; a naming drift
/// silently drops every event of that kind.
///
/// **BUG THIS CATCHES**: Would catch a missing `rename_all` or a changed tag field.
#[test]
fn given_event_json_when_deserialized_then_variants_match() {
    // GIVEN: Raw events
    let started: CallEvent = serde_json::from_str(r#"{"event":"call_started"}"#).unwrap();
    let update: CallEvent = serde_json::from_str(
        r#"{"event":"update","transcript":[{"role":"agent","content":"Hi"},{"role":"user","content":"Hello"}]}"#,
    )
    .unwrap();

    // THEN: Typed events
    assert_eq!(started, CallEvent::CallStarted);
    assert_eq!(
        update,
        CallEvent::Update {
            transcript: vec![
                TranscriptEntry::new(Speaker::Agent, "Hi"),
                TranscriptEntry::new(Speaker::User, "Hello"),
            ]
        }
    );
}

/// **VALUE**: Verifies unknown transcript roles are kept but not mapped to a speaker.
#[test]
fn given_unknown_role_when_mapping_speaker_then_none() {
    let entry = TranscriptEntry {
        role: String::from("system"),
        content: String::from("x"),
    };

    assert_eq!(entry.speaker(), None);
}
