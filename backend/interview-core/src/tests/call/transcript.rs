use crate::call::transcript::{
    CAMERA_OFF_REPLY, CAMERA_ON_REPLY, asks_about_camera, camera_reply, latest_lines,
};

use models::{Speaker, TranscriptEntry};

/// **VALUE**: Verifies the latest line of each speaker is picked from the running transcript.
///
/// **BUG THIS CATCHES**: Would catch the first utterance being shown instead of the last,
/// or unknown roles overwriting a speaker's line.
#[test]
fn given_transcript_when_taking_latest_lines_then_last_of_each_speaker() {
    // GIVEN: An interleaved transcript with an unknown role
    let transcript = vec![
        TranscriptEntry::new(Speaker::Agent, "Hello"),
        TranscriptEntry::new(Speaker::User, "Hi"),
        TranscriptEntry::new(Speaker::Agent, "Tell me about yourself"),
        TranscriptEntry {
            role: "system".to_string(),
            content: "ignored".to_string(),
        },
    ];

    // WHEN: Taking the latest lines
    let lines = latest_lines(&transcript);

    // THEN: The newest line per speaker
    assert_eq!(lines.agent.as_deref(), Some("Tell me about yourself"));
    assert_eq!(lines.user.as_deref(), Some("Hi"));
}

#[test]
fn given_empty_transcript_when_taking_latest_lines_then_none() {
    let lines = latest_lines(&[]);
    assert!(lines.agent.is_none());
    assert!(lines.user.is_none());
}

#[test]
fn given_camera_questions_when_checked_then_detected() {
    assert!(asks_about_camera("Is my camera on?"));
    assert!(asks_about_camera("is my CAMERA working"));
    assert!(asks_about_camera("can you tell if the video is enabled"));
}

#[test]
fn given_unrelated_utterances_when_checked_then_not_detected() {
    assert!(!asks_about_camera("I used a hash map for this"));
    assert!(!asks_about_camera("camera"));
    assert!(!asks_about_camera(""));
}

#[test]
fn given_camera_state_when_replying_then_matches_state() {
    assert_eq!(camera_reply(true), CAMERA_ON_REPLY);
    assert_eq!(camera_reply(false), CAMERA_OFF_REPLY);
}
