use models::{Speaker, TranscriptEntry};

use std::sync::OnceLock;

use regex::Regex;

const CAMERA_QUESTION_PATTERN: &str =
    r"(?i)\b(camera|video)\b.*\b(on|off|working|enabled)\b|\bis my camera on\b";

pub const CAMERA_ON_REPLY: &str = "Yes, your camera is on and working.";
pub const CAMERA_OFF_REPLY: &str = "Your camera is currently off.";

static CAMERA_QUESTION_REGEX: OnceLock<Regex> = OnceLock::new();

fn camera_question_regex() -> &'static Regex {
    CAMERA_QUESTION_REGEX
        .get_or_init(|| Regex::new(CAMERA_QUESTION_PATTERN).expect("valid regex pattern"))
}

/// Latest utterance of each speaker in a transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestLines {
    pub agent: Option<String>,
    pub user: Option<String>,
}

pub fn latest_lines(transcript: &[TranscriptEntry]) -> LatestLines {
    let mut lines = LatestLines::default();
    for entry in transcript {
        match entry.speaker() {
            Some(Speaker::Agent) => lines.agent = Some(entry.content.clone()),
            Some(Speaker::User) => lines.user = Some(entry.content.clone()),
            None => {}
        }
    }
    lines
}

pub fn asks_about_camera(utterance: &str) -> bool {
    camera_question_regex().is_match(utterance)
}

pub fn camera_reply(camera_on: bool) -> &'static str {
    if camera_on {
        CAMERA_ON_REPLY
    } else {
        CAMERA_OFF_REPLY
    }
}
