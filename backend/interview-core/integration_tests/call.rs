use interview_core::call::{
    CallController, CallHandle, MediaDevices, MediaStream, SessionStore, VoiceClient,
};
use interview_core::error::call::CallError;

use common::{ErrorLocation, RedactedToken};
use models::{
    CallEvent, CallPhase, CallRegistration, CallRegistrationRequest, Candidate,
    InterviewSettings, InterviewSettingsBuilder, NewResponse, SessionCompletion, Speaker,
    TranscriptEntry,
};

use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

// ============================================================================
// Call controller actor tests
// Voice SDK, session store and camera are in-memory fakes; the clock is paused.
// ============================================================================

#[derive(Default)]
struct FakeVoice {
    started: AtomicUsize,
    stopped: AtomicUsize,
    token: Mutex<Option<String>>,
}

#[async_trait]
impl VoiceClient for FakeVoice {
    async fn start_call(&self, access_token: &RedactedToken) -> Result<(), CallError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        *self.token.lock().unwrap() = Some(access_token.expose().to_string());
        Ok(())
    }

    async fn stop_call(&self) -> Result<(), CallError> {
        self.stopped.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct FakeStore {
    responded: Vec<String>,
    access_token: String,
    registrations: Mutex<Vec<CallRegistrationRequest>>,
    responses: Mutex<Vec<NewResponse>>,
    completions: Mutex<Vec<(String, SessionCompletion)>>,
}

impl FakeStore {
    fn with_token(token: &str) -> Self {
        Self {
            access_token: token.to_string(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SessionStore for FakeStore {
    async fn respondent_emails(&self, _interview_id: &str) -> Result<Vec<String>, CallError> {
        Ok(self.responded.clone())
    }

    async fn register_call(
        &self,
        request: &CallRegistrationRequest,
    ) -> Result<CallRegistration, CallError> {
        self.registrations.lock().unwrap().push(request.clone());
        Ok(CallRegistration {
            call_id: "call-42".to_string(),
            access_token: RedactedToken::new(self.access_token.clone()),
        })
    }

    async fn create_response(&self, response: &NewResponse) -> Result<(), CallError> {
        self.responses.lock().unwrap().push(response.clone());
        Ok(())
    }

    async fn save_completion(
        &self,
        completion: &SessionCompletion,
        call_id: &str,
    ) -> Result<(), CallError> {
        self.completions
            .lock()
            .unwrap()
            .push((call_id.to_string(), *completion));
        Ok(())
    }
}

struct FakeStream {
    stopped: Arc<AtomicUsize>,
}

impl MediaStream for FakeStream {
    fn stop(&mut self) {
        self.stopped.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct FakeDevices {
    denied: bool,
    opened: AtomicUsize,
    stopped: Arc<AtomicUsize>,
}

#[async_trait]
impl MediaDevices for FakeDevices {
    async fn open_video(&self) -> Result<Box<dyn MediaStream>, CallError> {
        if self.denied {
            return Err(CallError::Camera {
                message: "Permission denied".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeStream {
            stopped: Arc::clone(&self.stopped),
        }))
    }
}

struct Harness {
    handle: CallHandle,
    events: mpsc::Sender<CallEvent>,
    voice: Arc<FakeVoice>,
    store: Arc<FakeStore>,
    devices: Arc<FakeDevices>,
}

fn settings() -> InterviewSettings {
    InterviewSettingsBuilder::default()
        .with_id("int-1")
        .with_interviewer_id("agent-1")
        .with_objective("Hire a backend engineer")
        .with_question("Tell me about yourself")
        .with_question("Why Rust?")
        .with_duration_minutes(1)
        .with_coding_round_minutes(1)
        .build()
        .unwrap()
}

fn spawn(settings: InterviewSettings, store: FakeStore, devices: FakeDevices) -> Harness {
    let voice = Arc::new(FakeVoice::default());
    let store = Arc::new(store);
    let devices = Arc::new(devices);
    let (events, events_rx) = mpsc::channel(16);

    let handle = CallController::spawn(
        settings,
        voice.clone(),
        store.clone(),
        devices.clone(),
        events_rx,
    );

    Harness {
        handle,
        events,
        voice,
        store,
        devices,
    }
}

fn candidate() -> Candidate {
    Candidate::new("Ada Lovelace", "ada@example.com")
}

/// Lets the paused runtime drain pending work.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// **VALUE**: Verifies starting registers the call with the interview context, starts the
/// voice call with the issued token, records the response and turns the camera on.
///
/// **BUG THIS CATCHES**: Would catch the questions not being joined for the agent, the
/// response record missing the call id, or the camera never being acquired.
#[tokio::test(start_paused = true)]
async fn given_eligible_candidate_when_started_then_call_in_progress() {
    // GIVEN: A fresh controller
    let h = spawn(settings(), FakeStore::with_token("tok-1"), FakeDevices::default());

    // WHEN: The candidate starts
    let snapshot = h.handle.start(candidate()).await.unwrap();

    // THEN: In call, camera on
    assert_eq!(snapshot.phase, CallPhase::InCall);
    assert!(snapshot.is_started);
    assert!(snapshot.is_calling);
    assert!(snapshot.camera_on);
    assert_eq!(snapshot.call_id.as_deref(), Some("call-42"));

    // THEN: Collaborators saw the right data
    assert_eq!(h.voice.started.load(Ordering::SeqCst), 1);
    assert_eq!(h.voice.token.lock().unwrap().as_deref(), Some("tok-1"));

    let registrations = h.store.registrations.lock().unwrap();
    assert_eq!(registrations.len(), 1);
    assert_eq!(
        registrations[0].dynamic_data.questions,
        "Tell me about yourself, Why Rust?"
    );
    assert_eq!(registrations[0].dynamic_data.name, "Ada Lovelace");

    let responses = h.store.responses.lock().unwrap();
    assert_eq!(responses[0].call_id, "call-42");
    assert_eq!(responses[0].email, "ada@example.com");
    assert_eq!(h.devices.opened.load(Ordering::SeqCst), 1);
}

/// **VALUE**: Walks the full session: interview expiry, coding round, finish, persistence.
///
/// **WHY THIS MATTERS**: This is the path every candidate takes. Completion must be saved
/// exactly once with the tab switch count, or reviewers see unfinished or duplicated sessions.
#[tokio::test(start_paused = true)]
async fn given_started_call_when_time_runs_out_then_coding_round_then_completion_saved_once() {
    // GIVEN: A started one-minute call with a tab switch
    let h = spawn(settings(), FakeStore::with_token("tok"), FakeDevices::default());
    h.handle.start(candidate()).await.unwrap();
    h.handle.record_tab_switch().await.unwrap();

    // WHEN: The interview minute passes
    tokio::time::sleep(Duration::from_secs(61)).await;

    // THEN: Voice stopped, transition pending
    let snapshot = h.handle.snapshot().await;
    assert_eq!(snapshot.phase, CallPhase::InCall);
    assert!(!snapshot.is_calling);
    assert_eq!(snapshot.elapsed_secs, 60);
    assert_eq!(h.voice.stopped.load(Ordering::SeqCst), 1);

    // WHEN: The transition delay passes
    tokio::time::sleep(Duration::from_secs(3)).await;

    // THEN: Coding round with the editor open
    let snapshot = h.handle.snapshot().await;
    assert_eq!(snapshot.phase, CallPhase::CodingRound);
    assert!(snapshot.editor_open);

    // WHEN: The candidate finishes the coding round, twice
    let ended = h.handle.end_coding_round().await.unwrap();
    h.handle.end_coding_round().await.unwrap();

    // THEN: Ended and saved once
    assert_eq!(ended.phase, CallPhase::Ended);
    let completions = h.store.completions.lock().unwrap();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].0, "call-42");
    assert_eq!(completions[0].1.tab_switch_count, 1);
    assert!(completions[0].1.is_ended);
    assert_eq!(h.voice.stopped.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn given_started_call_when_candidate_ends_call_then_coding_round_after_one_second() {
    let h = spawn(settings(), FakeStore::with_token("tok"), FakeDevices::default());
    h.handle.start(candidate()).await.unwrap();

    let snapshot = h.handle.end_call().await.unwrap();
    assert_eq!(snapshot.phase, CallPhase::InCall);
    assert!(!snapshot.is_calling);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(h.handle.snapshot().await.phase, CallPhase::CodingRound);
    assert_eq!(h.voice.stopped.load(Ordering::SeqCst), 1);
}

/// **VALUE**: Verifies a candidate who already responded cannot start again.
///
/// **BUG THIS CATCHES**: Would catch the eligibility check running after registration,
/// creating an orphan call on the voice provider.
#[tokio::test(start_paused = true)]
async fn given_candidate_already_responded_when_started_then_ineligible_without_registering() {
    // GIVEN: A store where the candidate already responded
    let store = FakeStore {
        responded: vec!["ada@example.com".to_string()],
        ..FakeStore::with_token("tok")
    };
    let h = spawn(settings(), store, FakeDevices::default());

    // WHEN: Starting
    let snapshot = h.handle.start(candidate()).await.unwrap();

    // THEN: Ineligible, nothing registered or started
    assert_eq!(snapshot.phase, CallPhase::Ineligible);
    assert!(h.store.registrations.lock().unwrap().is_empty());
    assert_eq!(h.voice.started.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn given_candidate_not_on_allow_list_when_started_then_ineligible() {
    let settings = InterviewSettingsBuilder::default()
        .with_id("int-1")
        .with_interviewer_id("agent-1")
        .with_respondents(["grace@example.com"])
        .build()
        .unwrap();
    let h = spawn(settings, FakeStore::with_token("tok"), FakeDevices::default());

    let snapshot = h.handle.start(candidate()).await.unwrap();

    assert_eq!(snapshot.phase, CallPhase::Ineligible);
}

#[tokio::test(start_paused = true)]
async fn given_invalid_email_when_started_then_candidate_error_and_idle() {
    let h = spawn(settings(), FakeStore::with_token("tok"), FakeDevices::default());

    let result = h.handle.start(Candidate::new("Ada", "not-an-email")).await;

    assert!(matches!(result, Err(CallError::Candidate { .. })));
    assert_eq!(h.handle.snapshot().await.phase, CallPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn given_anonymous_interview_when_started_without_details_then_call_starts() {
    let settings = InterviewSettingsBuilder::default()
        .with_id("int-1")
        .with_interviewer_id("agent-1")
        .with_anonymous(true)
        .build()
        .unwrap();
    let h = spawn(settings, FakeStore::with_token("tok"), FakeDevices::default());

    let snapshot = h.handle.start(Candidate::new("", "")).await.unwrap();

    assert_eq!(snapshot.phase, CallPhase::InCall);
    assert_eq!(
        h.store.registrations.lock().unwrap()[0].dynamic_data.name,
        "not provided"
    );
}

/// **VALUE**: Verifies a registration without an access token leaves the session idle.
#[tokio::test(start_paused = true)]
async fn given_empty_access_token_when_started_then_stays_idle() {
    let h = spawn(settings(), FakeStore::with_token(""), FakeDevices::default());

    let snapshot = h.handle.start(candidate()).await.unwrap();

    assert_eq!(snapshot.phase, CallPhase::Idle);
    assert_eq!(h.voice.started.load(Ordering::SeqCst), 0);
}

/// **VALUE**: Verifies a denied camera does not block the interview.
#[tokio::test(start_paused = true)]
async fn given_camera_denied_when_started_then_call_runs_with_camera_off() {
    let devices = FakeDevices {
        denied: true,
        ..FakeDevices::default()
    };
    let h = spawn(settings(), FakeStore::with_token("tok"), devices);

    let snapshot = h.handle.start(candidate()).await.unwrap();

    assert_eq!(snapshot.phase, CallPhase::InCall);
    assert!(!snapshot.camera_on);
    assert!(h.handle.start_camera().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn given_camera_on_when_stopped_and_started_then_stream_released_and_reacquired() {
    let h = spawn(settings(), FakeStore::with_token("tok"), FakeDevices::default());
    h.handle.start(candidate()).await.unwrap();

    let off = h.handle.stop_camera().await.unwrap();
    assert!(!off.camera_on);
    assert_eq!(h.devices.stopped.load(Ordering::SeqCst), 1);

    let on = h.handle.start_camera().await.unwrap();
    assert!(on.camera_on);
    assert_eq!(h.devices.opened.load(Ordering::SeqCst), 2);
}

/// **VALUE**: Verifies voice SDK events flow through the channel into the snapshot.
#[tokio::test(start_paused = true)]
async fn given_transcript_events_when_sent_then_snapshot_shows_latest_lines() {
    // GIVEN: A started call
    let h = spawn(settings(), FakeStore::with_token("tok"), FakeDevices::default());
    h.handle.start(candidate()).await.unwrap();

    // WHEN: The agent speaks and the transcript updates
    h.events.send(CallEvent::AgentStartTalking).await.unwrap();
    h.events
        .send(CallEvent::Update {
            transcript: vec![
                TranscriptEntry::new(Speaker::Agent, "Why Rust?"),
                TranscriptEntry::new(Speaker::User, "Ownership"),
            ],
        })
        .await
        .unwrap();
    settle().await;

    // THEN: Reflected in the snapshot
    let snapshot = h.handle.snapshot().await;
    assert_eq!(snapshot.active_turn, Some(Speaker::Agent));
    assert_eq!(snapshot.last_interviewer_response, "Why Rust?");
    assert_eq!(snapshot.last_user_response, "Ownership");
}

/// **VALUE**: Verifies a voice SDK error ends the session and saves completion.
#[tokio::test(start_paused = true)]
async fn given_voice_error_event_when_sent_then_session_ended_and_saved() {
    let h = spawn(settings(), FakeStore::with_token("tok"), FakeDevices::default());
    h.handle.start(candidate()).await.unwrap();

    h.events
        .send(CallEvent::Error {
            message: "socket closed".to_string(),
        })
        .await
        .unwrap();
    settle().await;

    assert_eq!(h.handle.snapshot().await.phase, CallPhase::Ended);
    assert_eq!(h.voice.stopped.load(Ordering::SeqCst), 1);
    assert_eq!(h.store.completions.lock().unwrap().len(), 1);
}

/// **VALUE**: Verifies dropping every handle stops the actor and releases the camera.
///
/// **BUG THIS CATCHES**: Would catch a leaked camera stream after the page is closed.
#[tokio::test(start_paused = true)]
async fn given_all_handles_dropped_when_actor_exits_then_camera_released() {
    // GIVEN: A started call with the camera on
    let h = spawn(settings(), FakeStore::with_token("tok"), FakeDevices::default());
    h.handle.start(candidate()).await.unwrap();
    let devices = Arc::clone(&h.devices);

    // WHEN: Dropping the handle
    drop(h);
    settle().await;

    // THEN: The stream was stopped exactly once
    assert_eq!(devices.stopped.load(Ordering::SeqCst), 1);
}
