use crate::call::machine::{
    CallEffect, CallMachine, EXPIRY_TRANSITION_DELAY, MANUAL_END_TRANSITION_DELAY,
};
use crate::call::transcript::{CAMERA_OFF_REPLY, CAMERA_ON_REPLY};

use models::{
    CallEvent, CallPhase, InterviewSettingsBuilder, SessionCompletion, Speaker, TranscriptEntry,
};

fn machine(duration_minutes: u32) -> CallMachine {
    let settings = InterviewSettingsBuilder::default()
        .with_id("int-1")
        .with_interviewer_id("agent-1")
        .with_duration_minutes(duration_minutes)
        .with_coding_round_minutes(1)
        .build()
        .unwrap();
    CallMachine::new(&settings)
}

fn started(duration_minutes: u32) -> CallMachine {
    let mut m = machine(duration_minutes);
    m.mark_started("call-1");
    m
}

fn persist_effects(effects: &[CallEffect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, CallEffect::PersistCompletion { .. }))
        .count()
}

#[test]
fn given_new_machine_when_inspected_then_idle() {
    let m = machine(1);
    assert_eq!(m.phase(), CallPhase::Idle);
    assert!(!m.snapshot().is_started);
    assert!(m.snapshot().call_id.is_none());
}

/// **VALUE**: Verifies the interview clock expiry stops the call and schedules the coding round once.
///
/// **WHY THIS MATTERS**: This is the hand-off from the voice interview to the coding round.
/// Firing twice would stop the voice SDK twice and reopen the editor.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one on the duration check, or expiry
/// re-firing on every tick after the deadline.
#[test]
fn given_started_call_when_ticked_to_duration_then_stop_and_schedule_once() {
    // GIVEN: A one-minute call in progress
    let mut m = started(1);

    // WHEN: Ticking 59 seconds
    for _ in 0..59 {
        assert!(m.tick().is_empty());
    }

    // WHEN: The 60th second passes
    let effects = m.tick();

    // THEN: The call stops and the coding round is scheduled
    assert_eq!(
        effects,
        vec![
            CallEffect::StopVoiceCall,
            CallEffect::ScheduleCodingRound(EXPIRY_TRANSITION_DELAY)
        ]
    );
    assert!(!m.snapshot().is_calling);
    assert_eq!(m.snapshot().elapsed_secs, 60);

    // THEN: Further ticks do nothing
    assert!(m.tick().is_empty());
    assert_eq!(m.snapshot().elapsed_secs, 60);
}

/// **VALUE**: Verifies the interview clock pauses while the voice call is not connected.
#[test]
fn given_call_ended_event_when_ticked_then_clock_paused() {
    let mut m = started(1);
    m.tick();
    m.handle_event(CallEvent::CallEnded);

    m.tick();
    m.tick();

    assert_eq!(m.snapshot().elapsed_secs, 1);

    m.handle_event(CallEvent::CallStarted);
    m.tick();
    assert_eq!(m.snapshot().elapsed_secs, 2);
}

#[test]
fn given_idle_machine_when_ticked_then_nothing_counts() {
    let mut m = machine(1);
    assert!(m.tick().is_empty());
    assert_eq!(m.snapshot().elapsed_secs, 0);
}

#[test]
fn given_agent_talking_events_when_handled_then_active_turn_follows() {
    let mut m = started(1);

    m.handle_event(CallEvent::AgentStartTalking);
    assert_eq!(m.snapshot().active_turn, Some(Speaker::Agent));

    m.handle_event(CallEvent::AgentStopTalking);
    assert_eq!(m.snapshot().active_turn, Some(Speaker::User));
}

/// **VALUE**: Verifies transcript updates surface the latest interviewer and candidate lines.
#[test]
fn given_transcript_update_when_handled_then_latest_lines_shown() {
    // GIVEN: A running call
    let mut m = started(1);

    // WHEN: A transcript update arrives
    m.handle_event(CallEvent::Update {
        transcript: vec![
            TranscriptEntry::new(Speaker::Agent, "Welcome"),
            TranscriptEntry::new(Speaker::User, "Thanks"),
            TranscriptEntry::new(Speaker::Agent, "First question"),
        ],
    });

    // THEN: Latest of each
    assert_eq!(m.snapshot().last_interviewer_response, "First question");
    assert_eq!(m.snapshot().last_user_response, "Thanks");
}

/// **VALUE**: Verifies a camera question is answered locally from the camera state.
///
/// **WHY THIS MATTERS**: The voice agent cannot see the camera; its answer would be a guess.
///
/// **BUG THIS CATCHES**: Would catch the agent's reply being shown instead of the
/// camera state, or the reply not tracking camera changes.
#[test]
fn given_camera_question_when_transcript_updates_then_reply_reflects_camera() {
    // GIVEN: A running call with the camera off
    let mut m = started(1);
    let transcript = vec![
        TranscriptEntry::new(Speaker::Agent, "Let's begin"),
        TranscriptEntry::new(Speaker::User, "Is my camera on?"),
    ];

    // WHEN: The candidate asks about the camera
    m.handle_event(CallEvent::Update {
        transcript: transcript.clone(),
    });

    // THEN: Off reply
    assert_eq!(m.snapshot().last_interviewer_response, CAMERA_OFF_REPLY);

    // WHEN: The camera comes on and the question repeats
    m.set_camera_on(true);
    m.handle_event(CallEvent::Update { transcript });

    // THEN: On reply
    assert_eq!(m.snapshot().last_interviewer_response, CAMERA_ON_REPLY);
}

/// **VALUE**: Verifies a voice error ends the session and persists completion once.
///
/// **BUG THIS CATCHES**: Would catch a second error event saving completion twice.
#[test]
fn given_voice_error_when_handled_then_ended_and_persisted_once() {
    // GIVEN: A running call with two tab switches
    let mut m = started(1);
    m.record_tab_switch();
    m.record_tab_switch();

    // WHEN: The SDK reports an error
    let effects = m.handle_event(CallEvent::Error {
        message: "connection lost".to_string(),
    });

    // THEN: Voice stopped and completion persisted with the tab switch count
    assert_eq!(m.phase(), CallPhase::Ended);
    assert_eq!(
        effects,
        vec![
            CallEffect::StopVoiceCall,
            CallEffect::PersistCompletion {
                call_id: "call-1".to_string(),
                completion: SessionCompletion {
                    is_ended: true,
                    tab_switch_count: 2,
                },
            },
        ]
    );

    // WHEN: Another error arrives
    let again = m.handle_event(CallEvent::Error {
        message: "still lost".to_string(),
    });

    // THEN: Nothing further
    assert!(again.is_empty());
}

#[test]
fn given_started_call_when_end_call_then_coding_round_scheduled_sooner() {
    let mut m = started(1);

    let effects = m.end_call();

    assert_eq!(
        effects,
        vec![
            CallEffect::StopVoiceCall,
            CallEffect::ScheduleCodingRound(MANUAL_END_TRANSITION_DELAY)
        ]
    );
    assert_eq!(m.phase(), CallPhase::InCall);
    assert!(m.end_call().is_empty(), "Second end must not reschedule");
}

/// **VALUE**: Verifies ending before the call started does not persist anything.
///
/// **BUG THIS CATCHES**: Would catch a completion write with no call id, which the
/// session store would reject or attach to the wrong row.
#[test]
fn given_idle_machine_when_end_call_then_ended_without_persisting() {
    let mut m = machine(1);

    let effects = m.end_call();

    assert_eq!(m.phase(), CallPhase::Ended);
    assert!(effects.is_empty());
}

/// **VALUE**: Walks the full happy path: call, expiry, coding round, finish.
#[test]
fn given_full_session_when_coding_round_ends_then_completion_persisted_once() {
    // GIVEN: A call that ran out of time
    let mut m = started(1);
    for _ in 0..60 {
        m.tick();
    }

    // WHEN: The scheduled transition fires
    m.open_coding_round();

    // THEN: Coding round with the editor open and its clock running
    assert_eq!(m.phase(), CallPhase::CodingRound);
    assert!(m.snapshot().editor_open);
    m.tick();
    m.tick();
    assert_eq!(m.snapshot().coding_elapsed_secs, 2);

    // WHEN: The editor is closed the coding clock pauses
    m.close_editor();
    m.tick();
    assert_eq!(m.snapshot().coding_elapsed_secs, 2);
    m.open_editor();

    // WHEN: The candidate ends the coding round
    let effects = m.end_coding_round();

    // THEN: Ended and persisted exactly once
    assert_eq!(m.phase(), CallPhase::Ended);
    assert_eq!(persist_effects(&effects), 1);
    assert!(m.snapshot().completion_persisted);
    assert!(m.end_coding_round().is_empty());
    assert!(m.end_call().is_empty());
    assert!((m.progress() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn given_ended_machine_when_opening_coding_round_then_stays_ended() {
    let mut m = started(1);
    m.handle_event(CallEvent::Error {
        message: "boom".to_string(),
    });

    m.open_coding_round();

    assert_eq!(m.phase(), CallPhase::Ended);
}

#[test]
fn given_started_machine_when_marked_ineligible_then_phase_unchanged() {
    let mut m = started(1);
    m.mark_ineligible();
    assert_eq!(m.phase(), CallPhase::InCall);

    let mut idle = machine(1);
    idle.mark_ineligible();
    assert_eq!(idle.phase(), CallPhase::Ineligible);
}
