use crate::{CallPhase, CallSnapshot, InterviewSettingsBuilder};

fn snapshot() -> CallSnapshot {
    let settings = InterviewSettingsBuilder::default()
        .with_id("int-1")
        .with_interviewer_id("agent-1")
        .with_duration_minutes(2)
        .with_coding_round_minutes(1)
        .build()
        .unwrap();
    CallSnapshot::new(&settings)
}

/// **VALUE**: Verifies the progress bar fraction is clamped and pinned to full once ended.
///
/// **BUG THIS CATCHES**: Would catch a progress bar overflowing past 100% while
/// the coding round transition is pending.
#[test]
fn given_elapsed_time_when_computing_progress_then_clamped_and_full_when_ended() {
    // GIVEN: A two-minute interview
    let mut snap = snapshot();

    // WHEN/THEN: Halfway
    snap.elapsed_secs = 60;
    assert!((snap.progress() - 0.5).abs() < f64::EPSILON);

    // WHEN/THEN: Overrun clamps
    snap.elapsed_secs = 500;
    assert!((snap.progress() - 1.0).abs() < f64::EPSILON);

    // WHEN/THEN: Ended is full regardless of elapsed
    snap.elapsed_secs = 0;
    snap.phase = CallPhase::Ended;
    assert!((snap.progress() - 1.0).abs() < f64::EPSILON);
}

/// **VALUE**: Verifies the coding countdown goes negative once time is up.
#[test]
fn given_coding_overrun_when_computing_remaining_then_negative() {
    let mut snap = snapshot();
    snap.coding_elapsed_secs = 75;

    assert_eq!(snap.coding_remaining_secs(), -15);
}
