use crate::call::clock::{Stopwatch, TIMES_UP, format_countdown, format_hms};

#[test]
fn given_seconds_when_formatting_hms_then_zero_padded() {
    assert_eq!(format_hms(0), "00:00:00");
    assert_eq!(format_hms(59), "00:00:59");
    assert_eq!(format_hms(3661), "01:01:01");
    assert_eq!(format_hms(36_000 + 125), "10:02:05");
}

/// **VALUE**: Verifies the coding countdown flips to "Time's Up!" at zero and below.
///
/// **BUG THIS CATCHES**: Would catch a negative remainder rendering as "-1:-05".
#[test]
fn given_remaining_seconds_when_formatting_countdown_then_minutes_seconds_or_times_up() {
    assert_eq!(format_countdown(2700), "45:00");
    assert_eq!(format_countdown(65), "1:05");
    assert_eq!(format_countdown(1), "0:01");
    assert_eq!(format_countdown(0), TIMES_UP);
    assert_eq!(format_countdown(-30), TIMES_UP);
}

/// **VALUE**: Verifies the stopwatch only advances while running.
///
/// **WHY THIS MATTERS**: The call header shows elapsed time; a paused timer that
/// keeps counting misreports interview length.
#[test]
fn given_stopwatch_when_toggled_and_ticked_then_only_running_ticks_count() {
    // GIVEN: A paused stopwatch
    let mut watch = Stopwatch::default();

    // WHEN: Ticking while paused
    watch.tick();
    assert_eq!(watch.elapsed_secs(), 0);

    // WHEN: Running for three ticks then pausing
    watch.toggle();
    assert!(watch.is_running());
    watch.tick();
    watch.tick();
    watch.tick();
    watch.toggle();
    watch.tick();

    // THEN: Only the running ticks counted
    assert_eq!(watch.elapsed_secs(), 3);
    assert_eq!(watch.display(), "00:00:03");
}

#[test]
fn given_running_stopwatch_when_reset_then_zero_and_paused() {
    let mut watch = Stopwatch::starting_at(90);
    watch.toggle();
    watch.reset();
    assert_eq!(watch.elapsed_secs(), 0);
    assert!(!watch.is_running());
}
