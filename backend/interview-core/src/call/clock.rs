/// A start/pause stopwatch advanced one second per [`Stopwatch::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed_secs: u64,
    running: bool,
}

impl Stopwatch {
    pub fn starting_at(elapsed_secs: u64) -> Self {
        Self {
            elapsed_secs,
            running: false,
        }
    }

    /// Start if paused, pause if running.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Back to zero, paused.
    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
        self.running = false;
    }

    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_secs += 1;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn display(&self) -> String {
        format_hms(self.elapsed_secs)
    }
}

/// `HH:MM:SS`, each part zero-padded to two digits.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

pub const TIMES_UP: &str = "Time's Up!";

/// Remaining coding time as `M:SS`, or [`TIMES_UP`] once nothing is left.
pub fn format_countdown(remaining_secs: i64) -> String {
    if remaining_secs <= 0 {
        return TIMES_UP.to_string();
    }
    format!("{}:{:02}", remaining_secs / 60, remaining_secs % 60)
}
