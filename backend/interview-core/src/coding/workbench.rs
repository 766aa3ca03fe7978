use crate::coding::detect::detect_language;
use crate::coding::problems::ProblemCatalog;
use crate::coding::samples::sample_program;
use crate::execution::ExecutionClient;

use models::execution::LATEST_VERSION;
use models::{LanguageKey, RunRequest, RunResult};

use std::collections::VecDeque;

use log::{debug, info};

/// Most recent runs kept, newest first.
pub const HISTORY_LIMIT: usize = 25;

const PLAYGROUND_STDIN: &str = "Hello\nWorld";
const INTERVIEW_EDITOR_CODE: &str = "// Write your solution here\n";

/// Editor state for one coding session.
#[derive(Debug, Clone)]
pub struct Workbench {
    language: LanguageKey,
    code: String,
    stdin: String,
    version: Option<String>,
    result: Option<RunResult>,
    running: bool,
    history: VecDeque<RunResult>,
    problem: Option<String>,
}

impl Workbench {
    /// Free-form playground preloaded with the JavaScript sample.
    pub fn playground() -> Self {
        Self::new(
            LanguageKey::JavaScript,
            sample_program(LanguageKey::JavaScript),
            PLAYGROUND_STDIN,
            None,
        )
    }

    /// Coding round editor; always runs the latest runtime.
    pub fn interview_editor() -> Self {
        Self::new(
            LanguageKey::JavaScript,
            INTERVIEW_EDITOR_CODE,
            "",
            Some(LATEST_VERSION.to_string()),
        )
    }

    fn new(
        language: LanguageKey,
        code: impl Into<String>,
        stdin: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            language,
            code: code.into(),
            stdin: stdin.into(),
            version,
            result: None,
            running: false,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            problem: None,
        }
    }

    pub fn language(&self) -> LanguageKey {
        self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn stdin(&self) -> &str {
        &self.stdin
    }

    pub fn result(&self) -> Option<&RunResult> {
        self.result.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn problem(&self) -> Option<&str> {
        self.problem.as_deref()
    }

    /// Newest first.
    pub fn history(&self) -> impl Iterator<Item = &RunResult> {
        self.history.iter()
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn set_stdin(&mut self, stdin: impl Into<String>) {
        self.stdin = stdin.into();
    }

    /// Language selector in the playground; the code is left alone.
    pub fn set_language(&mut self, language: LanguageKey) {
        self.language = language;
    }

    /// Language selector in the interview editor; the code is reset.
    pub fn change_language(&mut self, language: LanguageKey) {
        self.language = language;
        self.code = format!("// Write your solution in {language}\n");
    }

    /// Marks a run as pending. `None` while another run is still pending.
    pub fn begin_run(&mut self) -> Option<RunRequest> {
        if self.running {
            debug!("Run already in progress");
            return None;
        }

        self.running = true;
        self.result = None;

        let mut request =
            RunRequest::new(self.language, self.code.clone()).with_stdin(self.stdin.clone());
        request.version = self.version.clone();
        Some(request)
    }

    /// Records a finished run and returns its status line.
    pub fn finish_run(&mut self, result: RunResult) -> &'static str {
        self.running = false;
        let status = result.status_line();

        self.history.push_front(result.clone());
        self.history.truncate(HISTORY_LIMIT);
        self.result = Some(result);

        status
    }

    /// Runs the current code. `None` if a run was already pending.
    ///
    /// Cancel-safe: dropping the future mid-run clears the pending flag so the
    /// next run can start.
    pub async fn run(&mut self, client: &ExecutionClient) -> Option<&RunResult> {
        let request = self.begin_run()?;
        {
            let pending = PendingRun {
                workbench: &mut *self,
                finished: false,
            };
            let result = client.run(&request).await;
            let status = pending.finish(result);
            info!("{status}");
        }
        self.result.as_ref()
    }

    /// Clears the output pane and stdin.
    pub fn clear(&mut self) {
        self.result = None;
        self.stdin.clear();
    }

    /// Switches to the detected language; blank code gets that language's sample.
    pub fn auto_detect(&mut self) -> LanguageKey {
        let detected = detect_language(&self.code);
        info!("Detected language: {detected}");
        self.language = detected;
        if self.code.trim().is_empty() {
            self.code = sample_program(detected).to_string();
        }
        detected
    }

    pub fn apply_sample(&mut self, language: LanguageKey) {
        self.language = language;
        self.code = sample_program(language).to_string();
    }

    /// Selects a catalog problem and loads its first sample's stdin.
    pub fn select_problem(&mut self, catalog: &ProblemCatalog, key: &str) -> bool {
        let Some(stdin) = catalog.default_stdin(key) else {
            return false;
        };
        self.stdin = stdin.to_string();
        self.problem = Some(key.to_string());
        true
    }
}

/// Releases the pending flag of a run whose future was dropped.
struct PendingRun<'a> {
    workbench: &'a mut Workbench,
    finished: bool,
}

impl PendingRun<'_> {
    fn finish(mut self, result: RunResult) -> &'static str {
        self.finished = true;
        self.workbench.finish_run(result)
    }
}

impl Drop for PendingRun<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("Run cancelled before it finished");
            self.workbench.running = false;
        }
    }
}
