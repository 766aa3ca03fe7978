//! Client for the hosted code-execution API.
//!
//! Every call path of [`ExecutionClient::run`] yields a displayable
//! [`RunResult`]: upstream errors, transport failures and timeouts are folded
//! into the result instead of being returned as errors.

use crate::DEFAULT_EXECUTION_TIMEOUT;
use crate::base_url::parse_base_url;
use crate::error::execution::ExecutionError;

use common::ErrorLocation;
use models::{ExecuteResponse, LanguageKey, RunRequest, RunResult, Runtime};

use std::panic::Location;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use reqwest::Client;
use url::Url;

const EXECUTE_ENDPOINT: &str = "execute";
const RUNTIMES_ENDPOINT: &str = "runtimes";

pub const EXECUTION_TIMED_OUT: &str = "Execution timed out";

#[derive(Clone)]
pub struct ExecutionClient {
    base_url: Url,
    client: Client,
    timeout: Duration,
}

impl ExecutionClient {
    pub fn new(base_url_str: &str) -> Result<Self, ExecutionError> {
        let base_url = parse_base_url(base_url_str)?;
        let client = Client::builder().build()?;

        Ok(Self {
            base_url,
            client,
            timeout: DEFAULT_EXECUTION_TIMEOUT,
        })
    }

    /// Bound on the whole request, response body included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runs one snippet. Never fails; see the module docs.
    pub async fn run(&self, request: &RunRequest) -> RunResult {
        let started = Instant::now();
        debug!(
            "Executing {} snippet ({} bytes) on runtime {} {}",
            request.language,
            request.code.len(),
            request.language.runtime(),
            request.effective_version()
        );

        // Dropping the future on expiry aborts the in-flight connection.
        match tokio::time::timeout(self.timeout, self.execute(request)).await {
            Ok(Ok(response)) => {
                let elapsed = started.elapsed().as_millis() as u64;
                info!("{} run finished in {elapsed}ms", request.language);
                RunResult::completed(
                    request.language,
                    response.stdout(),
                    response.stderr(),
                    elapsed,
                )
            }
            Ok(Err(e)) => {
                warn!("{} run failed: {e}", request.language);
                RunResult::failure(request.language, e.display_message())
            }
            Err(_) => {
                warn!(
                    "{} run timed out after {:?}",
                    request.language, self.timeout
                );
                RunResult::failure(request.language, EXECUTION_TIMED_OUT)
            }
        }
    }

    /// Parses `language` before doing anything else; an unsupported name
    /// fails without touching the network.
    pub async fn run_named(
        &self,
        language: &str,
        code: impl Into<String>,
        stdin: Option<String>,
        version: Option<String>,
    ) -> Result<RunResult, ExecutionError> {
        let language: LanguageKey = language.parse()?;

        let mut request = RunRequest::new(language, code);
        request.stdin = stdin;
        request.version = version;

        Ok(self.run(&request).await)
    }

    /// Runtime listing; empty on any failure.
    pub async fn list_runtimes(&self) -> Vec<Runtime> {
        match self.fetch_runtimes().await {
            Ok(runtimes) => runtimes,
            Err(e) => {
                warn!("Failed to list runtimes: {e}");
                Vec::new()
            }
        }
    }

    async fn execute(&self, request: &RunRequest) -> Result<ExecuteResponse, ExecutionError> {
        let url = self.base_url.join(EXECUTE_ENDPOINT)?;

        let response = self
            .client
            .post(url)
            .json(&request.to_payload())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExecutionError::Upstream {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(response.json::<ExecuteResponse>().await?)
    }

    async fn fetch_runtimes(&self) -> Result<Vec<Runtime>, ExecutionError> {
        let url = self.base_url.join(RUNTIMES_ENDPOINT)?;

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExecutionError::Upstream {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(response.json::<Vec<Runtime>>().await?)
    }
}
