use crate::base_url::parse_base_url;
use crate::error::analysis::AnalysisError;

use common::{ErrorLocation, HttpStatusCode};
use models::{SimulateAttackPayload, UploadRepoPayload, is_truthy};

use std::panic::Location;

use log::{debug, warn};
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

const UPLOAD_REPO_ENDPOINT: &str = "upload_repo";
const SIMULATE_ATTACK_ENDPOINT: &str = "simulate_attack";
const REPORTS_SEGMENT: &str = "reports";
const LATEST_SEGMENT: &str = "latest";

pub const UPLOAD_FAILED: &str = "Failed to upload repository";
pub const SIMULATE_FAILED: &str = "Failed to simulate attack";
pub const REPORT_FAILED: &str = "Failed to get report";

/// HTTP client for the security-analysis backend.
#[derive(Clone)]
pub struct AnalysisClient {
    base_url: Url,
    client: Client,
}

impl AnalysisClient {
    pub fn new(base_url_str: &str) -> Result<Self, AnalysisError> {
        let base_url = parse_base_url(base_url_str)?;
        let client = Client::builder().build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn upload_repo(&self, payload: &UploadRepoPayload) -> Result<Value, AnalysisError> {
        let url = self.base_url.join(UPLOAD_REPO_ENDPOINT)?;
        debug!("Uploading {} as {}", payload.repo_url, payload.repo_id);

        let response = self.client.post(url).json(payload).send().await?;
        relay(response, UPLOAD_FAILED).await
    }

    pub async fn simulate_attack(
        &self,
        payload: &SimulateAttackPayload,
    ) -> Result<Value, AnalysisError> {
        let url = self.base_url.join(SIMULATE_ATTACK_ENDPOINT)?;
        debug!("Simulating attack on {}", payload.repo_id);

        let response = self.client.post(url).json(payload).send().await?;
        relay(response, SIMULATE_FAILED).await
    }

    pub async fn latest_report(&self, repo_id: &str) -> Result<Value, AnalysisError> {
        let url = self.report_url(repo_id)?;
        debug!("Fetching latest report for {repo_id}");

        let response = self.client.get(url).send().await?;
        relay(response, REPORT_FAILED).await
    }

    /// `<base>/reports/<repo_id>/latest`, with the id encoded as one segment.
    #[track_caller]
    pub(crate) fn report_url(&self, repo_id: &str) -> Result<Url, AnalysisError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AnalysisError::UrlParse {
                message: format!("{} cannot be a base URL", self.base_url),
                location: ErrorLocation::from(Location::caller()),
            })?
            .pop_if_empty()
            .extend([REPORTS_SEGMENT, repo_id, LATEST_SEGMENT]);
        Ok(url)
    }
}

async fn relay(response: Response, fallback: &str) -> Result<Value, AnalysisError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let detail = extract_detail(&text, fallback);
        warn!("Analysis backend returned {}: {detail}", status.as_u16());
        return Err(AnalysisError::Upstream {
            status: HttpStatusCode::from(status.as_u16()),
            detail,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(serde_json::from_str(&text)?)
}

/// Best-effort error detail from an upstream error body.
///
/// For a JSON body: a truthy `detail` string as-is, any other truthy `detail`
/// as its JSON text, else the fallback. A body that is not JSON is relayed as
/// raw text, and an empty body gets the fallback.
pub(crate) fn extract_detail(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(detail) if is_truthy(detail) => detail.to_string(),
            _ => fallback.to_string(),
        },
        Err(_) if body.trim().is_empty() => fallback.to_string(),
        Err(_) => body.to_string(),
    }
}
