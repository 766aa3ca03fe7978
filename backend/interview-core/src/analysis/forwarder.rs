use crate::analysis::client::AnalysisClient;
use crate::analysis::repo::derive_repo_id;
use crate::error::analysis::AnalysisError;

use common::{ErrorLocation, HttpStatusCode};
use models::{
    AnalysisAction, SecurityAnalysisReply, SecurityAnalysisRequest, SimulateAttackPayload,
    UploadRepoPayload, id_text,
};

use std::panic::Location;

use log::{error, info, warn};
use serde_json::Value;

pub const REPO_URL_REQUIRED: &str = "GitHub repository URL is required";
pub const REPO_ID_REQUIRED_FOR_SIMULATION: &str = "Repository ID is required for simulation";
pub const REPO_ID_REQUIRED_FOR_REPORT: &str = "Repository ID is required for report";
pub const INVALID_ACTION: &str = "Invalid action specified";

/// Status and body the route answers with.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardReply {
    pub status: HttpStatusCode,
    pub body: SecurityAnalysisReply,
}

/// Dispatches security-analysis requests to the analysis backend.
#[derive(Clone)]
pub struct SecurityAnalysisForwarder {
    client: AnalysisClient,
}

impl SecurityAnalysisForwarder {
    pub fn new(client: AnalysisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    /// Handles one raw request body. Every outcome is a reply.
    pub async fn forward(&self, body: &[u8]) -> ForwardReply {
        match self.dispatch(body).await {
            Ok(reply) => ForwardReply {
                status: HttpStatusCode::OK,
                body: reply,
            },
            Err(e) => {
                let status = e.status();
                if status.is_server_error() {
                    error!("Security analysis failed: {e}");
                } else {
                    warn!("Security analysis rejected: {e}");
                }
                ForwardReply {
                    status,
                    body: SecurityAnalysisReply::failure(e.client_message()),
                }
            }
        }
    }

    async fn dispatch(&self, body: &[u8]) -> Result<SecurityAnalysisReply, AnalysisError> {
        let request: SecurityAnalysisRequest = serde_json::from_slice(body)?;

        let repo_url = request
            .repo_url()
            .ok_or_else(|| validation(REPO_URL_REQUIRED))?;
        let action = AnalysisAction::resolve(request.action.as_ref())
            .map_err(|_| validation(INVALID_ACTION))?;
        info!("Security analysis {action:?} for {repo_url}");

        match action {
            AnalysisAction::Upload => {
                let Value::String(repo_url) = repo_url else {
                    return Err(AnalysisError::Json {
                        message: format!("repo_url must be a string, got {repo_url}"),
                        location: ErrorLocation::from(Location::caller()),
                    });
                };
                let payload = UploadRepoPayload {
                    repo_url: repo_url.clone(),
                    repo_id: derive_repo_id(repo_url),
                };
                let data = self.client.upload_repo(&payload).await?;
                Ok(SecurityAnalysisReply::success(
                    "Repository uploaded successfully",
                    data,
                ))
            }
            AnalysisAction::Simulate => {
                let repo_id = request
                    .repo_id()
                    .ok_or_else(|| validation(REPO_ID_REQUIRED_FOR_SIMULATION))?;
                let payload = SimulateAttackPayload {
                    repo_id: repo_id.clone(),
                };
                let data = self.client.simulate_attack(&payload).await?;
                Ok(SecurityAnalysisReply::success(
                    "Security analysis completed",
                    data,
                ))
            }
            AnalysisAction::Report => {
                let repo_id = request
                    .repo_id()
                    .ok_or_else(|| validation(REPO_ID_REQUIRED_FOR_REPORT))?;
                let data = self.client.latest_report(&id_text(repo_id)).await?;
                Ok(SecurityAnalysisReply::success(
                    "Report retrieved successfully",
                    data,
                ))
            }
        }
    }
}

#[track_caller]
fn validation(message: &str) -> AnalysisError {
    AnalysisError::Validation {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
