use crate::error::call::CallError;

use models::{CallRegistration, CallRegistrationRequest, NewResponse, SessionCompletion};

use async_trait::async_trait;

/// Where interview responses live. Owned by another service.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Emails of everyone who already responded to the interview.
    async fn respondent_emails(&self, interview_id: &str) -> Result<Vec<String>, CallError>;

    async fn register_call(
        &self,
        request: &CallRegistrationRequest,
    ) -> Result<CallRegistration, CallError>;

    async fn create_response(&self, response: &NewResponse) -> Result<(), CallError>;

    async fn save_completion(
        &self,
        completion: &SessionCompletion,
        call_id: &str,
    ) -> Result<(), CallError>;
}
