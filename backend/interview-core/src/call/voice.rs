use crate::error::call::CallError;

use common::RedactedToken;

use async_trait::async_trait;

/// The voice-call SDK, seen from the controller.
///
/// Lifecycle and transcript events flow the other way, through the
/// `mpsc::Receiver<CallEvent>` handed to [`super::CallController::spawn`].
#[async_trait]
pub trait VoiceClient: Send + Sync {
    async fn start_call(&self, access_token: &RedactedToken) -> Result<(), CallError>;

    async fn stop_call(&self) -> Result<(), CallError>;
}
