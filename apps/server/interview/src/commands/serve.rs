use crate::cli::ServeArgs;
use crate::commands::Context;
use crate::error::InterviewError;

use interview_core::analysis::{AnalysisClient, SecurityAnalysisForwarder};
use interview_core::server::{ServerHandle, start_server};

use std::future::Future;

use log::info;

/// Starts the HTTP server. Returns once it is listening.
pub async fn start(context: &Context, args: &ServeArgs) -> Result<ServerHandle, InterviewError> {
    let bind_addr = args
        .bind
        .as_deref()
        .unwrap_or(context.config.server.bind_addr.as_str());

    let client = AnalysisClient::new(&context.config.analysis.api_url)?;
    info!("Forwarding security analysis to {}", client.base_url());

    let handle = start_server(bind_addr, SecurityAnalysisForwarder::new(client)).await?;
    Ok(handle)
}

/// Serves until `shutdown` resolves, then stops gracefully.
pub async fn execute<F>(
    context: &Context,
    args: &ServeArgs,
    shutdown: F,
) -> Result<(), InterviewError>
where
    F: Future<Output = ()>,
{
    let handle = start(context, args).await?;

    shutdown.await;
    info!("Shutdown requested");

    handle.shutdown().await?;
    Ok(())
}
