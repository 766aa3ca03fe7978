pub mod analysis;
pub mod call;
pub mod config;
pub mod execution;
pub mod server;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Execution(#[from] execution::ExecutionError),

    #[error(transparent)]
    Analysis(#[from] analysis::AnalysisError),

    #[error(transparent)]
    Call(#[from] call::CallError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Server(#[from] server::ServerError),

    #[error(transparent)]
    Model(#[from] models::ModelError),
}
