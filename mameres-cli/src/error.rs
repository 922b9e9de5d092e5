use thiserror::Error;

use mameres_frontend::FrontendError;

/// Errors that stop a conversion run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Writing a listing failed
    #[error("Failed to write listings: {0}")]
    Output(#[from] FrontendError),
}
