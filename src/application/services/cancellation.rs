use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::PipelineError;

/// Races a pipeline step against cancellation. Dropping the step aborts its I/O.
pub(crate) async fn cancellable<T, F>(cancel: &CancellationToken, step: F) -> Result<T, PipelineError>
where
    F: Future<Output = Result<T, PipelineError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PipelineError::Cancelled),
        result = step => result,
    }
}
