use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    AnalyzerConfig, ErrorInfo, ErrorKind, PipelineState, RunAction, RunInfo, Session,
    format_summary,
};

use super::file_validator::validate_file;
use super::{AnalysisPipeline, NewDocument, PipelineError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TriggerError {
    #[error("a run is already in progress")]
    Busy,
    #[error("cannot {action} while the analyzer is {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },
    #[error("{0}")]
    InvalidFile(String),
    #[error("a target language is required")]
    MissingLanguage,
}

enum RunJob {
    Analyze(NewDocument),
    Regenerate(Session),
    Translate(Session, String),
    Expand(Session),
}

struct ActiveRun {
    run_id: u64,
    cancel: CancellationToken,
}

struct ControllerInner {
    pipeline: Arc<AnalysisPipeline>,
    state: watch::Sender<PipelineState>,
    active: Mutex<Option<ActiveRun>>,
    next_run_id: AtomicU64,
}

impl ControllerInner {
    fn active(&self) -> MutexGuard<'_, Option<ActiveRun>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn clear_active(&self, run_id: u64) {
        let mut active = self.active();
        if active.as_ref().is_some_and(|run| run.run_id == run_id) {
            *active = None;
        }
    }

    /// Replaces the state only if `run_id` is still the run in flight.
    fn publish(&self, run_id: u64, next: PipelineState) -> bool {
        let published = self.state.send_if_modified(|state| {
            if state.is_run(run_id) {
                *state = next;
                true
            } else {
                false
            }
        });
        self.clear_active(run_id);
        published
    }
}

/// State machine sequencing analysis runs for one host session.
///
/// `Processing` is the mutual exclusion: every trigger received while a run is in
/// flight is rejected with [`TriggerError::Busy`]. Each state change is published
/// through a watch channel, which is the host's "output changed" signal.
#[derive(Clone)]
pub struct PipelineController {
    inner: Arc<ControllerInner>,
}

impl PipelineController {
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Self {
        let (state, _) = watch::channel(PipelineState::Initial);
        Self {
            inner: Arc::new(ControllerInner {
                pipeline,
                state,
                active: Mutex::new(None),
                next_run_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.inner.state.subscribe()
    }

    /// The formatted `documentSummary` output field, present only when `Ready`.
    pub fn document_summary(&self) -> Option<String> {
        self.inner
            .state
            .borrow()
            .session()
            .map(|session| format_summary(&session.analysis))
    }

    /// Validates a new file and, if accepted, moves `Initial → Processing`.
    ///
    /// A rejected file moves the controller to `Error` with the validation reason.
    pub fn submit_file(
        &self,
        document: NewDocument,
        config: AnalyzerConfig,
    ) -> Result<PipelineRun, TriggerError> {
        let validation = validate_file(&document.file, &config);
        let file_name = document.file.name.clone();
        let mut job = Some(RunJob::Analyze(document));
        let mut outcome = Err(TriggerError::Busy);

        self.inner.state.send_if_modified(|state| match state {
            PipelineState::Initial => match validation.reason.clone() {
                Some(reason) if !validation.is_valid => {
                    tracing::warn!(filename = %file_name, reason = %reason, "File rejected");
                    *state = PipelineState::Error(ErrorInfo {
                        kind: ErrorKind::Validation,
                        title: "Invalid File".to_string(),
                        message: reason.clone(),
                    });
                    outcome = Err(TriggerError::InvalidFile(reason));
                    true
                }
                _ => {
                    outcome = Ok(self.launch(state, RunAction::Analyze, &file_name, &mut job, &config));
                    true
                }
            },
            other => {
                outcome = Err(rejection(other, "submit a document"));
                false
            }
        });

        outcome
    }

    pub fn regenerate(&self, config: AnalyzerConfig) -> Result<PipelineRun, TriggerError> {
        self.start_transform(RunAction::Regenerate, config, RunJob::Regenerate)
    }

    pub fn translate(
        &self,
        language: &str,
        config: AnalyzerConfig,
    ) -> Result<PipelineRun, TriggerError> {
        let language = language.trim().to_string();
        if language.is_empty() {
            return Err(TriggerError::MissingLanguage);
        }
        self.start_transform(RunAction::Translate, config, move |session| {
            RunJob::Translate(session, language)
        })
    }

    pub fn expand(&self, config: AnalyzerConfig) -> Result<PipelineRun, TriggerError> {
        self.start_transform(RunAction::Expand, config, RunJob::Expand)
    }

    /// Explicit "new document" / "back" action: `Ready | Error → Initial`.
    pub fn reset(&self) -> Result<(), TriggerError> {
        let mut outcome = Ok(());
        self.inner.state.send_if_modified(|state| match state {
            PipelineState::Processing(_) => {
                outcome = Err(TriggerError::Busy);
                false
            }
            PipelineState::Initial => false,
            _ => {
                *state = PipelineState::Initial;
                true
            }
        });
        if outcome.is_ok() {
            tracing::info!("Analyzer reset to initial state");
        }
        outcome
    }

    /// Aborts the run in flight, if any, and returns to `Initial`.
    ///
    /// Returns `false` when no run was in flight or it had already published its outcome.
    pub fn cancel(&self) -> bool {
        let Some(active) = self.inner.active().take() else {
            return false;
        };
        active.cancel.cancel();
        let cancelled = self.inner.publish(active.run_id, PipelineState::Initial);
        if cancelled {
            tracing::info!(run_id = active.run_id, "Run cancelled");
        }
        cancelled
    }

    fn start_transform<F>(
        &self,
        action: RunAction,
        config: AnalyzerConfig,
        make_job: F,
    ) -> Result<PipelineRun, TriggerError>
    where
        F: FnOnce(Session) -> RunJob,
    {
        let mut make_job = Some(make_job);
        let mut outcome = Err(TriggerError::Busy);

        self.inner.state.send_if_modified(|state| {
            let session = match &*state {
                PipelineState::Ready(session) => session.clone(),
                other => {
                    outcome = Err(rejection(other, action.as_str()));
                    return false;
                }
            };
            let file_name = session.file.name.clone();
            let mut job = make_job.take().map(|make| make(session));
            outcome = Ok(self.launch(state, action, &file_name, &mut job, &config));
            true
        });

        outcome
    }

    /// Moves `state` to `Processing` and registers the new run as active.
    fn launch(
        &self,
        state: &mut PipelineState,
        action: RunAction,
        file_name: &str,
        job: &mut Option<RunJob>,
        config: &AnalyzerConfig,
    ) -> PipelineRun {
        let run_id = self.inner.next_run_id.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();

        *state = PipelineState::Processing(RunInfo {
            run_id,
            action,
            file_name: file_name.to_string(),
        });
        *self.inner.active() = Some(ActiveRun {
            run_id,
            cancel: cancel.clone(),
        });

        tracing::info!(run_id, action = %action, filename = %file_name, "Run started");

        PipelineRun {
            inner: Arc::clone(&self.inner),
            run_id,
            action,
            job: job.take(),
            config: config.clone(),
            cancel,
            finished: false,
        }
    }
}

fn rejection(state: &PipelineState, action: &'static str) -> TriggerError {
    match state {
        PipelineState::Processing(_) => TriggerError::Busy,
        other => TriggerError::InvalidState {
            action,
            state: other.name(),
        },
    }
}

/// A run admitted by the controller, in the `Processing` state until executed.
///
/// Dropping a run before it finishes cancels it and returns the controller to `Initial`.
pub struct PipelineRun {
    inner: Arc<ControllerInner>,
    run_id: u64,
    action: RunAction,
    job: Option<RunJob>,
    config: AnalyzerConfig,
    cancel: CancellationToken,
    finished: bool,
}

impl PipelineRun {
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn action(&self) -> RunAction {
        self.action
    }

    /// Runs every stage, then publishes `Ready`, `Error`, or `Initial` when cancelled.
    pub async fn execute(mut self) -> PipelineState {
        let result = match self.job.take() {
            Some(job) => self.run_job(job).await,
            None => Err(PipelineError::Cancelled),
        };

        let next = match result {
            Ok(session) => {
                tracing::info!(run_id = self.run_id, action = %self.action, "Run succeeded");
                PipelineState::Ready(session)
            }
            Err(err) => match ErrorInfo::from_failure(self.action, &err) {
                Some(info) => {
                    tracing::error!(
                        run_id = self.run_id,
                        action = %self.action,
                        kind = info.kind.as_str(),
                        error = %err,
                        "Run failed"
                    );
                    PipelineState::Error(info)
                }
                None => PipelineState::Initial,
            },
        };

        self.finished = true;
        self.inner.publish(self.run_id, next);
        self.inner.state.borrow().clone()
    }

    async fn run_job(&self, job: RunJob) -> Result<Session, PipelineError> {
        let pipeline = &self.inner.pipeline;
        match job {
            RunJob::Analyze(document) => {
                pipeline
                    .analyze_document(document, &self.config, &self.cancel)
                    .await
            }
            RunJob::Regenerate(session) => {
                pipeline.regenerate(session, &self.config, &self.cancel).await
            }
            RunJob::Translate(session, language) => {
                pipeline
                    .translate(session, &language, &self.config, &self.cancel)
                    .await
            }
            RunJob::Expand(session) => pipeline.expand(session, &self.config, &self.cancel).await,
        }
    }
}

impl Drop for PipelineRun {
    fn drop(&mut self) {
        if !self.finished {
            self.cancel.cancel();
            if self.inner.publish(self.run_id, PipelineState::Initial) {
                tracing::warn!(run_id = self.run_id, "Run dropped before completion");
            }
        }
    }
}
