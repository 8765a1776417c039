use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{
    ExtractionCredentials, ExtractionPoll, ExtractionService, ExtractionServiceError,
};
use crate::domain::ExtractionStatus;

/// Scripted extraction service. Poll results are served in order; once the
/// script runs out every further poll reports `running`.
pub struct MockExtractionService {
    submit_error: Mutex<Option<ExtractionServiceError>>,
    polls: Mutex<VecDeque<Result<ExtractionPoll, ExtractionServiceError>>>,
    submit_calls: AtomicUsize,
    poll_calls: AtomicUsize,
}

impl MockExtractionService {
    pub fn new() -> Self {
        Self {
            submit_error: Mutex::new(None),
            polls: Mutex::new(VecDeque::new()),
            submit_calls: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
        }
    }

    /// Reports `running` for `running_polls` polls, then succeeds with `content`.
    pub fn succeeding_after(running_polls: usize, content: &str) -> Self {
        let mock = Self::new();
        for _ in 0..running_polls {
            mock.push_status(ExtractionStatus::Running);
        }
        mock.push_poll(Ok(ExtractionPoll {
            status: ExtractionStatus::Succeeded,
            content: Some(content.to_string()),
        }));
        mock
    }

    pub fn failing_submit(error: ExtractionServiceError) -> Self {
        let mock = Self::new();
        *lock(&mock.submit_error) = Some(error);
        mock
    }

    pub fn push_status(&self, status: ExtractionStatus) {
        self.push_poll(Ok(ExtractionPoll {
            status,
            content: None,
        }));
    }

    pub fn push_poll(&self, poll: Result<ExtractionPoll, ExtractionServiceError>) {
        lock(&self.polls).push_back(poll);
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockExtractionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractionService for MockExtractionService {
    async fn submit(
        &self,
        _credentials: &ExtractionCredentials,
        _data: Bytes,
        _mime_type: &str,
    ) -> Result<String, ExtractionServiceError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        match lock(&self.submit_error).take() {
            Some(error) => Err(error),
            None => Ok("mock://operations/1".to_string()),
        }
    }

    async fn poll(
        &self,
        _credentials: &ExtractionCredentials,
        _operation_handle: &str,
    ) -> Result<ExtractionPoll, ExtractionServiceError> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.polls).pop_front().unwrap_or(Ok(ExtractionPoll {
            status: ExtractionStatus::Running,
            content: None,
        }))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
