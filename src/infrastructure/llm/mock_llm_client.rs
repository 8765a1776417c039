use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{LlmClient, LlmClientError, LlmCredentials};
use crate::domain::ChatRequest;

/// Scripted language model. Replies are served in order and every request is recorded.
/// With the script exhausted it answers with an empty completion.
pub struct MockLlmClient {
    replies: Mutex<VecDeque<Result<Option<String>, LlmClientError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        let mock = Self::new();
        for reply in replies {
            mock.push_reply(reply);
        }
        mock
    }

    pub fn push_reply(&self, content: &str) {
        lock(&self.replies).push_back(Ok(Some(content.to_string())));
    }

    pub fn push_result(&self, result: Result<Option<String>, LlmClientError>) {
        lock(&self.replies).push_back(result);
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        lock(&self.requests).clone()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        _credentials: &LlmCredentials,
        request: &ChatRequest,
    ) -> Result<Option<String>, LlmClientError> {
        lock(&self.requests).push(request.clone());
        lock(&self.replies).pop_front().unwrap_or(Ok(None))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
