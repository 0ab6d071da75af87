//! Scripted model client for unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::client::{Completion, CompletionRequest, ModelClient, ModelError};

/// Replays queued answers in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedClient {
    completions: Mutex<VecDeque<Result<Completion, ModelError>>>,
    images: Mutex<VecDeque<Result<Vec<u8>, ModelError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    edits: Mutex<Vec<(Vec<u8>, String)>>,
}

#[allow(clippy::unwrap_used)]
impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&self, text: &str) {
        self.push(Ok(Completion {
            text: Some(text.to_string()),
            tool_calls: Vec::new(),
        }));
    }

    pub fn push(&self, completion: Result<Completion, ModelError>) {
        self.completions.lock().unwrap().push_back(completion);
    }

    pub fn push_image(&self, image: Result<Vec<u8>, ModelError>) {
        self.images.lock().unwrap().push_back(image);
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn edits(&self) -> Vec<(Vec<u8>, String)> {
        self.edits.lock().unwrap().clone()
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl ModelClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ModelError> {
        self.requests.lock().unwrap().push(request.clone());
        self.completions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::InvalidResponse("script exhausted".to_string())))
    }

    async fn edit_image(&self, image: &[u8], prompt: &str) -> Result<Vec<u8>, ModelError> {
        self.edits
            .lock()
            .unwrap()
            .push((image.to_vec(), prompt.to_string()));
        self.images
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::InvalidResponse("script exhausted".to_string())))
    }
}
