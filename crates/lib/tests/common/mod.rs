//! Shared test helpers: a scripted mock completion provider and tracing setup.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};
use synthgen::providers::ai::{CompletionProvider, CompletionRequest};
use synthgen::GenerationError;

pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();
}

/// A mock completion provider that replays a scripted sequence of responses
/// and records every request it receives for later assertions.
#[derive(Clone, Debug)]
pub struct MockCompletionProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    pub call_history: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl MockCompletionProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            call_history: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        self.call_history.write().unwrap().push(request.clone());

        self.responses.lock().unwrap().pop_front().ok_or_else(|| {
            GenerationError::CompletionApi(
                "MockCompletionProvider: no response programmed for this call".to_string(),
            )
        })
    }
}
