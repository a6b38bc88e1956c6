use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, RwLock};
use synthgen::providers::ai::{CompletionProvider, CompletionRequest};
use synthgen::GenerationError;
use turso::Database;

// --- Test Setup ---

/// A helper struct to manage database creation for each test.
pub struct TestSetup {
    pub db: Database,
}

impl TestSetup {
    /// Creates a new, isolated in-memory database and runs the given schema
    /// statements against it.
    pub async fn new(schema_sql: &[&str]) -> Result<Self> {
        let db = turso::Builder::new_local(":memory:").build().await?;
        let conn = db.connect()?;

        for statement in schema_sql {
            conn.execute(*statement, ()).await?;
        }

        Ok(Self { db })
    }
}

// --- Mock Completion Provider ---

/// A mock completion provider that replays a scripted response sequence.
///
/// Responses are consumed in order, one per chunk, which mirrors how the
/// orchestrator calls the real provider. Every request is recorded so tests
/// can assert on prompts, temperatures, and token budgets.
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

    /// Retrieves the recorded requests for assertion.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.call_history.read().unwrap().clone()
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
