pub mod gemini;
pub mod openai;

use crate::errors::GenerationError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// One call to the external text-completion collaborator.
///
/// The orchestrator fills in the per-chunk temperature and token budget; the
/// provider supplies the model identifier and transport.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A trait for interacting with a text-completion provider.
///
/// This defines a common interface for generating chunk content from
/// different Large Language Model backends (e.g., an OpenAI-compatible API,
/// Gemini). The core treats the provider as an opaque dependency: it must
/// surface empty content and transport failures as errors and is
/// retry-agnostic per chunk.
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug + DynClone {
    /// Generates raw text for one chunk request.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError>;
}

dyn_clone::clone_trait_object!(CompletionProvider);
