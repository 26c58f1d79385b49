//! Remote LLM access.
//!
//! The orchestration only depends on the [`Dispatcher`] trait so the OpenAI
//! client can be swapped for a stub in tests.

pub mod openai;

use crate::conversation::Conversation;
use crate::error::Result;
use async_trait::async_trait;

pub use openai::OpenAIDispatcher;

/// Sends a prompt, with optional prior turns, to a model and returns the reply.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn ask(
        &self,
        prompt: &str,
        model: &str,
        conversation: Option<&Conversation>,
    ) -> Result<String>;
}
