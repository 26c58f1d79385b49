//! One query from start to finish.

use crate::client::Editor;
use crate::error::Result;
use crate::llm::Dispatcher;
use crate::models::validate_model;
use crate::store::ConversationStore;
use tracing::{debug, info};

/// What the user asked for on the command line.
#[derive(Debug, Clone)]
pub struct Query {
    pub model: String,
    pub prompt: Option<String>,
    pub continue_conversation: bool,
}

/// Validate the model, prepare the store, gather the prompt, ask the model
/// and cache the new conversation. Returns the model's reply.
///
/// Steps run strictly in order and the first error aborts the run.
pub async fn run<S, D>(query: Query, store: &S, editor: &Editor, dispatcher: &D) -> Result<String>
where
    S: ConversationStore + ?Sized,
    D: Dispatcher + ?Sized,
{
    let model = validate_model(&query.model)?;

    store.init().await?;

    let conversation = if query.continue_conversation {
        let loaded = store.load().await?;
        debug!(
            "Continuing conversation with {} prior messages",
            loaded.as_ref().map_or(0, |c| c.messages.len())
        );
        loaded
    } else {
        None
    };

    let prompt = match query.prompt {
        Some(prompt) => prompt,
        None => editor.compose().await?,
    };

    info!("Asking {}", model);
    let reply = dispatcher.ask(&prompt, model, conversation.as_ref()).await?;

    let updated = conversation
        .unwrap_or_default()
        .with_exchange(&prompt, &reply);
    store.save(&updated).await?;

    Ok(reply)
}
