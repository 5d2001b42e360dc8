//! Chat-completion client: one request, one response.
//!
//! Wraps `async-openai` behind the one operation this application needs. The
//! credential, base URL, and model come from the loaded configuration at
//! construction; nothing is read from process globals after startup.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context, Result, anyhow};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
};
use tracing::{debug, trace, warn};

use crate::config::ApiConfig;

/// Result of a generation attempt, delivered over the outcome channel.
pub type GenerationOutcome = Result<String>;

/// Client for the external completion service.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl CompletionClient {
    /// Build a client from the api section of the configuration.
    ///
    /// An empty key or base URL leaves the provider defaults in place
    /// (`OPENAI_API_KEY` / the public endpoint). A missing key is not an
    /// error here; it surfaces as a request failure at generation time.
    pub fn new(api: &ApiConfig) -> Self {
        let mut config = OpenAIConfig::new();
        if !api.key.is_empty() {
            config = config.with_api_key(api.key.clone());
        }
        if !api.base_url.is_empty() {
            config = config.with_api_base(api.base_url.clone());
        }
        Self {
            client: Client::with_config(config),
            model: api.model.clone(),
        }
    }

    /// Send the two-message instruction set and return the first choice's text.
    ///
    /// This is the sole suspension point in the application: one awaited call,
    /// no streaming, no retry. Every failure mode (transport error, non-2xx
    /// status, missing choices or content) comes back as an error for the
    /// caller to collapse.
    pub async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(system)),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(user)),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .build()
            .context("failed to build completion request")?;

        debug!(model = %self.model, "completion_request");
        if let Ok(body) = serde_json::to_string(&request) {
            trace!(request = %body, "completion_request_body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .context("completion request failed")?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("completion response had no choices"))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| anyhow!("completion response had no message content"))?;

        debug!(chars = content.len(), "completion_received");
        Ok(content)
    }
}

/// Run one generation on a background thread, delivering the outcome over a
/// channel for the event loop to drain.
///
/// The thread owns its own single-threaded runtime; the event loop never
/// blocks on the request.
pub fn spawn_generate(
    client: CompletionClient,
    system: String,
    user: String,
) -> Receiver<GenerationOutcome> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(client.generate(&system, &user)),
            Err(e) => Err(anyhow::Error::new(e).context("failed to start request runtime")),
        };
        if tx.send(outcome).is_err() {
            warn!("generation_outcome_dropped");
        }
    });
    rx
}
