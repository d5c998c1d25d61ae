use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::time::timeout;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Turn, TurnRole},
};

/// The generation capability: one prompt, optional prior turns, raw text
/// back. Owns no conversation state and makes no structural promise about
/// the returned text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelService: Send + Sync {
    async fn generate(&self, prompt: &str, history: &[Turn]) -> AppResult<String>;
}

pub struct OpenAiModelService {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiModelService {
    pub fn new(config: &Config) -> Self {
        let api_config = OpenAIConfig::new()
            .with_api_base(&config.model_api_base)
            .with_api_key(config.model_api_key.expose_secret());

        Self {
            client: Client::with_config(api_config),
            model: config.model_name.clone(),
            timeout: Duration::from_secs(config.model_timeout_secs),
        }
    }
}

#[async_trait]
impl ModelService for OpenAiModelService {
    async fn generate(&self, prompt: &str, history: &[Turn]) -> AppResult<String> {
        if prompt.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Prompt cannot be empty".to_string(),
            ));
        }

        // Prior turns are forwarded in order, unmodified. Attachment
        // references stay behind this boundary; only turn text crosses it.
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(history.len() + 1);
        for turn in history {
            let message = match turn.role {
                TurnRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.text())
                    .build()?
                    .into(),
                TurnRole::Model => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.text())
                    .build()?
                    .into(),
            };
            messages.push(message);
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .build()?;

        let response = timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                AppError::GenerationFailure(format!(
                    "Model request timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                AppError::GenerationFailure("Model returned an empty completion".to_string())
            })?;

        Ok(content)
    }
}
