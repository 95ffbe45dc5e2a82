use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{GenerativeModel, RecordFeedbackUseCase, RelayConversationUseCase};
use crate::connector::adapter::{GeminiClient, MockGenerativeModel, DEFAULT_BASE_URL};
use crate::domain::{DomainError, GenerationConfig, DEFAULT_MODEL};

pub struct ContainerConfig {
    /// Gemini API key. Required unless `mock_model` is set.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub generation: GenerationConfig,
    /// Answer with the offline echo model instead of calling Gemini.
    pub mock_model: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            generation: GenerationConfig::default(),
            mock_model: false,
        }
    }
}

/// Process-wide dependencies, built once at startup and shared read-only
/// by every request.
pub struct Container {
    model: Arc<dyn GenerativeModel>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let model: Arc<dyn GenerativeModel> = if config.mock_model {
            debug!("Using mock generative model");
            Arc::new(MockGenerativeModel::new())
        } else {
            let api_key = match config.api_key.as_deref() {
                Some(key) if !key.trim().is_empty() => key,
                _ => {
                    return Err(DomainError::config(
                        "no Gemini API key configured; set GOOGLE_GENERATIVE_AI_API_KEY or use --mock-model",
                    )
                    .into())
                }
            };
            debug!(
                "Using Gemini model {} at {}",
                config.model, config.base_url
            );
            Arc::new(GeminiClient::new(api_key, &config.model, &config.base_url))
        };

        Ok(Self { model, config })
    }

    /// Build a container around an already constructed model.
    pub fn with_model(model: Arc<dyn GenerativeModel>, config: ContainerConfig) -> Self {
        Self { model, config }
    }

    pub fn relay_use_case(&self) -> RelayConversationUseCase {
        RelayConversationUseCase::new(self.model.clone(), self.config.generation.clone())
    }

    pub fn feedback_use_case(&self) -> RecordFeedbackUseCase {
        RecordFeedbackUseCase::new()
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.config.generation
    }
}
