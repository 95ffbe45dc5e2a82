use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::GenerativeModel;
use crate::domain::{ChatSession, DomainError, Part, Turn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION_PATH: &str = "/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: Vec<Turn>,
    generation_config: ApiGenerationConfig,
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: [ApiPart<'a>; 1],
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// HTTP client for the Gemini `generateContent` REST endpoint.
///
/// Each call is stateless: the session's history is replayed in `contents`
/// ahead of the new user message, and the persona travels as
/// `systemInstruction`. The output-token cap is enforced by the provider.
///
/// ```text
/// GOOGLE_GENERATIVE_AI_API_KEY=...
/// GEMINI_MODEL=gemini-1.5-flash
/// GEMINI_BASE_URL=https://generativelanguage.googleapis.com
/// ```
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + version path + `{model}:generateContent`).
    url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let model: String = model.into();
        let base: String = base_url.into();
        let url = format!(
            "{}{API_VERSION_PATH}/{model}:generateContent",
            base.trim_end_matches('/')
        );
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model,
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_request<'a>(session: &'a ChatSession, message: &str) -> ApiRequest<'a> {
        let mut contents = session.history().to_vec();
        contents.push(Turn::user(message));
        ApiRequest {
            system_instruction: SystemInstruction {
                parts: [ApiPart {
                    text: session.config().persona(),
                }],
            },
            contents,
            generation_config: ApiGenerationConfig {
                max_output_tokens: session.config().max_output_tokens(),
            },
        }
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(response: ApiResponse) -> Result<String, DomainError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(DomainError::provider(format!("GeminiClient: {reason}")));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn send_message(
        &self,
        session: &ChatSession,
        message: &str,
    ) -> Result<String, DomainError> {
        let request = Self::build_request(session, message);

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("GeminiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(DomainError::provider(format!(
                "GeminiClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::provider(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        let text = Self::extract_text(api_response)?;
        debug!("GeminiClient raw completion: {}", text);
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
