//! Text generation — single outbound call to the hosted inference endpoint.
//! Every failure (no token, transport error, non-200, bad body, timeout) degrades to an
//! empty string so blueprint assembly can fall back to idea-derived copy.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Hosted model used when no override is configured.
pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/microsoft/DialoGPT-medium";

/// Upper bound for a single generation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can turn a prompt into text. Implementations never fail; they return
/// an empty string instead.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> String;
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub do_sample: bool,
    pub top_p: f32,
    pub repetition_penalty: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 500,
            temperature: 0.7,
            do_sample: true,
            top_p: 0.9,
            repetition_penalty: 1.2,
        }
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
}

/// One element of the list-shaped inference response.
#[derive(Debug, Deserialize)]
struct InferenceItem {
    #[serde(default)]
    generated_text: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no generation token configured")]
    MissingCredential,
    #[error("inference request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("inference API {status}: {body}")]
    Status { status: u16, body: String },
    #[error("inference response parse: {0}")]
    Parse(String),
}

/// Hugging Face Inference API client. Cheap to share across requests.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    model_url: String,
    token: Option<String>,
    params: GenerationParams,
}

impl HuggingFaceClient {
    /// A blank token is treated as absent.
    pub fn new(model_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            model_url: model_url.into(),
            token: token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.token.is_some()
    }

    /// Same call as [`Generator::generate`] but with the failure cause kept.
    pub async fn try_generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let token = self.token.as_deref().ok_or(GenerationError::MissingCredential)?;

        let body = InferenceRequest {
            inputs: prompt,
            parameters: &self.params,
        };

        let res = self
            .client
            .post(&self.model_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let items: Vec<InferenceItem> =
            serde_json::from_str(&text).map_err(|e| GenerationError::Parse(e.to_string()))?;

        let generated = items
            .into_iter()
            .next()
            .and_then(|item| item.generated_text)
            .unwrap_or_default();

        Ok(strip_prompt_echo(generated, prompt))
    }
}

#[async_trait]
impl Generator for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(text) => {
                tracing::info!(chars = text.chars().count(), "[GENERATION] inference call completed");
                text
            }
            Err(GenerationError::MissingCredential) => {
                tracing::debug!("[GENERATION] no token configured; skipping inference call");
                String::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "[GENERATION] inference call failed; continuing without generated text");
                String::new()
            }
        }
    }
}

/// Text-generation models usually echo the prompt; drop it and trim what remains.
fn strip_prompt_echo(generated: String, prompt: &str) -> String {
    if generated.contains(prompt) {
        generated.replace(prompt, "").trim().to_string()
    } else {
        generated
    }
}
