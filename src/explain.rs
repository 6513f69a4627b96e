use std::sync::{mpsc::Sender, Arc};
use std::thread;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::runtime::AppEvent;

/// Identifies one explanation request so late answers can be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("environment variable {0} is not set")]
    MissingApiKey(String),
    #[error("explanation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("explanation service answered with status {0}")]
    Status(u16),
    #[error("explanation service returned no text")]
    EmptyResponse,
    #[error("explanation service is not configured")]
    NotConfigured,
}

/// Produces a simplified explanation of a rule
pub trait Explainer: Send + Sync {
    fn explain(&self, rule: &str) -> Result<String, ExplainError>;
}

/// Instructions sent along with every rule
pub fn build_prompt(rule: &str) -> String {
    format!(
        "Jesteś wesołym, przyjaznym robotem-nauczycielem o imieniu BrainBot! 🤖 \
Twoim zadaniem jest wyjaśnienie poniższej regułki w super prosty i zabawny sposób, \
tak jakbyś tłumaczył to 7-latkowi. Używaj dużo emotikonek ✨, prostych porównań i krótkich zdań. \
Formatuj odpowiedź, używając **pogrubień** dla ważnych słów. Niech to będzie przygoda! 🚀\n\n\
Regułka: \"{rule}\"\n\n\
Twoje mega proste wyjaśnienie:"
    )
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateResponse) -> Result<String, ExplainError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ExplainError::EmptyResponse)
    } else {
        Ok(text)
    }
}

/// Google Gemini `generateContent` client
pub struct GeminiExplainer {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiExplainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiExplainer")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiExplainer {
    pub fn new(config: &Config, api_key: String) -> Result<Self, ExplainError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Build a client using the API key from the environment variable named in the config
    pub fn from_env(config: &Config) -> Result<Self, ExplainError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ExplainError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

impl Explainer for GeminiExplainer {
    fn explain(&self, rule: &str) -> Result<String, ExplainError> {
        let prompt = build_prompt(rule);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplainError::Status(status.as_u16()));
        }

        extract_text(response.json::<GenerateResponse>()?)
    }
}

/// Run the explanation call off the event loop and post the outcome back
pub fn request_explanation(
    explainer: Arc<dyn Explainer>,
    request: RequestId,
    rule: String,
    tx: Sender<AppEvent>,
) {
    thread::spawn(move || {
        log::info!("requesting explanation {:?} ({} chars)", request, rule.chars().count());
        let outcome = explainer.explain(&rule);
        if let Err(ref e) = outcome {
            log::error!("explanation {:?} failed: {e}", request);
        }
        // the loop may already be gone when the user quit mid-request
        let _ = tx.send(AppEvent::Explained { request, outcome });
    });
}
