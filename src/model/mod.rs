pub mod cleanup;
pub mod request;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::emotion::fallback::select_fallback;
use crate::emotion::prompts::compose_context_prompt;
use crate::emotion::{detect_emotional_context, EmotionalContext};
use crate::random::RandomSource;
use cleanup::{clean_response, enhance_response, is_substantial};
use request::{default_candidates, Candidate, GeneratedText, GenerationRequest};

/// Why a single candidate attempt produced no usable reply.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned {0}")]
    Status(StatusCode),
    #[error("unexpected response body: {0}")]
    Malformed(String),
    #[error("generated text was empty")]
    Empty,
    #[error("cleaned text too short ({0} chars)")]
    TooShort(usize),
}

pub type GenerationResult = std::result::Result<String, GenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplySource {
    Remote { endpoint: String },
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
    pub context: EmotionalContext,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub candidates: Vec<Candidate>,
    pub api_token: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl GeneratorConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            candidates: default_candidates(base_url),
            api_token: None,
            request_timeout: None,
        }
    }
}

// Remote generation with a canned-response safety net
pub struct ResponseGenerator {
    client: Client,
    candidates: Vec<Candidate>,
    api_token: Option<String>,
    random: Arc<dyn RandomSource>,
}

impl ResponseGenerator {
    pub fn new(config: GeneratorConfig, random: Arc<dyn RandomSource>) -> Result<Self> {
        info!("Initializing response generator with {} candidate endpoints", config.candidates.len());

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            info!("Using request timeout of {:?}", timeout);
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            candidates: config.candidates,
            api_token: config.api_token,
            random,
        })
    }

    /// Always yields a non-empty reply: the first usable remote generation,
    /// otherwise a fallback.
    pub async fn generate_response(&self, message: &str) -> Reply {
        let context = detect_emotional_context(message);
        let context_prompt = compose_context_prompt(&context);
        let names: Vec<&str> = context.iter().map(|c| c.as_str()).collect();
        debug!("Detected categories {:?}, context prompt: {}", names, context_prompt);

        for candidate in &self.candidates {
            let request = candidate.request(&context_prompt, message);
            match self.attempt(&request, message).await {
                Ok(text) => {
                    info!("Generated reply from {}", candidate.url);
                    return Reply {
                        text,
                        source: ReplySource::Remote { endpoint: candidate.url.clone() },
                        context,
                    };
                }
                Err(e) => warn!("Endpoint {} failed: {}", candidate.url, e),
            }
        }

        info!("All endpoints failed, using fallback response");
        let text = select_fallback(message, &context, self.random.as_ref()).to_string();
        Reply {
            text,
            source: ReplySource::Fallback,
            context,
        }
    }

    async fn attempt(&self, request: &GenerationRequest, message: &str) -> GenerationResult {
        debug!("Payload for {}: {}", request.endpoint, request.inputs);

        let mut call = self.client.post(&request.endpoint).json(request);
        if let Some(token) = &self.api_token {
            call = call.bearer_auth(token);
        }
        let response = call.send().await?;

        if !response.status().is_success() {
            return Err(GenerationError::Status(response.status()));
        }

        let body = response.text().await?;
        let generated: Vec<GeneratedText> =
            serde_json::from_str(&body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let raw = match generated.first() {
            Some(first) if !first.generated_text.is_empty() => &first.generated_text,
            _ => return Err(GenerationError::Empty),
        };
        debug!("Raw generated text: {}", raw);

        let cleaned = clean_response(raw, message);
        if !is_substantial(&cleaned) {
            return Err(GenerationError::TooShort(cleaned.chars().count()));
        }

        Ok(enhance_response(&cleaned, self.random.as_ref()))
    }
}
