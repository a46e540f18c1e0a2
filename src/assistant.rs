//! The generative-AI collaborator.
//!
//! Identification, shop search, and chat all reduce to one call: send a
//! prompt (optionally with an image, a system instruction, and prior
//! conversation) and get text back. [`Assistant`] is that call;
//! [`Gemini`] implements it over the Gemini `generateContent` REST API.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::http::{self, ServiceError};
use crate::model::{ChatMessage, Role};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// An image sent inline with a prompt.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// One request to the assistant.
#[derive(Debug, Clone, Default)]
pub struct AssistantRequest {
    /// Standing instruction that frames every reply.
    pub system: Option<String>,

    /// Earlier turns, oldest first.
    pub history: Vec<ChatMessage>,

    pub prompt: String,

    pub image: Option<InlineImage>,
}

impl AssistantRequest {
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// A generative-AI service that turns a request into reply text.
///
/// An empty string is a valid reply; callers decide what it means.
pub trait Assistant {
    fn generate(&self, request: &AssistantRequest) -> Result<String, ServiceError>;
}

/// Gemini REST client.
pub struct Gemini {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl Gemini {
    /// A client for `model`. Without an API key every call fails with
    /// [`ServiceError::MissingCredential`].
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            client: http::client(timeout)?,
            api_key,
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl Assistant for Gemini {
    fn generate(&self, request: &AssistantRequest) -> Result<String, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::MissingCredential)?;

        let body = GenerateRequest::from_request(request);
        tracing::debug!(
            model = %self.model,
            history = request.history.len(),
            image = request.image.is_some(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let reply: GenerateResponse = http::read_json(response)?;
        let text = reply.text();
        tracing::debug!(chars = text.len(), "received generateContent reply");
        Ok(text)
    }
}

// ── Wire format ──

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: Blob,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: &'static str,
    data: String,
}

impl<'a> GenerateRequest<'a> {
    fn from_request(request: &'a AssistantRequest) -> Self {
        let system_instruction = request.system.as_deref().map(|text| Content {
            role: None,
            parts: vec![Part::Text { text }],
        });

        let mut contents: Vec<Content<'a>> = request
            .history
            .iter()
            .map(|message| Content {
                role: Some(match message.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                }),
                parts: vec![Part::Text {
                    text: &message.content,
                }],
            })
            .collect();

        let mut parts = vec![Part::Text {
            text: &request.prompt,
        }];
        if let Some(image) = &request.image {
            parts.push(Part::InlineData {
                inline_data: Blob {
                    mime_type: image.mime_type,
                    data: STANDARD.encode(&image.bytes),
                },
            });
        }
        contents.push(Content {
            role: Some("user"),
            parts,
        });

        Self {
            system_instruction,
            contents,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
