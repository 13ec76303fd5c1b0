//! Gemini API key provider (Generative Language API).
//!
//! Non-streaming `generateContent` only. Two call variants exist: text-only
//! and text+image, selected by whether the draft carried an attachment.

use anyhow::{Context, Result};
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

use crate::chat::ImageData;
use crate::providers::{ProviderError, classify_reqwest_error, resolve_api_key, resolve_base_url};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Standard User-Agent header for Glint API requests.
pub const USER_AGENT: &str = concat!("glint/", env!("CARGO_PKG_VERSION"));

/// Gemini API configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Model for text-only requests.
    pub text_model: String,
    /// Model for requests with an image attachment.
    pub vision_model: String,
    pub max_output_tokens: Option<u32>,
}

impl GeminiConfig {
    /// Creates a new config from the app config and environment.
    ///
    /// Authentication resolution order:
    /// 1. `config_api_key` parameter (from config file)
    /// 2. `GEMINI_API_KEY` environment variable
    ///
    /// `GEMINI_BASE_URL` overrides the base URL when set.
    ///
    /// # Errors
    /// Returns an error if no API key is available or the base URL is
    /// malformed.
    pub fn from_env(
        text_model: String,
        vision_model: String,
        max_output_tokens: Option<u32>,
        config_base_url: Option<&str>,
        config_api_key: Option<&str>,
    ) -> Result<Self> {
        let api_key = resolve_api_key(config_api_key, "GEMINI_API_KEY")?;
        let base_url = resolve_base_url(
            config_base_url,
            "GEMINI_BASE_URL",
            DEFAULT_BASE_URL,
            "Gemini",
        )?;

        Ok(Self {
            api_key,
            base_url,
            text_model,
            vision_model,
            max_output_tokens,
        })
    }
}

/// Gemini client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Model used for a request with or without an image attachment.
    pub fn model_for(&self, has_image: bool) -> &str {
        if has_image {
            &self.config.vision_model
        } else {
            &self.config.text_model
        }
    }

    /// Sends a single-turn completion request and returns the reply text.
    ///
    /// # Errors
    /// Returns a `ProviderError` (wrapped in `anyhow::Error`) on network
    /// failure, non-success status, or an empty/unparseable response.
    pub async fn generate_content(&self, text: &str, image: Option<&ImageData>) -> Result<String> {
        let model = self.model_for(image.is_some());
        let request = build_generate_request(text, image, self.config.max_output_tokens);
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);

        let response = self
            .http
            .post(&url)
            .headers(build_headers(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ProviderError::http_status(status.as_u16(), &body).into());
        }

        let value: Value = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse Gemini response JSON: {body}"))?;
        extract_reply_text(&value)
    }
}

/// Builds a `generateContent` request body for a single user turn.
fn build_generate_request(
    text: &str,
    image: Option<&ImageData>,
    max_output_tokens: Option<u32>,
) -> Value {
    let mut parts = Vec::new();
    if let Some(image) = image {
        parts.push(inline_data_part(image));
    }
    if !text.is_empty() {
        parts.push(json!({ "text": text }));
    }

    let mut request = json!({
        "contents": [{
            "role": "user",
            "parts": parts,
        }],
    });

    if let Some(max_output_tokens) = max_output_tokens
        && max_output_tokens > 0
    {
        request["generationConfig"] = json!({ "maxOutputTokens": max_output_tokens });
    }

    request
}

fn inline_data_part(image: &ImageData) -> Value {
    let data = base64::engine::general_purpose::STANDARD.encode(&image.data);
    json!({
        "inlineData": {
            "mimeType": image.mime_type,
            "data": data,
        }
    })
}

/// Extracts the reply text from a `generateContent` response.
///
/// Joins the text parts of the first candidate. An empty or missing text is
/// treated as a request failure.
fn extract_reply_text(value: &Value) -> Result<String> {
    let parts = value
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(ProviderError::parse("Gemini response contained no text").into());
    }

    Ok(text)
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-goog-api-key",
        HeaderValue::from_str(api_key).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
    headers
}
