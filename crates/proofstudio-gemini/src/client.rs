//! HTTP client for the Gemini `generateContent` REST API.
//!
//! Wraps `reqwest` with credential handling, the Maps-grounded request body,
//! and validation of the candidate text into a typed result. Each call is a
//! single attempt: failures are normalized into [`GeminiError`] and surfaced
//! to the caller, never retried here.

use std::time::Duration;

use reqwest::{Client, Url};

use proofstudio_core::ReviewsData;

use crate::error::GeminiError;
use crate::prompt::build_prompt;
use crate::types::{GenerateContentRequest, GenerateContentResponse};
use crate::validate::parse_reviews;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Client for the Gemini `generateContent` API.
///
/// Holds the HTTP client, API key, model name, and target locale. Use
/// [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    target_locale: String,
    base_url: Url,
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        target_locale: &str,
        timeout_secs: u64,
    ) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, target_locale, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        target_locale: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("proofstudio/0.1 (review-pages)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends the model path instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| GeminiError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            target_locale: target_locale.to_owned(),
            base_url,
        })
    }

    /// Fetches and validates reviews for the business behind `share_url`.
    ///
    /// Issues exactly one `generateContent` call carrying the instruction
    /// prompt plus the Maps-grounding and web-search tool declarations, then
    /// hands the candidate text to the validator.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure or a non-2xx status.
    /// - [`GeminiError::NotFound`] when the model reports it could not
    ///   resolve the business.
    /// - [`GeminiError::MalformedResponse`] /
    ///   [`GeminiError::IncompleteResponse`] when the candidate text does
    ///   not satisfy the output contract.
    pub async fn generate_reviews(
        &self,
        share_url: &str,
        business_name_hint: Option<&str>,
    ) -> Result<ReviewsData, GeminiError> {
        let prompt = build_prompt(share_url, business_name_hint, &self.target_locale);
        let request = GenerateContentRequest::with_maps_grounding(prompt);
        let url = self.endpoint_url()?;

        tracing::debug!(model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GeminiError::MalformedResponse(format!("response envelope: {e}")))?;

        let text = envelope.first_text().ok_or_else(|| {
            GeminiError::MalformedResponse("response contained no candidate text".to_owned())
        })?;

        parse_reviews(&text)
    }

    /// Full endpoint URL for the configured model.
    fn endpoint_url(&self) -> Result<Url, GeminiError> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| GeminiError::Api(format!("invalid model path '{}': {e}", self.model)))
    }
}
