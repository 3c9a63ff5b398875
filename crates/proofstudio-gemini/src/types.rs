//! Wire types for the Gemini `generateContent` REST endpoint.
//!
//! Only the slice of the API surface this crate uses is modelled: a prompt
//! with tool declarations going out, candidate text coming back.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1beta/models/{model}:generateContent`.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerateContentRequest {
    /// Single-prompt request with Maps grounding and web search enabled.
    ///
    /// `responseSchema` is not allowed alongside the `googleMaps` tool, so
    /// the output format is enforced through the prompt instead.
    #[must_use]
    pub fn with_maps_grounding(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            tools: vec![
                Tool {
                    google_maps: Some(ToolConfig {}),
                    google_search: None,
                },
                Tool {
                    google_maps: None,
                    google_search: Some(ToolConfig {}),
                },
            ],
        }
    }
}

/// A piece of conversation content; used on both sides of the exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// A tool the model may call while grounding its answer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<ToolConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<ToolConfig>,
}

/// Empty tool configuration; serializes as `{}`.
#[derive(Debug, Serialize)]
pub struct ToolConfig {}

/// Response envelope for `generateContent`.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or `None` when the model
    /// returned no usable text at all.
    #[must_use]
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let joined: String = content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_tools_in_camel_case() {
        let request = GenerateContentRequest::with_maps_grounding("hello".to_owned());
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["tools"][0]["googleMaps"], serde_json::json!({}));
        assert_eq!(json["tools"][1]["googleSearch"], serde_json::json!({}));
        assert!(json["tools"][0].get("googleSearch").is_none());
    }

    #[test]
    fn first_text_joins_parts_of_first_candidate() {
        let json = serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        });
        let response: GenerateContentResponse = serde_json::from_value(json).expect("parse");
        assert_eq!(response.first_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn first_text_is_none_for_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).expect("parse");
        assert!(response.first_text().is_none());
    }

    #[test]
    fn first_text_is_none_for_blank_text() {
        let json = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "   "}]}}]
        });
        let response: GenerateContentResponse = serde_json::from_value(json).expect("parse");
        assert!(response.first_text().is_none());
    }
}
