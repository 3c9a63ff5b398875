//! Gemini-backed review fetching: prompt construction, the `generateContent`
//! HTTP client, and validation of the model's free-form text into a typed
//! [`proofstudio_core::ReviewsData`].
//!
//! The model is instructed to answer with exactly one JSON object, but it is
//! not 100% compliant — it may wrap the object in a markdown code fence. That
//! recovery lives entirely behind [`parse_reviews`] so nothing else in the
//! workspace has to know the upstream service is imperfect.

mod client;
mod error;
mod prompt;
mod types;
mod validate;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use prompt::{build_prompt, looks_like_maps_url};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, Tool, ToolConfig,
};
pub use validate::parse_reviews;
