use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use proofstudio_core::ReviewsData;
use proofstudio_gemini::{looks_like_maps_url, GeminiError};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const CONFIG_ERROR_MSG: &str =
    "Error de configuración del servidor: no se encontró la clave API.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateReviewsRequest {
    #[serde(default)]
    share_url: Option<String>,
    #[serde(default)]
    business_name: Option<String>,
}

/// `POST /api/generate-reviews` — one model call, one typed outcome.
///
/// The payload is either a full `ReviewsData` object or `{ "error": ... }`,
/// never both. Nothing is retried; a failed submission is terminal until the
/// user resubmits.
pub(super) async fn generate_reviews(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<GenerateReviewsRequest>,
) -> Result<Json<ReviewsData>, ApiError> {
    let share_url = non_empty(body.share_url.as_deref()).ok_or_else(|| {
        ApiError::bad_request("Falta el parámetro shareUrl en la solicitud.")
    })?;
    let business_name = non_empty(body.business_name.as_deref()).ok_or_else(|| {
        ApiError::bad_request("Falta el parámetro businessName en la solicitud.")
    })?;

    // Advisory only: the model resolves whatever link it is given.
    if !looks_like_maps_url(share_url) {
        tracing::warn!(
            request_id = %req_id.0,
            share_url,
            "share URL does not look like a Google Maps link"
        );
    }

    let Some(gemini) = state.gemini.as_ref() else {
        tracing::error!(request_id = %req_id.0, "GEMINI_API_KEY is not configured");
        return Err(ApiError::internal(CONFIG_ERROR_MSG));
    };

    tracing::info!(request_id = %req_id.0, business_name, "generating review page");

    match gemini.generate_reviews(share_url, Some(business_name)).await {
        Ok(data) => {
            tracing::info!(
                request_id = %req_id.0,
                business = %data.business_name,
                reviews = data.reviews.len(),
                "review page generated"
            );
            Ok(Json(data))
        }
        Err(err @ GeminiError::NotFound(_)) => {
            tracing::info!(request_id = %req_id.0, error = %err, "business not found");
            Err(ApiError::not_found(err.user_message()))
        }
        Err(err) => {
            tracing::error!(request_id = %req_id.0, error = %err, "review generation failed");
            Err(ApiError::internal(err.user_message()))
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_rejects_blank_and_missing() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(Some(" x ")), Some("x"));
    }

    #[test]
    fn request_body_accepts_camel_case_fields() {
        let body: GenerateReviewsRequest = serde_json::from_str(
            r#"{"shareUrl":"https://maps.app.goo.gl/X","businessName":"Café Luna"}"#,
        )
        .expect("deserialize");
        assert_eq!(body.share_url.as_deref(), Some("https://maps.app.goo.gl/X"));
        assert_eq!(body.business_name.as_deref(), Some("Café Luna"));
    }
}
