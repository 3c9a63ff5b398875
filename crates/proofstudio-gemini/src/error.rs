use thiserror::Error;

/// Errors produced while fetching or validating reviews.
///
/// [`GeminiError::NotFound`] is the one application-level outcome the model
/// itself reports; everything else describes a transport or contract failure.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// status from the Gemini endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Gemini API could not be addressed (bad base URL or model path).
    #[error("Gemini API error: {0}")]
    Api(String),

    /// The model reported it could not resolve the business from the link.
    #[error("business not found: {0}")]
    NotFound(String),

    /// The response was not the single JSON object the prompt demands.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// The response parsed as JSON but a required field was missing or had
    /// the wrong type.
    #[error("incomplete model response: missing or invalid `{0}`")]
    IncompleteResponse(&'static str),
}

impl GeminiError {
    /// End-user message for this failure, in the product locale.
    ///
    /// [`GeminiError::NotFound`] carries the model's own explanation; the
    /// rest collapse to a generic retry suggestion. Transport detail stays
    /// in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GeminiError::NotFound(message) => message.clone(),
            GeminiError::MalformedResponse(_) => {
                "La API devolvió una respuesta inesperada con formato incorrecto. \
                 Inténtalo de nuevo."
                    .to_owned()
            }
            GeminiError::IncompleteResponse(_) => {
                "La respuesta de la API no contenía todos los datos necesarios.".to_owned()
            }
            GeminiError::Http(_) | GeminiError::Api(_) => {
                "Ocurrió un error desconocido al obtener las reseñas.".to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_user_message_carries_model_text() {
        let err = GeminiError::NotFound("No se pudo encontrar el negocio.".to_owned());
        assert_eq!(err.user_message(), "No se pudo encontrar el negocio.");
    }

    #[test]
    fn incomplete_user_message_is_generic() {
        let err = GeminiError::IncompleteResponse("businessName");
        assert!(!err.user_message().contains("businessName"));
    }
}
