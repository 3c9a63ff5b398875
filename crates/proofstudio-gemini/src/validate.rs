//! Validation of the model's raw text into a typed [`ReviewsData`].
//!
//! The prompt demands bare JSON, but the model sometimes wraps its answer in
//! a markdown code fence anyway. The fence is stripped before parsing, then
//! the object is checked field by field so a missing key surfaces as a named
//! [`GeminiError::IncompleteResponse`] instead of an opaque serde error.

use regex::Regex;
use serde_json::Value;

use proofstudio_core::{Review, ReviewSummary, ReviewsData};

use crate::error::GeminiError;

/// Strip a markdown code fence (with or without a language tag) from `text`.
///
/// Returns the first fenced block's interior when one exists, otherwise the
/// input unchanged. Idempotent: the interior of a fence contains no fence.
#[must_use]
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let fence = Regex::new(r"(?s)```(?:json)?\s*(.+?)\s*```").expect("valid fence regex");
    match fence.captures(text) {
        Some(captures) => captures.get(1).map_or(text, |m| m.as_str()),
        None => text,
    }
}

/// Parse and validate the model's response text.
///
/// # Errors
///
/// - [`GeminiError::MalformedResponse`] when the (unfenced) text is not JSON.
/// - [`GeminiError::NotFound`] when the object carries a non-empty `error`
///   field; no success-field validation is attempted in that case.
/// - [`GeminiError::IncompleteResponse`] when a required field is missing or
///   has the wrong type.
///
/// Review entries that do not match the expected shape are dropped rather
/// than failing the whole response — partial data is still useful.
pub fn parse_reviews(raw: &str) -> Result<ReviewsData, GeminiError> {
    let text = strip_code_fence(raw.trim());

    let value: Value = serde_json::from_str(text)
        .map_err(|e| GeminiError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        if !message.trim().is_empty() {
            return Err(GeminiError::NotFound(message.to_owned()));
        }
    }

    let business_name = value
        .get("businessName")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(GeminiError::IncompleteResponse("businessName"))?
        .to_owned();

    let summary: ReviewSummary = value
        .get("summary")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .ok_or(GeminiError::IncompleteResponse("summary"))?;

    let average_rating = value
        .get("averageRating")
        .and_then(Value::as_f64)
        .ok_or(GeminiError::IncompleteResponse("averageRating"))?;

    let total_reviews = value
        .get("totalReviews")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(GeminiError::IncompleteResponse("totalReviews"))?;

    let reviews = value
        .get("reviews")
        .and_then(Value::as_array)
        .map(|items| collect_reviews(items))
        .unwrap_or_default();

    Ok(ReviewsData {
        business_name,
        average_rating,
        total_reviews,
        summary,
        reviews,
    })
}

/// Keep the entries that satisfy the review shape, drop the rest.
fn collect_reviews(items: &[Value]) -> Vec<Review> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Review>(item.clone()) {
            Ok(review) if (1..=5).contains(&review.rating) => Some(review),
            Ok(review) => {
                tracing::debug!(rating = review.rating, "dropping review with out-of-range rating");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "dropping malformed review entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS_JSON: &str = r#"{"businessName":"Café Luna","averageRating":4.5,"totalReviews":12,"summary":"Great place","reviews":[{"author":"A","rating":5,"text":"Loved it"}]}"#;

    #[test]
    fn parses_bare_json() {
        let data = parse_reviews(SUCCESS_JSON).expect("should parse");
        assert_eq!(data.business_name, "Café Luna");
        assert_eq!(data.reviews.len(), 1);
    }

    #[test]
    fn parses_fenced_json_with_language_tag() {
        let fenced = format!("```json\n{SUCCESS_JSON}\n```");
        let data = parse_reviews(&fenced).expect("should parse");
        assert_eq!(data.business_name, "Café Luna");
    }

    #[test]
    fn parses_bare_fence() {
        let fenced = format!("```\n{SUCCESS_JSON}\n```");
        let data = parse_reviews(&fenced).expect("should parse");
        assert_eq!(data.total_reviews, 12);
    }

    #[test]
    fn fenced_and_unfenced_parse_identically() {
        let fenced = format!("  \n```json\n{SUCCESS_JSON}\n```\n  ");
        assert_eq!(
            parse_reviews(&fenced).expect("fenced"),
            parse_reviews(SUCCESS_JSON).expect("bare")
        );
    }

    #[test]
    fn fence_stripping_is_idempotent() {
        let fenced = format!("```json\n{SUCCESS_JSON}\n```");
        let once = strip_code_fence(fenced.trim());
        let twice = strip_code_fence(once);
        assert_eq!(once, twice);
    }

    #[test]
    fn fence_with_surrounding_prose_is_still_extracted() {
        let text = format!("Here is the result:\n```json\n{SUCCESS_JSON}\n```\nHope that helps!");
        let data = parse_reviews(&text).expect("should parse");
        assert_eq!(data.business_name, "Café Luna");
    }

    #[test]
    fn error_field_short_circuits_to_not_found() {
        let result = parse_reviews("```json\n{\"error\":\"not found\"}\n```");
        match result {
            Err(GeminiError::NotFound(message)) => assert_eq!(message, "not found"),
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    fn error_field_wins_over_broken_success_fields() {
        // Success-field validation must never run once `error` is present.
        let result = parse_reviews(r#"{"error":"no luck","businessName":42}"#);
        assert!(matches!(result, Err(GeminiError::NotFound(_))));
    }

    #[test]
    fn empty_error_field_is_ignored() {
        let json = r#"{"error":"","businessName":"Café Luna","averageRating":4.0,"totalReviews":3,"summary":"Fine"}"#;
        let data = parse_reviews(json).expect("empty error should not trip NotFound");
        assert_eq!(data.business_name, "Café Luna");
    }

    #[test]
    fn invalid_json_is_malformed_not_a_panic() {
        let result = parse_reviews("I could not find that business, sorry!");
        assert!(matches!(result, Err(GeminiError::MalformedResponse(_))));
    }

    #[test]
    fn missing_business_name_is_incomplete() {
        let json = r#"{"averageRating":4.0,"totalReviews":3,"summary":"Fine"}"#;
        assert!(matches!(
            parse_reviews(json),
            Err(GeminiError::IncompleteResponse("businessName"))
        ));
    }

    #[test]
    fn blank_business_name_is_incomplete() {
        let json = r#"{"businessName":"  ","averageRating":4.0,"totalReviews":3,"summary":"Fine"}"#;
        assert!(matches!(
            parse_reviews(json),
            Err(GeminiError::IncompleteResponse("businessName"))
        ));
    }

    #[test]
    fn missing_average_rating_is_incomplete() {
        let json = r#"{"businessName":"Café Luna","totalReviews":3,"summary":"Fine"}"#;
        assert!(matches!(
            parse_reviews(json),
            Err(GeminiError::IncompleteResponse("averageRating"))
        ));
    }

    #[test]
    fn missing_total_reviews_is_incomplete() {
        let json = r#"{"businessName":"Café Luna","averageRating":4.0,"summary":"Fine"}"#;
        assert!(matches!(
            parse_reviews(json),
            Err(GeminiError::IncompleteResponse("totalReviews"))
        ));
    }

    #[test]
    fn missing_summary_is_incomplete() {
        let json = r#"{"businessName":"Café Luna","averageRating":4.0,"totalReviews":3}"#;
        assert!(matches!(
            parse_reviews(json),
            Err(GeminiError::IncompleteResponse("summary"))
        ));
    }

    #[test]
    fn structured_summary_variant_is_accepted() {
        let json = r#"{
            "businessName": "Café Luna",
            "averageRating": 4.5,
            "totalReviews": 12,
            "summary": {
                "price": "Moderado",
                "service": "Excelente",
                "the_good": "Café de especialidad",
                "the_bad": "Poco estacionamiento",
                "overall_summary": "Un rincón acogedor."
            }
        }"#;
        let data = parse_reviews(json).expect("should parse");
        assert!(matches!(data.summary, ReviewSummary::Structured(_)));
        assert!(data.reviews.is_empty());
    }

    #[test]
    fn malformed_review_entries_are_dropped() {
        let json = r#"{
            "businessName": "Café Luna",
            "averageRating": 4.5,
            "totalReviews": 12,
            "summary": "Great place",
            "reviews": [
                {"author": "A", "rating": 5, "text": "Loved it"},
                {"author": "B", "rating": "five", "text": "bad shape"},
                {"rating": 3, "text": "no author"},
                {"author": "C", "rating": 9, "text": "out of range"},
                {"author": "D", "rating": 4, "text": "kept"}
            ]
        }"#;
        let data = parse_reviews(json).expect("should parse");
        let authors: Vec<&str> = data.reviews.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(authors, vec!["A", "D"]);
    }

    #[test]
    fn business_name_is_passed_through_untransformed() {
        let data = parse_reviews(SUCCESS_JSON).expect("should parse");
        assert_eq!(data.business_name, "Café Luna");
        assert!((data.average_rating - 4.5).abs() < f64::EPSILON);
    }
}
