//! Prompt construction for the review-fetching request.
//!
//! The Maps share link is the primary identifier; the business name is a
//! hint only. The prompt demands a single JSON object with a fixed shape so
//! the validator has a contract to hold the model to.

/// Substrings that identify a Google Maps link (full URL or share short-link).
const MAPS_LINK_MARKERS: &[&str] = &["google.com/maps", "goo.gl"];

/// Advisory check that `url` looks like a Google Maps link.
///
/// This is a sanity check for caller feedback, not a security boundary —
/// the model resolves whatever link it is given.
#[must_use]
pub fn looks_like_maps_url(url: &str) -> bool {
    MAPS_LINK_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Build the instruction prompt for one business lookup.
///
/// `target_locale` is the BCP 47 tag the summary and review text are
/// translated into (`es-MX` in production).
#[must_use]
pub fn build_prompt(
    share_url: &str,
    business_name_hint: Option<&str>,
    target_locale: &str,
) -> String {
    let hint = business_name_hint.unwrap_or("(not provided)");
    format!(
        r#"**TASK:** Find Google reviews for a business using its Google Maps URL and return its details.

**BUSINESS DETAILS:**
*   `business_name_hint`: "{hint}"
*   `google_maps_url`: "{share_url}"

**INSTRUCTIONS:**
1.  **Use the `google_maps_url` as the primary identifier.** Use the `googleMaps` tool to find the exact business at this URL. This is your source of truth.
2.  The `business_name_hint` is just for context. The official name from the Google Maps URL is what you must use.
3.  Extract the business's official name, average star rating, total number of reviews, and at least 5 of its most relevant reviews.
4.  **Analyze all reviews for common themes** and generate a structured summary object: four key points based on general sentiment ('price', 'service', 'the_good', 'the_bad') and a single engaging paragraph ('overall_summary') of max 25 words that captures the business's essence.
5.  **Translate to {target_locale}:** translate the text of all five summary points and the text of each individual review.
6.  Respond with a single JSON object containing the extracted and translated information.

**OUTPUT FORMAT:**
Your response must be a single, valid JSON object. Do not include any other text, markdown formatting (like ```json), or explanations outside of the JSON object itself. The JSON object must have the following structure and data types:

{{
  "summary": {{
    "price": "string (e.g., 'Económico', 'Moderado', 'Caro')",
    "service": "string (e.g., 'Excelente', 'Bueno', 'Regular')",
    "the_good": "string (short positive highlight, max 10 words)",
    "the_bad": "string (short area for improvement, max 10 words)",
    "overall_summary": "string (engaging summary, max 25 words)"
  }},
  "averageRating": number,
  "totalReviews": integer,
  "businessName": "string",
  "reviews": [
    {{
      "author": "string",
      "rating": integer (1-5),
      "text": "string"
    }}
  ]
}}

If the business cannot be found, return a JSON object with only an "error" field whose value explains the problem, written in {target_locale}."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_url_hint_and_locale() {
        let prompt = build_prompt("https://maps.app.goo.gl/X", Some("Café Luna"), "es-MX");
        assert!(prompt.contains("\"https://maps.app.goo.gl/X\""));
        assert!(prompt.contains("\"Café Luna\""));
        assert!(prompt.contains("Translate to es-MX"));
        assert!(prompt.contains("googleMaps"));
    }

    #[test]
    fn prompt_marks_missing_hint() {
        let prompt = build_prompt("https://maps.app.goo.gl/X", None, "es-MX");
        assert!(prompt.contains("(not provided)"));
    }

    #[test]
    fn maps_url_check_accepts_known_forms() {
        assert!(looks_like_maps_url("https://maps.app.goo.gl/AbC123"));
        assert!(looks_like_maps_url("https://goo.gl/maps/AbC123"));
        assert!(looks_like_maps_url(
            "https://www.google.com/maps/place/Caf%C3%A9+Luna"
        ));
    }

    #[test]
    fn maps_url_check_rejects_other_links() {
        assert!(!looks_like_maps_url("https://example.com/cafe-luna"));
        assert!(!looks_like_maps_url(""));
    }
}
