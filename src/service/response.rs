use crate::compose::request::Poem;
use crate::service::generator::ServiceError;

/// Parse a provider's text answer into a [`Poem`].
///
/// Markdown code fences around the JSON are tolerated. Missing or blank `title`/`poem`
/// fields are malformed.
pub fn parse_poem_response(text: &str) -> Result<Poem, ServiceError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(ServiceError::MalformedResponse("empty response".to_string()));
    }
    let poem: Poem = serde_json::from_str(cleaned)
        .map_err(|e| ServiceError::MalformedResponse(format!("invalid poem json: {e}")))?;
    if poem.title.trim().is_empty() || poem.body.trim().is_empty() {
        return Err(ServiceError::MalformedResponse(
            "poem json has an empty title or body".to_string(),
        ));
    }
    Ok(poem)
}

fn strip_code_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```") {
        s = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

#[cfg(test)]
#[path = "../../tests/unit/service/response.rs"]
mod tests;
