//! Thin client for the hosted generative-model API plus the defensive
//! helpers that dig text, fenced JSON, citations and images out of its
//! free-form responses.

use serde_json::{json, Value};

use crate::models::GroundingSource;

/// Model used for full plan synthesis (search/maps grounded)
pub const PLAN_MODEL: &str = "gemini-2.5-flash";
/// Model used for short utility calls (suggestions, geocoding, buddy chat)
pub const FAST_MODEL: &str = "gemini-3-flash-preview";
/// Model used for landmark visualisations
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Minimal single-turn request body; callers add systemInstruction,
/// generationConfig, tools etc. on top
pub fn text_request(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ]
    })
}

/// Sends a generateContent request and returns the raw response document
pub async fn generate_content(api_key: &str, model: &str, body: &Value) -> Result<Value, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/{}:generateContent", API_BASE, model))
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| format!("Model request failed: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(format!("Model API error ({}): {}", status, error_text));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse model response: {}", e))
}

/// Concatenates the text parts of the first candidate
pub fn response_text(response: &Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .join("");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Extracts the payload between ```json fences
pub fn extract_fenced_json(raw: &str) -> Option<String> {
    let start = raw.find("```json")?;
    let after = &raw[start + "```json".len()..];
    let after = after.strip_prefix('\n').unwrap_or(after);
    let end = after.find("```")?;
    let inner = after[..end].trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner.to_string())
    }
}

/// Fallback when the model forgets the fence: outermost brace pair
pub fn extract_json_object(raw: &str) -> Option<String> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(raw[start..=end].to_string())
}

/// Fenced block first, outer braces second
pub fn extract_json_block(raw: &str) -> Option<String> {
    extract_fenced_json(raw).or_else(|| extract_json_object(raw))
}

/// Collects maps/web citations from the first candidate's grounding metadata
pub fn grounding_sources(response: &Value) -> Vec<GroundingSource> {
    let mut sources = Vec::new();
    let chunks = match response["candidates"][0]["groundingMetadata"]["groundingChunks"].as_array()
    {
        Some(chunks) => chunks,
        None => return sources,
    };
    for chunk in chunks {
        if let Some(uri) = chunk["maps"]["uri"].as_str() {
            sources.push(GroundingSource {
                title: chunk["maps"]["title"].as_str().unwrap_or("Maps").to_string(),
                uri: uri.to_string(),
            });
        } else if let Some(uri) = chunk["web"]["uri"].as_str() {
            sources.push(GroundingSource {
                title: chunk["web"]["title"].as_str().unwrap_or("Source").to_string(),
                uri: uri.to_string(),
            });
        }
    }
    sources
}

/// First inline image payload (base64) of the first candidate, if any
pub fn inline_image_data(response: &Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    parts
        .iter()
        .find_map(|p| p["inlineData"]["data"].as_str())
        .map(|data| data.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate_with_text(text: &str) -> Value {
        json!({
            "candidates": [
                { "content": { "parts": [{ "text": text }] } }
            ]
        })
    }

    #[test]
    fn response_text_joins_parts() {
        let response = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] } }
            ]
        });
        assert_eq!(response_text(&response).as_deref(), Some("Hello world"));
    }

    #[test]
    fn response_text_handles_empty_candidates() {
        assert_eq!(response_text(&json!({ "candidates": [] })), None);
        assert_eq!(response_text(&candidate_with_text("")), None);
    }

    #[test]
    fn fenced_json_is_preferred() {
        let raw = "Here is your plan:\n```json\n{\"destination\":\"Goa\"}\n```\nEnjoy!";
        assert_eq!(
            extract_json_block(raw).as_deref(),
            Some("{\"destination\":\"Goa\"}")
        );
    }

    #[test]
    fn falls_back_to_outer_braces() {
        let raw = "Sure! {\"destination\":\"Goa\",\"weather\":{\"condition\":\"Sunny\"}} done";
        assert_eq!(
            extract_json_block(raw).as_deref(),
            Some("{\"destination\":\"Goa\",\"weather\":{\"condition\":\"Sunny\"}}")
        );
    }

    #[test]
    fn no_json_yields_none() {
        assert_eq!(extract_json_block("no structured content here"), None);
        assert_eq!(extract_json_block("} backwards {"), None);
    }

    #[test]
    fn grounding_sources_prefer_maps_then_web() {
        let response = json!({
            "candidates": [{
                "groundingMetadata": {
                    "groundingChunks": [
                        { "maps": { "title": "Gateway of India", "uri": "https://maps.example/1" } },
                        { "web": { "uri": "https://web.example/2" } },
                        { "retrieval": {} }
                    ]
                }
            }]
        });
        let sources = grounding_sources(&response);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "Gateway of India");
        assert_eq!(sources[0].uri, "https://maps.example/1");
        assert_eq!(sources[1].title, "Source");
    }

    #[test]
    fn inline_image_is_found_among_parts() {
        let response = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                    ]
                }
            }]
        });
        assert_eq!(inline_image_data(&response).as_deref(), Some("aGVsbG8="));
        assert_eq!(inline_image_data(&candidate_with_text("no image")), None);
    }
}
