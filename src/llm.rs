//! Gemini API client for roast generation.
//!
//! Single-turn generateContent calls with search grounding enabled, so the
//! model can pull in current context about the company being roasted.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Response from the generateContent endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

/// Token counts reported by the API for one call.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
}

/// One completed generation: the joined text plus token accounting.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub text: String,
    pub usage: UsageMetadata,
}

/// Seam over the generation backend. The retry loop in [`crate::roast`] is
/// generic over this so it can be exercised without network access.
pub trait TextModel {
    async fn generate(&self, prompt: &str) -> Result<Completion>;
}

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "gemini-3-pro-preview".to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Send a single prompt to Gemini and collect the text of the first
    /// candidate. High temperature plus search grounding, matching the
    /// creative register the roast prompt asks for.
    pub async fn generate_content(&self, prompt: &str) -> Result<Completion> {
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.9, "topP": 0.95 },
            "tools": [{ "google_search": {} }],
        });

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to call Gemini API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error {status}: {body}");
        }

        let parsed = resp
            .json::<ApiResponse>()
            .await
            .context("Failed to parse Gemini response")?;

        let text = parsed
            .candidates
            .iter()
            .flat_map(|c| c.content.iter())
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        Ok(Completion {
            text,
            usage: parsed.usage_metadata.unwrap_or_default(),
        })
    }
}

impl TextModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Completion> {
        self.generate_content(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing_joins_candidate_parts() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "Half a " }, { "text": "roast." }] }
            }],
            "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 14 }
        }"#;
        let parsed: ApiResponse = serde_json::from_str(raw).unwrap();
        let text: String = parsed
            .candidates
            .iter()
            .flat_map(|c| c.content.iter())
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();
        assert_eq!(text, "Half a roast.");
        let usage = parsed.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, 120);
        assert_eq!(usage.candidates_token_count, 14);
    }

    #[test]
    fn response_parsing_tolerates_missing_fields() {
        let parsed: ApiResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
        assert!(parsed.usage_metadata.is_none());
    }
}
