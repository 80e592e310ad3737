// SPDX-FileCopyrightText: 2026 Feedhound Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The three supported AI wire formats behind one closed enum.
//!
//! Each variant knows how to build its request and pull the generated text
//! back out of the response. Dispatch is a plain `match`; providers share no
//! trait because the set is closed and each shape is tiny.

use feedhound_core::AiSettings;
use serde_json::{Value, json};

/// Which AI backend wire shape to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Chat-completion REST: `choices[0].message.content`.
    OpenAi,
    /// Generation REST: `candidates[0].content.parts[0].text`.
    Gemini,
    /// Local inference: flat `response` field.
    Ollama,
}

impl ProviderKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "gemini" => Some(Self::Gemini),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    /// Builds the request URL and JSON body for this provider.
    ///
    /// OpenAI and Ollama post to the configured endpoint as-is; Gemini
    /// appends the model path and API key to it.
    pub fn request(&self, settings: &AiSettings, prompt: &str) -> (String, Value) {
        match self {
            Self::OpenAi => (
                settings.endpoint.clone(),
                json!({
                    "model": settings.model,
                    "messages": [{"role": "user", "content": prompt}],
                }),
            ),
            Self::Gemini => (
                format!(
                    "{}/{}:generateContent?key={}",
                    settings.endpoint.trim_end_matches('/'),
                    settings.model,
                    settings.api_key
                ),
                json!({
                    "contents": [{"parts": [{"text": prompt}]}],
                }),
            ),
            Self::Ollama => (
                settings.endpoint.clone(),
                json!({
                    "model": settings.model,
                    "prompt": prompt,
                    "stream": false,
                }),
            ),
        }
    }

    /// Whether the request carries a bearer token header.
    pub fn uses_bearer_auth(&self) -> bool {
        matches!(self, Self::OpenAi)
    }

    /// Pulls the generated text out of a response body.
    pub fn extract_text(&self, body: &Value) -> Option<String> {
        let text = match self {
            Self::OpenAi => body["choices"][0]["message"]["content"].as_str(),
            Self::Gemini => body["candidates"][0]["content"]["parts"][0]["text"].as_str(),
            Self::Ollama => body["response"].as_str(),
        };
        text.map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AiSettings {
        AiSettings {
            provider: "openai".into(),
            endpoint: "https://api.example/v1/chat/completions".into(),
            api_key: "sk-test".into(),
            model: "gpt-4o-mini".into(),
            prompt: "classify: {content}".into(),
        }
    }

    #[test]
    fn provider_names_are_case_insensitive() {
        assert_eq!(ProviderKind::from_name("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::from_name("GEMINI"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::from_name("claude"), None);
    }

    #[test]
    fn gemini_url_embeds_model_and_key() {
        let (url, _) = ProviderKind::Gemini.request(&settings(), "p");
        assert_eq!(
            url,
            "https://api.example/v1/chat/completions/gpt-4o-mini:generateContent?key=sk-test"
        );
    }

    #[test]
    fn extraction_matches_each_wire_shape() {
        let openai = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "a"}}]
        });
        assert_eq!(ProviderKind::OpenAi.extract_text(&openai).as_deref(), Some("a"));

        let gemini = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "b"}]}}]
        });
        assert_eq!(ProviderKind::Gemini.extract_text(&gemini).as_deref(), Some("b"));

        let ollama = serde_json::json!({"response": "c"});
        assert_eq!(ProviderKind::Ollama.extract_text(&ollama).as_deref(), Some("c"));
    }

    #[test]
    fn blank_or_missing_text_extracts_to_none() {
        let empty = serde_json::json!({"response": "   "});
        assert_eq!(ProviderKind::Ollama.extract_text(&empty), None);

        let wrong_shape = serde_json::json!({"choices": []});
        assert_eq!(ProviderKind::OpenAi.extract_text(&wrong_shape), None);
    }
}
