use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::{
    application::services::generator::MessageGenerator,
    domain::{errors::DomainError, models::MessageTheme},
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const SYSTEM_INSTRUCTION: &str = "You write short anonymous messages for a message inbox. \
Each message must be unique, human-like and fit the requested tone.\n\
\n\
Rules:\n\
- Stay gender-neutral; use words like \"yaar\", \"dost\", \"someone\".\n\
- Keep it good-natured: never insulting, threatening or explicit.\n\
- The messages are for different people, not one conversation. Each one is an independent hook or thought.\n\
- Vary the structure: some short, some longer, some questions, some statements.\n\
- Mostly lowercase, casual Hinglish (Hindi in English script), at most 1-2 emojis.\n\
\n\
Return a JSON array of strings.";

pub struct GeminiGenerator {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiGenerator {
    /// Fails with a configuration error when no API key is available.
    pub fn new(
        api_key: Option<String>,
        model: String,
        base_url: String,
    ) -> Result<Self, DomainError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DomainError::Configuration("gemini api key missing".to_string()))?;

        Ok(Self {
            http: Client::builder()
                .user_agent("wave/gemini")
                .build()
                .map_err(|err| DomainError::Configuration(format!("http client: {err}")))?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    fn build_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_request(theme: MessageTheme, count: usize) -> GenerateContentRequest {
        let prompt = format!(
            "Theme: {}. Generate {count} DISTINCT, non-repetitive anonymous messages. \
             Make them sound like completely different people sent them. \
             Mix up the length and tone within the theme.",
            theme.label()
        );

        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: json!({
                "responseMimeType": "application/json",
                "responseSchema": { "type": "ARRAY", "items": { "type": "STRING" } },
                "temperature": 1.0,
            }),
        }
    }

    fn parse_messages(payload: GenerateContentResponse) -> anyhow::Result<Vec<String>> {
        let Some(text) = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
        else {
            return Ok(Vec::new());
        };

        let messages: Vec<String> = serde_json::from_str(&text).map_err(|err| {
            DomainError::Generation(format!("gemini returned malformed message list: {err}"))
        })?;

        Ok(messages
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect())
    }
}

#[async_trait]
impl MessageGenerator for GeminiGenerator {
    async fn generate(&self, theme: MessageTheme, count: usize) -> anyhow::Result<Vec<String>> {
        let request = Self::build_request(theme, count);
        let response = self
            .http
            .post(self.build_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(
                DomainError::Generation(format!("gemini api returned {status}: {body}")).into(),
            );
        }

        let payload: GenerateContentResponse = response.json().await?;
        let messages = Self::parse_messages(payload)?;
        debug!(requested = count, received = messages.len(), "gemini batch received");
        Ok(messages)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn generator(server: &MockServer) -> GeminiGenerator {
        GeminiGenerator::new(
            Some("test-key".to_string()),
            "test-model".to_string(),
            server.uri(),
        )
        .unwrap()
    }

    fn candidate_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[tokio::test]
    async fn parses_json_array_from_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_body(r#"["first one", "  ", " second "]"#)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let messages = generator(&server)
            .generate(MessageTheme::Funny, 3)
            .await
            .unwrap();

        assert_eq!(messages, vec!["first one".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn error_status_is_a_generation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = generator(&server)
            .generate(MessageTheme::Auto, 5)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn malformed_candidate_text_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("not json")))
            .mount(&server)
            .await;

        assert!(generator(&server).generate(MessageTheme::Auto, 5).await.is_err());
    }

    #[tokio::test]
    async fn empty_candidates_yield_an_empty_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let messages = generator(&server)
            .generate(MessageTheme::Auto, 5)
            .await
            .unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let result = GeminiGenerator::new(
            Some("  ".to_string()),
            "m".to_string(),
            DEFAULT_BASE_URL.to_string(),
        );
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn request_names_theme_and_count() {
        let request = GeminiGenerator::build_request(MessageTheme::Mystery, 7);
        let body = serde_json::to_value(&request).unwrap();

        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Mysterious/Deep"));
        assert!(prompt.contains("Generate 7"));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert!(body["systemInstruction"].get("role").is_none());
    }
}
