use std::time::{Duration, Instant};

use crate::error::GatewayError;
use crate::metrics::UPSTREAM_LATENCY;
use crate::models::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    SafetySetting, UpstreamErrorEnvelope,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

const PERSONA_PREAMBLE: &str = "You are PokéExpert, a passionate Pokémon specialist with \
encyclopedic knowledge. Answer in a friendly, educational and detailed way. Be proactive and \
suggest relevant extra tips. Your expertise covers stats, moves, evolutions, competitive \
strategy, lore, games, anime, the TCG and merchandise. Use Pokémon related emojis when \
appropriate. User question: ";

const HARM_CATEGORIES: [&str; 2] = ["HARM_CATEGORY_HARASSMENT", "HARM_CATEGORY_HATE_SPEECH"];
const HARM_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

// Client for the Gemini generateContent endpoint. One attempt per call.
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl UpstreamClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    pub async fn complete(&self, message: &str) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingApiKey)?;

        let start_time = Instant::now();
        let result = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&build_request(message))
            .send()
            .await;
        UPSTREAM_LATENCY.observe(start_time.elapsed().as_secs_f64());

        let res = result?;
        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<UpstreamErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .and_then(|error| error.message)
                .filter(|message| !message.is_empty());

            tracing::warn!(
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or("-"),
                "upstream returned an error status"
            );
            return Err(GatewayError::Upstream(
                detail.unwrap_or_else(|| "API request failed".to_string()),
            ));
        }

        let parsed: GenerateContentResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(error = %e, "upstream body is not valid JSON");
                return Err(GatewayError::InvalidUpstreamResponse);
            }
        };

        match parsed.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::error!(
                    candidates = parsed.candidates.len(),
                    "invalid upstream response structure"
                );
                Err(GatewayError::InvalidUpstreamResponse)
            }
        }
    }
}

// Single turn prompt: fixed preamble, user message appended verbatim
pub fn build_prompt(message: &str) -> String {
    format!("{PERSONA_PREAMBLE}{message}")
}

pub fn build_request(message: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(build_prompt(message)),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.7,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 2048,
        },
        safety_settings: HARM_CATEGORIES
            .iter()
            .map(|&category| SafetySetting {
                category,
                threshold: HARM_THRESHOLD,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_wraps_message_verbatim() {
        let prompt = build_prompt("Who is <b>Pikachu</b>?");
        assert!(prompt.starts_with("You are PokéExpert"));
        assert!(prompt.ends_with("User question: Who is <b>Pikachu</b>?"));
    }

    #[test]
    fn request_carries_generation_and_safety_settings() {
        let json = serde_json::to_value(build_request("hi")).unwrap();

        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(json["generationConfig"]["topK"], 1);
        assert_eq!(json["safetySettings"].as_array().unwrap().len(), 2);
        assert_eq!(json["safetySettings"][1]["category"], "HARM_CATEGORY_HATE_SPEECH");
        assert_eq!(json["safetySettings"][0]["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
        assert!(json["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .ends_with("hi"));
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let client = UpstreamClient::new(
            "http://127.0.0.1:9999/",
            "gemini-2.0-flash-exp",
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9999/v1beta/models/gemini-2.0-flash-exp:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_network_call() {
        let client =
            UpstreamClient::new("http://127.0.0.1:9", "m", Some("  ".into()), Duration::from_secs(1))
                .unwrap();
        assert!(!client.has_api_key());
        assert!(matches!(
            client.complete("hello").await,
            Err(GatewayError::MissingApiKey)
        ));
    }
}
