use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Chat request from the browser. Unknown fields are rejected and a
// non-string message fails to deserialize.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    // Only a JSON object is accepted. A plain derive would also take the
    // sequence form, e.g. ["hello"].
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_slice(body)?;
        serde_json::from_value(Value::Object(object))
    }
}

// Successful chat response
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChatResponse {
    pub response: String,
}

// Uniform error body
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorBody {
    pub error: String,
}

// Gemini generateContent request format
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

// Gemini generateContent response format - only the fields we read
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    // candidates[0].content.parts[0].text, if present and non-empty
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

// Gemini error envelope: {"error": {"message": "..."}}
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpstreamErrorEnvelope {
    #[serde(default)]
    pub error: Option<UpstreamErrorDetail>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpstreamErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_rejects_extra_and_mistyped_fields() {
        assert!(ChatRequest::from_json(br#"{"message":"hi","admin":true}"#).is_err());
        assert!(ChatRequest::from_json(br#"{"message":42}"#).is_err());

        let missing = ChatRequest::from_json(b"{}").unwrap();
        assert!(missing.message.is_none());
    }

    #[test]
    fn chat_request_rejects_sequence_form() {
        assert!(ChatRequest::from_json(br#"["Who is Pikachu?"]"#).is_err());
        assert!(ChatRequest::from_json(b"\"Who is Pikachu?\"").is_err());

        let ok = ChatRequest::from_json(br#"{"message":"Who is Pikachu?"}"#).unwrap();
        assert_eq!(ok.message.as_deref(), Some("Who is Pikachu?"));
    }

    #[test]
    fn first_text_follows_nested_shape() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Pikachu is an Electric type."}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.first_text(), Some("Pikachu is an Electric type."));

        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.first_text(), None);

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_text(), None);
    }

    #[test]
    fn generation_config_uses_camel_case() {
        let config = GenerationConfig {
            temperature: 0.7,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 2048,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["topK"], 1);
        assert_eq!(json["maxOutputTokens"], 2048);
    }
}
