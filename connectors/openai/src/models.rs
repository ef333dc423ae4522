//! Chat-completion API data models

use serde::{Deserialize, Serialize};
use ticketify_core::prelude::LlmMessage;

/// Chat Completion Request
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<LlmMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// `response_format` value requesting JSON mode
#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    pub r#type: String, // "json_object" for JSON mode
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            r#type: "json_object".to_string(),
        }
    }
}

/// Chat Completion Response.
///
/// Every field is optional and may be null: the handler falls back to the
/// configured model, an empty content string and a null usage when the
/// provider omits them. `usage` is kept as sent.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<Option<Choice>>>,
    #[serde(default)]
    pub usage: Option<serde_json::Value>,
}

impl ChatCompletionResponse {
    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.as_ref()?.first()?.as_ref()
    }

    /// Text of the first choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.first_choice()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

/// Individual choice in the response
#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message in a choice
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_choices_and_usage_decode() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({ "model": "m", "choices": null, "usage": null })).unwrap();
        assert!(response.first_content().is_none());
        assert!(response.usage.is_none());

        let response: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [null] })).unwrap();
        assert!(response.first_choice().is_none());
    }
}
