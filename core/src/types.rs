//! Core data types for Ticketify

use crate::errors::TicketError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default sampling temperature when the caller does not send one
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default completion budget when the caller does not send one
pub const DEFAULT_MAX_TOKENS: u32 = 350;

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

/// Incident submitted for ticket generation.
///
/// Lives only for the duration of one request. `incident_text` deserializes
/// to an empty string when absent so that the emptiness check happens in
/// [`TicketRequest::validate`] and surfaces as a client error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    /// Free-form description of the incident
    #[serde(default)]
    pub incident_text: String,
    /// Sampling temperature forwarded upstream
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Completion token budget forwarded upstream
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Report identifier, used only as prompt context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    /// Report date, used only as prompt context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,
    /// Report location, used only as prompt context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_location: Option<String>,
}

impl TicketRequest {
    /// Create a request for the given incident text with default parameters
    pub fn new(incident_text: impl Into<String>) -> Self {
        Self {
            incident_text: incident_text.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            report_id: None,
            report_date: None,
            report_location: None,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Attach report metadata
    pub fn with_report(
        mut self,
        id: Option<String>,
        date: Option<String>,
        location: Option<String>,
    ) -> Self {
        self.report_id = id;
        self.report_date = date;
        self.report_location = location;
        self
    }

    /// Reject requests whose incident text is empty after trimming
    pub fn validate(&self) -> Result<(), TicketError> {
        if self.incident_text.trim().is_empty() {
            return Err(TicketError::InvalidRequest(
                "incidentText is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Report metadata fields that carry a non-blank value, in display order
    pub fn report_context(&self) -> Vec<(&'static str, &str)> {
        [
            ("reportId", self.report_id.as_deref()),
            ("reportDate", self.report_date.as_deref()),
            ("reportLocation", self.report_location.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
        .collect()
    }
}

/// Token counters read from the upstream `usage` object.
///
/// The object itself travels in [`TicketResponse::usage`] untouched; this is
/// only a lenient reading of it. Counters that are absent, null or not a
/// non-negative number read as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl Usage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64, total_tokens: u64) -> Self {
        Self {
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
            total_tokens: Some(total_tokens),
        }
    }

    pub fn from_value(value: &serde_json::Value) -> Self {
        let counter = |key: &str| {
            value.get(key).and_then(|v| {
                v.as_u64()
                    .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            })
        };
        Self {
            prompt_tokens: counter("prompt_tokens"),
            completion_tokens: counter("completion_tokens"),
            total_tokens: counter("total_tokens"),
        }
    }

    /// Upstream-shaped object with the counters that are set
    pub fn to_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, count) in [
            ("prompt_tokens", self.prompt_tokens),
            ("completion_tokens", self.completion_tokens),
            ("total_tokens", self.total_tokens),
        ] {
            if let Some(count) = count {
                map.insert(key.to_string(), count.into());
            }
        }
        serde_json::Value::Object(map)
    }
}

/// Result of a successful ticket generation.
///
/// `content` is the upstream model's text, passed through without
/// interpretation. It is expected, not guaranteed, to be JSON. `usage` is
/// the upstream's token accounting relayed as-is, `null` when it sent none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketResponse {
    pub model: String,
    pub content: String,
    pub usage: Option<serde_json::Value>,
}

impl TicketResponse {
    /// Token counters, when upstream reported usage
    pub fn usage_counts(&self) -> Option<Usage> {
        self.usage.as_ref().map(Usage::from_value)
    }
}

/// Natural language the model is asked to answer in and the renderer labels with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "es", alias = "spanish")]
    Spanish,
    #[serde(rename = "en", alias = "english")]
    English,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "spanish" | "español" => Ok(Language::Spanish),
            "en" | "english" => Ok(Language::English),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// Severity of a flagged anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Interpret a model-provided severity; missing or unrecognized values are `Low`
    pub fn from_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("high") => Severity::High,
            Some("medium") => Severity::Medium,
            _ => Severity::Low,
        }
    }

    /// Lowercase identifier, as used in the model's output schema
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Localized label shown on the severity badge
    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::Spanish, Severity::High) => "Alto",
            (Language::Spanish, Severity::Medium) => "Medio",
            (Language::Spanish, Severity::Low) => "Bajo",
            (Language::English, Severity::High) => "High",
            (Language::English, Severity::Medium) => "Medium",
            (Language::English, Severity::Low) => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ticket_request_defaults() {
        let request: TicketRequest =
            serde_json::from_value(json!({ "incidentText": "Robo en tienda" })).unwrap();
        assert_eq!(request.incident_text, "Robo en tienda");
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(request.report_id.is_none());
    }

    #[test]
    fn test_ticket_request_missing_text_is_empty() {
        let request: TicketRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.incident_text, "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_whitespace() {
        for text in ["", " ", "\n\t  ", "\u{3000}"] {
            let err = TicketRequest::new(text).validate().unwrap_err();
            assert!(matches!(err, TicketError::InvalidRequest(_)), "text {:?}", text);
        }
        assert!(TicketRequest::new("  x ").validate().is_ok());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let request = TicketRequest::new("texto")
            .with_max_tokens(100)
            .with_report(Some("R-1".to_string()), None, None);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["incidentText"], "texto");
        assert_eq!(value["maxTokens"], 100);
        assert_eq!(value["reportId"], "R-1");
        assert!(value.get("reportDate").is_none());
    }

    #[test]
    fn test_report_context_skips_blank_fields() {
        let request = TicketRequest::new("texto").with_report(
            Some("R-42".to_string()),
            Some("   ".to_string()),
            Some(" Calle Principal 456 ".to_string()),
        );
        assert_eq!(
            request.report_context(),
            vec![("reportId", "R-42"), ("reportLocation", "Calle Principal 456")]
        );
    }

    #[test]
    fn test_usage_is_relayed_untouched() {
        let usage = json!({
            "prompt_tokens": 10,
            "completion_tokens": null,
            "total_tokens": 10,
            "prompt_tokens_details": { "cached_tokens": 0 }
        });
        let response: TicketResponse = serde_json::from_value(json!({
            "model": "llama-3.3-70b",
            "content": "{}",
            "usage": usage.clone()
        }))
        .unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap()["usage"], usage);

        let counts = response.usage_counts().unwrap();
        assert_eq!(counts.prompt_tokens, Some(10));
        assert_eq!(counts.completion_tokens, None);
        assert_eq!(counts.total_tokens, Some(10));
    }

    #[test]
    fn test_usage_counters_read_leniently() {
        let counts = Usage::from_value(&json!({
            "prompt_tokens": "12",
            "completion_tokens": 4.0,
            "total_tokens": -1
        }));
        assert_eq!(counts, Usage { prompt_tokens: None, completion_tokens: Some(4), total_tokens: None });
        assert_eq!(Usage::from_value(&json!(42)), Usage::default());
        assert_eq!(Usage::new(1, 2, 3).to_value(), json!({ "prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3 }));
    }

    #[test]
    fn test_ticket_response_serializes_null_usage() {
        let response = TicketResponse {
            model: "llama-3.3-70b".to_string(),
            content: "{}".to_string(),
            usage: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({ "model": "llama-3.3-70b", "content": "{}", "usage": null }));
    }

    #[test]
    fn test_severity_from_lenient() {
        assert_eq!(Severity::from_lenient(Some("high")), Severity::High);
        assert_eq!(Severity::from_lenient(Some("MEDIUM")), Severity::Medium);
        assert_eq!(Severity::from_lenient(Some("low")), Severity::Low);
        assert_eq!(Severity::from_lenient(Some(" High ")), Severity::High);
        assert_eq!(Severity::from_lenient(Some("critical")), Severity::Low);
        assert_eq!(Severity::from_lenient(None), Severity::Low);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::High.label(Language::Spanish), "Alto");
        assert_eq!(Severity::Medium.label(Language::Spanish), "Medio");
        assert_eq!(Severity::Low.label(Language::English), "Low");
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("es".parse::<Language>().unwrap(), Language::Spanish);
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert!("fr".parse::<Language>().is_err());
        let lang: Language = serde_json::from_value(json!("en")).unwrap();
        assert_eq!(lang, Language::English);
    }
}
