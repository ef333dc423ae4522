//! Best-effort view model for displaying a generated ticket.
//!
//! The server never looks inside `content`; this module is where a client
//! tries to make sense of it. Parsing failures are part of the view, not
//! errors: the raw text is always shown, and the parse error message takes
//! the place of the pretty-printed value.

use crate::types::{Language, Severity, TicketResponse, Usage};
use serde::Serialize;
use serde_json::Value;

/// Approximate upstream price per million tokens, in USD
pub const COST_PER_MILLION_TOKENS_USD: f64 = 0.13;

/// Localized strings used when presenting a ticket
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub raw_heading: &'static str,
    pub parsed_heading: &'static str,
    pub anomalies_heading: &'static str,
    pub usage_heading: &'static str,
    pub anomaly_number: &'static str,
    pub detail_prefix: &'static str,
    pub missing_detail: &'static str,
    pub no_anomalies: &'static str,
    pub parse_failed: &'static str,
}

impl Labels {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Spanish => Self {
                raw_heading: "Respuesta cruda",
                parsed_heading: "JSON interpretado",
                anomalies_heading: "Anomalías",
                usage_heading: "Tokens utilizados",
                anomaly_number: "Anomalía",
                detail_prefix: "Descripción:",
                missing_detail: "(sin descripción)",
                no_anomalies: "No se detectaron anomalías",
                parse_failed: "JSON.parse falló",
            },
            Language::English => Self {
                raw_heading: "Raw response",
                parsed_heading: "Parsed JSON",
                anomalies_heading: "Anomalies",
                usage_heading: "Tokens used",
                anomaly_number: "Anomaly",
                detail_prefix: "Description:",
                missing_detail: "(no description)",
                no_anomalies: "No anomalies detected",
                parse_failed: "JSON parse failed",
            },
        }
    }
}

/// Token counters plus a rough cost estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub estimated_cost_usd: f64,
}

/// Missing counters count as zero
impl From<&Usage> for UsageSummary {
    fn from(usage: &Usage) -> Self {
        let total_tokens = usage.total_tokens.unwrap_or(0);
        Self {
            prompt_tokens: usage.prompt_tokens.unwrap_or(0),
            completion_tokens: usage.completion_tokens.unwrap_or(0),
            total_tokens,
            estimated_cost_usd: total_tokens as f64 / 1_000_000.0 * COST_PER_MILLION_TOKENS_USD,
        }
    }
}

/// One flagged anomaly, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyCard {
    /// 1-based position in the model's list
    pub number: usize,
    pub severity: Severity,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnomalyPanel {
    /// Placeholder shown instead of an empty list
    NoneDetected,
    Cards(Vec<AnomalyCard>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParsedView {
    /// `content` was valid JSON
    Parsed { pretty: String, anomalies: AnomalyPanel },
    /// `content` was not valid JSON; carries the parser's message
    Invalid { message: String },
}

/// Everything a client displays for one ticket request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketView {
    pub raw: String,
    pub usage: Option<UsageSummary>,
    /// Absent when the request itself failed
    pub parsed: Option<ParsedView>,
}

impl TicketView {
    /// Build the view for a successful endpoint response
    pub fn from_response(response: &TicketResponse, language: Language) -> Self {
        Self {
            raw: response.content.clone(),
            usage: response.usage_counts().as_ref().map(UsageSummary::from),
            parsed: Some(parse_content(&response.content, language)),
        }
    }

    /// Build the view for a network or transport failure
    pub fn from_error(message: impl AsRef<str>) -> Self {
        Self {
            raw: format!("ERROR:\n{}", message.as_ref()),
            usage: None,
            parsed: None,
        }
    }

    /// Build the view for a non-success answer from the ticket endpoint
    pub fn from_api_error(body: &Value) -> Self {
        let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
        Self::from_error(format!("API error:\n{}", pretty))
    }

    /// Anomaly cards, if the content parsed and carried any
    pub fn cards(&self) -> &[AnomalyCard] {
        match &self.parsed {
            Some(ParsedView::Parsed {
                anomalies: AnomalyPanel::Cards(cards),
                ..
            }) => cards,
            _ => &[],
        }
    }
}

/// Best-effort parse of the model's text
pub fn parse_content(content: &str, language: Language) -> ParsedView {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => {
            let pretty =
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            ParsedView::Parsed {
                pretty,
                anomalies: anomaly_panel(&value, language),
            }
        }
        Err(e) => ParsedView::Invalid {
            message: e.to_string(),
        },
    }
}

/// Cards for a non-empty `anomalies` array, placeholder otherwise
pub fn anomaly_panel(value: &Value, language: Language) -> AnomalyPanel {
    let entries = match value.get("anomalies").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => return AnomalyPanel::NoneDetected,
    };

    let labels = Labels::for_language(language);
    let cards = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| AnomalyCard {
            number: index + 1,
            severity: Severity::from_lenient(entry.get("severity").and_then(Value::as_str)),
            detail: detail_text(entry.get("detail"), labels.missing_detail),
        })
        .collect();

    AnomalyPanel::Cards(cards)
}

fn detail_text(detail: Option<&Value>, missing: &str) -> String {
    match detail {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        None | Some(Value::Null) | Some(Value::String(_)) => missing.to_string(),
        Some(other) => other.to_string(),
    }
}
