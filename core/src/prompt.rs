//! Prompt construction for ticket generation

use crate::types::{Language, TicketRequest};
use serde::{Deserialize, Serialize};

/// A message in the LLM conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    /// Role of the message sender ("user", "assistant", "system")
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Output schema the model is told to follow. Not enforced anywhere.
pub const TICKET_SCHEMA: &str = r#"{
  "id": "string",
  "summary": "string",
  "anomalies": [
    { "detail": "string", "severity": "high | medium | low" }
  ]
}"#;

/// Fixed system instruction demanding pure JSON in the target language
pub fn system_prompt(language: Language) -> String {
    let lines: [&str; 5] = match language {
        Language::Spanish => [
            "Devuelve SOLO JSON válido (sin markdown, sin texto extra).",
            "Idioma: español.",
            "NO inventes datos.",
            "Tarea: resume el incidente y señala las anomalías o irregularidades del reporte.",
            "Esquema JSON obligatorio de salida:",
        ],
        Language::English => [
            "Return ONLY valid JSON (no markdown, no extra text).",
            "Language: English.",
            "Do NOT invent data.",
            "Task: summarize the incident and flag anomalies or irregularities in the report.",
            "Required JSON output schema:",
        ],
    };
    format!("{}\n{}", lines.join("\n"), TICKET_SCHEMA)
}

/// User message: optional report context followed by the incident text
pub fn user_prompt(request: &TicketRequest, language: Language) -> String {
    let (context_heading, text_heading) = match language {
        Language::Spanish => ("Datos del reporte:", "Texto a analizar:"),
        Language::English => ("Report details:", "Text to analyze:"),
    };

    let context = request.report_context();
    let mut prompt = String::new();
    if !context.is_empty() {
        prompt.push_str(context_heading);
        prompt.push('\n');
        for (field, value) in context {
            prompt.push_str(&format!("- {}: {}\n", context_label(field, language), value));
        }
        prompt.push('\n');
    }
    prompt.push_str(text_heading);
    prompt.push('\n');
    prompt.push_str(&request.incident_text);
    prompt
}

fn context_label(field: &str, language: Language) -> &str {
    match (language, field) {
        (Language::Spanish, "reportId") => "ID del reporte",
        (Language::Spanish, "reportDate") => "Fecha del reporte",
        (Language::Spanish, "reportLocation") => "Ubicación",
        (Language::English, "reportId") => "Report ID",
        (Language::English, "reportDate") => "Report date",
        (Language::English, "reportLocation") => "Location",
        (_, other) => other,
    }
}

/// The `[system, user]` pair sent upstream for one ticket request
pub fn build_messages(request: &TicketRequest, language: Language) -> Vec<LlmMessage> {
    vec![
        LlmMessage::system(system_prompt(language)),
        LlmMessage::user(user_prompt(request, language)),
    ]
}
