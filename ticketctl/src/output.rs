//! Output formatting utilities for ticketctl

use crate::cli::OutputFormat;
use colored::*;
use serde_json::Value;
use tabled::{Table, Tabled};
use ticketify_core::errors::CoreError;
use ticketify_core::render::Labels;
use ticketify_core::{
    AnomalyCard, AnomalyPanel, Language, ParsedView, Severity, TicketResponse, TicketView,
};

/// Display a successful ticket response
pub fn display_ticket(
    response: &TicketResponse,
    language: Language,
    format: &OutputFormat,
) -> Result<(), CoreError> {
    match format {
        OutputFormat::Text => {
            let view = TicketView::from_response(response, language);
            println!("{}", format_view(&view, language));
        }
        OutputFormat::Table => {
            let view = TicketView::from_response(response, language);
            match &view.parsed {
                Some(ParsedView::Invalid { message }) => {
                    println!("{}", format_parse_failure(message, language));
                }
                _ => println!("{}", format_anomaly_table(view.cards(), language)),
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(response)?;
            println!("{}", json);
        }
        OutputFormat::Raw => println!("{}", response.content),
    }
    Ok(())
}

/// Display a view built from a failed request
pub fn display_failure(view: &TicketView, language: Language) {
    eprintln!("{}", format_view(view, language));
}

/// Render every section of a view as terminal text
pub fn format_view(view: &TicketView, language: Language) -> String {
    let labels = Labels::for_language(language);
    let mut sections = vec![format!("{}\n{}", heading(labels.raw_heading), view.raw)];

    if let Some(usage) = &view.usage {
        sections.push(format!(
            "{} Prompt: {} | Completion: {} | Total: {} (~${:.4})",
            format!("{}:", labels.usage_heading).bold(),
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens,
            usage.estimated_cost_usd
        ));
    }

    match &view.parsed {
        Some(ParsedView::Parsed { pretty, anomalies }) => {
            sections.push(format!("{}\n{}", heading(labels.parsed_heading), pretty));
            sections.push(format!(
                "{}\n{}",
                heading(labels.anomalies_heading),
                format_anomalies(anomalies, language)
            ));
        }
        Some(ParsedView::Invalid { message }) => {
            sections.push(format!(
                "{}\n{}",
                heading(labels.parsed_heading),
                format_parse_failure(message, language)
            ));
        }
        None => {}
    }

    sections.join("\n\n")
}

fn heading(title: &str) -> String {
    format!("== {} ==", title).bold().blue().to_string()
}

fn format_parse_failure(message: &str, language: Language) -> String {
    let labels = Labels::for_language(language);
    format!("{}\n{}", format!("✗ {}", labels.parse_failed).red().bold(), message)
}

/// Anomaly cards, or the placeholder when there are none
pub fn format_anomalies(panel: &AnomalyPanel, language: Language) -> String {
    let labels = Labels::for_language(language);
    match panel {
        AnomalyPanel::NoneDetected => format!("✓ {}", labels.no_anomalies).italic().to_string(),
        AnomalyPanel::Cards(cards) => cards
            .iter()
            .map(|card| format_card(card, language))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn format_card(card: &AnomalyCard, language: Language) -> String {
    let labels = Labels::for_language(language);
    format!(
        "{} {} #{}\n  {} {}",
        severity_badge(card.severity, language),
        labels.anomaly_number.bold(),
        card.number,
        labels.detail_prefix.bold(),
        card.detail
    )
}

fn severity_badge(severity: Severity, language: Language) -> ColoredString {
    let badge = format!("[{}]", severity.label(language));
    match severity {
        Severity::High => badge.red().bold(),
        Severity::Medium => badge.yellow().bold(),
        Severity::Low => badge.green().bold(),
    }
}

/// Anomaly cards as a table
pub fn format_anomaly_table(cards: &[AnomalyCard], language: Language) -> String {
    let labels = Labels::for_language(language);
    if cards.is_empty() {
        return labels.no_anomalies.to_string();
    }

    let rows: Vec<AnomalyTableRow> = cards
        .iter()
        .map(|card| AnomalyTableRow {
            number: card.number,
            severity: card.severity.label(language).to_string(),
            detail: card.detail.clone(),
        })
        .collect();

    Table::new(rows).to_string()
}

/// Display the upstream model list
pub fn display_models(models: &Value, format: &OutputFormat) -> Result<(), CoreError> {
    match format {
        OutputFormat::Table | OutputFormat::Text => {
            let rows = model_rows(models);
            if rows.is_empty() {
                println!("No models found");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json | OutputFormat::Raw => {
            let json = serde_json::to_string_pretty(models)?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn model_rows(models: &Value) -> Vec<ModelTableRow> {
    models
        .get("data")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    Some(ModelTableRow {
                        id: entry.get("id")?.as_str()?.to_string(),
                        owned_by: entry
                            .get("owned_by")
                            .and_then(Value::as_str)
                            .unwrap_or("-")
                            .to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Table row for anomaly display
#[derive(Tabled)]
struct AnomalyTableRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

/// Table row for model display
#[derive(Tabled)]
struct ModelTableRow {
    #[tabled(rename = "Model")]
    id: String,
    #[tabled(rename = "Owned by")]
    owned_by: String,
}
