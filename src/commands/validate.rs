//! `analytics validate`: check a file of JSON-line messages.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use analytics_core::error::AppError;
use analytics_messages::{Message, MessageFields};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// File containing one JSON message per line
    pub path: PathBuf,
}

/// Validation report row
#[derive(Debug, Serialize, Tabled)]
pub struct ValidationRow {
    /// 1-based line number
    pub line: usize,
    /// Message type, or `-` when the line did not decode
    #[serde(rename = "type")]
    #[tabled(rename = "type")]
    pub message_type: String,
    /// Message id, or `-` when the line did not decode
    pub message_id: String,
    /// `ok` or the validation error
    pub status: String,
}

impl ValidationRow {
    /// Whether the line held a valid message
    pub fn is_valid(&self) -> bool {
        self.status == "ok"
    }
}

/// Validate every non-blank line of `input`
pub fn validate_lines(input: &str) -> Vec<ValidationRow> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| match line.parse::<Message>() {
            Ok(message) => ValidationRow {
                line: index + 1,
                message_type: message.message_type().to_string(),
                message_id: message.envelope().message_id().to_string(),
                status: "ok".to_string(),
            },
            Err(e) => ValidationRow {
                line: index + 1,
                message_type: "-".to_string(),
                message_id: "-".to_string(),
                status: e.to_string(),
            },
        })
        .collect()
}

/// Execute the validate command
pub async fn execute(args: &ValidateArgs, format: OutputFormat) -> Result<(), AppError> {
    let input = tokio::fs::read_to_string(&args.path).await?;
    let rows = validate_lines(&input);
    output::print_list(&rows, format);

    let failed = rows.iter().filter(|row| !row.is_valid()).count();
    tracing::info!(total = rows.len(), failed, "Validation finished");
    if failed > 0 {
        return Err(AppError::invalid_argument(format!(
            "{} of {} messages failed validation",
            failed,
            rows.len()
        )));
    }
    Ok(())
}
