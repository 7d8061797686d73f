//! FILENAME: app/src/assistant.rs
//! PURPOSE: Client for the external cleaning/charting service.
//! CONTEXT: The service is a fallible asynchronous black box: it gets
//! (data, instructions) and must answer with a strict JSON structure.
//! Response decoding is split into pure functions so it can be tested
//! without a network.

use crate::api_types::ChartConfig;
use engine::{Dataset, Record};
use ingest::{json_to_dataset, record_from_json};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("assistant request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not encode request payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("assistant response carried no content")]
    MissingContent,

    #[error("assistant response could not be interpreted: {0}")]
    Malformed(String),
}

/// Connection settings, read from the environment.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl AssistantConfig {
    pub fn from_env() -> Self {
        AssistantConfig {
            base_url: std::env::var("TABULA_ASSISTANT_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: std::env::var("TABULA_ASSISTANT_KEY").unwrap_or_default(),
            model: std::env::var("TABULA_ASSISTANT_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }
}

/// A successfully decoded cleaning response.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub cleaned: Dataset,
    pub summary: String,
    pub removed: Vec<(Record, String)>,
}

const CLEAN_SYSTEM_PROMPT: &str = "You are a data cleaning service. Apply the \
user's instructions to the provided table. Reply with a single JSON document \
of the form {\"cleanedData\": [<rows as flat objects>], \"changeLog\": \
{\"summary\": \"...\", \"removedRows\": [{\"originalRow\": {..}, \"reason\": \
\"...\"}]}}. Every original row must appear in exactly one of cleanedData or \
removedRows. Reply with JSON only.";

const CHART_SYSTEM_PROMPT: &str = "You are a dashboard planning service. Given \
a table and instructions, reply with a JSON array of chart configurations, \
each of the form {\"title\": \"...\", \"chartType\": \
\"bar|line|pie|area|scatter\", \"dataKey\": \"<category column>\", \
\"valueKeys\": [<numeric columns>], \"description\": \"...\"}. Reply with \
JSON only.";

pub struct Assistant {
    http: reqwest::Client,
    config: AssistantConfig,
}

impl Assistant {
    pub fn new(config: AssistantConfig) -> Self {
        Assistant {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Ask the service to clean the uploaded table.
    pub async fn clean_dataset(
        &self,
        raw_text: &str,
        instructions: &str,
    ) -> Result<CleaningOutcome, AssistantError> {
        let user = format!(
            "Instructions:\n{}\n\nData (delimited text, header row first):\n{}",
            instructions, raw_text
        );
        let content = self.complete(CLEAN_SYSTEM_PROMPT, &user).await?;
        parse_cleaning_response(&content)
    }

    /// Ask the service for chart configurations over the (filtered) dataset.
    pub async fn generate_chart_configs(
        &self,
        dataset: &Dataset,
        instructions: &str,
    ) -> Result<Vec<ChartConfig>, AssistantError> {
        let rows = serde_json::to_string(&dataset.records)?;
        let user = format!(
            "Instructions:\n{}\n\nColumns: {}\n\nData (JSON rows):\n{}",
            instructions,
            dataset.columns.join(", "),
            rows
        );
        let content = self.complete(CHART_SYSTEM_PROMPT, &user).await?;
        parse_chart_response(&content)
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, AssistantError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ]
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AssistantError::MissingContent)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CleaningResponse {
    cleaned_data: serde_json::Value,
    change_log: ChangeLogResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangeLogResponse {
    summary: String,
    #[serde(default)]
    removed_rows: Vec<RemovedRowResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemovedRowResponse {
    original_row: serde_json::Value,
    reason: String,
}

/// Decode the cleaning service's reply into a `CleaningOutcome`.
pub fn parse_cleaning_response(content: &str) -> Result<CleaningOutcome, AssistantError> {
    let text = strip_code_fences(content);
    let response: CleaningResponse = serde_json::from_str(text)
        .map_err(|e| AssistantError::Malformed(format!("not a cleaning result: {}", e)))?;

    // A run may legitimately remove every row; an empty cleanedData array is
    // an empty dataset, not a decoding failure.
    let cleaned = match response.cleaned_data.as_array() {
        Some(rows) if rows.is_empty() => Dataset::default(),
        _ => json_to_dataset(&response.cleaned_data)
            .map_err(|e| AssistantError::Malformed(format!("cleanedData: {}", e)))?,
    };

    let mut removed = Vec::with_capacity(response.change_log.removed_rows.len());
    for (index, row) in response.change_log.removed_rows.iter().enumerate() {
        let record = record_from_json(&row.original_row).map_err(|e| {
            AssistantError::Malformed(format!("removedRows[{}]: {}", index, e))
        })?;
        removed.push((record, row.reason.clone()));
    }

    Ok(CleaningOutcome {
        cleaned,
        summary: response.change_log.summary,
        removed,
    })
}

/// Decode the charting service's reply into chart configurations.
pub fn parse_chart_response(content: &str) -> Result<Vec<ChartConfig>, AssistantError> {
    let text = strip_code_fences(content);
    serde_json::from_str::<Vec<ChartConfig>>(text)
        .map_err(|e| AssistantError::Malformed(format!("not a chart list: {}", e)))
}

/// Models wrap their JSON in markdown fences often enough to tolerate it.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    match body.strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => body.trim(),
    }
}
