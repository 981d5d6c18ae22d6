use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::http_client::http_client;
use crate::record::Record;

const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SYSTEM_PROMPT: &str = "You are a helpful baseball analytics assistant.";

/// Result of asking the completion service about one player. Failure is a variant,
/// never a magic prefix inside the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Ready(String),
    Failed(String),
    MissingApiKey,
}

pub trait Summarizer {
    fn summarize(&self, record: &Record) -> SummaryOutcome;
}

#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl SummaryConfig {
    pub fn from_env() -> Self {
        let timeout_secs = env::var("SUMMARY_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);
        Self {
            api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env::var("OPENAI_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: env::var("OPENAI_BASE_URL")
                .ok()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

pub struct OpenAiSummarizer {
    config: SummaryConfig,
}

impl OpenAiSummarizer {
    pub fn new(config: SummaryConfig) -> Self {
        Self { config }
    }

    fn request(&self, api_key: &str, record: &Record) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessageOut {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessageOut {
                    role: "user",
                    content: build_prompt(record),
                },
            ],
        };
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let resp = http_client()?
            .post(url)
            .bearer_auth(api_key)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .context("completion request failed")?;
        let status = resp.status();
        let raw = resp.text().context("failed reading completion body")?;
        if !status.is_success() {
            bail!("completion http {status}: {}", raw.chars().take(200).collect::<String>());
        }
        parse_completion_json(&raw)
    }
}

impl Summarizer for OpenAiSummarizer {
    fn summarize(&self, record: &Record) -> SummaryOutcome {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return SummaryOutcome::MissingApiKey;
        };
        match self.request(api_key, record) {
            Ok(text) => SummaryOutcome::Ready(text),
            Err(err) => SummaryOutcome::Failed(format!("{err:#}")),
        }
    }
}

pub fn build_prompt(record: &Record) -> String {
    let mut prompt = String::from(
        "You are a baseball analytics expert. Given the following player's stats, \
         write a short summary of how they are playing, what they are doing well, \
         and what needs improvement. Be specific and use the stats provided.\n\nStats:\n",
    );
    for (label, value) in record.fields() {
        if value.trim().is_empty() {
            continue;
        }
        prompt.push_str(label);
        prompt.push_str(": ");
        prompt.push_str(value.trim());
        prompt.push('\n');
    }
    prompt
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessageOut>,
}

#[derive(Debug, Serialize)]
struct ChatMessageOut {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageIn,
}

#[derive(Debug, Deserialize)]
struct ChatMessageIn {
    #[serde(default)]
    content: Option<String>,
}

/// Pulls `choices[0].message.content`; a missing or blank completion is an error.
pub fn parse_completion_json(raw: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(raw).context("invalid completion json")?;
    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .unwrap_or_default();
    if text.is_empty() {
        bail!("completion returned no text");
    }
    Ok(text)
}
