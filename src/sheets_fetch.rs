use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::google_auth::{SHEETS_READONLY_SCOPE, fetch_access_token, load_service_account};
use crate::http_client::http_client;
use crate::sheet::RawSheet;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
const DEFAULT_RANGE: &str = "Dash!B1:BQ22";
const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";

pub trait SheetSource {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<RawSheet>;
}

impl<T: SheetSource + ?Sized> SheetSource for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn fetch(&self) -> Result<RawSheet> {
        (**self).fetch()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSourceKind {
    Google,
    File,
    Demo,
}

#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub source: SheetSourceKind,
    pub sheet_id: Option<String>,
    pub range: String,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub credentials: Option<PathBuf>,
    pub api_base: String,
    pub file: Option<PathBuf>,
}

impl SheetConfig {
    pub fn from_env() -> Self {
        let source = match env::var("DASH_SHEET_SOURCE")
            .unwrap_or_default()
            .trim()
            .to_lowercase()
            .as_str()
        {
            "file" => SheetSourceKind::File,
            "demo" => SheetSourceKind::Demo,
            _ => SheetSourceKind::Google,
        };
        Self {
            source,
            sheet_id: non_empty_env("GOOGLE_SHEET_ID"),
            range: non_empty_env("GOOGLE_SHEET_RANGE").unwrap_or_else(|| DEFAULT_RANGE.to_string()),
            api_key: non_empty_env("GOOGLE_API_KEY"),
            access_token: non_empty_env("GOOGLE_ACCESS_TOKEN"),
            credentials: non_empty_env("GOOGLE_APPLICATION_CREDENTIALS")
                .map(PathBuf::from)
                .or_else(|| {
                    let local = Path::new(DEFAULT_CREDENTIALS_FILE);
                    local.exists().then(|| local.to_path_buf())
                }),
            api_base: non_empty_env("GOOGLE_SHEETS_API_BASE")
                .unwrap_or_else(|| SHEETS_API_BASE.to_string()),
            file: non_empty_env("DASH_SHEET_FILE").map(PathBuf::from),
        }
    }

    pub fn into_source(self) -> Box<dyn SheetSource + Send> {
        match self.source {
            SheetSourceKind::Google => Box::new(GoogleSheetSource { config: self }),
            SheetSourceKind::File => Box::new(FileSheetSource { path: self.file }),
            SheetSourceKind::Demo => Box::new(DemoSheetSource),
        }
    }
}

pub struct GoogleSheetSource {
    config: SheetConfig,
}

impl GoogleSheetSource {
    fn values_url(&self, sheet_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_base).context("invalid sheets api base url")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("sheets api base url cannot take a path"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", sheet_id, "values", self.config.range.as_str()]);
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    // A ready token wins over minting one from a service-account key.
    fn bearer_token(&self) -> Result<Option<String>> {
        if let Some(token) = &self.config.access_token {
            return Ok(Some(token.clone()));
        }
        let Some(path) = &self.config.credentials else {
            return Ok(None);
        };
        let key = load_service_account(path)?;
        let token = fetch_access_token(&key, SHEETS_READONLY_SCOPE)
            .with_context(|| format!("service account {} could not authenticate", key.client_email))?;
        Ok(Some(token))
    }
}

impl SheetSource for GoogleSheetSource {
    fn describe(&self) -> String {
        format!("Google Sheets range {}", self.config.range)
    }

    fn fetch(&self) -> Result<RawSheet> {
        let sheet_id = self
            .config
            .sheet_id
            .as_deref()
            .context("GOOGLE_SHEET_ID is not set")?;
        let bearer = self.bearer_token()?;
        if bearer.is_none() && self.config.api_key.is_none() {
            bail!(
                "no Google credentials: set GOOGLE_APPLICATION_CREDENTIALS, \
                 GOOGLE_ACCESS_TOKEN or GOOGLE_API_KEY"
            );
        }

        let client = http_client()?;
        let mut req = client.get(self.values_url(sheet_id)?);
        if let Some(token) = &bearer {
            req = req.bearer_auth(token);
        }
        let resp = req.send().context("sheet request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading sheet body")?;
        if !status.is_success() {
            bail!("sheets api http {status}: {}", truncate(&body, 200));
        }
        parse_values_json(&body)
    }
}

pub struct FileSheetSource {
    path: Option<PathBuf>,
}

impl SheetSource for FileSheetSource {
    fn describe(&self) -> String {
        match &self.path {
            Some(path) => format!("file {}", path.display()),
            None => "file (unset)".to_string(),
        }
    }

    fn fetch(&self) -> Result<RawSheet> {
        let path = self.path.as_ref().context("DASH_SHEET_FILE is not set")?;
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        parse_values_json(&raw)
    }
}

pub struct DemoSheetSource;

impl SheetSource for DemoSheetSource {
    fn describe(&self) -> String {
        "built-in demo sheet".to_string()
    }

    fn fetch(&self) -> Result<RawSheet> {
        Ok(demo_sheet())
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Parses a Sheets API `ValueRange` body. Non-string cells are rendered as text.
/// An empty or `null` body, or one without any rows, is an error.
pub fn parse_values_json(raw: &str) -> Result<RawSheet> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        bail!("sheet returned no values");
    }
    let range: ValueRange = serde_json::from_str(trimmed).context("invalid sheet values json")?;
    if range.values.is_empty() {
        bail!("sheet returned no values");
    }
    Ok(range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Bool(b) => (if b { "TRUE" } else { "FALSE" }).to_string(),
        other => other.to_string(),
    }
}

fn demo_sheet() -> RawSheet {
    const ROWS: &[&[&str]] = &[
        &[
            "", "Class", "", "", "", "", "", "", "IP", "ERA", "WHIP", "K%", "BB%", "S%", "FB CSW",
            "Whiff%", "Out%", "Early%", "BF",
        ],
        &[
            "Alex Moreno", "Sr.", "R", "", "", "", "", "", "41.2", "2.38", "1.10", "31%", "7%",
            "66%", "29%", "34%", "74%", "71%", "168",
        ],
        &[
            "Ben Ortiz", "Jr.", "L", "", "", "", "", "", "28.0", "4.82", "1.57", "19%", "12%",
            "58%", "24%", "22%", "61%", "55%", "131",
        ],
        &[
            "Chris Tanaka", "So.", "R", "", "", "", "", "", "35.1", "1.78", "0.93", "36%", "6%",
            "69%", "33%", "41%", "82%", "77%", "140",
        ],
        &[
            "Dev Patel", "Fr.", "R", "", "", "", "", "", "12.2", "6.39", "1.89", "17%", "15%",
            "54%", "21%", "19%", "52%", "48%", "63",
        ],
        &["Eli Brooks", "Jr.", "L", "", "", "", "", "", "19.0", "3.32", "1.26", "N/A"],
        &[
            "Staff Total:", "", "", "", "", "", "", "", "136.1", "3.36", "1.27", "26%", "9%",
            "62%", "27%", "30%", "70%", "63%", "575",
        ],
    ];
    ROWS.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn truncate(raw: &str, max_chars: usize) -> String {
    raw.chars().take(max_chars).collect()
}
