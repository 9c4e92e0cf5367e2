//! Blocking HTTP client for the Sheets v4 API.
//!
//! Value reads/writes go through the `values` endpoints; every other
//! mutation is one or more request fragments submitted via `batchUpdate`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::{fetch_access_token, ServiceAccountKey};

const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// Error type for remote operations.
#[derive(Debug)]
pub enum ApiError {
    /// Token acquisition failed
    Auth(String),
    /// Network error
    Network(String),
    /// HTTP error with status code (body surfaced verbatim)
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Auth(msg) => write!(f, "Auth failed: {}", msg),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// One tab's metadata, as listed by the spreadsheet `get` endpoint.
///
/// `sheet_id` is opaque and only obtainable here: commands resolve it by
/// title immediately before any tab-scoped request, never guess it.
#[derive(Debug, Clone, Serialize)]
pub struct TabMeta {
    pub title: String,
    pub index: i64,
    #[serde(rename = "sheetId")]
    pub sheet_id: i64,
    #[serde(rename = "rowCount")]
    pub row_count: i64,
    #[serde(rename = "columnCount")]
    pub column_count: i64,
    /// Number of conditional-format rules; populated only when the caller
    /// asked for them (clearing rules needs the count, nothing else does).
    #[serde(skip_serializing)]
    pub conditional_format_count: usize,
}

/// A block of cell values, as returned by the values `get` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Update statistics shared by the write and append responses. Fields the
/// API did not report stay out of the serialized envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_rows: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_columns: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_cells: Option<i64>,
}

/// The remote operations commands are built on. Concrete implementation is
/// [`SheetsClient`]; tests substitute a fake.
pub trait SheetsApi {
    /// List tab metadata. `with_rules` additionally fetches each tab's
    /// conditional-format rules so their count is known.
    fn list_tabs(&self, spreadsheet_id: &str, with_rules: bool) -> Result<Vec<TabMeta>, ApiError>;

    fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange, ApiError>;

    fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<serde_json::Value>],
    ) -> Result<UpdateSummary, ApiError>;

    fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<serde_json::Value>],
    ) -> Result<UpdateSummary, ApiError>;

    fn clear_values(&self, spreadsheet_id: &str, range: &str) -> Result<(), ApiError>;

    /// Submit one or more request fragments through `batchUpdate`. The batch
    /// is atomic on the server: it fully succeeds or the command fails.
    fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: Vec<serde_json::Value>,
    ) -> Result<(), ApiError>;
}

/// Sheets API client (blocking).
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
}

impl SheetsClient {
    /// Create a client with an already-acquired bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    /// Create a client against a non-default API base (tests).
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("getsheet/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    /// Create a client by exchanging a service-account key for a token.
    pub fn from_service_account(key: &ServiceAccountKey) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("getsheet/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        let token = fetch_access_token(&http, key)?;

        Ok(Self {
            http,
            api_base: DEFAULT_API_BASE.to_string(),
            token,
        })
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, ApiError> {
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(response)
    }

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        log::debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(response)
    }

    fn put_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        log::debug!("PUT {}", url);
        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(response)
    }
}

fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    let status = response.status().as_u16();
    if !response.status().is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ApiError::Http(status, body));
    }
    Ok(response)
}

impl SheetsApi for SheetsClient {
    fn list_tabs(&self, spreadsheet_id: &str, with_rules: bool) -> Result<Vec<TabMeta>, ApiError> {
        let fields = if with_rules {
            "sheets(properties,conditionalFormats)"
        } else {
            "sheets.properties"
        };
        let url = format!(
            "{}/v4/spreadsheets/{}?fields={}",
            self.api_base, spreadsheet_id, fields
        );
        let resp = self.get(&url)?;
        let json: serde_json::Value = resp.json().map_err(|e| ApiError::Parse(e.to_string()))?;

        let tabs = json["sheets"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(|sheet| {
                let props = sheet.get("properties")?;
                Some(TabMeta {
                    title: props["title"].as_str()?.to_string(),
                    index: props["index"].as_i64().unwrap_or(0),
                    sheet_id: props["sheetId"].as_i64()?,
                    row_count: props["gridProperties"]["rowCount"].as_i64().unwrap_or(0),
                    column_count: props["gridProperties"]["columnCount"].as_i64().unwrap_or(0),
                    conditional_format_count: sheet["conditionalFormats"]
                        .as_array()
                        .map(|rules| rules.len())
                        .unwrap_or(0),
                })
            })
            .collect();

        Ok(tabs)
    }

    fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange, ApiError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base, spreadsheet_id, range
        );
        let resp = self.get(&url)?;
        resp.json::<ValueRange>().map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<serde_json::Value>],
    ) -> Result<UpdateSummary, ApiError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}?valueInputOption=USER_ENTERED",
            self.api_base, spreadsheet_id, range
        );
        let body = serde_json::json!({ "values": values });
        let resp = self.put_json(&url, &body)?;
        resp.json::<UpdateSummary>().map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<serde_json::Value>],
    ) -> Result<UpdateSummary, ApiError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append?valueInputOption=USER_ENTERED",
            self.api_base, spreadsheet_id, range
        );
        let body = serde_json::json!({ "values": values });
        let resp = self.post_json(&url, &body)?;
        let json: serde_json::Value = resp.json().map_err(|e| ApiError::Parse(e.to_string()))?;

        // The append response nests its statistics under "updates".
        let updates = json.get("updates").cloned().unwrap_or_else(|| serde_json::json!({}));
        serde_json::from_value(updates).map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn clear_values(&self, spreadsheet_id: &str, range: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:clear",
            self.api_base, spreadsheet_id, range
        );
        self.post_json(&url, &serde_json::json!({}))?;
        Ok(())
    }

    fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: Vec<serde_json::Value>,
    ) -> Result<(), ApiError> {
        let url = format!("{}/v4/spreadsheets/{}:batchUpdate", self.api_base, spreadsheet_id);
        let body = serde_json::json!({ "requests": requests });
        self.post_json(&url, &body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_meta_serializes_with_camel_case_keys() {
        let tab = TabMeta {
            title: "Sheet1".into(),
            index: 0,
            sheet_id: 123456,
            row_count: 1000,
            column_count: 26,
            conditional_format_count: 2,
        };

        let json = serde_json::to_value(&tab).unwrap();
        assert_eq!(json["title"], "Sheet1");
        assert_eq!(json["sheetId"], 123456);
        assert_eq!(json["rowCount"], 1000);
        assert_eq!(json["columnCount"], 26);
        // Internal-only field never reaches the envelope.
        assert!(json.get("conditional_format_count").is_none());
        assert!(json.get("conditionalFormatCount").is_none());
    }

    #[test]
    fn update_summary_reads_camel_case() {
        let summary: UpdateSummary = serde_json::from_str(
            r#"{"updatedRange":"Sheet1!A1:B2","updatedRows":2,"updatedColumns":2,"updatedCells":4}"#,
        )
        .unwrap();
        assert_eq!(summary.updated_range.as_deref(), Some("Sheet1!A1:B2"));
        assert_eq!(summary.updated_cells, Some(4));
    }

    #[test]
    fn update_summary_tolerates_missing_fields() {
        let summary: UpdateSummary = serde_json::from_str("{}").unwrap();
        assert!(summary.updated_range.is_none());
        assert!(summary.updated_rows.is_none());
    }

    #[test]
    fn value_range_defaults_to_empty() {
        let range: ValueRange = serde_json::from_str(r#"{"range":"Sheet1!A1:C10"}"#).unwrap();
        assert_eq!(range.range, "Sheet1!A1:C10");
        assert!(range.values.is_empty());
    }

    #[test]
    fn api_error_display() {
        assert_eq!(
            ApiError::Http(429, "quota exceeded".into()).to_string(),
            "HTTP 429: quota exceeded"
        );
        assert_eq!(ApiError::Network("timed out".into()).to_string(), "Network error: timed out");
    }
}
