//! Spreadsheet-backed leaderboard.
//!
//! Rows live in a remote worksheet with four columns: `Tag` (3-char operative
//! tag), `Name`, `USN`, and `Time` (run time in seconds, lower is better).
//! The sheet is reached through a rows-style HTTP API configured from the
//! environment; when configuration is missing or any call fails, the game
//! drops to offline mode and keeps working against a session-local cache.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{LEADERBOARD_LIMIT, TAG_LENGTH};
use crate::error::LeaderboardError;

/// Environment variable holding the rows API endpoint URL.
pub const SHEET_URL_ENV: &str = "DETROIT_SHEET_URL";
/// Environment variable holding the optional bearer token.
pub const SHEET_KEY_ENV: &str = "DETROIT_SHEET_KEY";
/// Environment variable overriding the worksheet name.
pub const SHEET_WORKSHEET_ENV: &str = "DETROIT_SHEET_WORKSHEET";

pub const EXPECTED_COLUMNS: [&str; 4] = ["Tag", "Name", "USN", "Time"];

/// One leaderboard row, as written to the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "USN")]
    pub usn: String,
    #[serde(rename = "Time")]
    pub time: f64,
}

/// A row as it comes back from the sheet, before numeric coercion. Sheet APIs
/// hand times back as numbers or strings depending on cell formatting.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScoreRow {
    #[serde(rename = "Tag", default)]
    pub tag: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "USN", default)]
    pub usn: String,
    #[serde(rename = "Time", default)]
    pub time: serde_json::Value,
}

/// Coerces a sheet cell to seconds. `None` when the value is not numeric.
pub fn coerce_time(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Normalizes raw rows into the display board: rows whose time fails numeric
/// coercion (or is negative / non-finite) are dropped, the rest are sorted
/// ascending by time and truncated to the top [`LEADERBOARD_LIMIT`].
pub fn top_scores(raw: Vec<RawScoreRow>) -> Vec<ScoreRow> {
    let mut rows: Vec<ScoreRow> = raw
        .into_iter()
        .filter_map(|row| {
            let time = coerce_time(&row.time)?;
            if !time.is_finite() || time < 0.0 {
                return None;
            }
            Some(ScoreRow {
                tag: row.tag,
                name: row.name,
                usn: row.usn,
                time,
            })
        })
        .collect();

    rows.sort_by(|a, b| a.time.total_cmp(&b.time));
    rows.truncate(LEADERBOARD_LIMIT);
    rows
}

/// Formats a run time for display, two decimals.
pub fn format_time(seconds: f64) -> String {
    format!("{seconds:.2}")
}

/// Upper-cases and truncates input to an operative tag. The result is only a
/// valid tag once it reaches [`TAG_LENGTH`] characters.
pub fn sanitize_tag(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(TAG_LENGTH)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Connection settings for the sheet API.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub worksheet: String,
}

impl SheetsConfig {
    /// Reads configuration from the environment. `None` means the leaderboard
    /// was never configured, which is the documented offline mode.
    pub fn from_env() -> Option<SheetsConfig> {
        let endpoint = std::env::var(SHEET_URL_ENV).ok()?;
        Some(SheetsConfig {
            endpoint,
            api_key: std::env::var(SHEET_KEY_ENV).ok(),
            worksheet: std::env::var(SHEET_WORKSHEET_ENV).unwrap_or_else(|_| "Scores".to_string()),
        })
    }
}

/// Thin HTTP client for the worksheet rows API.
pub struct SheetsClient {
    http: reqwest::blocking::Client,
    config: SheetsConfig,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig) -> Result<SheetsClient, LeaderboardError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(SheetsClient { http, config })
    }

    fn request(&self, builder: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        let builder = builder.query(&[("worksheet", self.config.worksheet.as_str())]);
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Reads every row from the worksheet, uncoerced.
    pub fn fetch_raw(&self) -> Result<Vec<RawScoreRow>, LeaderboardError> {
        let response = self
            .request(self.http.get(&self.config.endpoint))
            .send()?
            .error_for_status()?;
        let rows = response
            .json::<Vec<RawScoreRow>>()
            .map_err(|e| LeaderboardError::Malformed(e.to_string()))?;
        Ok(rows)
    }

    /// Reads the normalized top-10 board.
    pub fn fetch_top(&self) -> Result<Vec<ScoreRow>, LeaderboardError> {
        Ok(top_scores(self.fetch_raw()?))
    }

    /// Appends exactly one row to the worksheet.
    pub fn append(&self, row: &ScoreRow) -> Result<(), LeaderboardError> {
        self.request(self.http.post(&self.config.endpoint))
            .json(row)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// Reads rows as untyped JSON objects, for column diagnostics.
    fn fetch_values(&self) -> Result<Vec<serde_json::Map<String, serde_json::Value>>, LeaderboardError> {
        let response = self
            .request(self.http.get(&self.config.endpoint))
            .send()?
            .error_for_status()?;
        response
            .json::<Vec<serde_json::Map<String, serde_json::Value>>>()
            .map_err(|e| LeaderboardError::Malformed(e.to_string()))
    }

    /// Runs the connection doctor: connection, read, columns, append-write.
    pub fn doctor(&self) -> DoctorReport {
        let mut report = DoctorReport::default();

        let rows = match self.fetch_values() {
            Ok(rows) => {
                report.pass("read", format!("{} rows", rows.len()));
                rows
            }
            Err(e) => {
                report.fail("read", e.to_string());
                return report;
            }
        };

        match rows.first() {
            Some(row) => {
                let missing: Vec<&str> = EXPECTED_COLUMNS
                    .iter()
                    .copied()
                    .filter(|column| !row.contains_key(*column))
                    .collect();
                if missing.is_empty() {
                    report.pass("columns", "all required columns present".to_string());
                } else {
                    report.fail("columns", format!("columns missing: {missing:?}"));
                }
            }
            None => report.pass("columns", "sheet is empty, nothing to check".to_string()),
        }

        let probe = ScoreRow {
            tag: "DOC".to_string(),
            name: "Test Name".to_string(),
            usn: "1MS22AIDOC".to_string(),
            time: 0.0,
        };
        match self.append(&probe) {
            Ok(()) => report.pass("write", "able to append a row".to_string()),
            Err(e) => report.fail("write", e.to_string()),
        }

        report
    }
}

/// Outcome of one doctor step.
#[derive(Debug, Clone)]
pub struct DoctorStep {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub steps: Vec<DoctorStep>,
}

impl DoctorReport {
    fn pass(&mut self, name: &'static str, detail: String) {
        self.steps.push(DoctorStep {
            name,
            passed: true,
            detail,
        });
    }

    fn fail(&mut self, name: &'static str, detail: String) {
        self.steps.push(DoctorStep {
            name,
            passed: false,
            detail,
        });
    }

    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(|step| step.passed)
    }
}

/// Game-facing leaderboard handle: online when configured and reachable,
/// otherwise a session-local board that only holds this run's submissions.
pub struct Leaderboard {
    client: Option<SheetsClient>,
    board: Vec<ScoreRow>,
    offline: bool,
}

impl Leaderboard {
    /// Connects using environment configuration; silently offline when the
    /// endpoint is not configured.
    pub fn connect() -> Leaderboard {
        match SheetsConfig::from_env() {
            Some(config) => match SheetsClient::new(config) {
                Ok(client) => {
                    info!("Leaderboard client ready");
                    Leaderboard {
                        client: Some(client),
                        board: Vec::new(),
                        offline: false,
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Leaderboard client failed to build, running offline");
                    Leaderboard::offline()
                }
            },
            None => {
                info!("No {} configured, leaderboard is offline", SHEET_URL_ENV);
                Leaderboard::offline()
            }
        }
    }

    pub fn offline() -> Leaderboard {
        Leaderboard {
            client: None,
            board: Vec::new(),
            offline: true,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// The current top-10 view (remote when last refresh succeeded, otherwise
    /// whatever the session has accumulated locally).
    pub fn board(&self) -> &[ScoreRow] {
        &self.board
    }

    /// Re-reads the board from the sheet. Failure downgrades to offline.
    pub fn refresh(&mut self) {
        let Some(client) = &self.client else { return };
        match client.fetch_top() {
            Ok(rows) => {
                self.offline = false;
                self.board = rows;
            }
            Err(e) => {
                warn!(error = %e, "Leaderboard read failed, continuing offline");
                self.offline = true;
            }
        }
    }

    /// Submits one finished run. The row always lands on the local board;
    /// the remote append is best-effort.
    pub fn submit(&mut self, row: ScoreRow) {
        if let Some(client) = &self.client {
            match client.append(&row) {
                Ok(()) => {
                    info!(tag = %row.tag, time = row.time, "Score uploaded");
                    self.offline = false;
                }
                Err(e) => {
                    warn!(error = %e, "Score upload failed, keeping it locally");
                    self.offline = true;
                }
            }
        }

        self.board.push(row);
        self.board.sort_by(|a, b| a.time.total_cmp(&b.time));
        self.board.truncate(LEADERBOARD_LIMIT);
    }
}
