// HTTP snapshot client for the series endpoint
use crate::application::snapshot_source::{FetchError, SnapshotSource};
use crate::domain::telemetry::{SleepStage, TelemetryRow, TelemetrySnapshot};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct HttpSnapshotClient {
    base_url: String,
    series_path: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct WireSnapshot {
    now: i64,
    #[serde(default)]
    csv: Option<String>,
    rows: Vec<WireRow>,
}

#[derive(Debug, Deserialize)]
struct WireRow {
    time: f64,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    stage: Option<String>,
    #[serde(default)]
    stage_num: Option<f64>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    theta_alpha: Option<f64>,
    #[serde(default)]
    beta_rel: Option<f64>,
    #[serde(default)]
    motion_rms: Option<f64>,
    #[serde(default)]
    eog_sacc: Option<f64>,
    #[serde(default)]
    fac_rate: Option<f64>,
    #[serde(default)]
    eog_on: Option<f64>,
    #[serde(default)]
    eye_act: Option<String>,
    #[serde(default)]
    signal: Option<f64>,
}

impl WireRow {
    fn into_domain(self) -> TelemetryRow {
        TelemetryRow {
            time_ms: self.time as i64,
            // Empty identifiers are treated the same as absent ones.
            subject: self.user.filter(|u| !u.is_empty()),
            display_name: self.display_name.filter(|n| !n.is_empty()),
            stage: self.stage.as_deref().and_then(SleepStage::parse),
            stage_num: self.stage_num,
            confidence: self.confidence,
            theta_alpha: self.theta_alpha,
            beta_rel: self.beta_rel,
            motion_rms: self.motion_rms,
            eog_sacc: self.eog_sacc,
            fac_rate: self.fac_rate,
            eog_on: self.eog_on,
            eye_act: self.eye_act,
            signal: self.signal,
        }
    }
}

impl HttpSnapshotClient {
    pub fn new(base_url: String, series_path: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            series_path,
            client: reqwest::Client::new(),
        }
    }

    fn series_url(&self, limit: usize, subject: Option<&str>) -> String {
        let mut url = format!("{}{}?limit={}", self.base_url, self.series_path, limit);
        if let Some(subject) = subject {
            url.push_str("&user=");
            url.push_str(&urlencoding::encode(subject));
        }
        url
    }
}

/// Parse one series document into a domain snapshot. A document missing
/// `now` or `rows` is malformed as a whole; a row missing an optional metric
/// just carries `None` for it.
fn parse_snapshot(body: &str) -> Result<TelemetrySnapshot, FetchError> {
    let wire: WireSnapshot =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    Ok(TelemetrySnapshot::new(
        wire.now,
        wire.csv,
        wire.rows.into_iter().map(WireRow::into_domain).collect(),
    ))
}

#[async_trait]
impl SnapshotSource for HttpSnapshotClient {
    async fn fetch_snapshot(
        &self,
        limit: usize,
        subject: Option<&str>,
    ) -> Result<TelemetrySnapshot, FetchError> {
        let url = self.series_url(limit, subject);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_snapshot(&body)
    }
}
