// Status badges and latest-reading tiles
use crate::application::surface::StatusPanel;
use crate::domain::status::{IndicatorKind, Reading, StatusIndicator};
use crate::domain::telemetry::SubjectSeries;
use chrono::{TimeZone, Utc};

/// Placeholder shown for a value with no reading. Distinct from zero.
const NO_VALUE: &str = "—";

/// Format a nullable metric for display. An absent or non-finite value
/// prints the placeholder, never a number.
pub fn format_metric(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.digits$}"),
        _ => NO_VALUE.to_string(),
    }
}

/// Badge state for an indicator, mirroring the page's ok/warn badge classes.
pub fn badge_state(indicator: &StatusIndicator) -> &'static str {
    match (indicator.kind, indicator.reading) {
        (_, Reading::Unknown) => "unknown",
        (IndicatorKind::SignalOk, Reading::No) => "warn",
        (IndicatorKind::FacElevated, Reading::Yes) => "warn",
        (IndicatorKind::FacElevated, Reading::No) => "ok",
        (_, Reading::Yes) => "ok",
        (_, Reading::No) => "",
    }
}

/// One subject's latest readings, pre-formatted for the tile row.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectTiles {
    pub subject: String,
    pub label: String,
    pub stage: String,
    pub confidence: String,
    pub theta_alpha: String,
    pub beta_rel: String,
    pub motion_rms: String,
    pub eog_sacc: String,
    pub fac_rate: String,
    pub signal: String,
}

/// The badge-and-tile panel above the charts. Keeps the last successful
/// snapshot's timestamp, so a skipped cycle shows up only as staleness.
#[derive(Debug, Default)]
pub struct StatusBoard {
    source: Option<String>,
    updated_at_ms: Option<i64>,
    indicators: Vec<StatusIndicator>,
    tiles: Vec<SubjectTiles>,
    no_data: bool,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_badge(&self) -> String {
        format!("CSV: {}", self.source.as_deref().unwrap_or(NO_VALUE))
    }

    /// Wall-clock label of the last successful snapshot, or the placeholder
    /// before the first one arrives.
    pub fn updated_badge(&self) -> String {
        let stamp = self
            .updated_at_ms
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .map(|t| t.format("%H:%M:%S").to_string());
        format!("Status: {}", stamp.as_deref().unwrap_or(NO_VALUE))
    }

    pub fn indicators(&self) -> &[StatusIndicator] {
        &self.indicators
    }

    pub fn tiles(&self) -> &[SubjectTiles] {
        &self.tiles
    }

    pub fn is_no_data(&self) -> bool {
        self.no_data
    }
}

impl StatusPanel for StatusBoard {
    fn apply_status(
        &mut self,
        now_ms: i64,
        source: Option<&str>,
        groups: &[SubjectSeries],
        indicators: &[StatusIndicator],
    ) {
        self.no_data = false;
        self.updated_at_ms = Some(now_ms);
        self.source = source.map(str::to_string);
        self.indicators = indicators.to_vec();
        self.tiles = groups
            .iter()
            .map(|group| {
                let last = group.last_row();
                SubjectTiles {
                    subject: group.subject.clone(),
                    label: group.label().to_string(),
                    stage: last
                        .and_then(|r| r.stage)
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_else(|| NO_VALUE.to_string()),
                    confidence: format_metric(last.and_then(|r| r.confidence), 2),
                    theta_alpha: format_metric(last.and_then(|r| r.theta_alpha), 2),
                    beta_rel: format_metric(last.and_then(|r| r.beta_rel), 2),
                    motion_rms: format_metric(last.and_then(|r| r.motion_rms), 3),
                    eog_sacc: format_metric(last.and_then(|r| r.eog_sacc), 2),
                    fac_rate: format_metric(last.and_then(|r| r.fac_rate), 2),
                    signal: format_metric(last.and_then(|r| r.signal), 2),
                }
            })
            .collect();

        for tile in &self.tiles {
            tracing::debug!(
                subject = %tile.subject,
                stage = %tile.stage,
                signal = %tile.signal,
                "board updated"
            );
        }
        for indicator in &self.indicators {
            if badge_state(indicator) == "warn" {
                tracing::warn!(
                    subject = %indicator.subject,
                    badge = indicator.kind.label(),
                    metric = ?indicator.metric,
                    "degraded reading"
                );
            }
        }
    }

    fn set_empty(&mut self, now_ms: i64, source: Option<&str>) {
        self.no_data = true;
        self.updated_at_ms = Some(now_ms);
        self.source = source.map(str::to_string);
        self.indicators.clear();
        self.tiles.clear();
    }
}
