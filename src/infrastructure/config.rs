// Dashboard configuration loading
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub service: ServiceSettings,
    #[serde(default)]
    pub poll: PollSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    #[serde(default = "default_series_path")]
    pub series_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollSettings {
    /// Seconds between poll cycles.
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,
    /// Bounded history window requested per cycle; caps memory and
    /// rendering cost however long the recording runs.
    #[serde(default = "default_window_limit")]
    pub window_limit: usize,
    /// Optional server-side subject filter, from the page's addressed
    /// subject.
    #[serde(default)]
    pub subject: Option<String>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            period_secs: default_period_secs(),
            window_limit: default_window_limit(),
            subject: None,
        }
    }
}

fn default_series_path() -> String {
    "/api/series".to_string()
}

fn default_period_secs() -> u64 {
    5
}

fn default_window_limit() -> usize {
    720
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
