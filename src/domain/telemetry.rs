// Telemetry data domain models

/// Reserved group key for rows that arrive without a subject identifier.
pub const UNKNOWN_SUBJECT: &str = "unknown";

/// Classified sleep stage labels emitted by the upstream engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepStage {
    Wake,
    LightNrem,
    Rem,
    Deep,
}

impl SleepStage {
    /// Parse the classifier's stage label. Unrecognized labels are treated
    /// the same as an absent stage.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Wake" => Some(Self::Wake),
            "Light_NREM_candidate" => Some(Self::LightNrem),
            "REM_candidate" => Some(Self::Rem),
            "Deep_candidate" => Some(Self::Deep),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wake => "Wake",
            Self::LightNrem => "Light_NREM_candidate",
            Self::Rem => "REM_candidate",
            Self::Deep => "Deep_candidate",
        }
    }
}

/// One observation from the classification service. Every metric is optional;
/// an absent value must stay absent all the way to the rendered gap, never
/// collapsing to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryRow {
    pub time_ms: i64,
    pub subject: Option<String>,
    pub display_name: Option<String>,
    pub stage: Option<SleepStage>,
    pub stage_num: Option<f64>,
    pub confidence: Option<f64>,
    pub theta_alpha: Option<f64>,
    pub beta_rel: Option<f64>,
    pub motion_rms: Option<f64>,
    pub eog_sacc: Option<f64>,
    pub fac_rate: Option<f64>,
    pub eog_on: Option<f64>,
    pub eye_act: Option<String>,
    pub signal: Option<f64>,
}

/// The result of one poll: rows are ordered by non-decreasing timestamp
/// across the whole window, with different subjects interleaved in arrival
/// order. Discarded after projection; nothing outlives the cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub now_ms: i64,
    pub source: Option<String>,
    pub rows: Vec<TelemetryRow>,
}

impl TelemetrySnapshot {
    pub fn new(now_ms: i64, source: Option<String>, rows: Vec<TelemetryRow>) -> Self {
        Self {
            now_ms,
            source,
            rows,
        }
    }
}

/// One subject's ordered slice of a snapshot, rebuilt every cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectSeries {
    pub subject: String,
    pub display_name: Option<String>,
    pub rows: Vec<TelemetryRow>,
}

impl SubjectSeries {
    pub fn new(subject: String) -> Self {
        Self {
            subject,
            display_name: None,
            rows: Vec::new(),
        }
    }

    /// Append a row, adopting the first display name seen for this subject.
    pub fn push(&mut self, row: TelemetryRow) {
        if self.display_name.is_none() {
            self.display_name = row.display_name.clone();
        }
        self.rows.push(row);
    }

    /// Name shown on chart labels and badges.
    pub fn label(&self) -> &str {
        match &self.display_name {
            Some(name) => name,
            None if self.subject == UNKNOWN_SUBJECT => "Unknown",
            None => &self.subject,
        }
    }

    pub fn last_row(&self) -> Option<&TelemetryRow> {
        self.rows.last()
    }
}
