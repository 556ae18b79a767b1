// Chart series domain models
use super::telemetry::SleepStage;

/// Rendering surfaces the dashboard keeps in sync with each snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Hypnogram,
    SpectralBands,
    Motion,
    Ocular,
    BehavioralRate,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 5] = [
        SurfaceKind::Hypnogram,
        SurfaceKind::SpectralBands,
        SurfaceKind::Motion,
        SurfaceKind::Ocular,
        SurfaceKind::BehavioralRate,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// One plotted point. `value: None` renders as a gap in the line; stage and
/// confidence ride along for hypnogram tooltips only.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub time_ms: i64,
    pub value: Option<f64>,
    pub stage: Option<SleepStage>,
    pub confidence: Option<f64>,
}

impl ChartPoint {
    pub fn new(time_ms: i64, value: Option<f64>) -> Self {
        Self {
            time_ms,
            value,
            stage: None,
            confidence: None,
        }
    }
}

/// A named, colored series scoped to one subject and one metric, applied to
/// exactly one rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub subject: String,
    pub label: String,
    pub color: String,
    pub style: LineStyle,
    pub points: Vec<ChartPoint>,
}
