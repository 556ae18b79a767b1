// In-memory rendering surface for the host page
use crate::application::surface::ChartSurface;
use crate::domain::chart::ChartSeries;

/// Surface handle that retains the currently displayed series between
/// cycles, the way a chart widget keeps its datasets until replaced.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    series: Vec<ChartSeries>,
    hidden: bool,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl ChartSurface for InMemorySurface {
    fn apply_series(&mut self, series: Vec<ChartSeries>) {
        tracing::debug!(count = series.len(), "surface dataset replaced");
        self.series = series;
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}
