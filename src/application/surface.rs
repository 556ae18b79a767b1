// Rendering surface ports and the surface set
use crate::domain::chart::{ChartSeries, SurfaceKind};
use crate::domain::status::StatusIndicator;
use crate::domain::telemetry::SubjectSeries;

/// One rendering surface. `apply_series` replaces the whole dataset in a
/// single step; there is no incremental patching, so a surface can never be
/// observed holding a partially-updated set of series.
pub trait ChartSurface: Send {
    fn apply_series(&mut self, series: Vec<ChartSeries>);

    /// Hide or show the surface. Driven by the empty-state presentation.
    fn set_hidden(&mut self, hidden: bool);
}

/// Badge-and-tile panel fed from each rendered snapshot.
pub trait StatusPanel: Send {
    /// Replace the panel's contents from one rendered snapshot.
    fn apply_status(
        &mut self,
        now_ms: i64,
        source: Option<&str>,
        groups: &[SubjectSeries],
        indicators: &[StatusIndicator],
    );

    /// Reset to the no-data placeholder, keeping the snapshot metadata.
    fn set_empty(&mut self, now_ms: i64, source: Option<&str>);
}

/// Owns one surface per `SurfaceKind` plus the shared empty-state toggle.
/// The controller holds the only reference, so there is exactly one writer
/// per surface and no registry of shared mutable handles.
pub struct ChartSurfaceSet<S> {
    surfaces: Vec<(SurfaceKind, S)>,
    empty: bool,
}

impl<S: ChartSurface> ChartSurfaceSet<S> {
    pub fn new(surfaces: Vec<(SurfaceKind, S)>) -> Self {
        Self {
            surfaces,
            empty: false,
        }
    }

    pub fn apply(&mut self, kind: SurfaceKind, series: Vec<ChartSeries>) {
        if let Some((_, surface)) = self.surfaces.iter_mut().find(|(k, _)| *k == kind) {
            surface.apply_series(series);
        }
    }

    /// Toggle the no-data presentation. Re-applying the current value is a
    /// no-op, so repeated empty snapshots never make the surfaces flicker.
    pub fn set_empty_state(&mut self, empty: bool) {
        if self.empty == empty {
            return;
        }
        self.empty = empty;
        for (_, surface) in &mut self.surfaces {
            surface.set_hidden(empty);
        }
    }

    /// Whether the placeholder notice is currently shown instead of data.
    pub fn is_empty_state(&self) -> bool {
        self.empty
    }

    pub fn get(&self, kind: SurfaceKind) -> Option<&S> {
        self.surfaces
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, surface)| surface)
    }
}
