// Polling controller - orchestrates fetch, partition, evaluate, project, apply
use crate::application::evaluator::evaluate;
use crate::application::partitioner::partition;
use crate::application::projector::project_surface;
use crate::application::snapshot_source::SnapshotSource;
use crate::application::surface::{ChartSurface, ChartSurfaceSet, StatusPanel};
use crate::domain::chart::SurfaceKind;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// What one poll cycle did. Skipped cycles leave every surface holding its
/// last rendered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered { subjects: usize, rows: usize },
    Empty,
    Skipped,
}

pub struct DashboardController<S, P> {
    source: Arc<dyn SnapshotSource>,
    surfaces: ChartSurfaceSet<S>,
    panel: P,
    period: Duration,
    window_limit: usize,
    subject_filter: Option<String>,
}

impl<S: ChartSurface, P: StatusPanel> DashboardController<S, P> {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        surfaces: ChartSurfaceSet<S>,
        panel: P,
        period: Duration,
        window_limit: usize,
        subject_filter: Option<String>,
    ) -> Self {
        Self {
            source,
            surfaces,
            panel,
            period,
            window_limit,
            subject_filter,
        }
    }

    /// Run the polling loop until `shutdown` flips to true. The next cycle is
    /// armed only after the current one completes, so two snapshots can never
    /// race to update the same surface, and once shutdown is observed no
    /// further surface call is made.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.tick().await {
                CycleOutcome::Rendered { subjects, rows } => {
                    tracing::debug!(subjects, rows, "cycle rendered");
                }
                CycleOutcome::Empty => {
                    tracing::debug!("cycle rendered empty window");
                }
                CycleOutcome::Skipped => {}
            }

            tokio::select! {
                _ = tokio::time::sleep(self.period) => {}
                _ = shutdown.changed() => break,
            }
        }
        tracing::info!("polling loop stopped");
    }

    /// One fetch-render cycle. Never fails: fetch errors downgrade to a
    /// skipped cycle and the loop carries on at the next interval.
    pub async fn tick(&mut self) -> CycleOutcome {
        let snapshot = match self
            .source
            .fetch_snapshot(self.window_limit, self.subject_filter.as_deref())
            .await
        {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(%err, "snapshot fetch failed, keeping last rendered state");
                return CycleOutcome::Skipped;
            }
        };

        if snapshot.rows.is_empty() {
            self.surfaces.set_empty_state(true);
            self.panel
                .set_empty(snapshot.now_ms, snapshot.source.as_deref());
            return CycleOutcome::Empty;
        }

        self.surfaces.set_empty_state(false);
        let rows = snapshot.rows.len();
        let groups = partition(snapshot.rows);
        let indicators = evaluate(&groups);

        for kind in SurfaceKind::ALL {
            self.surfaces.apply(kind, project_surface(&groups, kind));
        }
        self.panel.apply_status(
            snapshot.now_ms,
            snapshot.source.as_deref(),
            &groups,
            &indicators,
        );

        CycleOutcome::Rendered {
            subjects: groups.len(),
            rows,
        }
    }

    pub fn surfaces(&self) -> &ChartSurfaceSet<S> {
        &self.surfaces
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::snapshot_source::FetchError;
    use crate::domain::status::StatusIndicator;
    use crate::domain::telemetry::{SubjectSeries, TelemetryRow, TelemetrySnapshot};
    use crate::presentation::surfaces::InMemorySurface;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted source: hands out one queued result per cycle.
    struct ScriptedSource {
        results: Mutex<VecDeque<Result<TelemetrySnapshot, FetchError>>>,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<TelemetrySnapshot, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(results.into()),
            })
        }
    }

    #[async_trait::async_trait]
    impl SnapshotSource for ScriptedSource {
        async fn fetch_snapshot(
            &self,
            _limit: usize,
            _subject: Option<&str>,
        ) -> Result<TelemetrySnapshot, FetchError> {
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::Transport("script exhausted".to_string())))
        }
    }

    /// Minimal panel double; the board itself is tested in presentation.
    #[derive(Default)]
    struct NullPanel {
        applied: usize,
        emptied: usize,
    }

    impl StatusPanel for NullPanel {
        fn apply_status(
            &mut self,
            _now_ms: i64,
            _source: Option<&str>,
            _groups: &[SubjectSeries],
            _indicators: &[StatusIndicator],
        ) {
            self.applied += 1;
        }

        fn set_empty(&mut self, _now_ms: i64, _source: Option<&str>) {
            self.emptied += 1;
        }
    }

    fn all_surfaces() -> ChartSurfaceSet<InMemorySurface> {
        ChartSurfaceSet::new(
            SurfaceKind::ALL
                .iter()
                .map(|&kind| (kind, InMemorySurface::new()))
                .collect(),
        )
    }

    fn controller(
        source: Arc<dyn SnapshotSource>,
    ) -> DashboardController<InMemorySurface, NullPanel> {
        DashboardController::new(
            source,
            all_surfaces(),
            NullPanel::default(),
            Duration::from_secs(5),
            720,
            None,
        )
    }

    fn stage_row(subject: &str, display: &str, time_ms: i64, stage_num: Option<f64>) -> TelemetryRow {
        TelemetryRow {
            time_ms,
            subject: Some(subject.to_string()),
            display_name: Some(display.to_string()),
            stage_num,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_window_shows_empty_state_without_applying_series() {
        let source = ScriptedSource::new(vec![Ok(TelemetrySnapshot::new(
            1_000,
            Some("x".to_string()),
            Vec::new(),
        ))]);
        let mut controller = controller(source);

        assert_eq!(controller.tick().await, CycleOutcome::Empty);
        assert!(controller.surfaces().is_empty_state());
        for kind in SurfaceKind::ALL {
            assert!(controller.surfaces().get(kind).unwrap().series().is_empty());
        }
        assert_eq!(controller.panel().emptied, 1);
        assert_eq!(controller.panel().applied, 0);
    }

    #[tokio::test]
    async fn test_two_subject_hypnogram_end_to_end() {
        let rows = vec![
            stage_row("a", "Alice", 1, Some(3.0)),
            stage_row("b", "Bob", 1, Some(2.0)),
            stage_row("a", "Alice", 2, None),
            stage_row("b", "Bob", 2, Some(1.5)),
            stage_row("a", "Alice", 3, Some(1.0)),
            stage_row("b", "Bob", 3, Some(3.0)),
        ];
        let source = ScriptedSource::new(vec![Ok(TelemetrySnapshot::new(9_000, None, rows))]);
        let mut controller = controller(source);

        assert_eq!(
            controller.tick().await,
            CycleOutcome::Rendered {
                subjects: 2,
                rows: 6
            }
        );

        let hypnogram = controller
            .surfaces()
            .get(SurfaceKind::Hypnogram)
            .unwrap()
            .series();
        assert_eq!(hypnogram.len(), 2);

        let alice = &hypnogram[0];
        assert_eq!(alice.label, "Alice - Stage");
        assert_eq!(
            alice.points.iter().map(|p| (p.time_ms, p.value)).collect::<Vec<_>>(),
            vec![(1, Some(3.0)), (3, Some(1.0))]
        );

        let bob = &hypnogram[1];
        assert_eq!(bob.label, "Bob - Stage");
        assert_eq!(
            bob.points.iter().map(|p| (p.time_ms, p.value)).collect::<Vec<_>>(),
            vec![(1, Some(2.0)), (2, Some(1.5)), (3, Some(3.0))]
        );
    }

    #[tokio::test]
    async fn test_failed_cycle_keeps_previous_series_and_loop_continues() {
        let rows = vec![stage_row("a", "Alice", 1, Some(3.0))];
        let source = ScriptedSource::new(vec![
            Ok(TelemetrySnapshot::new(1_000, None, rows.clone())),
            Err(FetchError::Status(503)),
            Ok(TelemetrySnapshot::new(11_000, None, rows)),
        ]);
        let mut controller = controller(source);

        assert!(matches!(
            controller.tick().await,
            CycleOutcome::Rendered { .. }
        ));
        let before = controller
            .surfaces()
            .get(SurfaceKind::Hypnogram)
            .unwrap()
            .series()
            .to_vec();
        assert!(!before.is_empty());

        // Cycle 2 fails: the stale-but-valid series must survive untouched.
        assert_eq!(controller.tick().await, CycleOutcome::Skipped);
        assert_eq!(
            controller
                .surfaces()
                .get(SurfaceKind::Hypnogram)
                .unwrap()
                .series(),
            before.as_slice()
        );
        assert!(!controller.surfaces().is_empty_state());

        // Cycle 3 is attempted and succeeds.
        assert!(matches!(
            controller.tick().await,
            CycleOutcome::Rendered { .. }
        ));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_skips_like_transport_failure() {
        let source = ScriptedSource::new(vec![Err(FetchError::Malformed(
            "missing field `rows`".to_string(),
        ))]);
        let mut controller = controller(source);

        assert_eq!(controller.tick().await, CycleOutcome::Skipped);
        assert_eq!(controller.panel().applied, 0);
        assert_eq!(controller.panel().emptied, 0);
    }

    #[tokio::test]
    async fn test_data_returning_after_empty_window_restores_surfaces() {
        let rows = vec![stage_row("a", "Alice", 1, Some(2.0))];
        let source = ScriptedSource::new(vec![
            Ok(TelemetrySnapshot::new(1_000, None, Vec::new())),
            Ok(TelemetrySnapshot::new(6_000, None, rows)),
        ]);
        let mut controller = controller(source);

        assert_eq!(controller.tick().await, CycleOutcome::Empty);
        assert!(controller.surfaces().is_empty_state());

        assert!(matches!(
            controller.tick().await,
            CycleOutcome::Rendered { .. }
        ));
        assert!(!controller.surfaces().is_empty_state());
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_and_survives_failures() {
        // Every cycle fails; the loop must keep going until cancelled.
        let source = ScriptedSource::new(Vec::new());
        let controller = DashboardController::new(
            source,
            all_surfaces(),
            NullPanel::default(),
            Duration::from_millis(1),
            720,
            None,
        );

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(controller.run(rx));
        tokio::time::sleep(Duration::from_millis(20)).await;

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
