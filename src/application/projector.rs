// Chart series projection per subject and metric
use crate::domain::chart::{ChartPoint, ChartSeries, LineStyle, SurfaceKind};
use crate::domain::telemetry::{SubjectSeries, TelemetryRow};

/// Fixed subject palette. Subjects outside the table fall back to
/// `FALLBACK_COLOR`, so the lookup is total.
const SUBJECT_COLORS: &[(&str, &str)] = &[
    ("mitachi", "#60a5fa"),
    ("hiratsuka", "#34d399"),
    ("gotou", "#f59e0b"),
];

/// Color for any subject without a palette entry.
const FALLBACK_COLOR: &str = "#94a3b8";

pub fn color_for(subject: &str) -> &'static str {
    SUBJECT_COLORS
        .iter()
        .find(|(id, _)| *id == subject)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// The metrics plotted across the five surfaces. The spectral surface takes
/// two series per subject; every other surface takes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    StageOrdinal,
    ThetaAlpha,
    BetaRel,
    MotionRms,
    EogSaccadeRate,
    FacRate,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::StageOrdinal,
        Metric::ThetaAlpha,
        Metric::BetaRel,
        Metric::MotionRms,
        Metric::EogSaccadeRate,
        Metric::FacRate,
    ];

    pub fn surface(&self) -> SurfaceKind {
        match self {
            Self::StageOrdinal => SurfaceKind::Hypnogram,
            Self::ThetaAlpha | Self::BetaRel => SurfaceKind::SpectralBands,
            Self::MotionRms => SurfaceKind::Motion,
            Self::EogSaccadeRate => SurfaceKind::Ocular,
            Self::FacRate => SurfaceKind::BehavioralRate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StageOrdinal => "Stage",
            Self::ThetaAlpha => "θ/α",
            Self::BetaRel => "β (rel)",
            Self::MotionRms => "Motion RMS",
            Self::EogSaccadeRate => "EOG sacc/s",
            Self::FacRate => "FAC Rate",
        }
    }

    fn select(&self, row: &TelemetryRow) -> Option<f64> {
        match self {
            Self::StageOrdinal => row.stage_num,
            Self::ThetaAlpha => row.theta_alpha,
            Self::BetaRel => row.beta_rel,
            Self::MotionRms => row.motion_rms,
            Self::EogSaccadeRate => row.eog_sacc,
            Self::FacRate => row.fac_rate,
        }
    }

    /// Relative β is drawn dashed so two bands for the same subject stay
    /// distinguishable on the shared spectral surface.
    fn style(&self) -> LineStyle {
        match self {
            Self::BetaRel => LineStyle::Dashed,
            _ => LineStyle::Solid,
        }
    }
}

/// Project one subject's rows onto one metric. Nulls are preserved as gaps
/// so a missing reading never plots as zero. The hypnogram is the exception:
/// null-ordinal rows are dropped outright, since a gap on a stepped
/// categorical plot is indistinguishable from "not yet recorded".
pub fn project(group: &SubjectSeries, metric: Metric) -> ChartSeries {
    let hypnogram = metric == Metric::StageOrdinal;
    let points = group
        .rows
        .iter()
        .filter_map(|row| {
            let value = metric.select(row);
            if hypnogram && value.is_none() {
                return None;
            }
            Some(ChartPoint {
                time_ms: row.time_ms,
                value,
                stage: if hypnogram { row.stage } else { None },
                confidence: if hypnogram { row.confidence } else { None },
            })
        })
        .collect();

    ChartSeries {
        subject: group.subject.clone(),
        label: format!("{} - {}", group.label(), metric.label()),
        color: color_for(&group.subject).to_string(),
        style: metric.style(),
        points,
    }
}

/// All series for one surface, subject-major in first-seen order so colors
/// and z-order stay stable across cycles.
pub fn project_surface(groups: &[SubjectSeries], surface: SurfaceKind) -> Vec<ChartSeries> {
    let mut series = Vec::new();
    for group in groups {
        for metric in Metric::ALL {
            if metric.surface() == surface {
                series.push(project(group, metric));
            }
        }
    }
    series
}
