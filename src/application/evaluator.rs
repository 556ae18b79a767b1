// Threshold-based status evaluation
use crate::domain::status::{IndicatorKind, Reading, StatusIndicator};
use crate::domain::telemetry::SubjectSeries;

/// EOG sensor counts as on at or above this flag level.
pub const EOG_ON_MIN: f64 = 0.5;
/// Signal quality at or above this is healthy; below it the subject renders
/// in a warning state but data keeps flowing.
pub const SIGNAL_OK_MIN: f64 = 0.3;
/// Fast-eye-closure rate at or above this is flagged as elevated.
pub const FAC_ELEVATED_MIN: f64 = 0.02;

/// Evaluate the four indicators for each subject from its most recent row.
/// A subject with no rows, or a row missing the metric, reads `Unknown` so
/// the board can tell "no data" apart from a measured zero.
pub fn evaluate(groups: &[SubjectSeries]) -> Vec<StatusIndicator> {
    let mut indicators = Vec::with_capacity(groups.len() * 4);

    for group in groups {
        let last = group.last_row();
        indicators.push(threshold_indicator(
            group,
            IndicatorKind::EogActive,
            last.and_then(|r| r.eog_on),
            EOG_ON_MIN,
        ));
        indicators.push(threshold_indicator(
            group,
            IndicatorKind::SignalOk,
            last.and_then(|r| r.signal),
            SIGNAL_OK_MIN,
        ));
        indicators.push(eye_activity_indicator(
            group,
            last.and_then(|r| r.eye_act.as_deref()),
        ));
        indicators.push(threshold_indicator(
            group,
            IndicatorKind::FacElevated,
            last.and_then(|r| r.fac_rate),
            FAC_ELEVATED_MIN,
        ));
    }

    indicators
}

fn threshold_indicator(
    group: &SubjectSeries,
    kind: IndicatorKind,
    metric: Option<f64>,
    min: f64,
) -> StatusIndicator {
    let reading = match metric {
        Some(value) if value >= min => Reading::Yes,
        Some(_) => Reading::No,
        None => Reading::Unknown,
    };
    StatusIndicator {
        subject: group.subject.clone(),
        kind,
        reading,
        metric,
    }
}

fn eye_activity_indicator(group: &SubjectSeries, label: Option<&str>) -> StatusIndicator {
    let reading = match label {
        Some(label) if is_lateral_look(label) => Reading::Yes,
        Some(_) => Reading::No,
        None => Reading::Unknown,
    };
    StatusIndicator {
        subject: group.subject.clone(),
        kind: IndicatorKind::EyeActivity,
        reading,
        metric: None,
    }
}

/// The eye-action labels vary by engine generation ("look_left",
/// "look left", "lookLeft"); fold case and separators before matching.
fn is_lateral_look(label: &str) -> bool {
    let folded: String = label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase();
    folded == "lookleft" || folded == "lookright"
}
