// Subject partitioning for snapshot rows
use crate::domain::telemetry::{SubjectSeries, TelemetryRow, UNKNOWN_SUBJECT};
use std::collections::HashMap;

/// Group snapshot rows into per-subject series, preserving each subject's
/// relative row order. Groups come back in first-seen order, which is what
/// the rendering layer keys colors and z-order off, so the result is
/// reproducible for a fixed input regardless of map iteration order. Rows
/// without a subject id land in the reserved unknown group rather than being
/// dropped.
pub fn partition(rows: Vec<TelemetryRow>) -> Vec<SubjectSeries> {
    let mut groups: Vec<SubjectSeries> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let key = row
            .subject
            .clone()
            .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string());
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = groups.len();
                index.insert(key.clone(), slot);
                groups.push(SubjectSeries::new(key));
                slot
            }
        };
        groups[slot].push(row);
    }

    groups
}
