use std::collections::BTreeMap;

use crate::model::errors::ReorderError;
use crate::model::observation::ObservationTable;
use crate::model::ordering::{PeakAssignment, RankMap};

/// Samples per peak category, each list in input order.
pub fn group_by_peak(peaks: &PeakAssignment) -> BTreeMap<usize, Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (sample, peak) in peaks.peaks.iter().enumerate() {
        groups.entry(peak.category).or_default().push(sample);
    }
    groups
}

pub fn compute_rank(
    table: &ObservationTable,
    peaks: &PeakAssignment,
) -> Result<RankMap, ReorderError> {
    if table.is_empty() {
        return Err(ReorderError::EmptyInput);
    }
    if peaks.peaks.len() != table.n_samples() {
        let sample = table
            .samples
            .get(peaks.peaks.len())
            .cloned()
            .unwrap_or_else(|| format!("#{}", table.n_samples() + 1));
        return Err(ReorderError::InconsistentSample { sample });
    }

    let mut ranks = vec![0u32; table.n_samples()];
    for (category, members) in group_by_peak(peaks) {
        let mut keyed = Vec::with_capacity(members.len());
        for sample in members {
            let value = table.value(sample, category).ok_or_else(|| {
                ReorderError::InconsistentSample {
                    sample: table.samples[sample].clone(),
                }
            })?;
            keyed.push((sample, value));
        }
        // stable: equal values keep input order
        keyed.sort_by(|a, b| a.1.total_cmp(&b.1));
        for (pos, (sample, _)) in keyed.into_iter().enumerate() {
            ranks[sample] = pos as u32 + 1;
        }
    }

    Ok(RankMap { ranks })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_rank.rs"]
mod tests;
