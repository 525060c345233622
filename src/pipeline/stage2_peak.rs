use crate::model::errors::ReorderError;
use crate::model::observation::ObservationTable;
use crate::model::ordering::{Peak, PeakAssignment};

/// Dominant category per sample. Ties keep the category seen first for that sample.
pub fn compute_peak_assignment(table: &ObservationTable) -> Result<PeakAssignment, ReorderError> {
    if table.is_empty() {
        return Err(ReorderError::EmptyInput);
    }

    let mut peaks = Vec::with_capacity(table.n_samples());
    for (sample, entries) in table.entries.iter().enumerate() {
        let Some((first, rest)) = entries.split_first() else {
            return Err(ReorderError::InconsistentSample {
                sample: table.samples[sample].clone(),
            });
        };
        let mut best = *first;
        for entry in rest {
            if entry.value > best.value {
                best = *entry;
            }
        }
        peaks.push(Peak {
            category: best.category,
            value: best.value,
        });
    }

    Ok(PeakAssignment { peaks })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_peak.rs"]
mod tests;
