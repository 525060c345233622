use std::cmp::Reverse;

use crate::model::errors::{ReorderError, ValidationError};
use crate::model::observation::ObservationTable;
use crate::model::ordering::{Block, OrderedSample, PeakAssignment, RankMap, SampleOrdering};
use crate::model::policy::{CategoryOrder, ReorderParams};
use crate::pipeline::stage2_peak::compute_peak_assignment;
use crate::pipeline::stage3_rank::{compute_rank, group_by_peak};

pub fn reorder(
    table: &ObservationTable,
    params: &ReorderParams,
) -> Result<SampleOrdering, ReorderError> {
    let peaks = compute_peak_assignment(table)?;
    let ranks = compute_rank(table, &peaks)?;
    build_ordering(table, &peaks, &ranks, params)
}

/// Peak categories that own at least one sample, in block order.
pub fn block_order(
    table: &ObservationTable,
    peaks: &PeakAssignment,
    policy: &CategoryOrder,
) -> Result<Vec<usize>, ReorderError> {
    let groups = group_by_peak(peaks);
    let mut present: Vec<usize> = groups.keys().copied().collect();

    match policy {
        CategoryOrder::Alphabetical => {
            present.sort_by(|&a, &b| table.categories[a].cmp(&table.categories[b]));
        }
        CategoryOrder::GroupSize => {
            present.sort_by_key(|c| (Reverse(groups[c].len()), table.categories[*c].as_str()));
        }
        CategoryOrder::Custom(list) => {
            let mut ordered = Vec::with_capacity(present.len());
            for name in list {
                if let Some(c) = table.category_id(name) {
                    if groups.contains_key(&c) && !ordered.contains(&c) {
                        ordered.push(c);
                    }
                }
            }
            if let Some(&c) = present.iter().find(|&&c| !ordered.contains(&c)) {
                return Err(ValidationError::CategoryNotInOrder {
                    category: table.categories[c].clone(),
                }
                .into());
            }
            present = ordered;
        }
    }

    Ok(present)
}

/// Sorts samples on the composed key `(group_index, signed_rank)`.
pub fn build_ordering(
    table: &ObservationTable,
    peaks: &PeakAssignment,
    ranks: &RankMap,
    params: &ReorderParams,
) -> Result<SampleOrdering, ReorderError> {
    let blocks_by_category = block_order(table, peaks, &params.category_order)?;
    let mut group_index = vec![usize::MAX; table.n_categories()];
    for (idx, &c) in blocks_by_category.iter().enumerate() {
        group_index[c] = idx;
    }

    let sign = params.direction.sign();
    let mut order: Vec<usize> = (0..peaks.peaks.len()).collect();
    order.sort_by_key(|&s| {
        (
            group_index[peaks.peaks[s].category],
            sign * i64::from(ranks.ranks[s]),
        )
    });

    let mut samples = Vec::with_capacity(order.len());
    let mut blocks: Vec<Block> = Vec::with_capacity(blocks_by_category.len());
    for (pos, sample) in order.into_iter().enumerate() {
        let peak = peaks.peaks[sample];
        let block = group_index[peak.category];
        if blocks.len() <= block {
            blocks.push(Block {
                category: peak.category,
                start: pos,
                len: 0,
            });
        }
        blocks[block].len += 1;
        samples.push(OrderedSample {
            sample,
            peak_category: peak.category,
            peak_value: peak.value,
            rank: ranks.ranks[sample],
            block,
        });
    }

    tracing::debug!(
        "ordered {} samples into {} blocks",
        samples.len(),
        blocks.len()
    );

    Ok(SampleOrdering { samples, blocks })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_reorder.rs"]
mod tests;
