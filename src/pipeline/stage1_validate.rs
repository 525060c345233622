use crate::model::errors::{ReorderError, ValidationError};
use crate::model::observation::ObservationTable;
use crate::model::policy::{CategoryOrder, ReorderParams};

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub n_samples: usize,
    pub n_categories: usize,
    pub n_observations: usize,
    pub totals: Vec<f64>,
    /// Samples lacking at least one category (only non-zero with `strict` off).
    pub n_sparse_samples: usize,
    pub n_total_deviations: usize,
}

pub fn run_stage1(
    table: &ObservationTable,
    params: &ReorderParams,
) -> Result<ValidationReport, ReorderError> {
    if table.is_empty() {
        return Err(ReorderError::EmptyInput);
    }

    let n_categories = table.n_categories();
    for (c, name) in table.categories.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "category",
                context: format!("category #{}", c + 1),
            }
            .into());
        }
    }

    let mut n_sparse_samples = 0usize;
    let mut seen = vec![false; n_categories];
    for (s, entries) in table.entries.iter().enumerate() {
        let sample = &table.samples[s];
        if sample.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "sample",
                context: format!("sample #{}", s + 1),
            }
            .into());
        }
        if entries.is_empty() {
            return Err(ReorderError::InconsistentSample {
                sample: sample.clone(),
            });
        }

        seen.iter_mut().for_each(|v| *v = false);
        for entry in entries {
            let category = &table.categories[entry.category];
            if seen[entry.category] {
                return Err(ValidationError::DuplicateCategory {
                    sample: sample.clone(),
                    category: category.clone(),
                }
                .into());
            }
            seen[entry.category] = true;

            if !entry.value.is_finite() {
                return Err(ValidationError::NonFiniteValue {
                    sample: sample.clone(),
                    category: category.clone(),
                }
                .into());
            }
            if entry.value < 0.0 {
                return Err(ValidationError::NegativeValue {
                    sample: sample.clone(),
                    category: category.clone(),
                    value: entry.value,
                }
                .into());
            }
        }

        if let Some(missing) = seen.iter().position(|&v| !v) {
            if params.strict {
                return Err(ValidationError::MissingCategory {
                    sample: sample.clone(),
                    category: table.categories[missing].clone(),
                }
                .into());
            }
            n_sparse_samples += 1;
        }
    }

    if let CategoryOrder::Custom(list) = &params.category_order {
        for category in &table.categories {
            if !list.iter().any(|c| c == category) {
                return Err(ValidationError::CategoryNotInOrder {
                    category: category.clone(),
                }
                .into());
            }
        }
    }

    let totals: Vec<f64> = (0..table.n_samples()).map(|s| table.total(s)).collect();
    let mut n_total_deviations = 0usize;
    if let Some(expected) = params.expected_total {
        for (s, &total) in totals.iter().enumerate() {
            if (total - expected).abs() > params.total_tolerance {
                n_total_deviations += 1;
                tracing::debug!(
                    sample = %table.samples[s],
                    total,
                    expected,
                    "sample total deviates from expected"
                );
            }
        }
        if n_total_deviations > 0 {
            tracing::warn!(
                "{} of {} samples deviate from expected total {} by more than {}",
                n_total_deviations,
                totals.len(),
                expected,
                params.total_tolerance
            );
        }
    }

    if n_sparse_samples > 0 {
        tracing::warn!(
            "{} samples lack at least one category; absent categories are not treated as zero",
            n_sparse_samples
        );
    }

    Ok(ValidationReport {
        n_samples: table.n_samples(),
        n_categories,
        n_observations: table.n_observations(),
        totals,
        n_sparse_samples,
        n_total_deviations,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
