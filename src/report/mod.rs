use serde::Serialize;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub path: String,
    pub format: String,
    pub delimiter: String,
    pub n_samples: usize,
    pub n_categories: usize,
    pub n_observations: usize,
    pub n_sparse_samples: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicySummary {
    pub category_order: String,
    pub custom_categories: Option<Vec<String>>,
    pub direction: String,
    pub strict: bool,
    pub expected_total: Option<f64>,
    pub total_tolerance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockSummary {
    pub block: usize,
    pub category: String,
    pub n_samples: usize,
    pub fraction: f64,
    pub first: String,
    pub last: String,
    pub peak_min: f64,
    pub peak_median: f64,
    pub peak_max: f64,
}

/// Peak-category runs along the sample axis, before and after reordering.
#[derive(Debug, Clone, Serialize)]
pub struct Readability {
    pub runs_before: usize,
    pub runs_after: usize,
    pub fragmentation_reduction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub git_hash: Option<String>,
    pub run_mode: String,
    pub input: InputSummary,
    pub policy: PolicySummary,
    pub n_blocks: usize,
    pub n_total_deviations: usize,
    pub total_median: f64,
    pub blocks: Vec<BlockSummary>,
    pub readability: Readability,
    pub order: Vec<String>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

/// Number of maximal runs of equal adjacent keys.
pub fn count_runs(keys: &[usize]) -> usize {
    if keys.is_empty() {
        return 0;
    }
    1 + keys.windows(2).filter(|w| w[0] != w[1]).count()
}

pub fn fragmentation_reduction(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    1.0 - after as f64 / before as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
