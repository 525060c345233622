use serde::Serialize;

use crate::report::SummaryData;

#[derive(Debug, Serialize)]
struct Artifacts<'a> {
    summary: &'a str,
    primary_metrics: &'a str,
    ordered_table: &'a str,
    blocks: &'a str,
}

#[derive(Debug, Serialize)]
struct OrderColumns<'a> {
    file: &'a str,
    sample_column: &'a str,
    block_column: &'a str,
}

#[derive(Debug, Serialize)]
struct KeyMetrics {
    n_samples: usize,
    n_blocks: usize,
    runs_before: usize,
    runs_after: usize,
}

#[derive(Debug, Serialize)]
struct PipelineStep<'a> {
    tool: &'a str,
    mode: &'a str,
    artifacts: Artifacts<'a>,
    sample_order: OrderColumns<'a>,
    key_metrics: KeyMetrics,
}

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

pub fn render_pipeline_step_json(data: &SummaryData) -> serde_json::Result<String> {
    let step = PipelineStep {
        tool: &data.tool,
        mode: "pipeline",
        artifacts: Artifacts {
            summary: "summary.json",
            primary_metrics: "order.tsv",
            ordered_table: "ordered_table.tsv",
            blocks: "blocks.tsv",
        },
        sample_order: OrderColumns {
            file: "order.tsv",
            sample_column: "sample",
            block_column: "block",
        },
        key_metrics: KeyMetrics {
            n_samples: data.input.n_samples,
            n_blocks: data.n_blocks,
            runs_before: data.readability.runs_before,
            runs_after: data.readability.runs_after,
        },
    };
    serde_json::to_string_pretty(&step)
}
