use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::model::observation::ObservationTable;
use crate::model::ordering::SampleOrdering;
use crate::model::policy::{CategoryOrder, ReorderParams};
use crate::pipeline::stage1_validate::ValidationReport;
use crate::report::json::{render_pipeline_step_json, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{
    BlockSummary, InputSummary, PolicySummary, Readability, SummaryData, count_runs,
    format_f64_6, fragmentation_reduction, median,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RunMode {
    #[default]
    Standalone,
    Pipeline,
}

impl RunMode {
    pub fn name(self) -> &'static str {
        match self {
            RunMode::Standalone => "standalone",
            RunMode::Pipeline => "pipeline",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub table: &'a ObservationTable,
    pub ordering: &'a SampleOrdering,
    pub validation: &'a ValidationReport,
    pub params: &'a ReorderParams,

    pub input_path: String,
    pub input_format: String,
    pub input_delimiter: String,
    pub run_mode: RunMode,

    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_order_tsv(input, &out_dir.join("order.tsv"))?;
    write_ordered_table(input, &out_dir.join("ordered_table.tsv"))?;
    write_blocks_tsv(input, &out_dir.join("blocks.tsv"))?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(&summary);
    write_text(&out_dir.join("report.txt"), &report)?;

    if input.run_mode == RunMode::Pipeline {
        let json = render_pipeline_step_json(&summary)?;
        write_text(&out_dir.join("pipeline_step.json"), &json)?;
    }

    tracing::info!(
        "wrote reports to {} ({} samples, {} blocks)",
        out_dir.display(),
        input.ordering.samples.len(),
        input.ordering.blocks.len()
    );

    Ok(())
}

fn write_order_tsv(input: &Stage5Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "position\tsample\tpeak_category\tpeak_value\trank\tblock\ttotal"
    )?;

    for (pos, row) in input.ordering.samples.iter().enumerate() {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            pos + 1,
            input.table.samples[row.sample],
            input.table.categories[row.peak_category],
            format_f64_6(row.peak_value),
            row.rank,
            row.block + 1,
            format_f64_6(input.validation.totals[row.sample]),
        )?;
    }

    w.flush()
}

/// Long table in plotting order: samples as ordered, categories in block order
/// followed by categories that never peak.
fn write_ordered_table(input: &Stage5Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "position\tsample\tcategory\tvalue")?;

    let categories = stack_order(input.table, input.ordering);
    for (pos, row) in input.ordering.samples.iter().enumerate() {
        let sample = &input.table.samples[row.sample];
        for &c in &categories {
            if let Some(value) = input.table.value(row.sample, c) {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}",
                    pos + 1,
                    sample,
                    input.table.categories[c],
                    format_f64_6(value)
                )?;
            }
        }
    }

    w.flush()
}

fn write_blocks_tsv(input: &Stage5Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "block\tcategory\tn_samples\tfirst\tlast\tpeak_min\tpeak_median\tpeak_max"
    )?;

    for block in block_summaries(input) {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            block.block,
            block.category,
            block.n_samples,
            block.first,
            block.last,
            format_f64_6(block.peak_min),
            format_f64_6(block.peak_median),
            format_f64_6(block.peak_max),
        )?;
    }

    w.flush()
}

pub fn stack_order(table: &ObservationTable, ordering: &SampleOrdering) -> Vec<usize> {
    let mut out: Vec<usize> = ordering.blocks.iter().map(|b| b.category).collect();
    for c in 0..table.n_categories() {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

fn block_summaries(input: &Stage5Input<'_>) -> Vec<BlockSummary> {
    let n_samples = input.ordering.samples.len().max(1);
    input
        .ordering
        .blocks
        .iter()
        .enumerate()
        .map(|(idx, block)| {
            let members = input.ordering.block_samples(block);
            let values: Vec<f64> = members.iter().map(|m| m.peak_value).collect();
            let name = |i: usize| input.table.samples[members[i].sample].clone();
            BlockSummary {
                block: idx + 1,
                category: input.table.categories[block.category].clone(),
                n_samples: block.len,
                fraction: block.len as f64 / n_samples as f64,
                first: name(0),
                last: name(members.len() - 1),
                peak_min: values.iter().copied().fold(f64::INFINITY, f64::min),
                peak_median: median(&values),
                peak_max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            }
        })
        .collect()
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let peak_by_sample = input.ordering.peak_by_sample();
    let after: Vec<usize> = input
        .ordering
        .samples
        .iter()
        .map(|s| s.peak_category)
        .collect();
    let runs_before = count_runs(&peak_by_sample);
    let runs_after = count_runs(&after);

    let custom_categories = match &input.params.category_order {
        CategoryOrder::Custom(list) => Some(list.clone()),
        _ => None,
    };

    SummaryData {
        tool: input.tool_name.clone(),
        version: input.tool_version.clone(),
        git_hash: input.git_hash.clone(),
        run_mode: input.run_mode.name().to_string(),
        input: InputSummary {
            path: input.input_path.clone(),
            format: input.input_format.clone(),
            delimiter: input.input_delimiter.clone(),
            n_samples: input.validation.n_samples,
            n_categories: input.validation.n_categories,
            n_observations: input.validation.n_observations,
            n_sparse_samples: input.validation.n_sparse_samples,
        },
        policy: PolicySummary {
            category_order: input.params.category_order.name().to_string(),
            custom_categories,
            direction: input.params.direction.name().to_string(),
            strict: input.params.strict,
            expected_total: input.params.expected_total,
            total_tolerance: input.params.total_tolerance,
        },
        n_blocks: input.ordering.blocks.len(),
        n_total_deviations: input.validation.n_total_deviations,
        total_median: median(&input.validation.totals),
        blocks: block_summaries(input),
        readability: Readability {
            runs_before,
            runs_after,
            fragmentation_reduction: fragmentation_reduction(runs_before, runs_after),
        },
        order: input
            .ordering
            .sample_names(input.table)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
