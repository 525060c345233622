mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::input::{Delimiter, InputError, LoadOptions, TableFormat, load_table};
use crate::model::errors::ReorderError;
use crate::model::policy::{CategoryOrder, Direction, ReorderParams};
use crate::pipeline::stage1_validate::run_stage1;
use crate::pipeline::stage4_reorder::reorder;
use crate::pipeline::stage5_report::{RunMode, Stage5Input, write_reports};

#[derive(Debug, Parser)]
#[command(
    name = "kira-stackorder",
    version,
    about = "Peak-grouped sample ordering for stacked composition charts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reorder samples of a composition table and write the ordering reports.
    Run(RunArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CategoryOrderArg {
    Alphabetical,
    GroupSize,
    Custom,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = TableFormat::Auto)]
    format: TableFormat,
    #[arg(long, value_enum)]
    delimiter: Option<Delimiter>,
    #[arg(long, value_enum)]
    category_order: Option<CategoryOrderArg>,
    /// Block order for `--category-order custom`, comma separated.
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,
    #[arg(long, value_enum, default_value_t = Direction::Ascending)]
    direction: Direction,
    /// Accept samples that lack some categories.
    #[arg(long)]
    allow_sparse: bool,
    #[arg(long)]
    expected_total: Option<f64>,
    #[arg(long, default_value_t = 0.5)]
    total_tolerance: f64,
    #[arg(long, value_enum, default_value_t = RunMode::Standalone)]
    run_mode: RunMode,
}

#[derive(Debug, Clone)]
struct RunConfig {
    input: PathBuf,
    out_dir: PathBuf,
    load: LoadOptions,
    params: ReorderParams,
    run_mode: RunMode,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Reorder(#[from] ReorderError),
    #[error("failed to write reports: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Usage(String),
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => build_config(args).and_then(|config| run(&config)),
    };
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &RunConfig) -> Result<(), RunError> {
    let loaded = load_table(&config.input, &config.load)?;
    let validation = run_stage1(&loaded.table, &config.params)?;
    let ordering = reorder(&loaded.table, &config.params)?;

    tracing::info!(
        "ordered {} samples into {} blocks ({} order, {})",
        ordering.samples.len(),
        ordering.blocks.len(),
        config.params.category_order.name(),
        config.params.direction.name()
    );

    let out_dir = resolve_output_dir(&config.out_dir, config.run_mode);
    let input = Stage5Input {
        table: &loaded.table,
        ordering: &ordering,
        validation: &validation,
        params: &config.params,
        input_path: config.input.display().to_string(),
        input_format: loaded.format.name().to_string(),
        input_delimiter: loaded.delimiter.name().to_string(),
        run_mode: config.run_mode,
        tool_name: "kira-stackorder".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(&PathBuf::from(".")),
    };
    write_reports(&input, &out_dir)?;

    Ok(())
}

fn build_config(args: RunArgs) -> Result<RunConfig, RunError> {
    let category_order = match (args.category_order, args.categories.is_empty()) {
        (Some(CategoryOrderArg::Custom), true) => {
            return Err(RunError::Usage(
                "--category-order custom requires --categories".to_string(),
            ));
        }
        (Some(CategoryOrderArg::Custom), false) | (None, false) => {
            CategoryOrder::Custom(args.categories.clone())
        }
        (Some(CategoryOrderArg::GroupSize), _) => CategoryOrder::GroupSize,
        (Some(CategoryOrderArg::Alphabetical), _) | (None, true) => CategoryOrder::Alphabetical,
    };
    if !args.categories.is_empty() && !matches!(category_order, CategoryOrder::Custom(_)) {
        tracing::warn!(
            "--categories ignored with --category-order {}",
            category_order.name()
        );
    }
    if args.total_tolerance.is_nan() || args.total_tolerance < 0.0 {
        return Err(RunError::Usage(
            "--total-tolerance must be non-negative".to_string(),
        ));
    }

    Ok(RunConfig {
        input: args.input,
        out_dir: args.out,
        load: LoadOptions {
            format: args.format,
            delimiter: args.delimiter,
        },
        params: ReorderParams {
            category_order,
            direction: args.direction,
            strict: !args.allow_sparse,
            expected_total: args.expected_total,
            total_tolerance: args.total_tolerance,
        },
        run_mode: args.run_mode,
    })
}

fn resolve_output_dir(base: &Path, run_mode: RunMode) -> PathBuf {
    match run_mode {
        RunMode::Standalone => base.to_path_buf(),
        RunMode::Pipeline => base.join("kira-stackorder"),
    }
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
