use std::path::Path;

use clap::ValueEnum;
use thiserror::Error;

pub mod long;
pub mod reader;
pub mod wide;

use long::{is_long_header, parse_long};
use reader::{open_maybe_gz, read_records};
use wide::parse_wide;

use crate::model::errors::ValidationError;
use crate::model::observation::ObservationTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TableFormat {
    #[default]
    Auto,
    Long,
    Wide,
}

impl TableFormat {
    pub fn name(self) -> &'static str {
        match self {
            TableFormat::Auto => "auto",
            TableFormat::Long => "long",
            TableFormat::Wide => "wide",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Tab => "tab",
            Delimiter::Comma => "comma",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub format: TableFormat,
    pub delimiter: Option<Delimiter>,
}

#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: ObservationTable,
    /// Never `Auto`.
    pub format: TableFormat,
    pub delimiter: Delimiter,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

pub fn load_table(path: &Path, options: &LoadOptions) -> Result<LoadedTable, InputError> {
    if !path.is_file() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }

    let delimiter = options
        .delimiter
        .unwrap_or_else(|| detect_delimiter(path));
    let records = read_records(open_maybe_gz(path)?, delimiter)?;
    let Some((header, rows)) = records.split_first() else {
        return Err(InputError::MissingInput(format!(
            "{} has no header line",
            path.display()
        )));
    };

    let format = match options.format {
        TableFormat::Auto => detect_format(&header.fields),
        other => other,
    };
    let table = match format {
        TableFormat::Wide => parse_wide(header, rows)?,
        _ => parse_long(header, rows)?,
    };

    tracing::info!(
        "loaded {} ({} format): {} samples, {} categories, {} observations",
        path.display(),
        format.name(),
        table.n_samples(),
        table.n_categories(),
        table.n_observations()
    );

    Ok(LoadedTable {
        table,
        format,
        delimiter,
    })
}

pub fn detect_delimiter(path: &Path) -> Delimiter {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".csv") {
        Delimiter::Comma
    } else {
        Delimiter::Tab
    }
}

pub fn detect_format(header: &[String]) -> TableFormat {
    if is_long_header(header) {
        TableFormat::Long
    } else {
        TableFormat::Wide
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
