use crate::input::InputError;
use crate::input::reader::Record;
use crate::model::errors::ValidationError;
use crate::model::observation::ObservationTable;

const SAMPLE_COLUMNS: &[&str] = &["sample", "sample_id", "id"];
const CATEGORY_COLUMNS: &[&str] = &["category", "class", "cluster"];
const VALUE_COLUMNS: &[&str] = &["value", "percentage", "proportion"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongColumns {
    pub sample: usize,
    pub category: usize,
    pub value: usize,
}

pub fn find_column(header: &[String], names: &[&str]) -> Option<usize> {
    header.iter().position(|h| {
        let lower = h.to_ascii_lowercase();
        names.iter().any(|n| *n == lower)
    })
}

/// Long layout needs both a category and a value column; a wide Q matrix may
/// carry a category named like `cluster`.
pub fn is_long_header(header: &[String]) -> bool {
    find_column(header, CATEGORY_COLUMNS).is_some()
        && find_column(header, VALUE_COLUMNS).is_some()
}

pub fn resolve_columns(header: &Record) -> Result<LongColumns, InputError> {
    let missing = |what: &str| InputError::Parse {
        line: header.line,
        message: format!("long-format header has no {what} column"),
    };
    Ok(LongColumns {
        sample: find_column(&header.fields, SAMPLE_COLUMNS).ok_or_else(|| missing("sample"))?,
        category: find_column(&header.fields, CATEGORY_COLUMNS)
            .ok_or_else(|| missing("category/class"))?,
        value: find_column(&header.fields, VALUE_COLUMNS)
            .ok_or_else(|| missing("value/percentage"))?,
    })
}

pub fn parse_long(header: &Record, rows: &[Record]) -> Result<ObservationTable, InputError> {
    let cols = resolve_columns(header)?;
    let width = cols.sample.max(cols.category).max(cols.value) + 1;

    let mut table = ObservationTable::new();
    for row in rows {
        if row.fields.len() < width {
            return Err(InputError::Parse {
                line: row.line,
                message: format!("expected at least {} fields, got {}", width, row.fields.len()),
            });
        }
        let sample = &row.fields[cols.sample];
        let category = &row.fields[cols.category];
        let raw = &row.fields[cols.value];
        let value = raw
            .parse::<f64>()
            .map_err(|_| ValidationError::NonNumericValue {
                line: row.line,
                sample: sample.clone(),
                category: category.clone(),
                raw: raw.clone(),
            })?;
        table.push(sample, category, value);
    }

    Ok(table)
}
