use crate::input::InputError;
use crate::input::reader::Record;
use crate::model::errors::ValidationError;
use crate::model::observation::ObservationTable;

/// Cells treated as an absent observation rather than a value.
const ABSENT: &[&str] = &["", "NA", "N/A", "."];

/// Wide layout: first column is the sample, every other column one category.
pub fn parse_wide(header: &Record, rows: &[Record]) -> Result<ObservationTable, InputError> {
    if header.fields.len() < 2 {
        return Err(InputError::Parse {
            line: header.line,
            message: "wide-format header needs a sample column and at least one category"
                .to_string(),
        });
    }
    let categories = &header.fields[1..];

    let mut table = ObservationTable::new();
    for category in categories {
        table.add_category(category);
    }

    for row in rows {
        if row.fields.len() != header.fields.len() {
            return Err(InputError::Parse {
                line: row.line,
                message: format!(
                    "row has {} fields but header has {}",
                    row.fields.len(),
                    header.fields.len()
                ),
            });
        }
        let sample = &row.fields[0];
        table.add_sample(sample);
        for (idx, raw) in row.fields.iter().enumerate().skip(1) {
            if ABSENT.contains(&raw.as_str()) {
                continue;
            }
            let category = &categories[idx - 1];
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
    }

    Ok(table)
}
