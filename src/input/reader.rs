use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::{Delimiter, InputError};

pub fn is_gz(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if is_gz(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Reads every non-blank, non-comment record with trimmed, unquoted fields.
pub fn read_records(
    reader: Box<dyn BufRead>,
    delimiter: Delimiter,
) -> Result<Vec<Record>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter.as_byte())
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or_default();
        records.push(Record {
            line,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(records)
}
