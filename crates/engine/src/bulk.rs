//! Bulk import of `category,amount,date` lines.
//!
//! The format has no header and no quoting: every line, blank ones included,
//! must hold exactly three comma separated fields. Records are parsed lazily,
//! so feeding a [`BulkReader`] to [`Store::add_bulk`](crate::Store::add_bulk)
//! applies the lines before a malformed one and never reads the lines after it.

use std::{
    fs::File,
    io::{BufRead, BufReader, Lines, Read},
    path::Path,
};

use chrono::NaiveDate;
use csv::StringRecord;

use crate::{EngineError, MoneyCents, ResultEngine, parse_date};

const FIELDS: usize = 3;

/// One parsed bulk line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkRecord {
    pub category: String,
    pub amount: MoneyCents,
    pub date: NaiveDate,
}

/// Iterator over the records of a bulk file, one per line.
pub struct BulkReader<R: Read> {
    lines: Lines<BufReader<R>>,
    line: u64,
}

impl BulkReader<File> {
    /// Opens `path` for import. A missing file is reported as
    /// [`EngineError::Io`]; see [`EngineError::is_not_found`].
    pub fn open(path: impl AsRef<Path>) -> ResultEngine<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| EngineError::io(path, err))?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> BulkReader<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            line: 0,
        }
    }
}

impl<R: Read> Iterator for BulkReader<R> {
    type Item = ResultEngine<BulkRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.lines.next()?;
        self.line += 1;
        let parsed = match next {
            Ok(text) => {
                let mut record: StringRecord = text.split(',').collect();
                record.trim();
                parse_record(&record, self.line)
            }
            Err(err) => Err(EngineError::Format {
                line: self.line,
                reason: err.to_string(),
            }),
        };
        Some(parsed)
    }
}

fn parse_record(record: &StringRecord, line: u64) -> ResultEngine<BulkRecord> {
    let format_error = |reason: String| EngineError::Format { line, reason };

    if record.len() == 1 && record[0].is_empty() {
        return Err(format_error(
            "empty line, expected category,amount,date".to_string(),
        ));
    }
    if record.len() != FIELDS {
        return Err(format_error(format!(
            "expected {FIELDS} fields (category,amount,date), found {}",
            record.len()
        )));
    }

    let category = record[0].to_string();
    let amount = record[1]
        .parse::<MoneyCents>()
        .map_err(|_| format_error(format!("invalid amount \"{}\"", &record[1])))?;
    let date = parse_date(&record[2])
        .map_err(|_| format_error(format!("invalid date \"{}\", expected YYYY-MM-DD", &record[2])))?;

    Ok(BulkRecord {
        category,
        amount,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Vec<ResultEngine<BulkRecord>> {
        BulkReader::from_reader(input.as_bytes()).collect()
    }

    #[test]
    fn parses_well_formed_lines() {
        let records: ResultEngine<Vec<_>> =
            read("Food,12.50,2024-01-02\n Rent , 900 , 2024-01-01\n")
                .into_iter()
                .collect();
        let records = records.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, "Food");
        assert_eq!(records[0].amount, MoneyCents::new(1250));
        assert_eq!(records[1].category, "Rent");
        assert_eq!(records[1].amount, MoneyCents::new(90000));
    }

    #[test]
    fn reports_line_of_missing_field() {
        let results = read("Food,1,2024-01-01\nRent,900\n");
        assert!(results[0].is_ok());
        match &results[1] {
            Err(EngineError::Format { line, reason }) => {
                assert_eq!(*line, 2);
                assert!(reason.contains("found 2"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn reports_non_numeric_amount() {
        let results = read("Food,twelve,2024-01-01\n");
        assert!(matches!(
            &results[0],
            Err(EngineError::Format { line: 1, reason }) if reason.contains("twelve")
        ));
    }

    #[test]
    fn reports_bad_date() {
        let results = read("Food,1,2024-01-01\nFood,2,2024-02-31\n");
        assert!(matches!(
            &results[1],
            Err(EngineError::Format { line: 2, reason }) if reason.contains("2024-02-31")
        ));
    }

    #[test]
    fn quotes_are_not_special() {
        let results = read("\"Food,1,2024-01-01\n");
        let record = results[0].as_ref().unwrap();
        assert_eq!(record.category, "\"Food");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = match BulkReader::open(dir.path().join("nope.txt")) {
            Err(err) => err,
            Ok(_) => panic!("opened a missing file"),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn blank_line_is_a_format_error() {
        let results = read("Food,1,2024-01-01\n\nFun,2,2024-01-03\n");
        assert!(results[0].is_ok());
        assert!(matches!(
            &results[1],
            Err(EngineError::Format { line: 2, reason }) if reason.contains("empty line")
        ));
        assert!(results[2].is_ok());
    }

    #[test]
    fn trailing_newline_is_not_a_blank_line() {
        let results = read("Food,1,2024-01-01\r\nFun,2,2024-01-03\r\n");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(Result::is_ok));
        assert!(read("").is_empty());
    }
}
