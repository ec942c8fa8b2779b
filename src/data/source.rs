use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::{LogError, Result};

// ---------------------------------------------------------------------------
// RowSource – pull-based CSV row stream
// ---------------------------------------------------------------------------

/// Lazy, finite, non-restartable stream of CSV rows.
///
/// The header is read when the source is opened; data rows are pulled one at
/// a time with [`RowSource::next_row`] (or through the `Iterator` impl) and
/// only the current row is kept in memory. Every data row must have exactly
/// as many cells as the header.
pub struct RowSource<R> {
    reader: csv::Reader<R>,
    header: Vec<String>,
    record: csv::StringRecord,
    rows_read: u64,
}

impl RowSource<File> {
    /// Open a telemetry log on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<R: Read> RowSource<R> {
    /// Wrap any reader. Reads the header row immediately.
    pub fn new(input: R) -> Result<Self> {
        // Cell counts are checked here rather than by the csv crate so the
        // mismatch surfaces as `MalformedRow`.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let header = reader.headers()?.iter().map(str::to_string).collect();

        Ok(RowSource {
            reader,
            header,
            record: csv::StringRecord::new(),
            rows_read: 0,
        })
    }

    /// Column names; empty for an empty file.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Next data row, or `None` at end of input.
    pub fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        self.rows_read += 1;

        if self.record.len() != self.header.len() {
            let line = self
                .record
                .position()
                .map(|p| p.line())
                .unwrap_or(self.rows_read + 1);
            return Err(LogError::MalformedRow {
                line,
                expected: self.header.len(),
                found: self.record.len(),
            });
        }

        Ok(Some(self.record.iter().map(str::to_string).collect()))
    }

    /// Data rows pulled so far, including skipped and malformed ones.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

impl<R: Read> Iterator for RowSource<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &str) -> RowSource<&[u8]> {
        RowSource::new(text.as_bytes()).unwrap()
    }

    #[test]
    fn reads_header_then_rows() {
        let mut src = source("t,x,arr\n0,1.5,\"[1,2]\"\n1,2.5,\"[3,4]\"\n");
        assert_eq!(src.header(), ["t", "x", "arr"]);

        assert_eq!(src.next_row().unwrap().unwrap(), ["0", "1.5", "[1,2]"]);
        assert_eq!(src.next_row().unwrap().unwrap(), ["1", "2.5", "[3,4]"]);
        assert!(src.next_row().unwrap().is_none());
        assert_eq!(src.rows_read(), 2);
    }

    #[test]
    fn empty_cells_are_kept_as_empty_strings() {
        let mut src = source("t,x,y\n0,,3\n");
        assert_eq!(src.next_row().unwrap().unwrap(), ["0", "", "3"]);
    }

    #[test]
    fn cell_count_mismatch_is_malformed() {
        let mut src = source("t,x\n0,1\n1,2,3\n");
        assert!(src.next_row().unwrap().is_some());

        match src.next_row() {
            Err(LogError::MalformedRow {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_has_no_header_and_no_rows() {
        let mut src = source("");
        assert!(src.header().is_empty());
        assert!(src.next_row().unwrap().is_none());
    }

    #[test]
    fn iterates_until_end_of_input() {
        let rows: Vec<_> = source("t,x\n0,1\n1,2\n2,3\n")
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], ["2", "3"]);
    }
}
