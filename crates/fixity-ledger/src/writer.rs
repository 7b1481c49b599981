//! Append-only CSV ledger writer.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{Terminator, Writer, WriterBuilder};
use tracing::debug;

use fixity_core::{DigestResult, FixityError};

use crate::schema::{LedgerRow, LedgerSchema};

/// Appends rows to a ledger file, one complete and flushed row at a time.
///
/// A new (missing or zero-length) ledger gets the schema's header row
/// first. An existing ledger is opened in append mode and its header is
/// trusted as-is; previously written rows are never touched.
pub struct LedgerWriter {
    path: PathBuf,
    schema: LedgerSchema,
    writer: Writer<File>,
    header_written: bool,
    rows_written: u64,
}

impl LedgerWriter {
    /// Open or create the ledger at `path`.
    pub fn open(path: impl Into<PathBuf>, schema: LedgerSchema) -> Result<Self, FixityError> {
        let path = path.into();
        if schema.is_empty() {
            return Err(FixityError::invalid_config("ledger schema has no columns"));
        }

        let existing_len = match std::fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => metadata.len(),
            Ok(_) => {
                return Err(FixityError::output(
                    &path,
                    io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
                ));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => return Err(FixityError::output(&path, e)),
        };

        let needs_newline = existing_len > 0 && !ends_with_newline(&path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| FixityError::output(&path, e))?;

        // A run killed mid-row leaves a partial last line; start on a fresh one.
        if needs_newline {
            file.write_all(b"\n").map_err(|e| FixityError::output(&path, e))?;
        }

        let writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);

        let mut ledger = Self {
            path,
            schema,
            writer,
            header_written: false,
            rows_written: 0,
        };

        if existing_len == 0 {
            let header = ledger.schema.columns().to_vec();
            ledger.write_record(&header)?;
            ledger.header_written = true;
            debug!(path = %ledger.path.display(), "created ledger");
        } else {
            debug!(path = %ledger.path.display(), existing_len, "appending to existing ledger");
        }

        Ok(ledger)
    }

    /// Append one row and flush it to the OS.
    pub fn append_row(&mut self, row: &LedgerRow) -> Result<(), FixityError> {
        if row.len() != self.schema.len() {
            return Err(FixityError::invalid_config(format!(
                "row has {} fields, ledger {} declares {}",
                row.len(),
                self.path.display(),
                self.schema.len()
            )));
        }
        self.write_record(row.fields())?;
        self.rows_written += 1;
        Ok(())
    }

    /// Append the `<path>,<digest>` row for a digest result.
    pub fn append_digest(&mut self, result: &DigestResult) -> Result<(), FixityError> {
        self.append_row(&LedgerRow::from_digest(result)?)
    }

    /// Flush and sync the ledger, returning the number of rows appended.
    pub fn finish(mut self) -> Result<u64, FixityError> {
        self.writer
            .flush()
            .map_err(|e| FixityError::output(&self.path, e))?;
        self.writer
            .get_ref()
            .sync_all()
            .map_err(|e| FixityError::output(&self.path, e))?;
        Ok(self.rows_written)
    }

    /// Whether this writer created the ledger and wrote its header.
    pub fn header_written(&self) -> bool {
        self.header_written
    }

    /// Data rows appended by this writer.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &LedgerSchema {
        &self.schema
    }

    fn write_record(&mut self, fields: &[String]) -> Result<(), FixityError> {
        self.writer
            .write_record(fields)
            .map_err(|e| FixityError::output(&self.path, e.into()))?;
        self.writer
            .flush()
            .map_err(|e| FixityError::output(&self.path, e))
    }
}

impl std::fmt::Debug for LedgerWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerWriter")
            .field("path", &self.path)
            .field("schema", &self.schema)
            .field("header_written", &self.header_written)
            .field("rows_written", &self.rows_written)
            .finish()
    }
}

/// Check whether a non-empty file ends with a line terminator.
fn ends_with_newline(path: &Path) -> Result<bool, FixityError> {
    let mut file = File::open(path).map_err(|e| FixityError::output(path, e))?;
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))
        .and_then(|_| file.read_exact(&mut last))
        .map_err(|e| FixityError::output(path, e))?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixity_core::ChecksumAlgorithm;
    use std::fs;
    use tempfile::TempDir;

    fn schema() -> LedgerSchema {
        LedgerSchema::checksums(ChecksumAlgorithm::Md5)
    }

    #[test]
    fn test_new_ledger_gets_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("checksums.csv");

        let mut ledger = LedgerWriter::open(&path, schema()).unwrap();
        assert!(ledger.header_written());
        ledger
            .append_row(&LedgerRow::new(["a.txt", "5d41402abc4b2a76b9719d911017c592"]))
            .unwrap();
        assert_eq!(ledger.finish().unwrap(), 1);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Filename,MD5 Checksum\na.txt,5d41402abc4b2a76b9719d911017c592\n"
        );
    }

    #[test]
    fn test_row_is_flushed_before_finish() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("checksums.csv");

        let mut ledger = LedgerWriter::open(&path, schema()).unwrap();
        ledger.append_row(&LedgerRow::new(["a", "b"])).unwrap();

        // Visible on disk while the writer is still open.
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("a,b\n"));
        drop(ledger);
    }

    #[test]
    fn test_wrong_width_rejected() {
        let temp = TempDir::new().unwrap();
        let mut ledger = LedgerWriter::open(temp.path().join("l.csv"), schema()).unwrap();

        let err = ledger.append_row(&LedgerRow::new(["only-one"])).unwrap_err();
        assert!(matches!(err, FixityError::InvalidConfig { .. }));
        assert_eq!(ledger.rows_written(), 0);
    }

    #[test]
    fn test_directory_destination_is_output_error() {
        let temp = TempDir::new().unwrap();
        let err = LedgerWriter::open(temp.path(), schema()).unwrap_err();

        assert!(matches!(err, FixityError::OutputWrite { .. }));
        assert!(err.is_fatal());
    }
}
