use fixity_ledger::{ChecksumAlgorithm, DigestResult, LedgerRow, LedgerSchema, LedgerWriter};
use std::fs;
use tempfile::TempDir;

fn md5_schema() -> LedgerSchema {
    LedgerSchema::checksums(ChecksumAlgorithm::Md5)
}

#[test]
fn test_second_open_appends_without_header() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("checksums.csv");

    for run in 0..2 {
        let mut ledger = LedgerWriter::open(&path, md5_schema()).unwrap();
        assert_eq!(ledger.header_written(), run == 0);
        ledger.append_row(&LedgerRow::new(["a.txt", "aa"])).unwrap();
        ledger.append_row(&LedgerRow::new(["b.txt", "bb"])).unwrap();
        ledger.finish().unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines.iter().filter(|l| **l == "Filename,MD5 Checksum").count(),
        1
    );
    assert_eq!(lines[0], "Filename,MD5 Checksum");
}

#[test]
fn test_existing_ledger_rows_untouched() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("checksums.csv");
    let original = "Filename,MD5 Checksum\nold.txt,0123456789abcdef0123456789abcdef\n";
    fs::write(&path, original).unwrap();

    let mut ledger = LedgerWriter::open(&path, md5_schema()).unwrap();
    assert!(!ledger.header_written());
    let result = DigestResult::new(
        "b.txt",
        ChecksumAlgorithm::Md5,
        "92eb5ffee6ae2fec3ad71c777531578f",
        1,
    );
    ledger.append_digest(&result).unwrap();
    ledger.finish().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(original));
    assert_eq!(
        &content[original.len()..],
        "b.txt,92eb5ffee6ae2fec3ad71c777531578f\n"
    );
}

#[test]
fn test_zero_length_ledger_treated_as_new() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("checksums.csv");
    fs::write(&path, "").unwrap();

    let ledger = LedgerWriter::open(&path, md5_schema()).unwrap();
    assert!(ledger.header_written());
    ledger.finish().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Filename,MD5 Checksum\n");
}

#[test]
fn test_partial_last_line_is_terminated() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("checksums.csv");
    fs::write(&path, "Filename,MD5 Checksum\ncut.txt,01234").unwrap();

    let mut ledger = LedgerWriter::open(&path, md5_schema()).unwrap();
    ledger.append_row(&LedgerRow::new(["next.txt", "ff"])).unwrap();
    ledger.finish().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "Filename,MD5 Checksum\ncut.txt,01234\nnext.txt,ff\n"
    );
}

#[test]
fn test_paths_with_separators_are_quoted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("checksums.csv");

    let mut ledger = LedgerWriter::open(&path, md5_schema()).unwrap();
    ledger
        .append_row(&LedgerRow::new(["tapes/reel 1, side \"A\".wav", "ab"]))
        .unwrap();
    ledger.finish().unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "Filename");
    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][0], "tapes/reel 1, side \"A\".wav");
    assert_eq!(&records[0][1], "ab");
}

#[test]
fn test_sizes_schema_header() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("file_sizes.csv");

    let mut ledger = LedgerWriter::open(&path, LedgerSchema::sizes()).unwrap();
    ledger.append_row(&LedgerRow::new(["a.txt", "5"])).unwrap();
    ledger.finish().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "File Path,Size\na.txt,5\n"
    );
}

#[test]
fn test_unwritable_destination() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("no-such-dir").join("checksums.csv");

    let err = LedgerWriter::open(&path, md5_schema()).unwrap_err();
    assert!(err.is_fatal());
    assert!(!path.exists());
}
