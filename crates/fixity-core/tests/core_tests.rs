use fixity_core::{
    Candidate, ChecksumAlgorithm, Classification, CollectConfig, DigestProgress, DigestResult,
    FilterPolicy, FixityError, RunSummary, RunWarning, WarningKind,
};
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[test]
fn test_candidate_accessors() {
    let candidate = Candidate::new("/archive/reel1.mov", Classification::NONE);

    assert_eq!(candidate.path(), PathBuf::from("/archive/reel1.mov").as_path());
    assert!(!candidate.classification.is_hidden());
    assert!(!candidate.classification.is_system());
    assert_eq!(candidate.into_path(), PathBuf::from("/archive/reel1.mov"));
}

#[test]
fn test_every_algorithm_has_header_and_length() {
    for algorithm in ChecksumAlgorithm::iter() {
        let column = algorithm.column_name();
        assert!(column.ends_with(" Checksum"));
        assert!(column.starts_with(algorithm.label()));
        assert!(algorithm.hex_len() == 32 || algorithm.hex_len() == 64);
    }
}

#[test]
fn test_config_new_defaults() {
    let config = CollectConfig::new("/archive", "ledger.csv");

    assert_eq!(config.root(), PathBuf::from("/archive").as_path());
    assert_eq!(config.policy, FilterPolicy::default());
    assert_eq!(config.algorithm, ChecksumAlgorithm::Md5);
    assert_eq!(config.threads, 1);
}

#[test]
fn test_config_builder_with_algorithm() {
    let config = CollectConfig::builder()
        .root("/archive")
        .algorithm(ChecksumAlgorithm::Blake3)
        .chunk_size(4096usize)
        .policy(FilterPolicy::new(false, true))
        .build()
        .unwrap();

    assert_eq!(config.algorithm, ChecksumAlgorithm::Blake3);
    assert_eq!(config.chunk_size, 4096);
    assert!(!config.policy.exclude_hidden);
    assert!(config.policy.exclude_system);
}

#[test]
fn test_progress_is_monotone_over_chunks() {
    let total = 10 * 1024 + 17;
    let mut last = 0;
    let mut read = 0;
    while read < total {
        read = (read + 1024).min(total);
        let progress = DigestProgress::new(read, total);
        assert!(progress.percent >= last);
        last = progress.percent;
    }
    assert_eq!(last, 100);
    assert!(DigestProgress::complete(0, 0).is_complete());
}

#[test]
fn test_digest_result_fields() {
    let result = DigestResult::new(
        "/archive/empty.bin",
        ChecksumAlgorithm::Md5,
        "d41d8cd98f00b204e9800998ecf8427e",
        0,
    );

    assert_eq!(result.bytes_read, 0);
    assert!(result.is_well_formed());
    assert_eq!(result.path(), PathBuf::from("/archive/empty.bin").as_path());
}

#[test]
fn test_not_found_is_per_file() {
    let err = FixityError::io(
        "/archive/gone.wav",
        std::io::Error::new(std::io::ErrorKind::NotFound, "removed mid-scan"),
    );

    assert!(!err.is_fatal());
    let warning = err.to_warning();
    assert_eq!(warning.kind, WarningKind::ReadError);
}

#[test]
fn test_summary_all_recorded() {
    let mut summary = RunSummary::new("checksums.csv");
    summary.found = 2;
    summary.record(5);
    summary.record(0);

    assert!(summary.all_recorded());
    assert!(summary.warnings.is_empty());

    summary.warn(RunWarning::traversal("/archive/locked", "Permission denied"));
    assert!(summary.all_recorded());
    assert_eq!(summary.failed, 0);
}
