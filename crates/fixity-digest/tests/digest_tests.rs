use fixity_digest::{ChecksumAlgorithm, Digester, FixityError, ParallelDigester, digest_bytes};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_digest_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("reel.mov");
    let content: Vec<u8> = (0..300_000u32).map(|i| (i * 31 % 256) as u8).collect();
    fs::write(&path, &content).unwrap();

    for algorithm in [
        ChecksumAlgorithm::Md5,
        ChecksumAlgorithm::Sha256,
        ChecksumAlgorithm::Blake3,
    ] {
        let digester = Digester::new(algorithm).with_chunk_size(64 * 1024);
        let first = digester.digest(&path).unwrap();
        let second = digester.digest(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.digest, digest_bytes(algorithm, &content));
        assert_eq!(first.digest.len(), algorithm.hex_len());
        assert_eq!(first.bytes_read, content.len() as u64);
        assert!(first.is_well_formed());
    }
}

#[test]
fn test_chunk_size_does_not_change_digest() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("audio.wav");
    fs::write(&path, vec![0xa5u8; 12_345]).unwrap();

    let whole = Digester::default().digest(&path).unwrap();
    let tiny = Digester::default().with_chunk_size(7).digest(&path).unwrap();
    let zero = Digester::default().with_chunk_size(0).digest(&path).unwrap();

    assert_eq!(whole.digest, tiny.digest);
    assert_eq!(whole.digest, zero.digest);
}

#[test]
fn test_zero_byte_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty");
    fs::write(&path, b"").unwrap();

    let result = Digester::new(ChecksumAlgorithm::Sha256).digest(&path).unwrap();
    assert_eq!(result.bytes_read, 0);
    assert_eq!(
        result.digest,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_progress_final_event_only_once() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("odd.bin");
    fs::write(&path, vec![1u8; 1001]).unwrap();

    let mut percents = Vec::new();
    Digester::default()
        .with_chunk_size(100)
        .digest_with_progress(&path, &mut |p| percents.push(p.percent))
        .unwrap();

    assert!(percents.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(percents.last(), Some(&100));
    assert_eq!(percents.iter().filter(|p| **p == 100).count(), 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("locked.bin");
    fs::write(&path, "secret").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits.
    if fs::read(&path).is_ok() {
        return;
    }

    let err = Digester::default().digest(&path).unwrap_err();
    assert!(matches!(err, FixityError::PermissionDenied { .. }));
}

#[test]
fn test_parallel_matches_sequential() {
    let temp = TempDir::new().unwrap();
    let paths: Vec<_> = (0..9)
        .map(|i| {
            let path = temp.path().join(format!("{i}.dat"));
            fs::write(&path, format!("payload {i}")).unwrap();
            path
        })
        .collect();

    let digester = Digester::new(ChecksumAlgorithm::Blake3);
    let sequential: Vec<_> = paths.iter().map(|p| digester.digest(p).unwrap()).collect();

    let parallel = ParallelDigester::new(digester, 0).unwrap();
    let batch: Vec<_> = parallel
        .digest_batch(&paths)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert!(parallel.threads() >= 1);
    assert_eq!(sequential, batch);
}

#[test]
fn test_missing_file_fails_alone_in_batch() {
    let temp = TempDir::new().unwrap();
    let present = temp.path().join("present.dat");
    fs::write(&present, "hello").unwrap();
    let paths = vec![present.clone(), temp.path().join("gone.dat"), present];

    let parallel = ParallelDigester::new(Digester::default(), 2).unwrap();
    let results = parallel.digest_batch(&paths);

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap().digest,
        "5d41402abc4b2a76b9719d911017c592"
    );
    let err = results[1].as_ref().unwrap_err();
    assert!(matches!(err, FixityError::NotFound { .. }));
    assert!(!err.is_fatal());
    assert!(results[2].is_ok());
}
