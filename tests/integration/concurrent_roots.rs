//! Several builders walking different roots at once, sharing one result stream.

use super::test_utils::{write_tree, SHA256_HELLO, SHA256_WORLD};
use recsum::{result_channel, Algorithm, Builder, HashAlgorithm, HashResult, WalkError};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn hashes_by_path(results: &[HashResult]) -> BTreeMap<PathBuf, String> {
    results
        .iter()
        .map(|r| (r.path().to_path_buf(), r.hash().to_string()))
        .collect()
}

#[test]
fn test_parallel_roots_share_one_stream() {
    let temp_dir = TempDir::new().unwrap();
    let left = temp_dir.path().join("left");
    let right = temp_dir.path().join("right");
    write_tree(&left, &[("a.txt", "hello"), ("sub/b.txt", "world")]);
    write_tree(&right, &[("c.txt", "world"), ("d.txt", "hello"), ("e/f.txt", "hello")]);

    let algorithm: Arc<dyn HashAlgorithm> = Arc::new(Algorithm::Sha256);
    let (tx, rx) = result_channel();
    let builders = vec![
        Builder::new(&left, Arc::clone(&algorithm), tx.clone(), 2).unwrap(),
        Builder::new(&right, Arc::clone(&algorithm), tx, 3).unwrap(),
    ];

    let consumer = thread::spawn(move || rx.iter().collect::<Vec<_>>());
    let outcomes: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = builders
            .into_iter()
            .map(|builder| scope.spawn(move || builder.walk()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    let results = consumer.join().unwrap();

    assert!(outcomes.iter().all(Result::is_ok));
    assert_eq!(results.len(), 5);

    let by_path = hashes_by_path(&results);
    assert_eq!(by_path[&left.join("a.txt")], SHA256_HELLO);
    assert_eq!(by_path[&left.join("sub/b.txt")], SHA256_WORLD);
    assert_eq!(by_path[&right.join("c.txt")], SHA256_WORLD);
    assert_eq!(by_path[&right.join("d.txt")], SHA256_HELLO);
    assert_eq!(by_path[&right.join("e/f.txt")], SHA256_HELLO);
}

#[test]
fn test_failing_root_does_not_affect_sibling() {
    let temp_dir = TempDir::new().unwrap();
    let good = temp_dir.path().join("good");
    let missing = temp_dir.path().join("missing");
    write_tree(&good, &[("one", "hello"), ("two", "world")]);

    let algorithm: Arc<dyn HashAlgorithm> = Arc::new(Algorithm::Sha256);
    let (tx, rx) = result_channel();
    let good_builder = Builder::new(&good, Arc::clone(&algorithm), tx.clone(), 2).unwrap();
    let missing_builder = Builder::new(&missing, algorithm, tx, 2).unwrap();

    let consumer = thread::spawn(move || rx.iter().collect::<Vec<_>>());
    let (good_outcome, missing_outcome) = thread::scope(|scope| {
        let g = scope.spawn(move || good_builder.walk());
        let m = scope.spawn(move || missing_builder.walk());
        (g.join().unwrap(), m.join().unwrap())
    });
    let results = consumer.join().unwrap();

    let summary = good_outcome.unwrap();
    assert_eq!(summary.hashed, 2);
    assert!(matches!(
        missing_outcome,
        Err(WalkError::RootInaccessible { .. })
    ));
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.path().starts_with(&good)));
}

#[test]
fn test_mixed_algorithms_on_separate_streams() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("hello", "hello")]);

    let outcomes: Vec<(Algorithm, Vec<HashResult>)> = thread::scope(|scope| {
        let handles: Vec<_> = [Algorithm::Md5, Algorithm::Sha1, Algorithm::Sha256]
            .into_iter()
            .map(|algo| {
                let root = temp_dir.path();
                scope.spawn(move || {
                    let (tx, rx) = result_channel();
                    let builder = Builder::new(root, Arc::new(algo), tx, 1).unwrap();
                    let consumer = thread::spawn(move || rx.iter().collect::<Vec<_>>());
                    builder.walk().unwrap();
                    (algo, consumer.join().unwrap())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (algo, results) in outcomes {
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].hash().len(), algo.output_len() * 2, "{}", algo);
    }
}
