use super::*;

use std::{env, fs};

fn write_batch(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn temp_dir(name: &str) -> std::path::PathBuf {
    let mut dir = env::temp_dir();
    dir.push(format!("lindex-lookup-test-{}-{}", name, std::process::id()));
    crate::util::remove_dir(&dir).ok();
    dir
}

#[test]
fn test_has_matches_across_batches() {
    let dir = temp_dir("multi-batch");
    let p0 = write_batch(&dir, "0.dat", "1\n");
    let p1 = write_batch(&dir, "1.dat", "2\n3\n");
    let p2 = write_batch(&dir, "2.dat", "4\n5\n");

    let directory = Directory::new(
        "5\n".to_string(),
        vec!["1\n".to_string(), "2\n".to_string(), "4\n".to_string()],
    );
    let storage = BatchedStorage::new(vec![p0, p1, p2]);
    let engine = LookupEngine::new(directory, storage);

    assert!(engine.has("5").unwrap());
    assert!(!engine.has("6").unwrap());
    assert!(!engine.has("").unwrap());
    assert!(engine.has("1").unwrap());
    assert!(engine.has("3").unwrap());

    crate::util::remove_dir(&dir).ok();
}

#[test]
fn test_has_query_equal_to_first_separator() {
    let dir = temp_dir("first-separator");
    let p0 = write_batch(&dir, "0.dat", "a\n");
    let p1 = write_batch(&dir, "1.dat", "z\n");

    let directory = Directory::new("z\n".to_string(), vec!["a\n".to_string(), "z\n".to_string()]);
    let storage = BatchedStorage::new(vec![p0, p1]);
    let engine = LookupEngine::new(directory, storage);

    assert!(engine.has("a").unwrap());
    assert!(engine.has("z").unwrap());
    assert!(!engine.has("m").unwrap());

    crate::util::remove_dir(&dir).ok();
}

#[test]
fn test_has_newline_normalization() {
    let dir = temp_dir("newline");
    let p0 = write_batch(&dir, "0.dat", "abc\n");

    let directory = Directory::new("abc\n".to_string(), vec!["abc\n".to_string()]);
    let storage = BatchedStorage::new(vec![p0]);
    let engine = LookupEngine::new(directory, storage);

    assert!(engine.has("abc").unwrap());
    assert!(engine.has("abc\n").unwrap());
    assert!(!engine.has("ab\nc").unwrap());

    crate::util::remove_dir(&dir).ok();
}
