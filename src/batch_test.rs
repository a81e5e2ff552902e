use super::*;

use std::{env, fs};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("lindex-batch-test-{}-{}", name, std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_smallest_greatest_cached() {
    let path = temp_file("smallest-greatest", "a\nb\nc\n");
    let batch = Batch::new(path.clone());
    assert_eq!(batch.smallest().unwrap(), "a\n");
    assert_eq!(batch.greatest().unwrap(), "c\n");
    // second call should hit the cache, not re-read an (now truncated) file
    fs::write(&path, "z\n").unwrap();
    assert_eq!(batch.smallest().unwrap(), "a\n");
    assert_eq!(batch.greatest().unwrap(), "c\n");
    fs::remove_file(&path).ok();
}

#[test]
fn test_contains_floor_ceil() {
    let path = temp_file("contains", "a\nc\ne\ng\n");
    let batch = Batch::new(path.clone());
    assert!(batch.contains("c\n").unwrap());
    assert!(!batch.contains("d\n").unwrap());
    assert_eq!(batch.floor("d\n").unwrap(), Some("c\n".to_string()));
    assert_eq!(batch.ceil("d\n").unwrap(), Some("e\n".to_string()));
    assert_eq!(batch.floor("\n").unwrap(), None);
    assert_eq!(batch.ceil("z\n").unwrap(), None);
    fs::remove_file(&path).ok();
}

#[test]
fn test_batched_storage_get() {
    let p0 = temp_file("bs0", "a\n");
    let p1 = temp_file("bs1", "b\n");
    let storage = BatchedStorage::new(vec![p0.clone(), p1.clone()]);
    assert_eq!(storage.len(), 2);
    assert_eq!(storage.get(0).smallest().unwrap(), "a\n");
    assert_eq!(storage.get(1).smallest().unwrap(), "b\n");
    fs::remove_file(&p0).ok();
    fs::remove_file(&p1).ok();
}
