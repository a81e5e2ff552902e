use super::*;

use std::env;

fn temp_dir(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push(format!("lindex-directory-test-{}-{}", name, std::process::id()));
    util::remove_dir(&dir).ok();
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_write_then_read_round_trip() {
    let dir = temp_dir("roundtrip");
    let original = Directory::new(
        "5\n".to_string(),
        vec!["1\n".to_string(), "2\n".to_string(), "4\n".to_string()],
    );
    original.write(&dir).unwrap();

    let index_contents = fs::read_to_string(dir.join(".index")).unwrap();
    assert_eq!(index_contents, "5\n3\n1\n2\n4\n");

    let loaded = Directory::read(&dir).unwrap();
    assert_eq!(loaded.last_line, "5\n");
    assert_eq!(loaded.separators, original.separators);

    util::remove_dir(&dir).ok();
}

#[test]
fn test_storage_round_trip() {
    let dir = temp_dir("storage");
    let paths = vec![dir.join("000.dat"), dir.join("001.dat")];
    write_storage(&dir, &paths).unwrap();

    let storage_contents = fs::read_to_string(dir.join(".storage")).unwrap();
    assert_eq!(
        storage_contents,
        format!("{}\n{}\n", paths[0].display(), paths[1].display())
    );

    let loaded = read_storage(&dir).unwrap();
    assert_eq!(loaded, paths);

    util::remove_dir(&dir).ok();
}
