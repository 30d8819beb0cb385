use dupescan::scanner::{Hasher, Scanner, ScannerConfig};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn scan(roots: &[&Path]) -> dupescan::scanner::ScanOutcome {
    Scanner::new(ScannerConfig::default()).scan(roots)
}

fn write(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let outcome = scan(&[dir.path()]);

    assert!(outcome.groups.is_empty());
    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.stats.total_files, 0);
    assert_eq!(outcome.stats.total_dirs, 1);
    assert!(!outcome.has_duplicates());
}

#[test]
fn test_scan_no_roots() {
    let roots: [&Path; 0] = [];
    let outcome = scan(&roots);

    assert_eq!(outcome.stats, Default::default());
    assert!(outcome.groups.is_empty());
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"content a");
    write(&dir.path().join("b.txt"), b"content b");
    write(&dir.path().join("c.txt"), b"content c");

    let outcome = scan(&[dir.path()]);

    assert_eq!(outcome.stats.total_files, 3);
    assert_eq!(outcome.stats.unique_files, 3);
    assert_eq!(outcome.stats.duplicates, 0);
    assert_eq!(outcome.groups.with_duplicates().count(), 0);
}

#[test]
fn test_scan_duplicates_across_subdirectories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    let deeper = sub.join("deeper");
    fs::create_dir_all(&deeper).unwrap();

    write(&dir.path().join("top.bin"), b"shared bytes");
    write(&sub.join("middle.bin"), b"shared bytes");
    write(&deeper.join("bottom.bin"), b"shared bytes");
    write(&deeper.join("other.bin"), b"other");

    let outcome = scan(&[dir.path()]);

    assert_eq!(outcome.stats.total_dirs, 3);
    assert_eq!(outcome.stats.total_files, 4);
    assert_eq!(outcome.stats.duplicates, 2);
    assert_eq!(outcome.stats.duplicate_size, 24);

    let group = outcome
        .groups
        .get(&Hasher::hash_bytes(b"shared bytes"))
        .unwrap();
    assert_eq!(group.len(), 3);
    assert_eq!(group.name, "bottom.bin");
}

#[test]
fn test_counters_are_conserved() {
    let dir = tempdir().unwrap();
    for i in 0..12 {
        let content = format!("content {}", i % 4);
        write(&dir.path().join(format!("f{i:02}")), content.as_bytes());
    }

    let outcome = scan(&[dir.path()]);
    let stats = outcome.stats;

    assert_eq!(stats.total_files, stats.unique_files + stats.duplicates);
    assert_eq!(stats.unique_files, 4);
    assert_eq!(stats.unique_files as usize, outcome.groups.len());
    let listed: usize = outcome.groups.iter().map(|g| g.len()).sum();
    assert_eq!(listed as u64, stats.total_files);
    assert_eq!(outcome.groups.reclaimable(), stats.duplicate_size);
    assert!(stats.duplicate_size <= stats.total_size);
}

#[test]
fn test_group_members_share_content() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"one");
    write(&dir.path().join("b"), b"two");
    write(&dir.path().join("c"), b"one");
    write(&dir.path().join("d"), b"two");

    let outcome = scan(&[dir.path()]);

    for group in outcome.groups.iter() {
        let first = fs::read(group.original()).unwrap();
        for path in &group.paths {
            assert_eq!(fs::read(path).unwrap(), first);
            assert_eq!(Hasher::new().hash_file(path).unwrap(), group.fingerprint);
        }
    }
}

#[test]
fn test_same_file_given_twice_is_a_duplicate_of_itself() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("only.txt");
    write(&file, b"x");

    let outcome = scan(&[file.as_path(), file.as_path()]);

    assert_eq!(outcome.stats.total_files, 2);
    assert_eq!(outcome.stats.duplicates, 1);
    let group = outcome.groups.iter().next().unwrap();
    assert_eq!(group.paths, vec![file.clone(), file]);
}

#[test]
fn test_overlapping_roots_count_twice() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    write(&sub.join("a"), b"a");

    let outcome = scan(&[dir.path(), sub.as_path()]);

    assert_eq!(outcome.stats.total_dirs, 3);
    assert_eq!(outcome.stats.duplicates, 1);
}

#[test]
fn test_missing_source_among_valid_ones() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"a");
    let missing = dir.path().join("missing");

    let outcome = scan(&[missing.as_path(), dir.path()]);

    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.stats.total_files, 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_entries_do_not_stop_siblings() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"same");
    write(&dir.path().join("z"), b"same");
    symlink(dir.path().join("nowhere"), dir.path().join("m")).unwrap();

    let outcome = Scanner::new(ScannerConfig::default().with_follow_symlinks(true))
        .scan(&[dir.path()]);

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].path, dir.path().join("m"));
    assert_eq!(outcome.stats.total_files, 2);
    assert_eq!(outcome.stats.duplicates, 1);
    assert_eq!(outcome.stats.total_dirs, 1);
}

#[test]
fn test_large_file_spanning_many_chunks() {
    let dir = tempdir().unwrap();
    let content: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
    write(&dir.path().join("big1"), &content);
    write(&dir.path().join("big2"), &content);

    let mut changed = content.clone();
    let last = changed.len() - 1;
    changed[last] ^= 1;
    write(&dir.path().join("big3"), &changed);

    let outcome = Scanner::new(ScannerConfig::default().with_chunk_size(1000))
        .scan(&[dir.path()]);

    assert_eq!(outcome.stats.total_files, 3);
    assert_eq!(outcome.stats.duplicates, 1);
    assert_eq!(outcome.stats.duplicate_size, 100_000);
    assert_eq!(
        outcome
            .groups
            .get(&Hasher::hash_bytes(&content))
            .unwrap()
            .len(),
        2
    );
}

#[cfg(unix)]
#[test]
fn test_unlistable_directory_is_skipped_with_its_subtree() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"same");
    write(&dir.path().join("z"), b"same");
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    write(&locked.join("inner"), b"same");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not stop a privileged user
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let outcome = scan(&[dir.path()]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].path, locked);
    assert!(outcome.skipped[0].reason.starts_with("Permission denied"));
    assert_eq!(outcome.stats.total_files, 2);
    assert_eq!(outcome.stats.duplicates, 1);
    assert_eq!(outcome.stats.total_dirs, 1);
    let group = outcome.groups.get(&Hasher::hash_bytes(b"same")).unwrap();
    assert_eq!(group.paths, vec![dir.path().join("a"), dir.path().join("z")]);
}

#[cfg(unix)]
#[test]
fn test_json_report_survives_non_utf8_skipped_path() {
    use dupescan::cli::OutputFormat;
    use dupescan::output::render;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    write(&dir.path().join("a"), b"x");
    let bad = dir.path().join(OsStr::from_bytes(b"bad\xff"));
    symlink(dir.path().join("nowhere"), &bad).unwrap();

    let outcome = Scanner::new(ScannerConfig::default().with_follow_symlinks(true))
        .scan(&[dir.path()]);
    assert_eq!(outcome.skipped.len(), 1);

    let json = render(&outcome, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let path = value["skipped"][0]["path"].as_str().unwrap();
    assert!(path.ends_with("bad\u{FFFD}"));
    assert!(render(&outcome, OutputFormat::Text).is_ok());
}
