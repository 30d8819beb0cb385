use clap::Parser;
use dupescan::cli::Cli;
use dupescan::error::ExitCode;
use dupescan::run_app_with_writer;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Parse arguments with the progress spinner off and no user config file.
fn cli(config_dir: &TempDir, args: &[&str]) -> Cli {
    let config = config_dir.path().join("absent.toml");
    let mut argv = vec![
        "dupescan".to_string(),
        "--no-progress".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
    ];
    argv.extend(args.iter().map(|a| (*a).to_string()));
    Cli::try_parse_from(argv).unwrap()
}

fn run(config_dir: &TempDir, args: &[&str]) -> (anyhow::Result<ExitCode>, String) {
    let mut out = Vec::new();
    let result = run_app_with_writer(cli(config_dir, args), &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn sample_tree() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let root = dir.path().join("data");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "x").unwrap();
    fs::write(root.join("b.txt"), "x").unwrap();
    fs::write(root.join("c.txt"), "y").unwrap();
    (dir, root)
}

#[test]
fn test_text_report_with_duplicates() {
    let (dir, root) = sample_tree();
    let (result, page) = run(&dir, &[&arg(&root)]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(page.contains("Files scanned            : 3\n"));
    assert!(page.contains("Directories scanned      : 1\n"));
    assert!(page.contains("Unique files             : 2\n"));
    assert!(page.contains("Duplicates               : 1\n"));
    assert!(page.contains("Potential storage savings: 1 B\n"));
    assert!(page.contains("'a.txt' (1 B per file, 2 B total):"));
    assert!(page.contains(&format!("└ '{}'", root.join("b.txt").display())));
    assert!(!page.contains("c.txt"));
}

#[test]
fn test_no_duplicates_exit_code() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("data");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("only.txt"), "alone").unwrap();

    let (result, page) = run(&dir, &[&arg(&root)]);

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert!(page.contains("Good news, no duplicates were found!"));
}

#[test]
fn test_json_report() {
    let (dir, root) = sample_tree();
    let (result, page) = run(&dir, &["--output", "json", &arg(&root)]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    let value: serde_json::Value = serde_json::from_str(&page).unwrap();
    assert_eq!(value["summary"]["total_files"], 3);
    assert_eq!(value["summary"]["exit_code"], 0);
    assert_eq!(value["duplicates"][0]["name"], "a.txt");
    assert_eq!(value["duplicates"][0]["files"].as_array().unwrap().len(), 2);
}

#[test]
fn test_missing_source_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let (result, page) = run(&dir, &[&arg(&missing)]);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("doesn't exist or can't be accessed"));
    assert!(page.is_empty());
}

#[test]
fn test_results_saved_to_every_destination() {
    let (dir, root) = sample_tree();
    let one = dir.path().join("one.txt");
    let two = dir.path().join("two.txt");

    let (result, page) = run(&dir, &["-s", &arg(&one), "-s", &arg(&two), &arg(&root)]);

    assert!(result.is_ok());
    assert_eq!(fs::read_to_string(&one).unwrap(), page);
    assert_eq!(fs::read_to_string(&two).unwrap(), page);
}

#[test]
fn test_existing_destination_refused_without_force() {
    let (dir, root) = sample_tree();
    let existing = dir.path().join("old.txt");
    fs::write(&existing, "keep me").unwrap();

    let (result, page) = run(&dir, &["-s", &arg(&existing), &arg(&root)]);

    assert!(result.unwrap_err().to_string().contains("--force"));
    assert!(page.is_empty());
    assert_eq!(fs::read_to_string(&existing).unwrap(), "keep me");
}

#[test]
fn test_existing_destination_replaced_with_force() {
    let (dir, root) = sample_tree();
    let existing = dir.path().join("old.txt");
    fs::write(&existing, "replace me").unwrap();

    let (result, page) = run(&dir, &["--overwrite", "-s", &arg(&existing), &arg(&root)]);

    assert!(result.is_ok());
    assert_eq!(fs::read_to_string(&existing).unwrap(), page);
}

#[test]
fn test_unwritable_destination_is_only_a_warning() {
    let (dir, root) = sample_tree();
    let bad = dir.path().join("no-such-dir").join("out.txt");

    let (result, page) = run(&dir, &["-s", &arg(&bad), &arg(&root)]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(page.contains("============ Summary ============"));
    assert!(!bad.exists());
}

#[test]
fn test_print_config() {
    let dir = tempdir().unwrap();
    let (result, page) = run(&dir, &["--print-config", "--chunk-size", "16KiB"]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(page.contains("chunk_size = 16384"));
    assert!(page.contains("progress = false"));
}

#[test]
fn test_config_file_selects_json() {
    let (dir, root) = sample_tree();
    let config = dir.path().join("dupescan.toml");
    fs::write(&config, "output = \"json\"\n").unwrap();

    let mut out = Vec::new();
    let cli = Cli::try_parse_from([
        "dupescan".to_string(),
        "--no-progress".to_string(),
        "--config".to_string(),
        arg(&config),
        arg(&root),
    ])
    .unwrap();
    let code = run_app_with_writer(cli, &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["summary"]["duplicates"], 1);
}

#[cfg(unix)]
#[test]
fn test_skipped_path_gives_partial_exit_code() {
    use std::os::unix::fs::symlink;

    let (dir, root) = sample_tree();
    symlink(root.join("gone"), root.join("link")).unwrap();

    let (result, page) = run(&dir, &["--follow-symlinks", &arg(&root)]);

    assert_eq!(result.unwrap(), ExitCode::PathsSkipped);
    assert!(page.contains("A total of 1 paths were inaccessible, and thus were skipped:"));
    assert!(page.contains(&format!("└ '{}'", root.join("link").display())));
}
