use dupescan::cli::OutputFormat;
use dupescan::config::Config;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_from_path_reads_every_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "follow_symlinks = true\nchunk_size = 65536\noutput = \"json\"\nprogress = false\n",
    )
    .unwrap();

    let config = Config::load_from_path(&path);

    assert!(config.follow_symlinks);
    assert_eq!(config.chunk_size, 65_536);
    assert_eq!(config.output, OutputFormat::Json);
    assert!(!config.progress);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "colour = \"blue\"\nchunk_size = 1024\n").unwrap();

    assert_eq!(Config::load_from_path(&path).chunk_size, 1024);
}

#[test]
fn test_default_path_names_the_app() {
    if let Some(path) = Config::default_path() {
        assert!(path.ends_with("config.toml"));
        assert!(path.to_string_lossy().contains("dupescan"));
    }
}
