//! ConfigManager behaviour against an isolated config file

use std::fs;
use tempfile::TempDir;
use wrangler_cli::config::ConfigManager;

fn create_test_config_manager(temp_dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(temp_dir.path().join("config.toml"))
}

#[test]
fn test_defaults_without_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    let config = manager.load().unwrap();
    assert!(config.scan.recurse_subfolders);
    assert!(config.scan.combine_frame_sequences);
    assert_eq!(config.scan.min_sequence_length, 2);
    assert_eq!(config.output.default_format, "text");
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_set_min_sequence_length() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    manager.set("scan.min_sequence_length", "10").unwrap();

    assert_eq!(manager.get("scan.min_sequence_length").unwrap(), "10");
    assert_eq!(manager.load().unwrap().scan.min_sequence_length, 10);
}

#[test]
fn test_set_file_types_as_list() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    manager.set("scan.file_types", "exr, dpx ,png").unwrap();

    let config = manager.load().unwrap();
    assert_eq!(config.scan.file_types, vec!["exr", "dpx", "png"]);
    assert_eq!(manager.get("scan.file_types").unwrap(), "exr,dpx,png");
}

#[test]
fn test_set_preserves_other_values() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    manager.set("scan.combine_frame_sequences", "false").unwrap();
    manager.set("output.default_format", "json").unwrap();

    let config = manager.load().unwrap();
    assert!(!config.scan.combine_frame_sequences);
    assert_eq!(config.output.default_format, "json");

    let content = fs::read_to_string(temp_dir.path().join("config.toml")).unwrap();
    assert!(content.contains("[scan]"));
    assert!(content.contains("[output]"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = create_test_config_manager(&temp_dir);

    assert!(manager.set("scan.min_sequence_length", "0").is_err());
    assert!(manager.set("scan.min_sequence_length", "many").is_err());
    assert!(manager.set("scan.thumbnail_folder_name", "a/b").is_err());
    assert!(manager.set("scan.follow_links", "sometimes").is_err());
    assert!(manager.set("output.default_format", "xml").is_err());

    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_unknown_key_on_get() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    assert!(manager.get("scan.nope").is_err());
}

#[test]
fn test_list_is_sorted_and_complete() {
    let temp_dir = TempDir::new().unwrap();
    let manager = create_test_config_manager(&temp_dir);

    let items = manager.list().unwrap();
    let keys: Vec<&str> = items.iter().map(|(key, _)| key.as_str()).collect();

    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(keys.contains(&"scan.thumbnail_folder_name"));
    assert!(keys.contains(&"output.progress_enabled"));
}

#[test]
fn test_file_written_by_hand_is_layered_over_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[scan]\nignore_thumbnail_folders = false\n",
    )
    .unwrap();

    let config = create_test_config_manager(&temp_dir).load().unwrap();
    assert!(!config.scan.ignore_thumbnail_folders);
    assert_eq!(config.scan.thumbnail_folder_name, "thumbnails");
}
