use seo_checker::output::{export_to_csv, export_to_json};
use seo_checker::SeoMetadata;
use std::fs;
use tempfile::TempDir;

fn records() -> Vec<SeoMetadata> {
    vec![
        SeoMetadata {
            url: "https://example.com/".to_string(),
            title: Some("Example Domain".to_string()),
            meta_description: Some("An example page".to_string()),
            h1_tags: vec!["Welcome".to_string(), "Again".to_string()],
            fetch_method: Some("http".to_string()),
        },
        SeoMetadata::new("https://example.org/").with_fetch_method("browser"),
    ]
}

#[test]
fn test_csv_export_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("results.csv");

    export_to_csv(&records(), &path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "URL,Title,Meta Description,H1 Tags");
    assert_eq!(lines[1], "https://example.com/,Example Domain,An example page,Welcome|Again");
    assert_eq!(lines[2], "https://example.org/,,,");
}

#[test]
fn test_json_export_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("results.json");

    export_to_json(&records(), &path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let parsed: Vec<SeoMetadata> = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed, records());
}

#[test]
fn test_export_to_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no-such-dir").join("results.csv");

    assert!(export_to_csv(&records(), &path).is_err());
}
