//! Search history persisted through the JSON file store.

use imagesearcher::SearchHistory;
use imagesearcher::config::HistoryConfig;
use std::path::PathBuf;

fn temp_history_config() -> HistoryConfig {
    let dir: PathBuf =
        std::env::temp_dir().join(format!("imagesearcher-history-{}", uuid::Uuid::new_v4()));
    HistoryConfig {
        path: dir.join("history.json"),
        ..HistoryConfig::default()
    }
}

fn cleanup(config: &HistoryConfig) {
    if let Some(dir) = config.path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[test]
fn test_fresh_file_has_no_history() {
    let config = temp_history_config();
    let history = SearchHistory::from_config(&config);

    assert!(history.get_history().is_empty());
    assert!(!config.path.exists());
}

#[test]
fn test_history_survives_restart() {
    let config = temp_history_config();

    {
        let history = SearchHistory::from_config(&config);
        for q in ["q1", "q2", "q3", "q4", "q5", "q6"] {
            history.record_query(q);
        }
    }

    let reopened = SearchHistory::from_config(&config);
    assert_eq!(reopened.get_history(), vec!["q6", "q5", "q4", "q3", "q2"]);

    reopened.record_query("q4");
    assert_eq!(reopened.get_history(), vec!["q6", "q5", "q4", "q3", "q2"]);

    cleanup(&config);
}

#[test]
fn test_suggestions_from_persisted_history() {
    let config = temp_history_config();
    let history = SearchHistory::from_config(&config);

    history.record_query("grab a coffee");
    history.record_query("Tabby cat");
    history.record_query("forest");

    let reopened = SearchHistory::from_config(&config);
    assert_eq!(
        reopened.filter_history("AB"),
        vec!["Tabby cat", "grab a coffee"]
    );

    cleanup(&config);
}

#[test]
fn test_history_file_uses_named_slot() {
    let config = temp_history_config();
    let history = SearchHistory::from_config(&config);
    history.record_query("lighthouse");

    let content = std::fs::read_to_string(&config.path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["searchHistory"], serde_json::json!(["lighthouse"]));

    cleanup(&config);
}
