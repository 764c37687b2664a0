use sieve_core::{capture::CapturedTab, ItemStore, ItemStoreBuilder};
use tempfile::TempDir;

/// Helper function to create a store backed by a throwaway SQLite file
pub async fn create_test_store() -> (TempDir, ItemStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = ItemStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

/// A page as the capture popup would see it
#[allow(dead_code)]
pub fn example_tab(title: &str) -> CapturedTab {
    CapturedTab {
        url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
        title: title.to_string(),
        screenshot: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
    }
}
