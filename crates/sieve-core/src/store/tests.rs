//! Tests for the store module.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use jiff::{Timestamp, ToSpan};
use tempfile::TempDir;

use super::*;
use crate::{
    error::SieveError,
    events::ITEMS_CHANGED,
    models::{GtdStage, ItemFilter, ItemType},
    params::{DeleteItem, Id, ListItems, TagItem, UpdateItem},
    storage::MemoryStorage,
};

/// Helper function to create a test store
async fn create_test_store() -> (TempDir, ItemStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = ItemStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

fn item(id: u64, item_type: ItemType) -> WorkItem {
    WorkItem {
        id,
        item_type: Some(item_type),
        title: Some(format!("Item {id}")),
        url: Some(format!("https://example.com/{id}")),
        system_tags: vec![item_type.status_tag()],
        ..Default::default()
    }
}

/// Counts `items-changed` emissions and remembers the last payload size.
fn count_changes(store: &ItemStore) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let last_len = Arc::new(AtomicUsize::new(0));
    let (c, l) = (Arc::clone(&count), Arc::clone(&last_len));
    let _subscription = store.on(ITEMS_CHANGED, move |items| {
        c.fetch_add(1, Ordering::SeqCst);
        l.store(items.len(), Ordering::SeqCst);
        Ok(())
    });
    (count, last_len)
}

/// Storage whose writes always fail.
#[derive(Default)]
struct FailingWrites {
    inner: MemoryStorage,
}

impl KeyValueStorage for FailingWrites {
    fn get(&self, key: &str) -> crate::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> crate::Result<()> {
        Err(SieveError::storage("quota exceeded"))
    }

    fn remove(&self, key: &str) -> crate::Result<()> {
        self.inner.remove(key)
    }
}

/// Storage that can answer the next read with an old snapshot, standing in
/// for a second view that loaded the collection before another view wrote.
#[derive(Default)]
struct StaleRead {
    inner: MemoryStorage,
    stale: Mutex<Option<Option<String>>>,
}

impl StaleRead {
    fn serve_once(&self, snapshot: Option<String>) {
        *self.stale.lock().unwrap() = Some(snapshot);
    }
}

impl KeyValueStorage for StaleRead {
    fn get(&self, key: &str) -> crate::Result<Option<String>> {
        if let Some(snapshot) = self.stale.lock().unwrap().take() {
            return Ok(snapshot);
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> crate::Result<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> crate::Result<()> {
        self.inner.remove(key)
    }
}

#[tokio::test]
async fn test_save_and_get_round_trip() {
    let (_temp_dir, store) = create_test_store().await;

    let saved = store
        .save_item(&item(1, ItemType::Todo))
        .await
        .expect("Failed to save item");

    assert_eq!(saved.id, 1);
    assert_eq!(saved.gtd_stage, Some(GtdStage::Inbox));
    assert!(saved.created_at.is_some());
    assert_eq!(saved.system_tags, vec!["status:todo", "gtd:inbox"]);

    let items = store
        .get_all_items(&ItemFilter::default())
        .await
        .expect("Failed to list items");
    assert_eq!(items, vec![saved.clone()]);

    let fetched = store.get_item(1).await.expect("Failed to get item");
    assert_eq!(fetched, Some(saved));
}

#[tokio::test]
async fn test_collection_survives_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");

    let store = ItemStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    store
        .save_item(&item(7, ItemType::Waiting))
        .await
        .expect("Failed to save item");
    drop(store);

    let reopened = ItemStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to reopen store");
    let stored = reopened.get_item(7).await.expect("get").expect("item present");
    assert_eq!(stored.gtd_stage, Some(GtdStage::WaitingFor));
}

#[tokio::test]
async fn test_empty_store() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();

    assert!(store.get_all_items(&ItemFilter::default()).await.unwrap().is_empty());
    assert!(store.get_all_tags().await.unwrap().is_empty());
    assert_eq!(store.get_item(1).await.unwrap(), None);
}

#[tokio::test]
async fn test_default_stage_from_type() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();

    for (id, item_type, stage) in [
        (1, ItemType::Todo, GtdStage::Inbox),
        (2, ItemType::InProgress, GtdStage::Inbox),
        (3, ItemType::Waiting, GtdStage::WaitingFor),
        (4, ItemType::Completed, GtdStage::Completed),
    ] {
        let saved = store.save_item(&item(id, item_type)).await.unwrap();
        assert_eq!(saved.gtd_stage, Some(stage), "type {item_type:?}");
        assert!(saved.has_tag(&stage.system_tag()));
    }
}

#[tokio::test]
async fn test_items_sorted_newest_first() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();
    let base = Timestamp::now();

    for (id, offset) in [(1, 0_i64), (2, 20), (3, 10)] {
        let mut new = item(id, ItemType::Todo);
        new.created_at = Some(base + offset.seconds());
        store.save_item(&new).await.unwrap();
    }

    let ids: Vec<u64> = store
        .get_all_items(&ItemFilter::default())
        .await
        .unwrap()
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_filters() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();

    let mut tagged = item(1, ItemType::Todo);
    tagged.tags = vec!["work".to_string()];
    store.save_item(&tagged).await.unwrap();
    store.save_item(&item(2, ItemType::Completed)).await.unwrap();

    let by_tag = store.get_all_items(&ItemFilter::for_tag("work")).await.unwrap();
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].id, 1);

    let by_system_tag = store
        .get_all_items(&ItemFilter::for_tag("gtd:completed"))
        .await
        .unwrap();
    assert_eq!(by_system_tag.len(), 1);
    assert_eq!(by_system_tag[0].id, 2);

    let by_stage = store
        .list_items(&ListItems {
            stage: Some(GtdStage::Inbox),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_stage.len(), 1);

    let by_type = store
        .list_items(&ListItems {
            item_type: Some(ItemType::Completed),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].id, 2);

    let by_search = store
        .list_items(&ListItems {
            search: Some(" ITEM 2 ".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].id, 2);

    let blank_search = store
        .list_items(&ListItems {
            search: Some("   ".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(blank_search.len(), 2);
}

#[tokio::test]
async fn test_merge_keeps_stored_fields() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();

    let mut original = item(1, ItemType::Todo);
    original.text = Some("keep me".to_string());
    original.tags = vec!["reading".to_string()];
    original.screenshot = Some("data:image/png;base64,AAAA".to_string());
    let original = store.save_item(&original).await.unwrap();

    let partial = WorkItem {
        id: 1,
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let merged = store.save_item(&partial).await.unwrap();

    assert_eq!(merged.title.as_deref(), Some("Renamed"));
    assert_eq!(merged.text.as_deref(), Some("keep me"));
    assert_eq!(merged.screenshot, original.screenshot);
    assert_eq!(merged.url, original.url);
    assert_eq!(merged.created_at, original.created_at);
    assert_eq!(merged.system_tags, original.system_tags);
    assert!(merged.updated_at >= original.updated_at);
    // User tags are always part of the incoming item, so they are replaced
    assert!(merged.tags.is_empty());
    assert_eq!(store.get_all_items(&ItemFilter::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_system_tags_only_grow() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();
    store.save_item(&item(1, ItemType::Todo)).await.unwrap();

    let rewrite = WorkItem {
        id: 1,
        gtd_stage: Some(GtdStage::Someday),
        system_tags: vec!["gtd:someday".to_string()],
        ..Default::default()
    };
    let saved = store.save_item(&rewrite).await.unwrap();

    assert_eq!(
        saved.system_tags,
        vec!["status:todo", "gtd:inbox", "gtd:someday"]
    );
}

#[tokio::test]
async fn test_unassigned_ids_do_not_collide() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();

    let first = store
        .save_item(&item(WorkItem::UNASSIGNED_ID, ItemType::Todo))
        .await
        .unwrap();
    let second = store
        .save_item(&item(WorkItem::UNASSIGNED_ID, ItemType::Todo))
        .await
        .unwrap();

    assert_ne!(first.id, WorkItem::UNASSIGNED_ID);
    assert!(second.id > first.id);
    assert_eq!(store.get_all_items(&ItemFilter::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_all_tags_distinct_and_sorted() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();

    let mut a = item(1, ItemType::Todo);
    a.tags = vec!["work".to_string(), "".to_string(), "urgent".to_string()];
    let mut b = item(2, ItemType::Todo);
    b.tags = vec!["work".to_string(), "work".to_string(), "home".to_string()];
    store.save_item(&a).await.unwrap();
    let b = store.save_item(&b).await.unwrap();

    assert_eq!(b.tags, vec!["work", "home"]);
    assert_eq!(
        store.get_all_tags().await.unwrap(),
        vec!["home", "urgent", "work"]
    );
}

#[tokio::test]
async fn test_every_write_emits_full_collection() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();
    let (count, last_len) = count_changes(&store);

    store.save_item(&item(1, ItemType::Todo)).await.unwrap();
    store.save_item(&item(2, ItemType::Todo)).await.unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(last_len.load(Ordering::SeqCst), 2);

    store.delete_item(1).await.unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 3);
    assert_eq!(last_len.load(Ordering::SeqCst), 1);

    // Reads never emit
    store.get_all_items(&ItemFilter::default()).await.unwrap();
    store.get_all_tags().await.unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_delete_missing_id_still_writes_and_emits() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();
    store.save_item(&item(1, ItemType::Todo)).await.unwrap();
    let (count, last_len) = count_changes(&store);

    store.delete_item(42).await.expect("deleting a missing id succeeds");
    store.delete_item(42).await.expect("and is idempotent");

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(last_len.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_save_does_not_emit() {
    let storage = Arc::new(FailingWrites::default());
    let store = ItemStoreBuilder::new()
        .with_storage(storage.clone())
        .build()
        .await
        .unwrap();
    let (count, _) = count_changes(&store);

    let err = store.save_item(&item(1, ItemType::Todo)).await.unwrap_err();
    assert!(matches!(err, SieveError::Storage { .. }));
    assert_eq!(count.load(Ordering::SeqCst), 0);

    assert!(store.delete_item(1).await.is_err());
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(storage.get(ITEMS_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_concurrent_writers_last_write_wins() {
    let storage = Arc::new(StaleRead::default());
    let store = ItemStoreBuilder::new()
        .with_storage(storage.clone())
        .build()
        .await
        .unwrap();

    store.save_item(&item(1, ItemType::Todo)).await.unwrap();
    let snapshot = storage.get(ITEMS_KEY).unwrap();

    // Another view writes item 2 after the snapshot was taken.
    store.save_item(&item(2, ItemType::Todo)).await.unwrap();

    // This writer still sees the old collection and overwrites it whole.
    storage.serve_once(snapshot);
    store.save_item(&item(3, ItemType::Todo)).await.unwrap();

    let mut ids: Vec<u64> = store
        .get_all_items(&ItemFilter::default())
        .await
        .unwrap()
        .iter()
        .map(|i| i.id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_unknown_stored_fields_survive_writes() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            ITEMS_KEY,
            r#"[{"id":5,"type":"todo","title":"Legacy","pinned":true}]"#,
        )
        .unwrap();
    let store = ItemStoreBuilder::new()
        .with_storage(storage.clone())
        .build()
        .await
        .unwrap();

    store.save_item(&item(6, ItemType::Todo)).await.unwrap();

    let raw = storage.get(ITEMS_KEY).unwrap().unwrap();
    assert!(raw.contains(r#""pinned":true"#));
    let legacy = store.get_item(5).await.unwrap().unwrap();
    assert_eq!(legacy.effective_stage(), GtdStage::Inbox);
}

#[tokio::test]
async fn test_blank_stored_dates_do_not_break_the_store() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            ITEMS_KEY,
            r#"[{"id":5,"type":"waiting","gtdStage":"waiting-for","waitingFor":"Sam","waitingUntil":"","delegateDate":""}]"#,
        )
        .unwrap();
    let store = ItemStoreBuilder::new()
        .with_storage(storage)
        .build()
        .await
        .unwrap();

    let items = store.get_all_items(&ItemFilter::default()).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].waiting_for.as_deref(), Some("Sam"));
    assert_eq!(items[0].waiting_until, None);

    let created = store
        .save_item(&item(WorkItem::UNASSIGNED_ID, ItemType::Todo))
        .await
        .unwrap();
    assert_ne!(created.id, 5);
    assert_eq!(store.get_all_items(&ItemFilter::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_exhausted_id_space_is_an_error() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();
    store.save_item(&item(u64::MAX, ItemType::Todo)).await.unwrap();

    let err = store
        .save_item(&item(WorkItem::UNASSIGNED_ID, ItemType::Todo))
        .await
        .unwrap_err();

    assert!(matches!(err, SieveError::Storage { .. }));
    let ids: Vec<u64> = store
        .get_all_items(&ItemFilter::default())
        .await
        .unwrap()
        .iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec![u64::MAX]);
}

#[tokio::test]
async fn test_update_item_records_changes() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();
    store.save_item(&item(1, ItemType::Todo)).await.unwrap();

    let result = store
        .update_item(&UpdateItem {
            id: 1,
            text: Some("Read chapter 3".to_string()),
            stage: Some(GtdStage::Someday),
            tags: Some(vec![" books ".to_string(), "".to_string()]),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(result.changes.len(), 3);
    assert_eq!(result.resource.text.as_deref(), Some("Read chapter 3"));
    assert_eq!(result.resource.gtd_stage, Some(GtdStage::Someday));
    assert_eq!(result.resource.tags, vec!["books"]);
    assert_eq!(
        result.resource.system_tags,
        vec!["status:todo", "gtd:inbox", "gtd:someday"]
    );
}

#[tokio::test]
async fn test_update_missing_item() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();

    let err = store
        .update_item(&UpdateItem {
            id: 99,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SieveError::ItemNotFound { id: 99 }));

    let err = store.show_item(&Id { id: 99 }).await.unwrap_err();
    assert!(matches!(err, SieveError::ItemNotFound { id: 99 }));
}

#[tokio::test]
async fn test_add_and_remove_tag() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();
    store.save_item(&item(1, ItemType::Todo)).await.unwrap();

    let tagged = store
        .add_tag(&TagItem {
            id: 1,
            tag: "  reading ".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(tagged.tags, vec!["reading"]);

    let again = store
        .add_tag(&TagItem {
            id: 1,
            tag: "reading".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(again.tags, vec!["reading"]);

    let untagged = store
        .remove_tag(&TagItem {
            id: 1,
            tag: "reading".to_string(),
        })
        .await
        .unwrap();
    assert!(untagged.tags.is_empty());
    assert!(store.get_all_tags().await.unwrap().is_empty());

    let err = store
        .add_tag(&TagItem {
            id: 1,
            tag: "   ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();
    store.save_item(&item(1, ItemType::Todo)).await.unwrap();

    let err = store
        .delete_item_confirmed(&DeleteItem {
            id: 1,
            confirmed: false,
        })
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(store.get_item(1).await.unwrap().is_some());

    let deleted = store
        .delete_item_confirmed(&DeleteItem {
            id: 1,
            confirmed: true,
        })
        .await
        .unwrap();
    assert_eq!(deleted.map(|i| i.id), Some(1));
    assert!(store.get_item(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_stage_counts() {
    let store = ItemStoreBuilder::new().in_memory().build().await.unwrap();
    store.save_item(&item(1, ItemType::Todo)).await.unwrap();
    store.save_item(&item(2, ItemType::Todo)).await.unwrap();
    store.save_item(&item(3, ItemType::Completed)).await.unwrap();

    let counts = store.stage_counts().await.unwrap();
    assert_eq!(counts.get(GtdStage::Inbox), 2);
    assert_eq!(counts.get(GtdStage::Completed), 1);
    assert_eq!(counts.get(GtdStage::Someday), 0);
    assert_eq!(counts.total(), 3);
}
