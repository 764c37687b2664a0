mod common;

use common::{create_test_store, example_tab};
use sieve_core::{
    capture::capture,
    completion::{record_answers, CompletionAnswers, FollowUp},
    models::{GtdStage, ItemFilter, ItemType, WorkItem},
    params::CaptureItem,
    stage_model::{DelegationMode, BRAINSTORM_SOURCE_TAG, FROM_BRAINSTORM_TAG},
    workflow::{Answer, InboxSession, Processor, Progress},
    ItemStore,
};

async fn capture_todo(store: &ItemStore, title: &str) -> WorkItem {
    capture(
        store,
        &example_tab(title),
        &CaptureItem {
            item_type: ItemType::Todo,
            text: None,
            tags: vec![],
        },
    )
    .await
    .expect("Failed to capture")
}

#[tokio::test]
async fn test_trash_terminates() {
    let (_temp_dir, store) = create_test_store().await;
    let item = capture_todo(&store, "Throwaway").await;

    let mut session = InboxSession::start(Processor::new(store.clone()), DelegationMode::ToDelegate)
        .await
        .expect("Failed to start session");
    session.answer(Answer::No).await.expect("not actionable");
    session.answer(Answer::Trash).await.expect("trash");

    let items = store.get_all_items(&ItemFilter::default()).await.expect("list");
    assert!(items.iter().all(|i| i.id != item.id));
    assert!(session.is_finished());
}

#[tokio::test]
async fn test_brainstorm_fan_out() {
    let (_temp_dir, store) = create_test_store().await;
    let item = capture_todo(&store, "Launch plan").await;

    let mut session = InboxSession::start(Processor::new(store.clone()), DelegationMode::ToDelegate)
        .await
        .expect("Failed to start session");
    session.answer(Answer::Yes).await.expect("actionable");
    session.answer(Answer::No).await.expect("not two minutes");
    session.answer(Answer::NeedsThought).await.expect("brainstorm");
    let progress = session
        .answer(Answer::Convert {
            notes: Some("N".to_string()),
            next_actions: vec!["A".to_string(), "B".to_string()],
        })
        .await
        .expect("convert");
    assert!(matches!(progress, Progress::Done(ref notice) if !notice.is_error()));

    let source = store.get_item(item.id).await.expect("get").expect("source kept");
    assert_eq!(source.gtd_stage, Some(GtdStage::Reference));
    assert!(source.has_tag(BRAINSTORM_SOURCE_TAG));
    assert_eq!(source.brainstorm_notes.as_deref(), Some("N"));

    let actions = store
        .get_all_items(&ItemFilter::for_stage(GtdStage::NextActions))
        .await
        .expect("list");
    assert_eq!(actions.len(), 2);
    for action in &actions {
        assert!(action.has_tag(FROM_BRAINSTORM_TAG));
        assert_eq!(action.source_item_id, Some(item.id));
        assert_eq!(action.url, item.url);
    }
    let mut texts: Vec<_> = actions.iter().filter_map(|a| a.text.clone()).collect();
    texts.sort();
    assert_eq!(texts, vec!["A", "B"]);
}

#[tokio::test]
async fn test_stage_tags_accumulate_across_transitions() {
    let (_temp_dir, store) = create_test_store().await;
    let item = capture_todo(&store, "Wander").await;
    let processor = Processor::new(store.clone());

    processor
        .file(item.id, &sieve_core::stage_model::Decision::NextAction)
        .await
        .expect("next action");
    processor
        .file(item.id, &sieve_core::stage_model::Decision::Someday)
        .await
        .expect("someday");

    let stored = store.get_item(item.id).await.expect("get").expect("present");
    assert_eq!(
        stored.system_tags,
        vec!["status:todo", "gtd:inbox", "gtd:next-actions", "gtd:someday"]
    );
    assert_eq!(stored.item_type, Some(ItemType::InProgress));
}

#[tokio::test]
async fn test_two_minute_then_announce() {
    let (_temp_dir, store) = create_test_store().await;
    let item = capture_todo(&store, "Quick fix").await;

    let mut session = InboxSession::start(Processor::new(store.clone()), DelegationMode::ToDelegate)
        .await
        .expect("Failed to start session");
    session.answer(Answer::Yes).await.expect("actionable");
    session.answer(Answer::Yes).await.expect("do now");

    let answers = CompletionAnswers::from([
        (FollowUp::Investors, false),
        (FollowUp::Users, true),
        (FollowUp::Blog, true),
        (FollowUp::Team, false),
    ]);
    let saved = record_answers(&store, item.id, &answers)
        .await
        .expect("record answers");

    assert_eq!(saved.gtd_stage, Some(GtdStage::Completed));
    assert!(saved.has_tag("gtd:two-minute-rule"));
    assert!(saved.has_tag("update:users"));
    assert!(saved.has_tag("content:blog"));
    assert!(!saved.has_tag("update:investors"));
}
