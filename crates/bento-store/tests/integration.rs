//! Integration tests for bento-store.
//!
//! Property tests drive random operation sequences through the public API
//! and check the collection invariants after every step.

use bento_core::{TextContent, UserProfile, WidgetDraft, WidgetId};
use bento_store::{
    Applied, InMemoryRepository, JsonFileRepository, NullSink, ProfileStore, RecordingSink,
    StoreError, StoreEvent,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn loaded_store() -> (ProfileStore, InMemoryRepository) {
    let repo = InMemoryRepository::with_profile(UserProfile::new("owner", "owner", "Owner"));
    let mut store = ProfileStore::new(repo.clone(), NullSink);
    store.load("owner").expect("seeded profile");
    (store, repo)
}

fn assert_contiguous(store: &ProfileStore) {
    let mut positions: Vec<u32> = store
        .widgets()
        .iter()
        .map(|w| w.position.expect("store assigns positions"))
        .collect();
    positions.sort_unstable();
    let expected: Vec<u32> = (0..store.widgets().len() as u32).collect();
    assert_eq!(positions, expected);

    let ids: HashSet<_> = store.widgets().iter().map(|w| &w.id).collect();
    assert_eq!(ids.len(), store.widgets().len());
}

#[derive(Debug, Clone)]
enum Op {
    Add,
    Delete(usize),
    DeleteMissing,
    Reorder(Vec<usize>),
    Resize(usize, u32, u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        2 => (0usize..16).prop_map(Op::Delete),
        1 => Just(Op::DeleteMissing),
        2 => proptest::collection::vec(any::<usize>(), 0..16).prop_map(Op::Reorder),
        1 => (0usize..16, 50u32..500, 50u32..500).prop_map(|(i, w, h)| Op::Resize(i, w, h)),
    ]
}

proptest! {
    #[test]
    fn prop_positions_stay_contiguous(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let (mut store, _) = loaded_store();

        for op in ops {
            let ids = store.ids();
            match op {
                Op::Add => {
                    let before = store.widgets().len() as u32;
                    let widget = store
                        .add_widget(WidgetDraft::new(TextContent::new("w")))
                        .expect("text content is valid");
                    prop_assert_eq!(widget.position, Some(before));
                }
                Op::Delete(i) if !ids.is_empty() => {
                    store.delete_widget(&ids[i % ids.len()]).expect("loaded");
                }
                Op::Delete(_) | Op::DeleteMissing => {
                    let applied = store.delete_widget(&WidgetId::new("missing")).expect("loaded");
                    prop_assert_eq!(applied, Applied::Missing);
                }
                Op::Reorder(keys) => {
                    // Shuffle by sorting ids on random keys.
                    let mut keyed: Vec<(usize, WidgetId)> = ids
                        .iter()
                        .enumerate()
                        .map(|(i, id)| (keys.get(i).copied().unwrap_or(i), id.clone()))
                        .collect();
                    keyed.sort_by_key(|(k, _)| *k);
                    let order: Vec<WidgetId> = keyed.into_iter().map(|(_, id)| id).collect();
                    store.reorder_widgets(&order).expect("full permutation");
                    prop_assert_eq!(store.ids(), order);
                }
                Op::Resize(i, w, h) if !ids.is_empty() => {
                    let id = &ids[i % ids.len()];
                    let before = store.widget(id).and_then(|x| x.position);
                    store.resize_widget(id, w, h).expect("loaded");
                    prop_assert_eq!(store.widget(id).and_then(|x| x.position), before);
                }
                Op::Resize(..) => {}
            }
            assert_contiguous(&store);
        }
    }

    #[test]
    fn prop_non_permutation_leaves_collection_unchanged(
        n in 1usize..8,
        drop_index in 0usize..8,
        add_foreign in any::<bool>(),
    ) {
        let (mut store, _) = loaded_store();
        for _ in 0..n {
            store.add_widget(WidgetDraft::new(TextContent::new("w"))).expect("valid");
        }
        let before = store.widgets().to_vec();

        let mut order = store.ids();
        order.remove(drop_index % n);
        if add_foreign {
            order.push(WidgetId::new("foreign"));
        }

        let result = store.reorder_widgets(&order);
        let rejected = matches!(result, Err(StoreError::InvalidPermutation { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(store.widgets(), before.as_slice());
    }

    #[test]
    fn prop_delete_is_idempotent(n in 1usize..8, pick in 0usize..8) {
        let (mut once, _) = loaded_store();
        for _ in 0..n {
            once.add_widget(WidgetDraft::new(TextContent::new("w"))).expect("valid");
        }
        let twice_profile = once.profile().cloned().expect("loaded");
        let mut twice = ProfileStore::new(InMemoryRepository::new(), NullSink);
        twice.open(twice_profile);

        let id = once.ids()[pick % n].clone();
        once.delete_widget(&id).expect("loaded");
        twice.delete_widget(&id).expect("loaded");
        twice.delete_widget(&id).expect("loaded");

        prop_assert_eq!(once.widgets(), twice.widgets());
    }
}

#[test]
fn test_add_then_delete_restores_length() {
    let (mut store, _) = loaded_store();
    for _ in 0..3 {
        store
            .add_widget(WidgetDraft::new(TextContent::new("seed")))
            .expect("valid");
    }
    let n = store.widgets().len();

    let widget = store
        .add_widget(WidgetDraft::new(TextContent::new("hi")))
        .expect("valid");
    assert_eq!(widget.position, Some(n as u32));

    store.delete_widget(&widget.id).expect("loaded");
    assert_eq!(store.widgets().len(), n);
    assert_contiguous(&store);
}

#[test]
fn test_late_resize_after_delete_is_noop() {
    let (mut store, repo) = loaded_store();
    let widget = store
        .add_widget(WidgetDraft::new(TextContent::new("doomed")))
        .expect("valid");
    store.delete_widget(&widget.id).expect("loaded");
    let saves = repo.save_count();

    let applied = store.resize_widget(&widget.id, 366, 366).expect("loaded");
    assert_eq!(applied, Applied::Missing);
    assert!(store.widgets().is_empty());
    assert_eq!(repo.save_count(), saves);
}

#[test]
fn test_file_backed_session() {
    let dir = tempfile::tempdir().expect("temp dir");
    let sink = RecordingSink::new();

    let mut store = ProfileStore::new(JsonFileRepository::new(dir.path()), sink.clone());
    store
        .load_or_create("owner-7", "trinity", "Trinity")
        .expect("created");
    let added = store
        .add_widget(WidgetDraft::new(TextContent::new("persisted")))
        .expect("valid");

    let mut reopened = ProfileStore::new(JsonFileRepository::new(dir.path()), NullSink);
    let profile = reopened.load("owner-7").expect("saved to disk");
    assert_eq!(profile.widgets.len(), 4);
    assert_eq!(profile.widgets[3].id, added.id);
    assert!(!sink
        .events()
        .iter()
        .any(|e| matches!(e, StoreEvent::PersistenceFailed { .. })));
}
