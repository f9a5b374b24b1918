//! Integration tests for the tags crate
//!
//! These tests drive the full flow from menu-style selections through the
//! action handler to (simulated) server state.

use std::sync::{Arc, Mutex};

use tags::{
    InMemoryTagService, Notice, NoticeSeverity, NotificationSink, Selection, TagActionHandler,
    TagError, TagListView, TagRegistry, Target, TargetId, TargetKind, resolve,
};

/// Notification sink that records every notice
struct RecordingSink {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
        }
    }

    fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// List view hook that tracks the visible item set
struct FakeListView {
    visible: Mutex<Vec<String>>,
    rollbacks: Mutex<usize>,
}

impl FakeListView {
    fn showing(ids: &[&str]) -> Self {
        Self {
            visible: Mutex::new(ids.iter().map(|s| s.to_string()).collect()),
            rollbacks: Mutex::new(0),
        }
    }

    fn visible(&self) -> Vec<String> {
        self.visible.lock().unwrap().clone()
    }

    fn rollback_count(&self) -> usize {
        *self.rollbacks.lock().unwrap()
    }
}

impl TagListView for FakeListView {
    fn drop_from_view(&self, targets: &[Target], _tag_name: &str) {
        let mut visible = self.visible.lock().unwrap();
        visible.retain(|id| !targets.iter().any(|t| t.id.as_str() == id));
    }

    fn restore_to_view(&self, targets: &[Target], _tag_name: &str) {
        let mut visible = self.visible.lock().unwrap();
        for target in targets {
            if !visible.iter().any(|id| id == target.id.as_str()) {
                visible.push(target.id.0.clone());
            }
        }
        *self.rollbacks.lock().unwrap() += 1;
    }
}

fn setup(
    kind: TargetKind,
    view: Arc<FakeListView>,
) -> (Arc<InMemoryTagService>, Arc<RecordingSink>, TagActionHandler) {
    let service = Arc::new(InMemoryTagService::new());
    let sink = Arc::new(RecordingSink::new());
    let registry = Arc::new(TagRegistry::new(service.clone()));
    let handler = TagActionHandler::new(kind, registry, service.clone(), sink.clone(), view);
    (service, sink, handler)
}

#[test]
fn test_full_message_tagging_scenario() {
    let view = Arc::new(FakeListView::showing(&["M100"]));
    let (service, sink, handler) = setup(TargetKind::Message, view.clone());

    // Create tag "Test" color 1; the server assigns the id.
    let id = handler.create_tag("Test", 1).unwrap();
    let tags = handler.list_tags().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, id);
    assert_eq!(tags[0].name, "Test");
    assert_eq!(tags[0].color, 1);

    // Apply "Test" to message M100; assignment is reflected server-side.
    let targets = resolve(&Selection::Message(TargetId::new("M100"))).unwrap();
    handler.apply_tag(&targets, "Test").unwrap();
    assert_eq!(service.tag_names_for("M100"), vec!["Test"]);

    // Remove with removeFromList: the optimistic drop fires immediately and
    // the confirmed success leaves it dropped.
    handler.remove_tag(&targets, "Test", true).unwrap();
    assert!(view.visible().is_empty());
    assert_eq!(view.rollback_count(), 0);
    assert!(service.tag_names_for("M100").is_empty());

    // Delete "Test"; the registry no longer knows it.
    handler.delete_tag("Test").unwrap();
    assert!(handler.list_tags().unwrap().is_empty());

    // A later apply fails before any remote call.
    let err = handler.apply_tag(&targets, "Test").unwrap_err();
    assert!(matches!(err, TagError::TagNotFound { .. }));

    // Every settlement produced exactly one notice, all successes but the last.
    let notices = sink.notices();
    assert_eq!(notices.len(), 7);
    assert_eq!(notices[0].message, format!("Tag created with id: {}", id.as_str()));
    assert_eq!(notices[6].severity, NoticeSeverity::Error);
}

#[test]
fn test_apply_then_remove_is_idempotent() {
    let view = Arc::new(FakeListView::showing(&[]));
    let (service, _, handler) = setup(TargetKind::Message, view);

    handler.create_tag("Test", 1).unwrap();
    let targets = resolve(&Selection::Messages(vec![
        TargetId::new("1000"),
        TargetId::new("1001"),
    ]))
    .unwrap();

    let before = service.tag_names_for("1000");
    handler.apply_tag(&targets, "Test").unwrap();
    handler.remove_tag(&targets, "Test", false).unwrap();
    assert_eq!(service.tag_names_for("1000"), before);
    assert_eq!(service.tag_names_for("1001"), before);

    // Re-applying an already-present tag is a no-op success.
    handler.apply_tag(&targets, "Test").unwrap();
    handler.apply_tag(&targets, "Test").unwrap();
    assert_eq!(service.tag_names_for("1000"), vec!["Test"]);
}

#[test]
fn test_failed_optimistic_removal_restores_view() {
    let view = Arc::new(FakeListView::showing(&["M1", "M2", "M3"]));
    let (service, _, handler) = setup(TargetKind::Message, view.clone());

    handler.create_tag("Test", 1).unwrap();
    let targets = resolve(&Selection::Messages(vec![
        TargetId::new("M1"),
        TargetId::new("M3"),
    ]))
    .unwrap();
    handler.apply_tag(&targets, "Test").unwrap();

    service.set_offline(true);
    let err = handler.remove_tag(&targets, "Test", true).unwrap_err();
    assert!(matches!(err, TagError::RemoteFailure(_)));

    // Exactly one rollback, and the view shows all three items again.
    assert_eq!(view.rollback_count(), 1);
    let mut visible = view.visible();
    visible.sort();
    assert_eq!(visible, vec!["M1", "M2", "M3"]);

    // The handler stays usable after the failure.
    service.set_offline(false);
    handler.remove_tag(&targets, "Test", false).unwrap();
}

#[test]
fn test_contact_selection_flow() {
    let view = Arc::new(FakeListView::showing(&[]));
    let (service, _, handler) = setup(TargetKind::Contact, view);

    handler.create_tag("VIP", 4).unwrap();

    let selection = Selection::Contacts(vec![
        TargetId::new("c1"),
        TargetId::new("c2"),
        TargetId::new("c1"),
    ]);
    let targets = resolve(&selection).unwrap();
    assert_eq!(targets.len(), 2);

    handler.apply_tag(&targets, "VIP").unwrap();
    assert_eq!(service.tag_names_for("c1"), vec!["VIP"]);
    assert_eq!(service.tag_names_for("c2"), vec!["VIP"]);

    // The contacts surface has no delete affordance.
    let err = handler.delete_tag("VIP").unwrap_err();
    assert!(matches!(err, TagError::IntentNotAvailable { .. }));
    assert!(service.tag_by_name("VIP").is_some());
}

#[test]
fn test_operations_on_distinct_tags_are_independent() {
    let view = Arc::new(FakeListView::showing(&[]));
    let (service, _, handler) = setup(TargetKind::Message, view);

    handler.create_tag("Work", 1).unwrap();
    handler.create_tag("Home", 2).unwrap();

    let handler = Arc::new(handler);
    let mut workers = Vec::new();
    for (name, item) in [("Work", "m1"), ("Home", "m2")] {
        let handler = handler.clone();
        workers.push(std::thread::spawn(move || {
            handler.apply_tag(&[Target::message(item)], name)
        }));
    }
    for worker in workers {
        worker.join().unwrap().unwrap();
    }

    assert_eq!(service.tag_names_for("m1"), vec!["Work"]);
    assert_eq!(service.tag_names_for("m2"), vec!["Home"]);
}

#[test]
fn test_remote_failure_leaves_registry_at_last_known_good() {
    let view = Arc::new(FakeListView::showing(&[]));
    let (service, sink, handler) = setup(TargetKind::Message, view);

    handler.create_tag("Work", 1).unwrap();
    let before = handler.list_tags().unwrap();

    service.set_offline(true);
    assert!(handler.create_tag("Home", 2).is_err());
    assert!(handler.update_tag("Work", tags::TagUpdate::recolor(5)).is_err());
    assert!(handler.delete_tag("Work").is_err());
    service.set_offline(false);

    assert_eq!(handler.list_tags().unwrap(), before);

    // Each failed settlement was reported once.
    let errors = sink
        .notices()
        .iter()
        .filter(|n| n.severity == NoticeSeverity::Error)
        .count();
    assert_eq!(errors, 3);
}
