use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tanalyzer_sync::{
    Consumer, ConsumerRole, NotificationHub, Readiness, ReadinessGate, SharedStore, SyncConfig,
    SyncError,
};
use tanalyzer_types::{DropDownListItem, EntityKind, LoadClass, LoadState};

#[derive(Default)]
struct Counter {
    reinits: AtomicUsize,
    shown: Mutex<Vec<Value>>,
    selected: Mutex<Vec<String>>,
}

impl Consumer for Counter {
    fn re_init(&self) {
        self.reinits.fetch_add(1, Ordering::SeqCst);
    }

    fn display_result(&self, payload: &Value) {
        self.shown.lock().unwrap().push(payload.clone());
    }

    fn on_base_selection_changed(&self, item: &DropDownListItem) {
        self.selected.lock().unwrap().push(item.item_name.clone());
    }
}

fn hub(gate: ReadinessGate) -> (NotificationHub, SharedStore, Arc<Readiness>) {
    let store = SharedStore::new();
    let readiness = Arc::new(Readiness::new());
    let hub = NotificationHub::new(store.clone(), Arc::clone(&readiness), gate);
    (hub, store, readiness)
}

// ── Readiness ────────────────────────────────────────────────────

#[test]
fn readiness_starts_closed() {
    let readiness = Readiness::new();
    assert!(!readiness.is_ready(EntityKind::Environments));
    assert!(!readiness.all_ready());
}

#[test]
fn all_ready_needs_every_kind() {
    let readiness = Readiness::new();
    readiness.mark_ready(EntityKind::Environments);
    assert!(!readiness.all_ready());
    readiness.mark_ready(EntityKind::Communications);
    assert!(readiness.all_ready());

    // Marking twice changes nothing.
    readiness.mark_ready(EntityKind::Communications);
    assert!(readiness.all_ready());
}

#[test]
fn gate_modes_consult_different_signals() {
    let readiness = Readiness::new();
    assert!(!readiness.gate_open(ReadinessGate::AllKinds, LoadState::Success));
    assert!(readiness.gate_open(ReadinessGate::SharedBulkFlag, LoadState::Success));
    assert!(!readiness.gate_open(ReadinessGate::SharedBulkFlag, LoadState::Error));

    readiness.mark_ready(EntityKind::Environments);
    readiness.mark_ready(EntityKind::Communications);
    assert!(readiness.gate_open(ReadinessGate::AllKinds, LoadState::Error));
}

#[tokio::test]
async fn wait_ready_wakes_on_mark() {
    let readiness = Arc::new(Readiness::new());
    let waiter = {
        let readiness = Arc::clone(&readiness);
        tokio::spawn(async move { readiness.wait_all().await })
    };

    readiness.mark_ready(EntityKind::Communications);
    readiness.mark_ready(EntityKind::Environments);
    waiter.await.unwrap();
}

#[test]
fn readiness_gate_serde_names() {
    assert_eq!(
        serde_json::to_value(ReadinessGate::SharedBulkFlag).unwrap(),
        json!("shared_bulk_flag")
    );
    let gate: ReadinessGate = serde_json::from_value(json!("all_kinds")).unwrap();
    assert_eq!(gate, ReadinessGate::AllKinds);
}

// ── Hub gating ───────────────────────────────────────────────────

#[test]
fn notify_all_skips_while_gate_closed() {
    let (hub, _store, readiness) = hub(ReadinessGate::AllKinds);
    let consumer = Arc::new(Counter::default());
    hub.subscribe(ConsumerRole::EnvironmentEditor, consumer.clone());

    readiness.mark_ready(EntityKind::Environments);
    assert!(!hub.notify_all());
    assert_eq!(consumer.reinits.load(Ordering::SeqCst), 0);
    assert_eq!(hub.dispatch_count(), 0);
}

#[test]
fn notify_all_reaches_every_subscriber_once_open() {
    let (hub, _store, readiness) = hub(ReadinessGate::AllKinds);
    let consumers: Vec<Arc<Counter>> = (0..3).map(|_| Arc::new(Counter::default())).collect();
    hub.subscribe(ConsumerRole::EnvironmentEditor, consumers[0].clone());
    hub.subscribe(ConsumerRole::CommunicationEditor, consumers[1].clone());
    hub.subscribe(ConsumerRole::Analysis, consumers[2].clone());
    assert_eq!(hub.subscriber_count(), 3);

    readiness.mark_ready(EntityKind::Environments);
    readiness.mark_ready(EntityKind::Communications);
    assert!(hub.is_open());
    assert!(hub.notify_all());

    for consumer in &consumers {
        assert_eq!(consumer.reinits.load(Ordering::SeqCst), 1);
    }
    assert_eq!(hub.dispatch_count(), 1);
}

#[test]
fn shared_bulk_gate_follows_store_state() {
    let (hub, store, _readiness) = hub(ReadinessGate::SharedBulkFlag);
    assert_eq!(hub.gate(), ReadinessGate::SharedBulkFlag);
    assert!(!hub.is_open());

    store.write(|s| s.set_load_state(LoadClass::Bulk, LoadState::Success));
    assert!(hub.is_open());

    store.write(|s| s.set_load_state(LoadClass::Bulk, LoadState::Error));
    assert!(!hub.notify_all());
}

#[test]
fn consumer_may_subscribe_from_reinit() {
    struct Subscriber {
        hub: Arc<NotificationHub>,
        added: AtomicUsize,
    }

    impl Consumer for Subscriber {
        fn re_init(&self) {
            if self.added.fetch_add(1, Ordering::SeqCst) == 0 {
                self.hub
                    .subscribe(ConsumerRole::Analysis, Arc::new(Counter::default()));
            }
        }

        fn display_result(&self, _payload: &Value) {}

        fn on_base_selection_changed(&self, _item: &DropDownListItem) {}
    }

    let store = SharedStore::new();
    let readiness = Arc::new(Readiness::new());
    let hub = Arc::new(NotificationHub::new(
        store,
        Arc::clone(&readiness),
        ReadinessGate::AllKinds,
    ));
    hub.subscribe(
        ConsumerRole::EnvironmentEditor,
        Arc::new(Subscriber {
            hub: Arc::clone(&hub),
            added: AtomicUsize::new(0),
        }),
    );
    readiness.mark_ready(EntityKind::Environments);
    readiness.mark_ready(EntityKind::Communications);

    assert!(hub.notify_all());
    assert_eq!(hub.subscriber_count(), 2);
}

// ── Result routing ───────────────────────────────────────────────

#[test]
fn display_routes_by_role() {
    let (hub, _store, _readiness) = hub(ReadinessGate::AllKinds);
    let envs = Arc::new(Counter::default());
    let comms = Arc::new(Counter::default());
    let analysis = Arc::new(Counter::default());
    hub.subscribe(ConsumerRole::EnvironmentEditor, envs.clone());
    hub.subscribe(ConsumerRole::CommunicationEditor, comms.clone());
    hub.subscribe(ConsumerRole::Analysis, analysis.clone());

    hub.display_for_kind(EntityKind::Communications, &json!({ "SUCCESS": "saved" }));
    hub.display(ConsumerRole::Analysis, &json!([]));

    assert!(envs.shown.lock().unwrap().is_empty());
    assert_eq!(*comms.shown.lock().unwrap(), vec![json!({ "SUCCESS": "saved" })]);
    assert_eq!(*analysis.shown.lock().unwrap(), vec![json!([])]);
}

#[test]
fn display_without_subscriber_is_dropped() {
    let (hub, _store, _readiness) = hub(ReadinessGate::AllKinds);
    hub.display(ConsumerRole::Analysis, &json!({ "ERROR": "nobody listens" }));
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn owner_of_maps_kinds_to_editors() {
    assert_eq!(
        ConsumerRole::owner_of(EntityKind::Environments),
        ConsumerRole::EnvironmentEditor
    );
    assert_eq!(
        ConsumerRole::owner_of(EntityKind::Communications),
        ConsumerRole::CommunicationEditor
    );
}

#[test]
fn base_selection_cleared_defaults_to_reinit() {
    let consumer = Counter::default();
    consumer.on_base_selection_changed(&DropDownListItem::new(2, "EnvA"));
    consumer.on_base_selection_cleared();
    assert_eq!(*consumer.selected.lock().unwrap(), vec!["EnvA".to_string()]);
    assert_eq!(consumer.reinits.load(Ordering::SeqCst), 1);
}

// ── Configuration ────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = SyncConfig::default();
    assert_eq!(config.servlet_url, "http://localhost:8080/RestServlet");
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.readiness_gate, ReadinessGate::AllKinds);
    assert_eq!(config.http().timeout_secs, 30);
}

#[test]
fn config_from_partial_json() {
    let config = SyncConfig::from_json(r#"{ "readiness_gate": "shared_bulk_flag" }"#).unwrap();
    assert_eq!(config.readiness_gate, ReadinessGate::SharedBulkFlag);
    assert_eq!(config.servlet_url, SyncConfig::default().servlet_url);
}

#[test]
fn config_rejects_invalid_values() {
    let err = SyncConfig::from_json(r#"{ "servlet_url": "  " }"#).unwrap_err();
    assert!(matches!(err, SyncError::Config(_)));

    let err = SyncConfig::from_json(r#"{ "request_timeout_secs": 0 }"#).unwrap_err();
    assert!(matches!(err, SyncError::Config(_)));

    let err = SyncConfig::from_json("not json").unwrap_err();
    assert!(matches!(err, SyncError::Serialization(_)));
}
