use serde_json::json;
use tanalyzer_sync::transport::mock::MockTransport;
use tanalyzer_sync::{BackendRequest, Method, Transport, TransportError};
use tanalyzer_types::EntityKind;

// ── BackendRequest shapes ───────────────────────────────────────

#[test]
fn load_single_query() {
    let req = BackendRequest::load_single(EntityKind::Environments, "EnvA");
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.param("folderName"), Some("environments"));
    assert_eq!(req.param("fileName"), Some("EnvA"));
    assert_eq!(req.param("operation"), Some("single"));
    assert!(req.body.is_none());
    assert_eq!(req.route(), "GET single environments/EnvA");
}

#[test]
fn load_multi_query() {
    let req = BackendRequest::load_multi(EntityKind::Communications);
    assert_eq!(req.param("operation"), Some("multi"));
    assert_eq!(req.param("fileName"), None);
    assert_eq!(req.route(), "GET multi communications");
}

#[test]
fn create_query_and_body() {
    let req = BackendRequest::create(EntityKind::Environments, "EnvA", json!({ "name": "EnvA" }));
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.param("postRequestType"), Some("create"));
    assert_eq!(req.body, Some(json!({ "name": "EnvA" })));
    assert_eq!(req.route(), "POST create environments/EnvA");
}

#[test]
fn analyse_query_has_empty_body() {
    let req = BackendRequest::analyse("E1", "E2", "C1");
    assert_eq!(req.param("env1"), Some("E1"));
    assert_eq!(req.param("env2"), Some("E2"));
    assert_eq!(req.param("oldComm"), Some("C1"));
    assert_eq!(req.param("postRequestType"), Some("analyse"));
    assert_eq!(req.param("folderName"), None);
    assert_eq!(req.body, Some(json!({})));
    assert_eq!(req.route(), "POST analyse");
}

#[test]
fn transport_error_display() {
    let err = TransportError::Status {
        status: 503,
        body: "down".into(),
    };
    assert_eq!(err.to_string(), "backend returned status 503: down");
}

// ── MockTransport ───────────────────────────────────────────────

#[tokio::test]
async fn mock_replies_in_order_then_sticks_to_last() {
    let mock = MockTransport::new();
    mock.on_multi(EntityKind::Environments, Ok(json!([1])))
        .on_multi(EntityKind::Environments, Ok(json!([2])));

    let req = || BackendRequest::load_multi(EntityKind::Environments);
    assert_eq!(mock.request(req()).await.unwrap(), json!([1]));
    assert_eq!(mock.request(req()).await.unwrap(), json!([2]));
    assert_eq!(mock.request(req()).await.unwrap(), json!([2]));
    assert_eq!(mock.count("GET multi environments"), 3);
}

#[tokio::test]
async fn mock_unknown_route_fails_like_unreachable_backend() {
    let mock = MockTransport::new();
    let err = mock
        .request(BackendRequest::load_multi(EntityKind::Communications))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Request(_)));
}

#[tokio::test]
async fn mock_records_requests() {
    let mock = MockTransport::new();
    mock.on_analyse(Ok(json!([])));
    mock.request(BackendRequest::analyse("A", "B", "C")).await.unwrap();

    let seen = mock.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].param("env1"), Some("A"));
}

#[tokio::test(start_paused = true)]
async fn mock_delay_reorders_completion() {
    use std::time::Duration;

    let mock = MockTransport::new();
    mock.on_multi(EntityKind::Environments, Ok(json!("env")))
        .on_multi(EntityKind::Communications, Ok(json!("comm")))
        .delay("GET multi environments", Duration::from_millis(50));

    let order = std::sync::Mutex::new(Vec::new());
    let run = |kind| {
        let mock = mock.clone();
        let order = &order;
        async move {
            let v = mock.request(BackendRequest::load_multi(kind)).await.unwrap();
            order.lock().unwrap().push(v);
        }
    };
    tokio::join!(run(EntityKind::Environments), run(EntityKind::Communications));

    assert_eq!(*order.lock().unwrap(), vec![json!("comm"), json!("env")]);
}
