//! Transport layer abstraction.
//!
//! Every backend interaction is one request against a single endpoint: a
//! method, a flat query map and an optional JSON body. The answer is either
//! a JSON payload or a transport failure; application-level rejections are
//! ordinary payloads and are interpreted by the loader.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tanalyzer_types::EntityKind;
use thiserror::Error;

/// HTTP-level verb of a backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

/// A fully described backend request.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: Method,
    pub query: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl BackendRequest {
    fn new(method: Method, query: &[(&str, &str)], body: Option<Value>) -> Self {
        Self {
            method,
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            body,
        }
    }

    /// GET one named file of a folder.
    pub fn load_single(kind: EntityKind, file_name: &str) -> Self {
        Self::new(
            Method::Get,
            &[
                ("folderName", kind.folder_name()),
                ("fileName", file_name),
                ("operation", "single"),
            ],
            None,
        )
    }

    /// GET every entity of a folder.
    pub fn load_multi(kind: EntityKind) -> Self {
        Self::new(
            Method::Get,
            &[("folderName", kind.folder_name()), ("operation", "multi")],
            None,
        )
    }

    /// POST a new file into a folder.
    pub fn create(kind: EntityKind, file_name: &str, content: Value) -> Self {
        Self::new(
            Method::Post,
            &[
                ("folderName", kind.folder_name()),
                ("fileName", file_name),
                ("postRequestType", "create"),
            ],
            Some(content),
        )
    }

    /// POST an analysis request. The body is always an empty object.
    pub fn analyse(env1: &str, env2: &str, old_comm: &str) -> Self {
        Self::new(
            Method::Post,
            &[
                ("env1", env1),
                ("env2", env2),
                ("oldComm", old_comm),
                ("postRequestType", "analyse"),
            ],
            Some(Value::Object(Default::default())),
        )
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Short routing key, e.g. `GET multi environments` or
    /// `POST create communications/MQTT`.
    pub fn route(&self) -> String {
        let op = self
            .param("operation")
            .or_else(|| self.param("postRequestType"))
            .unwrap_or("?");
        if op == "analyse" {
            return format!("{} analyse", self.method);
        }
        let folder = self.param("folderName").unwrap_or("?");
        match self.param("fileName") {
            Some(file) => format!("{} {op} {folder}/{file}", self.method),
            None => format!("{} {op} {folder}", self.method),
        }
    }
}

/// A request that did not produce a usable backend answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection, DNS, timeout or similar.
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not JSON.
    #[error("invalid response body: {0}")]
    Body(String),
}

/// Generic async request primitive against the backend.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: BackendRequest) -> Result<Value, TransportError>;
}

/// A scripted transport for testing.
pub mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    /// One scripted answer.
    pub type Reply = Result<Value, TransportError>;

    #[derive(Debug, Default)]
    struct Script {
        replies: HashMap<String, VecDeque<Reply>>,
        delays: HashMap<String, Duration>,
        requests: Vec<BackendRequest>,
    }

    /// Answers requests from per-route reply queues.
    ///
    /// Each route is keyed by [`BackendRequest::route`]. Queued replies are
    /// consumed in order; the last one keeps answering once the queue is
    /// down to it. Unknown routes fail like an unreachable backend.
    #[derive(Debug, Clone, Default)]
    pub struct MockTransport {
        script: Arc<Mutex<Script>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn script(&self) -> std::sync::MutexGuard<'_, Script> {
            self.script.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Queues a reply for a route key.
        pub fn reply(&self, route: impl Into<String>, reply: Reply) -> &Self {
            self.script()
                .replies
                .entry(route.into())
                .or_default()
                .push_back(reply);
            self
        }

        /// Delays every answer on a route, to control completion order.
        pub fn delay(&self, route: impl Into<String>, delay: Duration) -> &Self {
            self.script().delays.insert(route.into(), delay);
            self
        }

        pub fn on_multi(&self, kind: EntityKind, reply: Reply) -> &Self {
            self.reply(BackendRequest::load_multi(kind).route(), reply)
        }

        pub fn on_single(&self, kind: EntityKind, name: &str, reply: Reply) -> &Self {
            self.reply(BackendRequest::load_single(kind, name).route(), reply)
        }

        pub fn on_create(&self, kind: EntityKind, name: &str, reply: Reply) -> &Self {
            self.reply(
                BackendRequest::create(kind, name, Value::Null).route(),
                reply,
            )
        }

        pub fn on_analyse(&self, reply: Reply) -> &Self {
            self.reply(BackendRequest::analyse("", "", "").route(), reply)
        }

        /// Every request seen so far, in arrival order.
        pub fn requests(&self) -> Vec<BackendRequest> {
            self.script().requests.clone()
        }

        /// Number of requests seen on a route.
        pub fn count(&self, route: &str) -> usize {
            self.script()
                .requests
                .iter()
                .filter(|r| r.route() == route)
                .count()
        }

        fn next_reply(&self, request: &BackendRequest) -> (Option<Duration>, Reply) {
            let route = request.route();
            let mut script = self.script();
            script.requests.push(request.clone());
            let delay = script.delays.get(&route).copied();
            let reply = match script.replies.get_mut(&route) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            };
            let reply = reply.unwrap_or_else(|| {
                Err(TransportError::Request(format!("no mock reply for {route}")))
            });
            (delay, reply)
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn request(&self, request: BackendRequest) -> Result<Value, TransportError> {
            let (delay, reply) = self.next_reply(&request);
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            reply
        }
    }
}
