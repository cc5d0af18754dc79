//! Backend mirror and load coordination for the transformation analyzer.
//!
//! Mirrors the backend's environment and communication collections into an
//! in-memory store and keeps the UI consumers in step with it.
//!
//! # Components
//!
//! - **Transport**: the async request primitive, with an HTTP implementation
//!   and a scripted mock
//! - **Store**: collections, name indices, settings and load states
//! - **Readiness**: one token per entity kind and an all-ready combinator
//! - **Hub**: explicit subscription list; gates and fans out re-init
//! - **Loader**: bulk/single loads, saves and analysis requests
//! - **Session**: wires the above together
//!
//! # Startup
//!
//! 1. Both settings files and both collections are requested concurrently
//! 2. Each successful load mutates the store, then calls `notify_all`
//! 3. Once the gate opens, every consumer recomputes its view
//!
//! # Example
//!
//! ```
//! use tanalyzer_sync::{Session, SyncConfig};
//! use tanalyzer_sync::transport::mock::MockTransport;
//! use std::sync::Arc;
//!
//! let session = Session::new(Arc::new(MockTransport::new()), &SyncConfig::default());
//! assert_eq!(session.hub().subscriber_count(), 0);
//! ```

mod config;
mod error;
pub mod http;
pub mod hub;
pub mod loader;
pub mod readiness;
mod session;
pub mod store;
pub mod transport;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use http::{HttpTransport, HttpTransportConfig};
pub use hub::{Consumer, ConsumerRole, NotificationHub};
pub use loader::{Loader, StartupFailure, StartupReport};
pub use readiness::{Readiness, ReadinessGate};
pub use session::Session;
pub use store::{EntityStore, SharedStore, StoreReader};
pub use transport::{BackendRequest, Method, Transport, TransportError};
