//! View models for the transformation analyzer.
//!
//! Three consumers of the sync layer:
//! - [`EnvironmentEditor`]: create or customize environments
//! - [`CommunicationEditor`]: create or customize communications
//! - [`AnalysisView`]: request and render a transformation analysis
//!
//! Each holds a read-only store handle and its own form state. The sync
//! layer drives them through [`tanalyzer_sync::Consumer`]; the host drives
//! them through their setters and `submit`.

pub mod analysis;
pub mod communication;
pub mod environment;
mod error;
pub mod naming;
pub mod output;
pub mod selection;

pub use analysis::{AnalysisForm, AnalysisReport, AnalysisRequest, AnalysisView};
pub use communication::{CommunicationEditor, CommunicationForm};
pub use environment::{EnvironmentEditor, EnvironmentForm};
pub use error::{ViewError, ViewResult};
pub use output::OutputWindow;
pub use selection::SelectionList;

use std::sync::Arc;
use tanalyzer_sync::{ConsumerRole, Session, StoreReader};

/// The three views, subscribed to one session.
#[derive(Clone)]
pub struct ViewSet {
    pub environments: Arc<EnvironmentEditor>,
    pub communications: Arc<CommunicationEditor>,
    pub analysis: Arc<AnalysisView>,
}

impl ViewSet {
    /// Creates the views over the session's store and subscribes them.
    pub fn attach(session: &Session) -> Self {
        let store: Arc<dyn StoreReader> = Arc::new(session.store().clone());
        let views = Self {
            environments: Arc::new(EnvironmentEditor::new(Arc::clone(&store))),
            communications: Arc::new(CommunicationEditor::new(Arc::clone(&store))),
            analysis: Arc::new(AnalysisView::new(store)),
        };
        session.subscribe(ConsumerRole::EnvironmentEditor, views.environments.clone());
        session.subscribe(ConsumerRole::CommunicationEditor, views.communications.clone());
        session.subscribe(ConsumerRole::Analysis, views.analysis.clone());
        views
    }
}
