//! Application state for the meeting API

use std::sync::Arc;

use change_engine::{ChangeEngine, DocumentStore};
use tokio::sync::Mutex;

use crate::llm::LanguageModel;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend
    pub llm: Arc<dyn LanguageModel>,
    /// Contract database
    pub store: Arc<dyn DocumentStore>,
    pub engine: ChangeEngine,
    /// Serializes load-apply-save cycles within this process
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(llm: Arc<dyn LanguageModel>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            llm,
            store,
            engine: ChangeEngine::new(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}
