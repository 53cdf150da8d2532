pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod store;
pub mod summarizer;

use std::sync::Arc;
use config::Config;
use store::SummaryStore;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: SummaryStore,
}
