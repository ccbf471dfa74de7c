use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Store;

/// Shared handler context: the store handle and the loaded configuration
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
