use std::sync::Arc;

use lexi_config::Config;
use lexi_core::Preferences;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub preferences: Preferences,
}

impl AppState {
    pub fn new(config: Config, preferences: Preferences) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            preferences,
        }
    }
}
