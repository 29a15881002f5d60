use crate::config::Config;
use crate::controller::UiController;
use crate::fetcher::ActivityFetcher;
use crate::models::ResponseMode;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: ActivityFetcher,
    pub response_mode: ResponseMode,
    pub ui: Arc<Mutex<UiController>>,
}

impl AppState {
    pub fn new(fetcher: ActivityFetcher, response_mode: ResponseMode) -> Self {
        Self {
            fetcher,
            response_mode,
            ui: Arc::new(Mutex::new(UiController::new())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ActivityFetcher::from_config(config), config.response_mode)
    }
}
