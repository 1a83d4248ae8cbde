use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_dictionary::DictionaryClient;
use lexi_suggest::SuggestionClient;
use lexi_types::{AppEvent, SessionSnapshot};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::console::console_loop;
use crate::events::event_loop;
use crate::search::{SearchController, Services};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<SessionSnapshot>, AsyncReceiver<SessionSnapshot>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // snapshot bursts while typing
            ui_to_app: kanal::bounded_async(64),  // user interactions
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Remote clients built from the current config
    async fn services(&self) -> anyhow::Result<Services> {
        let config = self.state.config.read().await;
        let timeout = config.network.request_timeout();

        let dictionary = DictionaryClient::new(config.network.dictionary_url.clone(), timeout)?;
        let suggestions = SuggestionClient::new(config.network.suggestion_url.clone(), timeout)?;

        Ok(Services {
            dictionary: Arc::new(dictionary),
            suggestions: Arc::new(suggestions),
        })
    }

    pub async fn spawn_tasks(&self) -> anyhow::Result<JoinSet<anyhow::Result<()>>> {
        let services = self.services().await?;
        let settings = self.state.config.read().await.search.clone();

        let search = SearchController::new(
            services,
            self.state.preferences.clone(),
            settings,
            self.cancel_token.child_token(),
        );

        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            search,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Presentation
        tasks.spawn(console_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        Ok(tasks)
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
