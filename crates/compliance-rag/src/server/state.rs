//! Application state for the chat server

use std::sync::Arc;

use crate::chat::ChatService;
use crate::config::RagConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RagConfig,
    chat: ChatService,
}

impl AppState {
    /// Create new application state
    pub fn new(config: RagConfig, chat: ChatService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, chat }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the chat service
    pub fn chat(&self) -> &ChatService {
        &self.inner.chat
    }
}
