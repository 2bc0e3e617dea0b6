//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds no color state itself: the hue and the broadcast group live inside
//! the relay dispatch task, reached through `RelayHandle`.

use std::sync::Arc;

use crate::config::Config;
use crate::routes::page;
use crate::services::relay::RelayHandle;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub relay: RelayHandle,
    /// Index page, rendered once at startup.
    pub index_html: Arc<str>,
    /// Capacity of each connection's outbound frame queue.
    pub client_buffer: usize,
}

impl AppState {
    #[must_use]
    pub fn new(relay: RelayHandle, config: &Config) -> Self {
        Self {
            relay,
            index_html: page::render_index(&config.page_data).into(),
            client_buffer: config.client_buffer,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
