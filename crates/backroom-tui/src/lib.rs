//! backroom TUI — ratatui application shell.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

use std::sync::Arc;
use std::time::Duration;

use backroom_api::{HttpCatalogClient, SyncController};
use backroom_core::config::Config;

pub use app::App;

/// Build the client and controller from config and start the TUI.
///
/// The caller owns the tokio runtime; network tasks are spawned onto
/// `handle` while the UI loop stays on the calling thread.
pub fn run(handle: tokio::runtime::Handle, base_url: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load().unwrap_or_else(|_| Config::defaults());
    if let Some(base_url) = base_url {
        config.api.base_url = base_url;
    }

    let theme = theme::Theme::load_default();
    let client = HttpCatalogClient::new(
        config.api.base_url.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )?;
    let controller = SyncController::new(Arc::new(client), handle, config.ui.page_size);

    App::new(controller, config, theme).run()
}
