//! Session setup and initialization

use crate::config::Config;
use crate::endpoints::Endpoints;
use crate::events::Event;
use crate::runtime::{Command, start_dashboard};
use crate::source::client::HttpDataSource;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Frames and activity events from the scheduler
    pub event_receiver: mpsc::Receiver<Event>,
    /// Navigation requests to the scheduler
    pub command_sender: mpsc::Sender<Command>,
    /// Join handle for the scheduler task
    pub join_handle: JoinHandle<()>,
    /// Shutdown sender to stop the scheduler
    pub shutdown_sender: broadcast::Sender<()>,
    /// Data source being polled
    pub endpoints: Endpoints,
}

/// Sets up a polling session
///
/// Builds the HTTP data source from `config`, creates the shutdown channel
/// and starts the refresh scheduler. The first discovery is issued
/// immediately.
pub fn setup_session(config: &Config) -> SessionData {
    let endpoints = config.endpoints();
    let source = Arc::new(HttpDataSource::new(
        endpoints.clone(),
        config.request_timeout(),
    ));

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let (event_receiver, command_sender, join_handle) =
        start_dashboard(source, config, shutdown_sender.subscribe());

    SessionData {
        event_receiver,
        command_sender,
        join_handle,
        shutdown_sender,
        endpoints,
    }
}
