//! Main application state

use std::time::Instant;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use super::{FormField, View};
use crate::app::commands::BackgroundEvent;
use crate::app::notifications::NotificationManager;
use crate::config::Config;
use crate::matches::MatchList;
use crate::orchestrator::{Handoff, Orchestrator};
use crate::upload::UploadForm;

/// A completed run waiting out the handoff delay
#[derive(Debug, Clone)]
pub struct PendingHandoff {
    pub due: Instant,
    pub handoff: Handoff,
}

pub struct App {
    pub config: Config,
    pub current_view: View,
    pub should_quit: bool,

    // Dashboard form
    pub form: UploadForm,
    pub focus: FormField,
    pub is_editing: bool,
    pub edit_buffer: String,
    pub uploading: bool,

    // Run state; the orchestrator is the only writer of run status
    pub orchestrator: Orchestrator,
    pub pending_handoff: Option<PendingHandoff>,

    // Results view
    pub results: MatchList,
    pub results_email: Option<String>,
    pub results_loading: bool,
    pub results_scroll: usize,

    pub notifications: NotificationManager,
    /// Frame counter driving edge animation
    pub tick: u64,

    pub events_tx: UnboundedSender<BackgroundEvent>,
    pub events_rx: UnboundedReceiver<BackgroundEvent>,
    pub tokio_runtime: tokio::runtime::Runtime,
}
