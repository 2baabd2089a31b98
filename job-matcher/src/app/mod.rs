//! Application state and module organization
//!
//! The App owns all interactive state and is driven from the event loop in
//! `main`: key presses come in through [`App::handle_key`], background
//! results through [`App::poll_background`].

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;

use job_matcher_sdk::pipeline;

use crate::api::{HttpApi, JobMatcherApi};
use crate::config::Config;
use crate::matches::MatchList;
use crate::orchestrator::Orchestrator;
use crate::upload::UploadForm;

mod commands;
mod models;
mod notifications;

pub use commands::*;
pub use models::*;
pub use notifications::*;

mod background;
mod command_handlers;
mod dashboard_ops;
mod navigation;
mod results_ops;

impl App {
    pub fn new(config: Config) -> Result<Self> {
        pipeline::validate().context("Pipeline definition is invalid")?;
        let api = HttpApi::from_config(&config).context("Failed to create API client")?;
        Self::with_api(config, Arc::new(api))
    }

    /// Build the App around any API implementation
    pub fn with_api(config: Config, api: Arc<dyn JobMatcherApi>) -> Result<Self> {
        let tokio_runtime =
            tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let orchestrator = Orchestrator::new(api, &config.workflow);

        Ok(Self {
            config,
            current_view: View::Dashboard,
            should_quit: false,
            form: UploadForm::default(),
            focus: FormField::Email,
            is_editing: false,
            edit_buffer: String::new(),
            uploading: false,
            orchestrator,
            pending_handoff: None,
            results: MatchList::default(),
            results_email: None,
            results_loading: false,
            results_scroll: 0,
            notifications: NotificationManager::new(),
            tick: 0,
            events_tx,
            events_rx,
            tokio_runtime,
        })
    }
}
