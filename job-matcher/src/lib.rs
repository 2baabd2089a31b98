// Backend client and run state
pub mod api;
pub mod error;
pub mod orchestrator;
pub mod upload;

// Pipeline views
pub mod dag;
pub mod matches;
pub mod projector;

// Process setup
pub mod cli;
pub mod config;
pub mod headless;
pub mod logging;

// Terminal UI
pub mod app;
pub mod ui;

#[cfg(test)]
mod test_support;
