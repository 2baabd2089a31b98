use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use job_matcher::api::{HttpApi, JobMatcherApi};
use job_matcher::app::App;
use job_matcher::cli::{Args, Command};
use job_matcher::config::Config;
use job_matcher::headless;
use job_matcher::logging::{self, LogTarget};
use job_matcher::ui::ui;

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    config.apply_args(&args);

    match args.command {
        Some(command) => run_headless(config, command),
        None => run_tui(config),
    }
}

fn run_headless(config: Config, command: Command) -> Result<()> {
    let target = match &config.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Stderr,
    };
    logging::init(&target)?;

    job_matcher_sdk::pipeline::validate().context("Pipeline definition is invalid")?;
    let api: Arc<dyn JobMatcherApi> =
        Arc::new(HttpApi::from_config(&config).context("Failed to create API client")?);

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let mut stdout = io::stdout();
    runtime.block_on(async {
        match command {
            Command::Run(run) => headless::run(&mut stdout, api, &config.workflow, &run).await,
            Command::Matches { email } => headless::matches(&mut stdout, api, &email).await,
        }
    })
}

fn run_tui(config: Config) -> Result<()> {
    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    logging::init(&LogTarget::File(log_path))?;
    info!(api = %config.api_base_url, "Starting job-matcher");

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "Terminal UI exited with an error");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.on_tick();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Paste(text) => app.paste(&text),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
