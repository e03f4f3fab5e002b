pub mod api;
pub mod app;
pub mod avatar;
pub mod cli;
pub mod config;
pub mod event;
pub mod labels;
pub mod refresh;
pub mod screen;
pub mod ui;

use std::fs::OpenOptions;

use api::FuturamaClient;
use app::App;
use clap::Parser;
use cli::{Cli, CliCommand};
use config::{AppConfig, load_config};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = load_config();
    init_tracing(&config)?;

    let cli = Cli::parse();

    match cli.command {
        // No subcommand or explicit `tui` → launch the interactive TUI.
        None | Some(CliCommand::Tui) => run_tui(config).await,
        // All other subcommands → non-interactive JSONL output.
        Some(cmd) => cli::run_command(cmd, config).await,
    }
}

/// Initialize tracing from `RUST_LOG`; logs go to the configured file, or
/// stderr when none is set.
fn init_tracing(config: &AppConfig) -> color_eyre::Result<()> {
    let builder =
        tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env());

    match config.log_file {
        Some(ref path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Launch the interactive TUI.
async fn run_tui(config: AppConfig) -> color_eyre::Result<()> {
    let client = FuturamaClient::new(&config)?;
    tracing::info!(base_url = %config.api_base_url, "starting tui");

    let terminal = ratatui::init();
    let result = App::new(config, client).run(terminal).await;
    ratatui::restore();
    result
}
