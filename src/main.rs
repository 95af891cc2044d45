//! Focus Widget - a minimalist focus timer for the terminal
//!
//! - A countdown (90 minutes by default) with an optional task label
//! - A full-screen flashing border and tone when time is up
//! - A 20-20-20 eye-care reminder running alongside

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use focus_widget::cli::{Cli, Commands, Display};
use focus_widget::sound::{RodioSoundPlayer, SoundPlayer};
use focus_widget::widget::terminal;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// The widget owns the terminal, so logs go to `log_file` or nowhere.
fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(false);

    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("ログファイルを開けません: {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    init_tracing(cli.verbose, cli.log_file.as_deref())?;
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = cli.widget_config();
    config.validate().map_err(anyhow::Error::msg)?;

    let player: Arc<dyn SoundPlayer> = Arc::new(RodioSoundPlayer::new(!config.sound_enabled));
    let summary = terminal::run(config, player).await?;
    Display::show_summary(&summary);

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
