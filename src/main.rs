//! Cultivation Settings - Headless Host
//!
//! Drives the settings controller from the command line and prints the
//! resulting view as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use cultivation_settings::app::application::start_controller;
use cultivation_settings::app::config::LauncherConfig;
use cultivation_settings::app::logging;
use cultivation_settings::domain::config::OptionKey;
use cultivation_settings::states::{EditOutcome, SettingsController, SettingsEvent};
use crossbeam_channel::Receiver;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cultivation-settings")]
#[command(about = "Inspect and edit Cultivation launcher settings")]
#[command(version)]
struct Cli {
    /// Launcher config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current settings view
    Show,

    /// Set an option, e.g. `set client_version 4.0`
    Set { option: String, value: String },

    /// Flip "start Grasscutter with the game"
    ToggleWithGame,

    /// Flip encryption in the Grasscutter server config
    ToggleEncryption,

    /// Reset the background to the theme's own
    ClearBackground,

    /// Rebuild the view from the stored configuration
    Reinit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LauncherConfig::from_file(path),
        None => LauncherConfig::try_load(),
    }
    .context("loading launcher config")?;
    let data_dir = config.data_dir().context("resolving application data directory")?;

    let _guard = logging::init(&config.log_dir(&data_dir), &config.log_level)
        .context("initializing logging")?;
    tracing::info!(data_dir = ?data_dir, "Starting Cultivation settings host...");

    let (mut controller, events) = start_controller(&config, &data_dir)
        .await
        .context("starting settings controller")?;

    let result = run(&mut controller, cli.command.unwrap_or(Commands::Show)).await;
    print_notices(&events);
    result?;

    println!("{}", serde_json::to_string_pretty(controller.view())?);
    Ok(())
}

async fn run(controller: &mut SettingsController, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Show => {}
        Commands::Set { option, value } => {
            let key: OptionKey = option.parse()?;
            let outcome = controller.set_option(key, key.parse_value(&value)?).await?;
            tracing::info!(%key, ?outcome, "Set option");
        }
        Commands::ToggleWithGame => {
            let enabled = controller.toggle_grasscutter_with_game().await?;
            tracing::info!(enabled, "Toggled grasscutter_with_game");
        }
        Commands::ToggleEncryption => {
            if controller.toggle_encryption().await? == EditOutcome::Refused {
                anyhow::bail!("encryption toggle refused");
            }
        }
        Commands::ClearBackground => {
            controller.clear_background().await?;
        }
        Commands::Reinit => controller.reinitialize().await,
    }
    Ok(())
}

fn print_notices(events: &Receiver<SettingsEvent>) {
    for event in events.try_iter() {
        if let SettingsEvent::Toast { message, is_error } = event {
            if is_error {
                eprintln!("error: {message}");
            } else {
                eprintln!("{message}");
            }
        }
    }
}
