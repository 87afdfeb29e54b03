//! wfblock - Warframe matchmaking pair blocker
//!
//! A small Windows utility that forces the local machine into the host role
//! by blocking the game's outbound UDP matchmaking ports with one named
//! firewall rule.
//!
//! # Features
//!
//! - Pick one of the six port pairs the game can be configured to use
//! - Block / restore with a single click, guarded against repeated clicks
//! - Automatic restore a configurable number of seconds after a block
//! - Live status banner polled from `netsh` after every action
//! - Shortcut to the Windows Defender Firewall console
//! - Automatic relaunch as administrator
//!
//! # Usage
//!
//! ```bash
//! # Run the GUI application
//! wfblock
//!
//! # CLI commands
//! wfblock status                       # Show whether matchmaking is blocked
//! wfblock block --ports "3074 & 3080"  # Block a port pair
//! wfblock block --auto-recover 30      # Block, then restore after 30s
//! wfblock restore                      # Remove the block rule
//! wfblock console                      # Open the firewall console
//! wfblock ports                        # List the available port pairs
//! ```

mod app;
mod config;
mod core;
mod elevation;
mod fonts;
mod theme;
mod utils;

use crate::config::AppConfig;
use crate::core::actions::{self, ActionOutcome};
use crate::core::error::Error;
use crate::core::netsh::SystemRunner;
use crate::core::ports::PortPair;
use crate::core::recover::{self, MAX_RECOVER_SECS, MIN_RECOVER_SECS};
use crate::core::status;
use clap::{Parser, Subcommand};
use iced::Size;
use shadow_rs::shadow;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

shadow!(build);

const LONG_VERSION: &str = shadow_rs::formatcp!(
    "{} (commit {}, built {})",
    build::PKG_VERSION,
    build::SHORT_COMMIT,
    build::BUILD_TIME
);

const WINDOW_TITLE: &str = "WarframePairBlockTool";

#[derive(Parser)]
#[command(name = "wfblock", version, long_version = LONG_VERSION)]
#[command(about = "Block Warframe matchmaking UDP ports to force hosting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether the block rule is present
    Status,
    /// Create and enable the block rule
    Block {
        /// Port pair to block, e.g. "4950 & 4955"
        #[arg(short, long, default_value_t = PortPair::default())]
        ports: PortPair,
        /// Restore the rule again after this many seconds (1-999)
        #[arg(
            short,
            long,
            value_name = "SECONDS",
            value_parser = clap::value_parser!(u32)
                .range(i64::from(MIN_RECOVER_SECS)..=i64::from(MAX_RECOVER_SECS))
        )]
        auto_recover: Option<u32>,
    },
    /// Remove the block rule
    Restore,
    /// Open the Windows Defender Firewall console
    Console,
    /// List the available port pairs
    Ports,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    if let Some(command) = cli.command {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(config.log_level)
            .init();

        // Create Tokio runtime only for CLI commands
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
        match runtime.block_on(handle_cli(command, &config)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        }
    } else {
        // GUI runs in normal sync context (Iced has its own async runtime)
        launch_gui(config)
    }
}

async fn handle_cli(
    command: Commands,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let runner = SystemRunner::from_config(config);

    match command {
        Commands::Status => {
            let status = status::poll(&runner).await;
            println!("Status: {} ({})", status, status.indicator());
        }
        Commands::Block {
            ports,
            auto_recover,
        } => {
            println!("Blocking {} (localport={})...", ports, ports.range());
            let outcome = actions::block(&runner, ports).await;
            let arm = recover::should_arm(&outcome);
            report(outcome)?;

            if auto_recover.is_some() && !arm {
                println!("Rule was not created by this run, skipping auto-recover");
            } else if let Some(seconds) = auto_recover {
                let outcome = recover::recover_after(&runner, seconds, |remaining| {
                    print!("\rAuto-recover in {remaining:3}s   ");
                    std::io::stdout().flush().ok();
                })
                .await;
                println!("\rRestoring...          ");
                report(outcome)?;
            }
        }
        Commands::Restore => {
            println!("Restoring...");
            report(actions::restore(&runner).await)?;
        }
        Commands::Console => {
            report(actions::open_console(&runner).await)?;
        }
        Commands::Ports => {
            println!("Available port pairs (* = default):");
            for pair in PortPair::all() {
                let marker = if pair == PortPair::default() { '*' } else { ' ' };
                println!("  {marker} {:<12} localport={}", pair.label(), pair.range());
            }
        }
    }
    Ok(())
}

/// Prints an action outcome; a flow that stopped early is an error
fn report(outcome: ActionOutcome) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(notice) = outcome.notice {
        println!("{}", notice.message());
    }
    println!("Status: {} ({})", outcome.status, outcome.status.indicator());

    match outcome.failure {
        Some(failure) => Err(format!("{failure}. Run with WFBLOCK_LOG=debug for details.").into()),
        None => Ok(()),
    }
}

/// Reads the window icon; any failure here is fatal for the GUI
fn load_icon(path: &Path) -> Result<iced::window::Icon, Error> {
    let icon_error = |message: String| Error::Icon {
        path: path.display().to_string(),
        message,
    };

    let bytes = std::fs::read(path).map_err(|e| icon_error(e.to_string()))?;
    iced::window::icon::from_file_data(&bytes, None).map_err(|e| icon_error(e.to_string()))
}

/// Blocking error dialog for failures that stop the GUI from starting
fn show_fatal_error(message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(WINDOW_TITLE)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn init_gui_logging(level: tracing::Level) {
    // Set up logging to file
    if utils::ensure_log_dir().is_ok()
        && let Some(log_path) = utils::get_log_path()
        && let Ok(file) = std::fs::File::create(log_path)
    {
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_max_level(level)
            .init();
    } else {
        tracing_subscriber::fmt().with_max_level(level).init();
    }
}

fn launch_gui(config: AppConfig) -> ExitCode {
    init_gui_logging(config.log_level);
    info!("Starting {}", LONG_VERSION);

    if !config.skip_elevation && !elevation::is_elevated() {
        return match elevation::relaunch_elevated() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{e}");
                show_fatal_error(&format!(
                    "需要系統管理員權限 (administrator rights required)\n{e}"
                ));
                ExitCode::FAILURE
            }
        };
    }

    if fonts::publish(&config).is_none() {
        warn!(
            "No font matching {} found, CJK text may not render",
            config.font_pattern
        );
    }

    let icon = match load_icon(&config.icon_path) {
        Ok(icon) => icon,
        Err(e) => {
            error!("{e}");
            show_fatal_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    // Clears WFBLOCK_FONT again before the window exists
    let font = fonts::take_published().unwrap_or_else(|e| {
        warn!("{e}");
        None
    });
    let default_font = font.as_ref().and_then(fonts::LoadedFont::to_font);
    if let Some(font) = &font {
        info!("Using font {}", font.path.display());
    }

    let mut application = iced::application(
        move || app::State::new(&config, default_font),
        app::State::update,
        app::State::view,
    )
    .window(iced::window::Settings {
        size: Size::new(260.0, 400.0),
        position: iced::window::Position::Centered,
        resizable: false,
        icon: Some(icon),
        ..Default::default()
    })
    .subscription(app::State::subscription)
    .title(WINDOW_TITLE)
    .theme(|_state: &app::State| iced::Theme::Dark);

    if let Some(font) = font {
        application = application.font(font.bytes);
    }
    if let Some(default_font) = default_font {
        application = application.default_font(default_font);
    }

    match application.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("GUI exited with error: {e}");
            ExitCode::FAILURE
        }
    }
}
