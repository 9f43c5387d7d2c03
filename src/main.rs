use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clubwatch::cli::{handle_log_command, handle_process_command, LogCommands};
use clubwatch::config::{paths::ClubwatchPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "clubwatch",
    version,
    about = "Audit-log pipeline for club and event document changes",
    long_about = "clubwatch classifies document change events from a club/event \
                  management application, records them in an append-only audit \
                  log, and optionally dispatches announcement notifications."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one change event from a JSON file ('-' for stdin)
    Process {
        /// Path to the change event JSON
        file: String,
        /// Dispatch announcement notifications when applicable
        #[arg(long)]
        notify: bool,
    },

    /// Audit log inspection commands
    #[command(subcommand)]
    Log(LogCommands),

    /// Initialize the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = ClubwatchPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Process { file, notify }) => {
            handle_process_command(&paths, &settings, &file, notify)?;
        }

        Some(Commands::Log(cmd)) => {
            handle_log_command(&paths, cmd)?;
        }

        Some(Commands::Init) => {
            println!("Initializing clubwatch at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Audit log: {}", paths.audit_log_file().display());
            println!("Edit {} to configure notification recipients.", paths.settings_file().display());
        }

        Some(Commands::Config) => {
            println!("clubwatch Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log_file().display());
            println!();
            println!("Settings:");
            println!(
                "  Notifications enabled: {}",
                settings.notifications.enabled
            );
            println!(
                "  Recipients:            {}",
                settings.notifications.recipients.len()
            );
            println!(
                "  Max parallel sends:    {}",
                settings.notifications.max_parallel_sends
            );
        }

        None => {
            println!("clubwatch - Audit-log pipeline for club and event document changes");
            println!();
            println!("Run 'clubwatch --help' for usage information.");
            println!("Run 'clubwatch process <event.json>' to handle a change event.");
        }
    }

    Ok(())
}
