mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use petcal_core::{EventStateStore, PetcalConfig, ReminderPreset};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "petcal")]
#[command(about = "Inspect and update local status and reminders for your pet's events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show local state for one event, or for every event
    Show {
        event_id: Option<String>,

        /// Print the raw stored document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record what happened to an event
    Mark {
        event_id: String,

        #[arg(value_enum)]
        status: MarkAs,
    },
    /// Forget the recorded status (back to pending)
    Reset { event_id: String },
    /// Manage scheduled reminder handles
    Reminders {
        #[command(subcommand)]
        action: RemindersAction,
    },
    /// Manage the reminder preset picked for an event
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
    /// Show or change quiet hours
    QuietHours {
        /// First quiet hour (0-23)
        #[arg(long, requires = "end")]
        start: Option<u8>,

        /// Hour quiet time ends (0-23)
        #[arg(long, requires = "start")]
        end: Option<u8>,
    },
    /// Drop all local state for an event
    Forget {
        event_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show config and storage paths
    Config,
}

#[derive(Subcommand)]
enum RemindersAction {
    /// Replace the reminder handles for an event
    Set {
        event_id: String,
        handles: Vec<String>,
    },
    /// Remove the reminder handles for an event
    Clear { event_id: String },
}

#[derive(Subcommand)]
enum PresetAction {
    /// Pick a preset (e.g. 15min, 1hour, 1day)
    Set {
        event_id: String,
        preset: ReminderPreset,
    },
    /// Remove the preset for an event
    Clear { event_id: String },
    /// List available presets
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarkAs {
    Completed,
    Cancelled,
    Missed,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = PetcalConfig::load()?;

    let store = EventStateStore::open_default(&config).await;
    debug!(
        data_dir = %config.data_path().display(),
        key = store.key(),
        "Opened event state store"
    );
    let result = dispatch(cli.command, &config, &store);

    // Let pending writes land before the runtime goes away
    store.flush().await;

    result
}

fn dispatch(command: Commands, config: &PetcalConfig, store: &EventStateStore) -> Result<()> {
    match command {
        Commands::Show { event_id, json } => commands::show::run(store, event_id.as_deref(), json),
        Commands::Mark { event_id, status } => {
            match status {
                MarkAs::Completed => store.mark_completed(&event_id),
                MarkAs::Cancelled => store.mark_cancelled(&event_id),
                MarkAs::Missed => store.mark_missed(&event_id),
            }
            commands::show::run(store, Some(&event_id), false)
        }
        Commands::Reset { event_id } => {
            store.reset_status(&event_id);
            commands::show::run(store, Some(&event_id), false)
        }
        Commands::Reminders { action } => match action {
            RemindersAction::Set { event_id, handles } => {
                commands::reminders::set(store, &event_id, handles)
            }
            RemindersAction::Clear { event_id } => commands::reminders::clear(store, &event_id),
        },
        Commands::Preset { action } => match action {
            PresetAction::Set { event_id, preset } => {
                commands::preset::set(store, &event_id, preset)
            }
            PresetAction::Clear { event_id } => commands::preset::clear(store, &event_id),
            PresetAction::List => {
                commands::preset::list();
                Ok(())
            }
        },
        Commands::QuietHours { start, end } => commands::quiet_hours::run(store, start, end),
        Commands::Forget { event_id, force } => commands::forget::run(store, &event_id, force),
        Commands::Config => commands::config::run(config, store),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("PETCAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
