use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use exhibit::app::App;
use exhibit::form::FormController;
use exhibit::image::create_image_protocol;
use exhibit::logging::{self, FlashMessage};
use exhibit::models::RegistrationId;
use exhibit::storage::{
    Config, ConfigStorage, ParticipantStore, SqliteParticipantStore, TomlConfigStorage,
    database_location, resolve_directories,
};

/// Key poll interval; flash messages expire between key presses at this granularity
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "exhibit")]
#[command(about = "Innovation exhibition participant registration", long_about = None)]
struct Cli {
    /// SQLite database file (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/exhibit/exhibit.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one participant record and exit
    Show {
        /// Registration ID to look up
        id: RegistrationId,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show { id }) => cmd_show(&cli.database, &cli.config, id),
        None => cmd_tui(&cli.database, &cli.config),
    }
}

/// Resolve directories and load the config, honouring command line overrides
/// Returns (config, database path, data_dir)
fn load_settings(
    database: &Option<PathBuf>,
    config_path: &Option<PathBuf>,
) -> Result<(Config, PathBuf, PathBuf)> {
    // Directories are only created when something is written there
    let (data_dir, config_dir) = resolve_directories()?;

    let config_path = config_path
        .clone()
        .unwrap_or_else(|| config_dir.join("exhibit.toml"));
    let config = TomlConfigStorage::new(config_path).load()?;

    let database = database_location(database.as_deref(), &config, &data_dir)?;

    Ok((config, database, data_dir))
}

fn open_store(path: &Path) -> Result<SqliteParticipantStore> {
    SqliteParticipantStore::open(path)
        .with_context(|| format!("Could not connect to the participant database {:?}", path))
}

/// Run the registration form in the terminal
fn cmd_tui(database: &Option<PathBuf>, config_path: &Option<PathBuf>) -> Result<()> {
    let (config, database, data_dir) = load_settings(database, config_path)?;

    let (flash_tx, flash_rx) = mpsc::channel::<FlashMessage>();
    logging::init_logger(
        logging::log_file_path(&data_dir),
        Some(flash_tx),
        &config.general.log_level,
        &config.general.flash_level,
    )?;

    log::info!("Starting exhibit with database {:?}", database);

    // Fail before touching the terminal so the error lands on stderr
    let store = open_store(&database).inspect_err(|e| log::error!("{:#}", e))?;

    let mut terminal = ratatui::init();
    let image_protocol = create_image_protocol();
    let mut app = App::new(
        FormController::new(store),
        config,
        Some(image_protocol),
        Some(flash_rx),
    );

    let result = run(&mut terminal, &mut app);
    ratatui::restore();

    app.into_form().into_store().close();
    log::info!("Exiting exhibit");

    result
}

fn run<S: ParticipantStore>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App<S>,
) -> Result<()> {
    while !app.should_quit {
        app.poll_flash_messages();
        app.prune_flash_messages();

        terminal
            .draw(|frame| app.draw(frame))
            .context("Failed to draw frame")?;

        if event::poll(POLL_INTERVAL).context("Failed to poll terminal events")?
            && let Event::Key(key) = event::read().context("Failed to read terminal event")?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }

    Ok(())
}

/// Print a participant record without starting the TUI
fn cmd_show(
    database: &Option<PathBuf>,
    config_path: &Option<PathBuf>,
    id: RegistrationId,
) -> Result<()> {
    env_logger::init();

    let (_config, database, _data_dir) = load_settings(database, config_path)?;
    let store = open_store(&database)?;

    match store.find_by_id(id)? {
        Some(participant) => {
            println!("Participant {}", participant.id);
            println!("{}", "=".repeat(40));
            for (label, value) in participant.summary() {
                println!("{:<16} {}", format!("{}:", label), value);
            }
        }
        None => println!("No participant found with ID: {}", id),
    }

    store.close();
    Ok(())
}
