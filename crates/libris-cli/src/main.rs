use anyhow::Result;
use clap::Parser;
use libris_client::{Config, LibraryClient, LoggingConfig};
use std::path::PathBuf;

mod commands;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Origin of the library backend (default: from config, then http://localhost:3001)
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Open the interactive books admin screen
    ///
    /// Lists every book in the catalogue and lets you add, edit and delete
    /// records without leaving the terminal:
    ///
    /// - a: add a new book
    /// - e / Enter: edit the selected book
    /// - d: delete the selected book (asks for confirmation)
    /// - r: reload the list from the backend
    ///
    /// In the form, Tab moves between fields, Enter on "Cover Image" loads
    /// the typed file path as the new cover, Ctrl+S saves and Esc cancels.
    Admin,
    /// Manage book records from the shell
    Books {
        #[command(subcommand)]
        command: BooksCommand,
    },
    /// Show the home page's new arrivals, three books per page
    Home {
        /// Carousel page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List alumni and achievers
    Alumni,
    /// Show the library advisory committee and team
    Team,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Subcommand)]
enum BooksCommand {
    /// List all books
    List {
        /// Fetch each cover and show a placeholder for any that fail to load
        #[arg(long)]
        check_covers: bool,
    },
    /// Add a new book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Cover image file to upload
        #[arg(long)]
        cover: Option<PathBuf>,
    },
    /// Edit an existing book; omitted fields keep their current values
    Edit {
        /// Book identifier
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// New cover image file; without it the stored cover is kept
        #[arg(long)]
        cover: Option<PathBuf>,
    },
    /// Delete a book
    Delete {
        /// Book identifier
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print one value, or the whole config file without a key
    Get { key: Option<String> },
    /// Set a value in the config file
    Set { key: String, value: String },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let level = match logging.level.to_ascii_lowercase().as_str() {
        "trace" => twyg::LogLevel::Trace,
        "debug" => twyg::LogLevel::Debug,
        "warn" | "warning" => twyg::LogLevel::Warn,
        "error" => twyg::LogLevel::Error,
        _ => twyg::LogLevel::Info,
    };
    let opts = twyg::OptsBuilder::new()
        .coloured(logging.coloured)
        .level(level)
        .build()
        .map_err(|e| anyhow::anyhow!("invalid logging options: {:?}", e))?;
    twyg::setup(opts).map_err(|e| anyhow::anyhow!("failed to set up logging: {:?}", e))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands must work even when the config file is broken
    if let Commands::Config { command } = cli.command {
        return match command {
            ConfigCommand::Show => commands::config::show_config(),
            ConfigCommand::Get { key } => commands::config::get_config(key),
            ConfigCommand::Set { key, value } => commands::config::set_config(&key, &value),
            ConfigCommand::Path => commands::config::show_path(),
            ConfigCommand::Example => commands::config::show_example(),
            ConfigCommand::Init => commands::config::init_config(),
        };
    }

    let config = Config::load_with_api_url(cli.api_url)?;

    // The admin screen owns the terminal, so it runs without a log sink
    if !matches!(cli.command, Commands::Admin) {
        init_logging(&config.logging)?;
    }

    let client = LibraryClient::from_config(&config)?;
    log::debug!("Using library backend at {}", client.origin());

    match cli.command {
        Commands::Admin => tui::run_tui(client).await?,
        Commands::Books { command } => match command {
            BooksCommand::List { check_covers } => {
                commands::books::list_books(&client, check_covers).await?;
            }
            BooksCommand::Add {
                title,
                author,
                description,
                cover,
            } => {
                commands::books::add_book(&client, title, author, description, cover).await?;
            }
            BooksCommand::Edit {
                id,
                title,
                author,
                description,
                cover,
            } => {
                let changes = commands::books::BookChanges {
                    title,
                    author,
                    description,
                    cover,
                };
                commands::books::edit_book(&client, &id, changes).await?;
            }
            BooksCommand::Delete { id, yes } => {
                commands::books::delete_book(&client, &id, yes).await?;
            }
        },
        Commands::Home { page } => commands::site::show_home(&client, page).await?,
        Commands::Alumni => commands::site::show_alumni(&client).await?,
        Commands::Team => commands::site::show_team(&client).await?,
        Commands::Config { .. } => {}
    }

    Ok(())
}
