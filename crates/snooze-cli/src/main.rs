use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snooze_core::config::ClientConfig;
use snooze_infrastructure::{ConfigService, HttpStoryApi, SnoozePaths, TomlCredentialStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::App;

#[derive(Parser)]
#[command(name = "snooze")]
#[command(about = "Snooze - read, submit and favorite stories on Hack or Snooze", long_about = None)]
#[command(version)]
struct Cli {
    /// API base url (overrides config file and SNOOZE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory holding config.toml and credentials.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all stories, newest first
    Stories,
    /// Create an account and log in
    Signup {
        /// Display name
        #[arg(long)]
        name: String,
        username: String,
        #[arg(long, env = "SNOOZE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and remember the session
    Login {
        username: String,
        #[arg(long, env = "SNOOZE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the remembered session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List stories you submitted
    Mine,
    /// List your favorite stories
    Favorites,
    /// Submit a new story
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        url: String,
    },
    /// Delete one of your stories
    Delete { story_id: String },
    /// Toggle the favorite star on a story
    Favorite { story_id: String },
    /// Remove a story from your favorites
    Unfavorite { story_id: String },
    /// Show or change the client configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Save a base url to config.toml
    SetBaseUrl { url: String },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = SnoozePaths::new(cli.config_dir.as_deref());
    let config_service = ConfigService::new(&paths).context("Failed to resolve config file")?;

    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => commands::config::show(&config_service, cli.base_url),
            ConfigAction::SetBaseUrl { url } => commands::config::set_base_url(&config_service, url),
        };
    }

    let config = effective_config(&config_service, cli.base_url)?;
    let api = HttpStoryApi::from_config(&config).context("Failed to create API client")?;
    let credentials =
        TomlCredentialStore::new(&paths).context("Failed to resolve credentials file")?;
    tracing::debug!("[Main] Using {}", api.base_url());

    let app = App::new(Arc::new(api), Arc::new(credentials));

    match cli.command {
        Commands::Stories => commands::stories::list(&app).await?,
        Commands::Signup {
            name,
            username,
            password,
        } => commands::account::signup(&app, &name, &username, &password).await?,
        Commands::Login { username, password } => {
            commands::account::login(&app, &username, &password).await?
        }
        Commands::Logout => commands::account::logout(&app)?,
        Commands::Whoami => commands::account::whoami(&app).await?,
        Commands::Mine => commands::stories::mine(&app).await?,
        Commands::Favorites => commands::stories::favorites(&app).await?,
        Commands::Submit { title, author, url } => {
            commands::stories::submit(&app, &title, &author, &url).await?
        }
        Commands::Delete { story_id } => commands::stories::delete(&app, &story_id).await?,
        Commands::Favorite { story_id } => {
            commands::stories::toggle_favorite(&app, &story_id).await?
        }
        Commands::Unfavorite { story_id } => {
            commands::stories::unfavorite(&app, &story_id).await?
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Config file, then `SNOOZE_BASE_URL`, then `--base-url`.
fn effective_config(service: &ConfigService, base_url: Option<String>) -> Result<ClientConfig> {
    let config = service
        .get_config()
        .context("Failed to load config.toml")?
        .with_env_overrides()
        .with_base_url_override(base_url);
    Ok(config)
}
