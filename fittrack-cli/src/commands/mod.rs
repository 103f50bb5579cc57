mod analysis;
mod config_cmd;
mod dashboard;
mod exercises;
mod login;
mod logout;
mod register;
mod stats;
mod whoami;
mod workout;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

use crate::api::ApiClient;
use crate::config::Config;
use crate::routing::{Route, RouteTracker};
use crate::state::AppState;
use crate::storage::ConfigTokenStore;

pub use analysis::AnalysisCommand;
pub use dashboard::DashboardCommand;
pub use exercises::ExercisesCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use register::RegisterCommand;
pub use stats::StatsCommand;
pub use whoami::WhoamiCommand;
pub use workout::LogWorkoutCommand;

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Terminal client for your FitTrack workout log", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "FITTRACK_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the FitTrack server (overrides the config file)
    #[arg(long, global = true, env = "FITTRACK_API_URL")]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to FitTrack
    Login(LoginCommand),

    /// Create a FitTrack account
    Register(RegisterCommand),

    /// Log out and forget the stored session
    Logout(LogoutCommand),

    /// Show the logged-in profile
    Whoami(WhoamiCommand),

    /// List the exercise catalog
    Exercises(ExercisesCommand),

    /// Manage workouts
    #[command(subcommand)]
    Workout(WorkoutSubcommands),

    /// Show training statistics and charts
    Stats(StatsCommand),

    /// Ask the coach for an AI analysis of the last 30 days
    Analysis(AnalysisCommand),

    /// Launch interactive dashboard
    Dashboard(DashboardCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum WorkoutSubcommands {
    /// Log a new workout
    Log(LogWorkoutCommand),

    /// List workout history
    List {
        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Delete a workout
    Delete {
        /// Workout ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// What every server-facing command needs
pub struct Context {
    pub config: Config,
    pub client: Arc<ApiClient>,
    pub tracker: RouteTracker,
}

impl Context {
    pub fn new(mut config: Config, api_url: Option<&str>) -> Result<Self> {
        let tracker = RouteTracker::new();
        let tokens = Arc::new(ConfigTokenStore::new(config.clone()));

        // The override applies to this run only and is never saved
        if let Some(url) = api_url {
            config.api.base_url = url.to_string();
        }

        let client = ApiClient::from_config(&config, tokens, Arc::new(tracker.clone()))?;

        Ok(Self {
            config,
            client: Arc::new(client),
            tracker,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.tokens().get().is_some()
    }

    pub fn new_state(&self) -> AppState {
        AppState::new(&self.config)
    }
}

impl Cli {
    fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_file(),
        }
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    /// Set up tracing. The dashboard owns the terminal, so it logs to a file.
    pub fn init_logging(&self) -> Result<()> {
        let default_level = if self.verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        if matches!(self.command, Commands::Dashboard(_)) {
            let log_file = self.load_config()?.log_file()?;
            if let Some(dir) = log_file.parent() {
                std::fs::create_dir_all(dir).context("Failed to create log directory")?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }

        Ok(())
    }

    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        let config_path = self.config_path()?;

        let ctx = match &self.command {
            Commands::Config(_) | Commands::Completions { .. } => None,
            _ => Some(Context::new(
                Config::load_from(&config_path)?,
                self.api_url.as_deref(),
            )?),
        };

        let result = match (self.command, ctx.as_ref()) {
            (Commands::Config(subcmd), _) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(&config_path).await,
                ConfigSubcommands::Edit => config_cmd::edit_config(&config_path).await,
                ConfigSubcommands::Init { force } => {
                    config_cmd::init_config(&config_path, force).await
                }
            },
            (Commands::Completions { shell }, _) => {
                generate_completions(shell);
                Ok(())
            }
            (command, Some(ctx)) => run(command, ctx).await,
            (_, None) => Err(anyhow::anyhow!("No session context")),
        };

        if let Some(ctx) = &ctx {
            if ctx.tracker.current() == Some(Route::Login) {
                session_hint(ctx);
            }
        }

        result
    }
}

async fn run(command: Commands, ctx: &Context) -> Result<()> {
    match command {
        Commands::Login(cmd) => cmd.execute(ctx).await,
        Commands::Register(cmd) => cmd.execute(ctx).await,
        Commands::Logout(cmd) => cmd.execute(ctx).await,
        Commands::Whoami(cmd) => cmd.execute(ctx).await,
        Commands::Exercises(cmd) => cmd.execute(ctx).await,
        Commands::Workout(subcmd) => match subcmd {
            WorkoutSubcommands::Log(cmd) => cmd.execute(ctx).await,
            WorkoutSubcommands::List { limit } => workout::list_workouts(ctx, limit).await,
            WorkoutSubcommands::Delete { id, force } => {
                workout::delete_workout(ctx, &id, force).await
            }
        },
        Commands::Stats(cmd) => cmd.execute(ctx).await,
        Commands::Analysis(cmd) => cmd.execute(ctx).await,
        Commands::Dashboard(cmd) => cmd.execute(ctx).await,
        Commands::Config(_) | Commands::Completions { .. } => Ok(()),
    }
}

/// Printed after a command that ended on the login route
fn session_hint(ctx: &Context) {
    if ctx.is_authenticated() {
        return;
    }
    println!();
    println!("Use 'fittrack login' to authenticate.");
}

pub(crate) fn show_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Shared error display for the one-shot commands
pub(crate) fn show_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.red());
}

pub(crate) fn require_login(ctx: &Context) -> Result<()> {
    if ctx.is_authenticated() {
        return Ok(());
    }
    println!("You are not logged in.");
    println!();
    println!("Use 'fittrack login' to authenticate.");
    Err(anyhow::anyhow!("Not logged in"))
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
