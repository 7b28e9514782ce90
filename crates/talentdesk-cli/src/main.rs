use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use talentdesk_application::Portal;
use talentdesk_core::config::ClientConfig;
use talentdesk_infrastructure::{ConfigService, TracingNavigator};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "talentdesk")]
#[command(version, long_about = None)]
#[command(about = "TalentDesk CLI - session and data sync client for the HR portal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "employee")]
        role: String,
    },
    /// Create an account without logging in
    Register {
        fullname: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        role: Option<String>,
    },
    /// End the persisted session
    Logout,
    /// Show the identity of the current session
    Whoami {
        /// Re-fetch the identity from the backend
        #[arg(long)]
        refresh: bool,
    },
    /// Show configuration and session state
    Status,
    /// Check whether a route would be admitted
    Guard { path: String },
    /// Show today's wellness tip
    Tip {
        #[arg(default_value = "general")]
        category: String,
    },
    /// Send a message to the HR assistant
    Chat { message: String },
    /// Show the stored chat history
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Learning path operations
    Learning {
        #[command(subcommand)]
        action: LearningAction,
    },
}

#[derive(Subcommand)]
enum LearningAction {
    /// List saved learning paths
    Paths {
        /// Defaults to the logged-in employee
        employee_id: Option<i64>,
    },
    /// Mark a module of a saved path as completed
    CompleteModule {
        path_id: i64,
        module_index: usize,
        /// Mark the module as not completed instead
        #[arg(long)]
        undo: bool,
        #[arg(long)]
        employee_id: Option<i64>,
    },
}

fn init_tracing(config: &ClientConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands, portal: &Portal, config: &ClientConfig) -> Result<()> {
    match command {
        Commands::Login {
            email,
            password,
            role,
        } => commands::session::login(portal, &email, &password, &role).await?,
        Commands::Register {
            fullname,
            email,
            password,
            role,
        } => {
            commands::session::register(portal, &fullname, &email, &password, role.as_deref())
                .await?
        }
        Commands::Logout => commands::session::logout(portal)?,
        Commands::Whoami { refresh } => commands::session::whoami(portal, refresh).await?,
        Commands::Status => commands::session::status(portal, config),
        Commands::Guard { path } => commands::navigation::guard(portal, &path),
        Commands::Tip { category } => commands::wellness::tip(portal, &category),
        Commands::Chat { message } => commands::chat::send(portal, &message).await?,
        Commands::History { limit } => commands::chat::history(portal, limit).await?,
        Commands::Learning { action } => match action {
            LearningAction::Paths { employee_id } => {
                commands::learning::paths(portal, employee_id).await?
            }
            LearningAction::CompleteModule {
                path_id,
                module_index,
                undo,
                employee_id,
            } => {
                commands::learning::complete_module(
                    portal,
                    path_id,
                    module_index,
                    !undo,
                    employee_id,
                )
                .await?
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigService::new().get_config();
    init_tracing(&config);
    tracing::debug!(
        base_url = %config.api_base_url,
        timeout_secs = config.timeout_secs,
        "Configuration loaded"
    );

    let navigator = Arc::new(TracingNavigator::new());
    let portal = Portal::from_config(&config, navigator.clone())
        .context("Failed to open TalentDesk session")?;

    let outcome = run(cli.command, &portal, &config).await;

    if navigator.take_login_request() {
        println!("🔒 Session expired. Run `talentdesk login` to sign in again.");
    }

    outcome
}
