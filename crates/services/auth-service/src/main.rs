//! SSO - gRPC server for authentication.

use clap::{Parser, Subcommand};
use tracing::debug;

use auth_service_lib::config::AuthServiceConfig;
use auth_service_lib::MigrateAction;
use domain::App;

#[derive(Parser)]
#[command(name = "sso")]
#[command(about = "Single sign-on authentication service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        #[arg(long, env = "SSO_HOST")]
        host: Option<String>,
        #[arg(long, env = "SSO_PORT")]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Client application commands
    App {
        #[command(subcommand)]
        action: AppCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum AppCommands {
    /// Register a client application
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Token signing secret
        #[arg(long, env = "SSO_APP_SECRET", hide_env_values = true)]
        secret: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AuthServiceConfig::from_env()?;

    // Initialize tracing
    common::init_tracing(config.env);
    if config.env == common::Environment::Local {
        debug!(
            env = %config.env,
            host = %config.host,
            port = config.port,
            token_ttl = ?config.token_ttl,
            request_timeout = ?config.request_timeout,
            "application config"
        );
    }

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            auth_service_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            auth_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::App { action } => match action {
            AppCommands::Add { id, name, secret } => {
                auth_service_lib::add_app(&config, App::new(id, name, secret)).await?;
            }
        },
    }

    Ok(())
}
