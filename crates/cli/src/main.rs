//! # Meridian CLI
//!
//! Command-line interface for the Meridian platform.
//!
//! ## Usage
//!
//! ```bash
//! meridian serve    # Start the API server (runs migrations automatically)
//! meridian migrate  # Run database migrations
//! meridian --help   # Show help
//! ```

use clap::{Args, CommandFactory as _, Parser, Subcommand};
use error::Result;
use migration::MigratorTrait;

mod config;
mod server;

/// Meridian - marketing & CRM platform for Meridian Advisory
#[derive(Parser, Debug)]
#[command(name = "meridian")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "MERIDIAN_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration
    Validate,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "MERIDIAN_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port to bind to
    #[arg(short, long, env = "MERIDIAN_PORT", default_value = "3000")]
    port: u16,
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Rollback the last migration
    #[arg(long)]
    rollback: bool,

    /// Skip seed data after migrating
    #[arg(long)]
    skip_seeds: bool,
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format, None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Serve(args) => server::run(&args.host, args.port).await?,
        Commands::Migrate(args) => migrate(&args).await?,
        Commands::Completions(args) => completions(&args)?,
        Commands::Validate => validate()?,
    }

    Ok(())
}

async fn migrate(args: &MigrateArgs) -> Result<()> {
    let db_config = config::DatabaseConfig::default();
    let db = migration::connect_to_database(&db_config.url())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    if args.rollback {
        logging::info!(target: "migrate", "Rolling back the last migration...");

        migration::Migrator::down(&db, None)
            .await
            .map_err(|e| anyhow::anyhow!("Rollback failed: {}", e))?;

        logging::info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    logging::info!(target: "migrate", "Migrations completed successfully");

    if !args.skip_seeds {
        let seeded = migration::seeds::run_all_seeds(&db).await?;
        logging::info!(target: "migrate", rows = %seeded, "Seed data completed");
    }

    Ok(())
}

fn completions(args: &CompletionsArgs) -> Result<()> {
    clap_complete::generate(
        args.shell,
        &mut Cli::command(),
        "meridian",
        &mut std::io::stdout(),
    );
    Ok(())
}

fn validate() -> Result<()> {
    logging::info!(target: "validate", "Validating configuration...");

    let db_config = config::DatabaseConfig::default();
    logging::info!(target: "validate",
        host = %db_config.host,
        port = %db_config.port,
        database = %db_config.database,
        pool_size = %db_config.pool_size,
        "Database configuration loaded"
    );

    config::jwt_secret()?;
    logging::info!(target: "validate", "JWT secret present");

    let notifier = config::NotifierConfig::from_env();
    logging::info!(target: "validate",
        email = %notifier.email_webhook.is_some(),
        sms = %notifier.sms_webhook.is_some(),
        "Notification channels configured"
    );

    logging::info!(target: "validate", "Configuration is valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["meridian", "serve", "--host", "127.0.0.1", "--port", "8080"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.port, 8080);
            },
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_validate() {
        let cli = Cli::parse_from(["meridian", "validate"]);
        match cli.command {
            Commands::Validate => {},
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_default_log_format() {
        // log_level falls back to RUST_LOG, so only the format default is
        // stable across environments.
        let cli = Cli::parse_from(["meridian", "validate"]);
        assert_eq!(cli.log_format, "pretty");
    }

    #[test]
    fn test_migrate_rollback_flag() {
        let cli = Cli::parse_from(["meridian", "migrate", "--rollback"]);
        match cli.command {
            Commands::Migrate(args) => {
                assert!(args.rollback);
                assert!(!args.skip_seeds);
            },
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_cli_command_factory() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "meridian");
    }

    #[test]
    fn test_completions_returns_ok() {
        let args = CompletionsArgs {
            shell: clap_complete::Shell::Bash,
        };
        assert!(completions(&args).is_ok());
    }
}
