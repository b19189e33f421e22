use crate::{
    commands::{Commands, ConnectionArgs, ImportArgs},
    conn::MySqlConnectionPinger,
    env::EnvManager,
    error::CliError,
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use connectors::sql::{
    base::adapter::SqlAdapter,
    mysql::{adapter::MySqlAdapter, params::ConnectionInfo},
};
use engine_config::settings::ImportSettings;
use engine_core::{
    config::ImportConfig, pipeline, schema::builder::build_schema, script::MySqlClientRunner,
};
use planner::query::dialect::MySql;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod env;
mod error;
mod output;
mod shutdown;

#[derive(Parser)]
#[command(
    name = "csvload",
    version,
    about = "Create a MySQL table from a CSV header and load the CSV rows into it"
)]
struct Cli {
    #[arg(long, global = true, help = "JSON settings file [default: ~/.csvload/config.json]")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Load environment variables from this file")]
    env_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Log every statement and row")]
    verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only log warnings and errors")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let code = match run(cli).await {
        Ok(()) => ExitCode::Success,
        Err(err) if err.is_cancelled() => {
            warn!("{}", err);
            ExitCode::ShutdownRequested
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.as_i32());
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let base = base_settings(cli.config.as_deref(), cli.env_file.as_deref())?;

    match cli.command {
        Commands::Import { args, report } => {
            let config = resolve(base, &args)?;
            let result = import(&config).await?;
            match report {
                Some(path) => {
                    output::write_report(&result, &path).await?;
                    info!("Report written to {}", path.display());
                }
                None => output::print_report(&result)?,
            }
        }
        Commands::Schema { args } => {
            let config = resolve(base, &args)?;
            let schema = build_schema(&config).map_err(CliError::Import)?;
            println!("{};", schema.create_statement(&config.table, &MySql));
        }
        Commands::TestConn { conn } => {
            let info = connection_info(base, &conn);
            MySqlConnectionPinger { info }.ping().await?;
        }
    }

    Ok(())
}

/// Defaults, then the settings file, then environment variables.
fn base_settings(
    config: Option<&std::path::Path>,
    env_file: Option<&std::path::Path>,
) -> Result<ImportSettings, CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = env_file {
        env.load_from_file(path)?;
    }

    let file = ImportSettings::discover(config)?;
    let from_env = ImportSettings::from_env(env.all())?;
    Ok(file.overlay(from_env))
}

fn resolve(base: ImportSettings, args: &ImportArgs) -> Result<ImportConfig, CliError> {
    Ok(base.overlay(args.to_settings()).resolve()?)
}

fn connection_info(base: ImportSettings, args: &ConnectionArgs) -> ConnectionInfo {
    let settings = base.overlay(args.to_settings());
    let defaults = ConnectionInfo::default();
    ConnectionInfo {
        host: settings.host.unwrap_or(defaults.host),
        port: settings.port.unwrap_or(defaults.port),
        user: settings.user.unwrap_or(defaults.user),
        password: settings.password.unwrap_or(defaults.password),
    }
}

async fn import(config: &ImportConfig) -> Result<engine_core::report::ImportReport, CliError> {
    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();

    let adapter = MySqlAdapter::bootstrap(&config.connection, &config.database).await?;
    let runner = MySqlClientRunner::default();

    let result = pipeline::run(
        config,
        &adapter as &dyn SqlAdapter,
        &runner,
        shutdown.cancel_token(),
    )
    .await;

    if shutdown.is_shutdown_requested() {
        info!("Closing the database connection after shutdown request");
    }
    if let Err(e) = adapter.disconnect().await {
        warn!("Failed to close the database connection cleanly: {}", e);
    }

    Ok(result?)
}
