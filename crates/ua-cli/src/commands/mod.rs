//! Command implementations.

pub mod migrate;
pub mod user;

pub use migrate::run_migrate;
pub use user::{create_user, get_user, prepare_candidate, run_create_user, run_get_user};

use ua_storage::OperationContext;
use ua_storage_sql::{create_pool, PgPool};

use crate::cli::{Cli, Command};
use crate::{CliConfig, CliResult};

/// Runs the parsed command line.
///
/// # Errors
///
/// Returns the command's error; see [`CliError::exit_code`](crate::CliError::exit_code).
pub async fn run(cli: Cli, config: &CliConfig) -> CliResult<()> {
    let database_url = cli.database_url.as_deref();

    match cli.command {
        Command::CreateUser { email, password } => {
            run_create_user(config, database_url, &email, password, cli.output).await
        }
        Command::GetUser { email } => run_get_user(config, database_url, &email, cli.output).await,
        Command::Migrate => run_migrate(config, database_url).await,
    }
}

/// Opens the database pool.
async fn connect(config: &CliConfig, database_url: Option<&str>) -> CliResult<PgPool> {
    let pool_config = config.pool_config(database_url)?;
    Ok(create_pool(&pool_config).await?)
}

/// Returns a context cancelled on Ctrl-C.
fn interruptible() -> OperationContext {
    let (ctx, handle) = OperationContext::cancellable();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling");
            handle.cancel();
        }
    });
    ctx
}
