//! Schema migration command.

use ua_storage_sql::run_migrations;

use crate::output::success;
use crate::{CliConfig, CliResult};

use super::connect;

/// Runs `migrate`.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run_migrate(config: &CliConfig, database_url: Option<&str>) -> CliResult<()> {
    let pool = connect(config, database_url).await?;
    run_migrations(&pool).await?;
    success("Database schema is up to date");
    Ok(())
}
