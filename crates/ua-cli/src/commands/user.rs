//! Account commands.

use ua_admin::AccountAdministrator;
use ua_model::{validation::validate_identifier, AccountSummary, NewAccount, PlainSecret, Validator};
use ua_storage::{AccountStore, OperationContext};
use ua_storage_sql::PgAccountStore;

use crate::config::OutputFormat;
use crate::output::{output_account, success, warning};
use crate::prompt::{SecretReader, TerminalSecretReader};
use crate::{CliConfig, CliError, CliResult};

use super::{connect, interruptible};

/// Builds and validates a candidate account without touching the database.
///
/// The email is checked before the password is read, so a typo fails
/// without prompting. A non-empty `password` takes precedence over
/// `reader`; an empty one counts as omitted.
///
/// # Errors
///
/// Returns `CliError::Validation` for a bad email or password, or
/// `CliError::SecretInput` if the password cannot be read.
pub fn prepare_candidate<R: SecretReader>(
    config: &CliConfig,
    email: &str,
    password: Option<String>,
    reader: &mut R,
) -> CliResult<NewAccount> {
    let identifier = config.identifier.apply(email).into_owned();
    validate_identifier(&identifier)?;

    let secret = match password {
        Some(password) if !password.is_empty() => PlainSecret::new(password),
        _ => reader.read_secret()?,
    };

    let candidate = NewAccount { identifier, secret };
    Validator::new(config.validation.clone()).validate_new(&candidate)?;
    Ok(candidate)
}

/// Creates an account and returns its summary.
///
/// # Errors
///
/// Returns `CliError::Admin` if creation fails.
pub async fn create_user<S: AccountStore>(
    admin: &AccountAdministrator<S>,
    ctx: &OperationContext,
    candidate: NewAccount,
) -> CliResult<AccountSummary> {
    let account = admin.create_account(ctx, candidate).await?;
    Ok(account.summary())
}

/// Looks up an account by email.
///
/// # Errors
///
/// Returns `CliError::NotFound` if there is no such account, or
/// `CliError::Admin` if the lookup fails.
pub async fn get_user<S: AccountStore>(
    admin: &AccountAdministrator<S>,
    ctx: &OperationContext,
    email: &str,
) -> CliResult<AccountSummary> {
    admin
        .find_account(ctx, email)
        .await?
        .map(|account| account.summary())
        .ok_or_else(|| CliError::NotFound {
            identifier: email.to_string(),
        })
}

/// Runs `create-user`.
///
/// # Errors
///
/// Returns an error if validation, password entry, connection or creation fails.
pub async fn run_create_user(
    config: &CliConfig,
    database_url: Option<&str>,
    email: &str,
    password: Option<String>,
    format: OutputFormat,
) -> CliResult<()> {
    if password.as_deref().is_some_and(|p| !p.is_empty()) {
        warning("a password given on the command line may be visible to other users");
    }

    let candidate =
        prepare_candidate(config, email, password, &mut TerminalSecretReader::stdio())?;

    let pool = connect(config, database_url).await?;
    let admin = AccountAdministrator::new(PgAccountStore::new(pool), config.admin_config());
    let ctx = interruptible();

    let summary = create_user(&admin, &ctx, candidate).await?;
    success(&format!("Account '{}' created", summary.identifier));
    output_account(&summary, format)
}

/// Runs `get-user`.
///
/// # Errors
///
/// Returns an error if connection or lookup fails, or the account is missing.
pub async fn run_get_user(
    config: &CliConfig,
    database_url: Option<&str>,
    email: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let pool = connect(config, database_url).await?;
    let admin = AccountAdministrator::new(PgAccountStore::new(pool), config.admin_config());
    let ctx = interruptible();

    let summary = get_user(&admin, &ctx, email).await?;
    output_account(&summary, format)
}
