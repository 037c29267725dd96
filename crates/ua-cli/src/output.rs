//! Output formatting utilities.
//!
//! Command results are written to stdout; status lines go to stderr so that
//! stdout stays machine-readable.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use ua_model::AccountSummary;

use crate::config::OutputFormat;
use crate::CliResult;

/// Prints a success message.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Account row for table and JSON display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct AccountDisplay {
    /// Account id.
    #[tabled(rename = "ID")]
    pub id: String,
    /// Email address.
    #[tabled(rename = "Email")]
    pub email: String,
    /// Creation time (RFC 3339).
    #[tabled(rename = "Created")]
    pub created_at: String,
}

impl From<&AccountSummary> for AccountDisplay {
    fn from(summary: &AccountSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            email: summary.identifier.clone(),
            created_at: summary.created_at.to_rfc3339(),
        }
    }
}

/// Writes an account in the given format.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn write_account<W: Write>(
    out: &mut W,
    account: &AccountSummary,
    format: OutputFormat,
) -> CliResult<()> {
    let display = AccountDisplay::from(account);

    match format {
        OutputFormat::Table => {
            let table = Table::new([display]).with(Style::rounded()).to_string();
            writeln!(out, "{table}")?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&display)?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Quiet => {
            writeln!(out, "{}", display.id)?;
        }
    }
    Ok(())
}

/// Prints an account to stdout.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn output_account(account: &AccountSummary, format: OutputFormat) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    write_account(&mut stdout, account, format)
}
