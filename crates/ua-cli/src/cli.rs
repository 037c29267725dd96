//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

/// useradm - account administration tool.
#[derive(Debug, Parser)]
#[command(name = "useradm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database URL (overrides config).
    #[arg(long, env = "USERADM_DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Configuration file (defaults to ~/.useradm/useradm.toml).
    #[arg(long, env = "USERADM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new account.
    CreateUser {
        /// Email address of the account.
        email: String,

        /// Password (will prompt if not provided).
        #[arg(long)]
        password: Option<String>,
    },

    /// Show an account.
    GetUser {
        /// Email address of the account.
        email: String,
    },

    /// Apply pending schema migrations.
    Migrate,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_user() {
        let cli = Cli::try_parse_from([
            "useradm",
            "--database-url",
            "postgres://db/accounts",
            "create-user",
            "a@example.com",
            "--password",
            "Sup3rSecret!",
        ])
        .unwrap();

        assert_eq!(cli.database_url.as_deref(), Some("postgres://db/accounts"));
        assert!(matches!(
            cli.command,
            Command::CreateUser { ref email, password: Some(ref p) }
                if email == "a@example.com" && p == "Sup3rSecret!"
        ));
    }

    #[test]
    fn password_is_optional() {
        let cli = Cli::try_parse_from(["useradm", "create-user", "a@example.com"]).unwrap();
        assert!(matches!(cli.command, Command::CreateUser { password: None, .. }));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["useradm", "get-user", "a@example.com", "-o", "json", "-v"])
                .unwrap();

        assert!(matches!(cli.output, OutputFormat::Json));
        assert!(cli.verbose);
    }

    #[test]
    fn email_is_required() {
        assert!(Cli::try_parse_from(["useradm", "create-user"]).is_err());
    }
}
