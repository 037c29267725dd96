//! Password acquisition.
//!
//! Passwords not given on the command line are read from an interactive
//! terminal with echo disabled. When stdin is not a terminal the read fails
//! up front; nothing is prompted and nothing is read from the pipe.

use std::collections::VecDeque;
use std::io::{self, IsTerminal, Write};

use thiserror::Error;
use ua_model::PlainSecret;

/// Prompt written before hidden input.
pub const PASSWORD_PROMPT: &str = "Enter password: ";

/// Errors from reading a secret.
#[derive(Debug, Error)]
pub enum SecretReadError {
    /// Input is not an interactive terminal.
    #[error("stdin is not a terminal; pass --password or run interactively")]
    NotATerminal,

    /// Reading or prompting failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Source of a plaintext secret.
pub trait SecretReader {
    /// Reads one secret.
    ///
    /// # Errors
    ///
    /// Returns `SecretReadError` if no secret could be obtained.
    fn read_secret(&mut self) -> Result<PlainSecret, SecretReadError>;
}

/// Raw input that can be read without echo.
pub trait HiddenInput {
    /// Whether the input is an interactive terminal.
    fn is_terminal(&self) -> bool;

    /// Reads one line without echoing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_hidden(&mut self) -> io::Result<String>;
}

/// The process's stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdin;

impl HiddenInput for Stdin {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_hidden(&mut self) -> io::Result<String> {
        rpassword::read_password()
    }
}

/// Reads a secret from a terminal, prompting on a diagnostics writer.
#[derive(Debug)]
pub struct TerminalSecretReader<I, W> {
    input: I,
    diagnostics: W,
}

impl TerminalSecretReader<Stdin, io::Stderr> {
    /// Reads from stdin and prompts on stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(Stdin, io::stderr())
    }
}

impl<I, W> TerminalSecretReader<I, W> {
    /// Creates a reader over `input`, prompting on `diagnostics`.
    pub const fn new(input: I, diagnostics: W) -> Self {
        Self { input, diagnostics }
    }

    /// Returns the diagnostics writer.
    pub const fn diagnostics(&self) -> &W {
        &self.diagnostics
    }
}

impl<I: HiddenInput, W: Write> SecretReader for TerminalSecretReader<I, W> {
    fn read_secret(&mut self) -> Result<PlainSecret, SecretReadError> {
        if !self.input.is_terminal() {
            return Err(SecretReadError::NotATerminal);
        }

        self.diagnostics.write_all(PASSWORD_PROMPT.as_bytes())?;
        self.diagnostics.flush()?;

        let read = self.input.read_hidden();

        // The terminal swallowed the user's newline along with the echo.
        self.diagnostics.write_all(b"\n")?;
        self.diagnostics.flush()?;

        Ok(PlainSecret::new(read?))
    }
}

/// Returns queued secrets in order; for tests and non-interactive callers.
#[derive(Debug, Default)]
pub struct ScriptedSecretReader {
    secrets: VecDeque<PlainSecret>,
    reads: usize,
}

impl ScriptedSecretReader {
    /// Queues `secrets` to be returned one per read.
    pub fn new<S: Into<PlainSecret>>(secrets: impl IntoIterator<Item = S>) -> Self {
        Self {
            secrets: secrets.into_iter().map(Into::into).collect(),
            reads: 0,
        }
    }

    /// Number of reads attempted so far.
    #[must_use]
    pub const fn reads(&self) -> usize {
        self.reads
    }
}

impl SecretReader for ScriptedSecretReader {
    fn read_secret(&mut self) -> Result<PlainSecret, SecretReadError> {
        self.reads += 1;
        self.secrets.pop_front().ok_or_else(|| {
            SecretReadError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no scripted secret left",
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeInput {
        terminal: bool,
        line: Option<&'static str>,
        reads: usize,
    }

    impl FakeInput {
        fn terminal(line: &'static str) -> Self {
            Self {
                terminal: true,
                line: Some(line),
                reads: 0,
            }
        }

        fn pipe() -> Self {
            Self {
                terminal: false,
                line: Some("piped-secret"),
                reads: 0,
            }
        }
    }

    impl HiddenInput for FakeInput {
        fn is_terminal(&self) -> bool {
            self.terminal
        }

        fn read_hidden(&mut self) -> io::Result<String> {
            self.reads += 1;
            self.line
                .map(ToString::to_string)
                .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
        }
    }

    #[test]
    fn reads_from_terminal_with_prompt() {
        let mut reader = TerminalSecretReader::new(FakeInput::terminal("Sup3rSecret!"), Vec::new());

        let secret = reader.read_secret().unwrap();

        assert_eq!(secret.expose(), "Sup3rSecret!");
        assert_eq!(reader.diagnostics().as_slice(), b"Enter password: \n");
    }

    #[test]
    fn non_terminal_fails_without_prompt_or_read() {
        let mut reader = TerminalSecretReader::new(FakeInput::pipe(), Vec::new());

        let err = reader.read_secret().unwrap_err();

        assert!(matches!(err, SecretReadError::NotATerminal));
        assert!(reader.diagnostics().is_empty());
        assert_eq!(reader.input.reads, 0);
    }

    #[test]
    fn read_failure_is_io_error() {
        let input = FakeInput {
            terminal: true,
            line: None,
            reads: 0,
        };
        let mut reader = TerminalSecretReader::new(input, Vec::new());

        let err = reader.read_secret().unwrap_err();

        assert!(matches!(err, SecretReadError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(reader.diagnostics().as_slice(), b"Enter password: \n");
    }

    #[test]
    fn scripted_reader_returns_in_order() {
        let mut reader = ScriptedSecretReader::new(["first", "second"]);

        assert_eq!(reader.read_secret().unwrap().expose(), "first");
        assert_eq!(reader.read_secret().unwrap().expose(), "second");
        assert!(matches!(reader.read_secret(), Err(SecretReadError::Io(_))));
        assert_eq!(reader.reads(), 3);
    }

    #[test]
    fn error_message_never_mentions_secret() {
        let err = SecretReadError::NotATerminal;
        assert!(err.to_string().contains("not a terminal"));
    }
}
