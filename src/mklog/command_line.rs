//! The shell command line run in the child process.

use std::borrow::Cow;
use std::fmt;

use super::COMMIT_PREFIX;

/// How passthrough tokens are quoted for the target shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// POSIX `sh` single quoting.
    Posix,
    /// Windows `cmd.exe` double quoting.
    Cmd,
}

/// The shell that interprets the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    /// Program to launch.
    pub program: String,
    /// Flag introducing the command string (`-c` or `/C`).
    pub command_flag: &'static str,
    /// Quoting rules for this shell.
    pub quote_style: QuoteStyle,
}

impl Shell {
    /// The platform shell: `sh -c` on Unix, `cmd /C` on Windows.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self {
                program: "cmd".to_string(),
                command_flag: "/C",
                quote_style: QuoteStyle::Cmd,
            }
        } else {
            Self::posix("sh")
        }
    }

    /// A POSIX-compatible shell such as `bash` or `/bin/sh`.
    pub fn posix(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            command_flag: "-c",
            quote_style: QuoteStyle::Posix,
        }
    }

    /// Picks the configured shell, falling back to the platform default.
    pub fn from_setting(program: Option<&str>) -> Self {
        match program {
            Some(program) if !program.trim().is_empty() => Self::posix(program.trim()),
            _ => Self::platform_default(),
        }
    }
}

/// `git commit` followed by the passthrough tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildCommandLine {
    passthrough: Vec<String>,
}

impl ChildCommandLine {
    /// Creates a command line forwarding `passthrough` to `git commit`.
    pub fn new(passthrough: Vec<String>) -> Self {
        Self { passthrough }
    }

    /// The forwarded tokens, unquoted.
    pub fn passthrough(&self) -> &[String] {
        &self.passthrough
    }

    /// Renders the command line for a shell using `style` quoting.
    ///
    /// Tokens made only of characters the shell treats literally are emitted
    /// as-is, so `-b 1 file.c --amend` renders as `git commit file.c --amend`.
    pub fn render(&self, style: QuoteStyle) -> String {
        let trailing = self
            .passthrough
            .iter()
            .map(|token| quote(token, style))
            .collect::<Vec<_>>()
            .join(" ");

        format!("{COMMIT_PREFIX}{trailing}")
    }
}

impl fmt::Display for ChildCommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(QuoteStyle::Posix))
    }
}

fn is_literal(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '=' | ':' | ',' | '+' | '@')
}

fn quote(token: &str, style: QuoteStyle) -> Cow<'_, str> {
    if !token.is_empty() && token.chars().all(is_literal) {
        return Cow::Borrowed(token);
    }

    match style {
        QuoteStyle::Posix => Cow::Owned(format!("'{}'", token.replace('\'', r"'\''"))),
        QuoteStyle::Cmd => Cow::Owned(format!("\"{}\"", token.replace('"', "\"\""))),
    }
}
