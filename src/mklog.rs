//! Running `git commit` with the mklog hook enabled.
//!
//! The `prepare-commit-msg` hook only runs mklog when `GCC_FORCE_MKLOG` is
//! set, and reads mklog's own flags from `GCC_MKLOG_ARGS`. This module builds
//! that environment from a caller-supplied base map and runs `git commit`
//! through the shell with it.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::process::{Command, ExitStatus};

use tracing::{debug, info, warn};

use crate::cli::ParsedOptions;
use crate::error::MklogError;
use crate::utils::Settings;

pub mod command_line;
pub mod environment;

pub use command_line::{ChildCommandLine, QuoteStyle, Shell};
pub use environment::{mklog_args, ChildEnvironment};

/// Variable that makes the hook run mklog.
pub const FORCE_MKLOG_VAR: &str = "GCC_FORCE_MKLOG";

/// Variable carrying mklog's command-line arguments.
pub const MKLOG_ARGS_VAR: &str = "GCC_MKLOG_ARGS";

/// Fixed start of every child command line.
pub const COMMIT_PREFIX: &str = "git commit ";

/// An environment variable mapping.
pub type EnvMap = BTreeMap<OsString, OsString>;

/// Maps a child exit status to the wrapper's exit code.
///
/// A child terminated by a signal has no code and maps to 1.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or_else(|| {
        warn!(%status, "git commit terminated without an exit code");
        1
    })
}

/// Everything needed to launch one `git commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Shell interpreting the command line.
    pub shell: Shell,
    /// Environment for the child.
    pub environment: ChildEnvironment,
    /// The command line itself.
    pub command_line: ChildCommandLine,
}

impl Invocation {
    /// The rendered command line for [`Self::shell`].
    pub fn rendered(&self) -> String {
        self.command_line.render(self.shell.quote_style)
    }

    /// Builds the process command. The child sees exactly
    /// [`Self::environment`]; nothing else is inherited.
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.shell.program);
        command.arg(self.shell.command_flag);
        self.push_command_line(&mut command);
        command.env_clear().envs(self.environment.iter());
        command
    }

    // `cmd` does not follow MSVC argument quoting, so its command string must
    // reach it verbatim rather than re-quoted by std.
    #[cfg(windows)]
    fn push_command_line(&self, command: &mut Command) {
        use std::os::windows::process::CommandExt;

        match self.shell.quote_style {
            QuoteStyle::Cmd => command.raw_arg(self.rendered()),
            QuoteStyle::Posix => command.arg(self.rendered()),
        };
    }

    #[cfg(not(windows))]
    fn push_command_line(&self, command: &mut Command) {
        command.arg(self.rendered());
    }

    /// Runs the command and waits for it to finish.
    pub fn run(&self) -> Result<ExitStatus, MklogError> {
        let rendered = self.rendered();
        info!(shell = %self.shell.program, command = %rendered, "Running git commit");

        let status = self
            .command()
            .status()
            .map_err(|source| MklogError::Spawn {
                shell: self.shell.program.clone(),
                command: rendered,
                source,
            })?;

        debug!(%status, "git commit finished");
        Ok(status)
    }
}

/// Turns parsed options into a single `git commit` run.
#[derive(Debug, Clone, Default)]
pub struct CommitLogInvoker {
    settings: Settings,
}

impl CommitLogInvoker {
    /// Creates an invoker using `settings` for the shell and fallback variables.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Builds the invocation for `options` on top of `base` without running it.
    pub fn prepare(&self, options: &ParsedOptions, base: &EnvMap) -> Invocation {
        let environment = ChildEnvironment::build(base, options, &self.settings.env);
        for (key, value) in environment.changes_from(base) {
            debug!(?key, ?value, "Child environment change");
        }

        Invocation {
            shell: Shell::from_setting(self.settings.shell.as_deref()),
            environment,
            command_line: ChildCommandLine::new(options.passthrough.clone()),
        }
    }

    /// Prepares and runs `git commit`, blocking until it exits.
    pub fn invoke(&self, options: &ParsedOptions, base: &EnvMap) -> Result<ExitStatus, MklogError> {
        self.prepare(options, base).run()
    }
}
