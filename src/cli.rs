//! CLI interface for git-commit-mklog.
//!
//! Only two flags belong to the wrapper. Everything else on the command line
//! is forwarded to `git commit` untouched, so parsing happens in two stages:
//! [`split`] separates the wrapper's own tokens from the rest, then clap
//! parses the wrapper's tokens against [`Cli`].

use std::ffi::OsString;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::debug;

use crate::mklog::{exit_code, CommitLogInvoker, EnvMap};
use crate::utils::Settings;

mod split;

use split::{split_known_args, KnownFlags};

/// Name used for usage messages when the argument vector is empty.
const BIN_NAME: &str = "git-commit-mklog";

/// git-commit-mklog: runs `git commit` with mklog arguments in the environment.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "git-commit-mklog")]
#[command(
    about = "Runs git commit with PR numbers forwarded to mklog",
    long_about = "Runs `git commit` with GCC_FORCE_MKLOG=1 and, when -b or -p is given, \
                  GCC_MKLOG_ARGS set for the mklog prepare-commit-msg hook. \
                  Unrecognized arguments are passed to git commit unchanged."
)]
#[command(version, args_override_self = true, infer_long_args = true)]
pub struct Cli {
    /// Add the specified PRs (comma separated).
    #[arg(short = 'b', long, value_name = "PR_NUMBERS")]
    pub pr_numbers: Option<Option<String>>,

    /// Download titles of the mentioned PRs.
    #[arg(short = 'p', long)]
    pub fill_up_bug_titles: bool,
}

/// Options recognized on the command line plus the tokens left for `git commit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    /// PR numbers from `-b`, in the order given. Empty when the flag is
    /// absent or has no value.
    pub pr_numbers: Vec<String>,
    /// Whether `-p` was given.
    pub fill_up_bug_titles: bool,
    /// Unrecognized tokens in their original order.
    pub passthrough: Vec<String>,
}

impl ParsedOptions {
    /// Parses the process arguments, exiting with a usage message on error.
    pub fn parse() -> Self {
        Self::try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parses an argument vector whose first element is the program name.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let bin_name = args.next().unwrap_or_else(|| OsString::from(BIN_NAME));

        let tokens = args
            .map(|arg| {
                arg.into_string().map_err(|raw| {
                    Cli::command().error(
                        ErrorKind::InvalidUtf8,
                        format!("invalid UTF-8 in argument {raw:?}"),
                    )
                })
            })
            .collect::<Result<Vec<String>, _>>()?;

        let split = split_known_args(&KnownFlags::of::<Cli>(), tokens);
        let cli = Cli::try_parse_from(
            std::iter::once(bin_name).chain(split.recognized.into_iter().map(OsString::from)),
        )?;

        let options = Self::from_cli(cli, split.passthrough);
        debug!(
            pr_numbers = ?options.pr_numbers,
            fill_up_bug_titles = options.fill_up_bug_titles,
            passthrough = ?options.passthrough,
            "Parsed command line"
        );
        Ok(options)
    }

    /// Combines clap's view of the wrapper flags with the forwarded tokens.
    pub fn from_cli(cli: Cli, passthrough: Vec<String>) -> Self {
        let pr_numbers = cli
            .pr_numbers
            .flatten()
            .map(|value| value.split(',').map(str::to_owned).collect())
            .unwrap_or_default();

        Self {
            pr_numbers,
            fill_up_bug_titles: cli.fill_up_bug_titles,
            passthrough,
        }
    }

    /// Runs `git commit` for these options and returns the exit code to use.
    pub fn execute(self) -> Result<i32> {
        let settings = Settings::load().context("Failed to load git-commit-mklog settings")?;
        let base: EnvMap = std::env::vars_os().collect();

        let status = CommitLogInvoker::new(settings)
            .invoke(&self, &base)
            .context("git commit could not be started")?;

        Ok(exit_code(status))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ParsedOptions {
        ParsedOptions::try_parse_from(std::iter::once(BIN_NAME).chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_flags_forwards_everything() {
        let options = parse(&["-a", "-m", "msg"]);
        assert!(options.pr_numbers.is_empty());
        assert!(!options.fill_up_bug_titles);
        assert_eq!(options.passthrough, vec!["-a", "-m", "msg"]);
    }

    #[test]
    fn pr_numbers_split_on_commas() {
        let options = parse(&["-b", "123,456"]);
        assert_eq!(options.pr_numbers, vec!["123", "456"]);
        assert!(options.passthrough.is_empty());
    }

    #[test]
    fn pr_numbers_long_forms() {
        assert_eq!(parse(&["--pr-numbers", "7"]).pr_numbers, vec!["7"]);
        assert_eq!(parse(&["--pr-numbers=7,8"]).pr_numbers, vec!["7", "8"]);
        assert_eq!(parse(&["-b99"]).pr_numbers, vec!["99"]);
    }

    #[test]
    fn pr_numbers_without_value() {
        let options = parse(&["-b"]);
        assert!(options.pr_numbers.is_empty());

        let options = parse(&["-b", "--amend"]);
        assert!(options.pr_numbers.is_empty());
        assert_eq!(options.passthrough, vec!["--amend"]);
    }

    #[test]
    fn empty_pr_value_is_one_empty_identifier() {
        let options = parse(&["-b", ""]);
        assert_eq!(options.pr_numbers, vec![""]);
        assert_eq!(crate::mklog::mklog_args(&options).as_deref(), Some("-b "));
        assert!(options.passthrough.is_empty());
    }

    #[test]
    fn repeated_pr_numbers_last_wins() {
        let options = parse(&["-b", "1", "-b", "2,3"]);
        assert_eq!(options.pr_numbers, vec!["2", "3"]);
    }

    #[test]
    fn fill_up_bug_titles_short_and_long() {
        assert!(parse(&["-p"]).fill_up_bug_titles);
        assert!(parse(&["--fill-up-bug-titles"]).fill_up_bug_titles);
    }

    #[test]
    fn abbreviated_long_flags_are_recognized() {
        let options = parse(&["--pr", "5", "--fill"]);
        assert_eq!(options.pr_numbers, vec!["5"]);
        assert!(options.fill_up_bug_titles);
        assert!(options.passthrough.is_empty());
    }

    #[test]
    fn clustered_short_flags() {
        let options = parse(&["-pb12"]);
        assert!(options.fill_up_bug_titles);
        assert_eq!(options.pr_numbers, vec!["12"]);
    }

    #[test]
    fn interleaved_tokens_keep_order() {
        let options = parse(&["-b", "123", "extra.txt", "--amend"]);
        assert_eq!(options.pr_numbers, vec!["123"]);
        assert_eq!(options.passthrough, vec!["extra.txt", "--amend"]);

        let options = parse(&["--amend", "-p", "file.c", "--no-edit"]);
        assert!(options.fill_up_bug_titles);
        assert_eq!(options.passthrough, vec!["--amend", "file.c", "--no-edit"]);
    }

    #[test]
    fn double_dash_stops_recognition() {
        let options = parse(&["-p", "--", "-b", "file"]);
        assert!(options.fill_up_bug_titles);
        assert!(options.pr_numbers.is_empty());
        assert_eq!(options.passthrough, vec!["--", "-b", "file"]);
    }

    #[test]
    fn value_on_boolean_flag_is_usage_error() {
        let err = ParsedOptions::try_parse_from([BIN_NAME, "--fill-up-bug-titles=yes"])
            .expect_err("boolean flag must reject a value");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn help_is_handled_by_wrapper() {
        let err = ParsedOptions::try_parse_from([BIN_NAME, "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn abbreviated_help_and_version_go_to_git() {
        let options = parse(&["--ver", "--he", "-p"]);
        assert!(options.fill_up_bug_titles);
        assert_eq!(options.passthrough, vec!["--ver", "--he"]);
    }

    #[test]
    fn empty_argument_vector_parses() {
        let options = ParsedOptions::try_parse_from(Vec::<String>::new()).unwrap();
        assert_eq!(options, ParsedOptions::default());
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn passthrough_token() -> impl Strategy<Value = String> {
            "[a-z][a-z0-9._]{0,8}|--[a-egi-oq-uw-z][a-z-]{2,8}"
        }

        proptest! {
            #[test]
            fn parsing_is_idempotent(
                tokens in proptest::collection::vec(passthrough_token(), 0..6),
                pr in proptest::option::of("[0-9]{1,5}(,[0-9]{1,5}){0,3}"),
                fill in any::<bool>(),
            ) {
                let mut args = vec![BIN_NAME.to_string()];
                args.extend(tokens.iter().cloned());
                if let Some(pr) = &pr {
                    args.push("-b".to_string());
                    args.push(pr.clone());
                }
                if fill {
                    args.push("-p".to_string());
                }

                let first = ParsedOptions::try_parse_from(args.clone()).unwrap();
                let second = ParsedOptions::try_parse_from(args).unwrap();
                prop_assert_eq!(&first, &second);
                prop_assert_eq!(first.fill_up_bug_titles, fill);
                prop_assert_eq!(first.pr_numbers.is_empty(), pr.is_none());
            }

            #[test]
            fn unrecognized_tokens_pass_through_in_order(
                tokens in proptest::collection::vec(passthrough_token(), 0..8),
            ) {
                let mut args = vec![BIN_NAME.to_string(), "-p".to_string()];
                args.extend(tokens.iter().cloned());

                let options = ParsedOptions::try_parse_from(args).unwrap();
                prop_assert_eq!(options.passthrough, tokens);
            }
        }
    }
}
