//! Known/unknown argument splitting.
//!
//! Mirrors how `git commit-mklog` users expect the wrapper to behave: its own
//! flags may appear anywhere on the line, and every other token is kept
//! verbatim for `git commit`. The set of known flags is read from the clap
//! definition so the two stages never disagree.

use clap::{Arg, ArgAction, CommandFactory};

/// A non-positional argument of the wrapper.
#[derive(Debug, Clone)]
struct KnownFlag {
    short: Option<char>,
    long: Option<String>,
    takes_value: bool,
    /// Whether a long-name prefix may stand for this flag. Off for help and
    /// version, so `--ver` or `--he` still reach git.
    abbreviable: bool,
}

impl KnownFlag {
    fn from_arg(arg: &Arg) -> Self {
        let action = arg.get_action();
        Self {
            short: arg.get_short(),
            long: arg.get_long().map(str::to_owned),
            takes_value: action.takes_values(),
            abbreviable: !matches!(
                action,
                ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
            ),
        }
    }
}

/// Flags recognized by the wrapper, including clap's help and version flags.
#[derive(Debug, Clone)]
pub(crate) struct KnownFlags(Vec<KnownFlag>);

/// How a single token relates to the known flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recognition {
    /// Not one of ours.
    Unknown,
    /// One of ours, fully contained in the token.
    Complete,
    /// One of ours whose value, if any, is the next token.
    WantsValue,
}

impl KnownFlags {
    /// Collects the flags defined by a clap command.
    pub(crate) fn of<C: CommandFactory>() -> Self {
        let mut command = C::command();
        command.build();

        Self(
            command
                .get_arguments()
                .filter(|arg| !arg.is_positional())
                .map(KnownFlag::from_arg)
                .collect(),
        )
    }

    fn by_short(&self, short: char) -> Option<&KnownFlag> {
        self.0.iter().find(|flag| flag.short == Some(short))
    }

    /// Looks up a long flag by exact name or unambiguous prefix.
    fn by_long(&self, name: &str) -> Option<&KnownFlag> {
        if name.is_empty() {
            return None;
        }

        if let Some(exact) = self.0.iter().find(|flag| flag.long.as_deref() == Some(name)) {
            return Some(exact);
        }

        let mut candidates = self
            .0
            .iter()
            .filter(|flag| flag.abbreviable)
            .filter(|flag| flag.long.as_deref().is_some_and(|long| long.starts_with(name)));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    fn recognize(&self, token: &str) -> Recognition {
        if let Some(rest) = token.strip_prefix("--") {
            let (name, inline_value) = match rest.split_once('=') {
                Some((name, _)) => (name, true),
                None => (rest, false),
            };
            return match self.by_long(name) {
                None => Recognition::Unknown,
                Some(flag) if flag.takes_value && !inline_value => Recognition::WantsValue,
                Some(_) => Recognition::Complete,
            };
        }

        let Some(cluster) = token.strip_prefix('-') else {
            return Recognition::Unknown;
        };
        if cluster.is_empty() {
            return Recognition::Unknown;
        }

        // A cluster such as `-pb12` is ours only if every flag up to the first
        // value-taking one is known; the remainder is that flag's value.
        for (index, short) in cluster.char_indices() {
            let Some(flag) = self.by_short(short) else {
                return Recognition::Unknown;
            };
            if flag.takes_value {
                return if index + short.len_utf8() < cluster.len() {
                    Recognition::Complete
                } else {
                    Recognition::WantsValue
                };
            }
        }

        Recognition::Complete
    }
}

/// Result of splitting an argument vector.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct SplitArgs {
    /// Tokens for clap, including the values of value-taking flags.
    pub(crate) recognized: Vec<String>,
    /// Tokens for `git commit`, in original order.
    pub(crate) passthrough: Vec<String>,
}

// Unlike argparse, a negative number such as `-5` is not taken as a value.
fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Splits `args` (without the program name) into recognized and passthrough tokens.
pub(crate) fn split_known_args(flags: &KnownFlags, args: Vec<String>) -> SplitArgs {
    let mut split = SplitArgs::default();
    let mut tokens = args.into_iter().peekable();

    while let Some(token) = tokens.next() {
        if token == "--" {
            split.passthrough.push(token);
            split.passthrough.extend(tokens.by_ref());
            break;
        }

        match flags.recognize(&token) {
            Recognition::Unknown => split.passthrough.push(token),
            Recognition::Complete => split.recognized.push(token),
            Recognition::WantsValue => {
                split.recognized.push(token);
                if let Some(value) = tokens.next_if(|next| !looks_like_flag(next)) {
                    split.recognized.push(value);
                }
            }
        }
    }

    split
}
