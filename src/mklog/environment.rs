//! Child environment construction.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

use tracing::debug;

use super::{EnvMap, FORCE_MKLOG_VAR, MKLOG_ARGS_VAR};
use crate::cli::ParsedOptions;

/// Encodes the wrapper flags the way mklog expects them in `GCC_MKLOG_ARGS`.
///
/// Returns `None` when neither flag was given.
pub fn mklog_args(options: &ParsedOptions) -> Option<String> {
    let mut args = Vec::new();

    if !options.pr_numbers.is_empty() {
        args.push(format!("-b {}", options.pr_numbers.join(",")));
    }
    if options.fill_up_bug_titles {
        args.push("-p".to_string());
    }

    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}

/// Environment handed to the `git commit` child process.
///
/// Always a fresh copy of the base environment; the base map is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEnvironment {
    vars: EnvMap,
}

impl ChildEnvironment {
    /// Builds the child environment from `base`.
    ///
    /// `fallbacks` (from the settings file) fill in variables missing from
    /// `base`. The mklog variables are applied last and always win;
    /// `GCC_MKLOG_ARGS` is removed when no wrapper flag was given.
    pub fn build(
        base: &EnvMap,
        options: &ParsedOptions,
        fallbacks: &HashMap<String, String>,
    ) -> Self {
        let mut vars = base.clone();

        for (key, value) in fallbacks {
            vars.entry(OsString::from(key))
                .or_insert_with(|| OsString::from(value));
        }

        vars.insert(FORCE_MKLOG_VAR.into(), "1".into());

        match mklog_args(options) {
            Some(args) => {
                debug!(%args, "Setting {}", MKLOG_ARGS_VAR);
                vars.insert(MKLOG_ARGS_VAR.into(), args.into());
            }
            None => {
                if vars.remove(OsStr::new(MKLOG_ARGS_VAR)).is_some() {
                    debug!("Dropping inherited {}", MKLOG_ARGS_VAR);
                }
            }
        }

        Self { vars }
    }

    /// Returns the value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    /// Returns true if `key` is set.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(OsStr::new(key))
    }

    /// Iterates over all variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Returns the variables whose value differs from `base`, plus the ones
    /// `base` has and this environment does not (as `None`).
    pub fn changes_from<'a>(&'a self, base: &'a EnvMap) -> Vec<(&'a OsStr, Option<&'a OsStr>)> {
        let mut changes: Vec<_> = self
            .vars
            .iter()
            .filter(|(k, v)| base.get(*k) != Some(*v))
            .map(|(k, v)| (k.as_os_str(), Some(v.as_os_str())))
            .collect();

        changes.extend(
            base.keys()
                .filter(|k| !self.vars.contains_key(*k))
                .map(|k| (k.as_os_str(), None)),
        );
        changes.sort_by(|a, b| a.0.cmp(b.0));
        changes
    }
}
