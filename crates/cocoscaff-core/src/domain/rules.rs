//! Field validation rules and the outcome they produce.
//!
//! A field carries an ordered list of [`Rule`]s. [`validate`] runs *every*
//! rule and merges the rejection reasons, so a single edit surfaces all of
//! the problems with a value at once.
//!
//! The path rules need to look at the filesystem. They do it through the
//! [`PathProbe`] trait, a single `stat`-style call, never a directory scan.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use crate::domain::error::DomainError;

pub const MSG_FOLDER_EXISTS: &str = "Folder already exists.";
pub const MSG_FILE_EXISTS: &str = "File with the same name already exists.";
pub const MSG_FOLDER_MISSING: &str = "Folder doesn't exist.";
pub const MSG_NOT_A_FOLDER: &str = "It's a file, not a folder.";
pub const MSG_UNKNOWN: &str = "Unknown error.";

// ── Path probing ─────────────────────────────────────────────────────────────

/// What a single metadata lookup says about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Absent,
    Directory,
    File,
    /// Exists but is neither a regular file nor a directory, or could not be
    /// inspected (permissions, broken link).
    Unknown,
}

/// Read-only existence check used by the path rules.
///
/// Implemented by the `Filesystem` adapters; also trivially implementable by
/// tests.
pub trait PathProbe {
    fn probe(&self, path: &Path) -> PathState;
}

/// Everything a rule may consult besides the value itself.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    probe: &'a dyn PathProbe,
    base: Option<&'a Path>,
}

impl<'a> RuleContext<'a> {
    pub fn new(probe: &'a dyn PathProbe) -> Self {
        Self { probe, base: None }
    }

    /// Resolve path-rule values relative to `base` instead of the working
    /// directory. Used for the project name, which names a child of the
    /// parent folder.
    pub fn with_base(mut self, base: &'a Path) -> Self {
        if !base.as_os_str().is_empty() {
            self.base = Some(base);
        }
        self
    }

    fn resolve(&self, value: &str) -> PathBuf {
        match self.base {
            Some(base) => base.join(value),
            None => PathBuf::from(value),
        }
    }
}

// ── Outcome ──────────────────────────────────────────────────────────────────

/// Result of validating one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Rejected { reasons: Vec<String> },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn reasons(&self) -> &[String] {
        match self {
            Self::Accepted => &[],
            Self::Rejected { reasons } => reasons,
        }
    }

    /// All rejection reasons joined into one line.
    pub fn reason(&self) -> String {
        self.reasons().join(" ")
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected { reasons } => write!(f, "rejected: {}", reasons.join(" ")),
        }
    }
}

// ── Rule ─────────────────────────────────────────────────────────────────────

/// One check over a candidate value.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must match the regular expression.
    Pattern {
        regex: Regex,
        message: Cow<'static, str>,
    },
    /// Character count must lie in `min..=max`.
    Length {
        min: usize,
        max: usize,
        message: Cow<'static, str>,
    },
    /// Value must be one of a closed set of options.
    OneOf {
        allowed: Vec<&'static str>,
        message: Cow<'static, str>,
    },
    /// Value, taken as a path, must not exist.
    PathAbsent,
    /// Value, taken as a path, must be an existing directory.
    PathPresent,
}

impl Rule {
    /// Compile a pattern rule.
    pub fn pattern(
        pattern: &str,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<Self, DomainError> {
        let regex = Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::Pattern {
            regex,
            message: message.into(),
        })
    }

    pub fn length(min: usize, max: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Length {
            min,
            max,
            message: message.into(),
        }
    }

    pub fn one_of(
        allowed: impl IntoIterator<Item = &'static str>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::OneOf {
            allowed: allowed.into_iter().collect(),
            message: message.into(),
        }
    }

    /// Run this rule alone. `None` means the value passed.
    pub fn check(&self, value: &str, ctx: &RuleContext<'_>) -> Option<String> {
        match self {
            Self::Pattern { regex, message } => {
                (!regex.is_match(value)).then(|| message.to_string())
            }
            Self::Length { min, max, message } => {
                let count = value.chars().count();
                (count < *min || count > *max).then(|| message.to_string())
            }
            Self::OneOf { allowed, message } => {
                (!allowed.iter().any(|a| *a == value)).then(|| message.to_string())
            }
            Self::PathAbsent => match ctx.probe.probe(&ctx.resolve(value)) {
                PathState::Absent => None,
                PathState::Directory => Some(MSG_FOLDER_EXISTS.into()),
                PathState::File => Some(MSG_FILE_EXISTS.into()),
                PathState::Unknown => Some(MSG_UNKNOWN.into()),
            },
            Self::PathPresent => match ctx.probe.probe(&ctx.resolve(value)) {
                PathState::Directory => None,
                PathState::Absent => Some(MSG_FOLDER_MISSING.into()),
                PathState::File => Some(MSG_NOT_A_FOLDER.into()),
                PathState::Unknown => Some(MSG_UNKNOWN.into()),
            },
        }
    }
}

/// Validate `value` against every rule, left to right, without
/// short-circuiting.
pub fn validate(value: &str, rules: &[Rule], ctx: &RuleContext<'_>) -> Outcome {
    let reasons: Vec<String> = rules
        .iter()
        .filter_map(|rule| rule.check(value, ctx))
        .collect();

    if reasons.is_empty() {
        Outcome::Accepted
    } else {
        Outcome::Rejected { reasons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Probe backed by a fixed table; everything else is absent.
    #[derive(Default)]
    struct TableProbe(HashMap<PathBuf, PathState>);

    impl TableProbe {
        fn with(mut self, path: &str, state: PathState) -> Self {
            self.0.insert(PathBuf::from(path), state);
            self
        }
    }

    impl PathProbe for TableProbe {
        fn probe(&self, path: &Path) -> PathState {
            self.0.get(path).copied().unwrap_or(PathState::Absent)
        }
    }

    fn name_rules() -> Vec<Rule> {
        vec![
            Rule::pattern(r"^[a-zA-Z0-9_]+$", "bad chars").unwrap(),
            Rule::length(1, 4, "bad length"),
        ]
    }

    #[test]
    fn all_rules_run_and_reasons_merge() {
        let probe = TableProbe::default();
        let ctx = RuleContext::new(&probe);

        let outcome = validate("a-b-c-d", &name_rules(), &ctx);
        assert_eq!(
            outcome,
            Outcome::Rejected {
                reasons: vec!["bad chars".into(), "bad length".into()]
            }
        );
        assert_eq!(outcome.reason(), "bad chars bad length");
    }

    #[test]
    fn length_is_inclusive_and_counts_chars() {
        let probe = TableProbe::default();
        let ctx = RuleContext::new(&probe);
        let rule = [Rule::length(1, 3, "len")];

        assert!(validate("abc", &rule, &ctx).is_accepted());
        assert!(validate("a", &rule, &ctx).is_accepted());
        assert!(!validate("", &rule, &ctx).is_accepted());
        assert!(!validate("abcd", &rule, &ctx).is_accepted());
        // Three characters, six bytes.
        assert!(validate("äöü", &rule, &ctx).is_accepted());
    }

    #[test]
    fn path_absent_distinguishes_file_and_directory() {
        let probe = TableProbe::default()
            .with("work/dir", PathState::Directory)
            .with("work/file", PathState::File);
        let base = Path::new("work");
        let ctx = RuleContext::new(&probe).with_base(base);
        let rule = [Rule::PathAbsent];

        assert!(validate("new", &rule, &ctx).is_accepted());
        assert_eq!(validate("dir", &rule, &ctx).reason(), MSG_FOLDER_EXISTS);
        assert_eq!(validate("file", &rule, &ctx).reason(), MSG_FILE_EXISTS);
    }

    #[test]
    fn path_present_reports_each_state() {
        let probe = TableProbe::default()
            .with("/d", PathState::Directory)
            .with("/f", PathState::File)
            .with("/s", PathState::Unknown);
        let ctx = RuleContext::new(&probe);
        let rule = [Rule::PathPresent];

        assert!(validate("/d", &rule, &ctx).is_accepted());
        assert_eq!(validate("/missing", &rule, &ctx).reason(), MSG_FOLDER_MISSING);
        assert_eq!(validate("/f", &rule, &ctx).reason(), MSG_NOT_A_FOLDER);
        assert_eq!(validate("/s", &rule, &ctx).reason(), MSG_UNKNOWN);
    }

    #[test]
    fn empty_base_resolves_against_working_directory() {
        let probe = TableProbe::default().with("taken", PathState::Directory);
        let ctx = RuleContext::new(&probe).with_base(Path::new(""));
        assert!(!validate("taken", &[Rule::PathAbsent], &ctx).is_accepted());
    }

    #[test]
    fn validation_is_idempotent() {
        let probe = TableProbe::default();
        let ctx = RuleContext::new(&probe);
        let rules = name_rules();
        for value in ["ok", "not ok", "", "toolong"] {
            assert_eq!(
                validate(value, &rules, &ctx),
                validate(value, &rules, &ctx),
                "value {value:?}"
            );
        }
    }

    #[test]
    fn invalid_pattern_is_reported() {
        assert!(matches!(
            Rule::pattern("(", "x"),
            Err(DomainError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn one_of_rejects_unlisted_value() {
        let probe = TableProbe::default();
        let ctx = RuleContext::new(&probe);
        let rule = [Rule::one_of(["0", "1"], "must be 0 or 1")];
        assert!(validate("1", &rule, &ctx).is_accepted());
        assert_eq!(validate("2", &rule, &ctx).reason(), "must be 0 or 1");
    }
}
