//! Command-line arguments.

use brack_parse::{ParseConfig, DEFAULT_MAX_DEPTH};

use crate::diagnostic::ColorMode;

pub const USAGE: &str = "\
Usage: brack <file|-> [options]

Parses a brack document (`-` reads stdin) and prints its tree.

Options:
  --max-depth=<n>            Maximum nesting depth (default: 100)
  --siblings                 Accept several top-level nodes
  --color=<auto|always|never>
                             Colorize diagnostics (default: auto)
  -q, --quiet                Check only, print nothing on success
  -h, --help                 Show this help

Set RUST_LOG (e.g. RUST_LOG=brack_parse=trace) for parser tracing.";

/// What the command line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Parse(CliOptions),
    Help,
}

/// Options for parsing one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub path: String,
    pub max_depth: usize,
    pub allow_sibling_roots: bool,
    pub color: ColorMode,
    pub quiet: bool,
}

impl CliOptions {
    pub fn new(path: impl Into<String>) -> Self {
        CliOptions {
            path: path.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            allow_sibling_roots: false,
            color: ColorMode::Auto,
            quiet: false,
        }
    }

    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::default()
            .with_max_depth(self.max_depth)
            .with_sibling_roots(self.allow_sibling_roots)
    }
}

/// Malformed command line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("missing file path")]
    MissingPath,
    #[error("unexpected extra argument '{0}'")]
    ExtraArgument(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid --max-depth '{0}': expected a positive integer")]
    InvalidMaxDepth(String),
    #[error("invalid --color '{0}': expected auto, always or never")]
    InvalidColor(String),
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let mut path = None;
    let mut max_depth = DEFAULT_MAX_DEPTH;
    let mut allow_sibling_roots = false;
    let mut color = ColorMode::Auto;
    let mut quiet = false;

    for arg in args {
        if arg == "-h" || arg == "--help" {
            return Ok(Command::Help);
        } else if arg == "--siblings" {
            allow_sibling_roots = true;
        } else if arg == "-q" || arg == "--quiet" {
            quiet = true;
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            max_depth = match depth.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(UsageError::InvalidMaxDepth(depth.to_string())),
            };
        } else if let Some(mode) = arg.strip_prefix("--color=") {
            color = ColorMode::from_flag(mode)
                .ok_or_else(|| UsageError::InvalidColor(mode.to_string()))?;
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(UsageError::UnknownOption(arg.clone()));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(UsageError::ExtraArgument(arg.clone()));
        }
    }

    let path = path.ok_or(UsageError::MissingPath)?;
    Ok(Command::Parse(CliOptions {
        path,
        max_depth,
        allow_sibling_roots,
        color,
        quiet,
    }))
}
