//! The `brack` command: parse a document, then print its tree or a
//! diagnostic.
//!
//! Exit codes: [`EXIT_SUCCESS`], [`EXIT_USAGE`] for a bad command line,
//! [`EXIT_OPEN`] when the input file cannot be opened, [`EXIT_IO`] when
//! an opened input cannot be read or the tree cannot be written, and
//! [`EXIT_PARSE`] for a malformed document.

mod cli;
mod diagnostic;

pub use cli::{parse_args, CliOptions, Command, UsageError, USAGE};
pub use diagnostic::{ColorMode, TerminalEmitter};

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::sync::Once;

use brack_parse::parse_with;
use tracing::debug;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_OPEN: i32 = 1;
pub const EXIT_IO: i32 = 2;
pub const EXIT_PARSE: i32 = 3;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber writing to stderr.
///
/// Only when `RUST_LOG` is set, e.g. `RUST_LOG=brack_parse=trace`. Safe
/// to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Why the input could not be loaded. `Display` is the message for the user.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be opened.
    #[error("{0}")]
    Open(String),
    /// The input was opened but reading it failed.
    #[error("{0}")]
    Read(String),
}

impl SourceError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SourceError::Open(_) => EXIT_OPEN,
            SourceError::Read(_) => EXIT_IO,
        }
    }
}

/// Read the whole input; `-` means standard input.
pub fn read_source(path: &str) -> Result<String, SourceError> {
    let mut source = String::new();
    if path == "-" {
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| SourceError::Read(format!("error reading standard input: {e}")))?;
        return Ok(source);
    }

    let mut file = File::open(path).map_err(|e| {
        SourceError::Open(match e.kind() {
            io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
            _ => format!("cannot open '{path}': {e}"),
        })
    })?;
    file.read_to_string(&mut source).map_err(|e| {
        SourceError::Read(match e.kind() {
            io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
            _ => format!("error reading '{path}': {e}"),
        })
    })?;
    Ok(source)
}

fn display_path(path: &str) -> &str {
    if path == "-" {
        "<stdin>"
    } else {
        path
    }
}

/// Run the parse command against the process's stdout and stderr.
pub fn run(options: &CliOptions) -> i32 {
    let stderr = io::stderr();
    let is_tty = stderr.is_terminal();
    let mut diagnostics = TerminalEmitter::with_color_mode(stderr.lock(), options.color, is_tty);

    let source = match read_source(&options.path) {
        Ok(source) => source,
        Err(err) => {
            diagnostics.emit_message(&err.to_string());
            diagnostics.flush();
            return err.exit_code();
        }
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let code = check_source(options, &source, &mut out, &mut diagnostics);
    diagnostics.flush();
    code
}

/// Parse `source` and write the rendered tree to `out`, or a diagnostic.
pub fn check_source<O: Write, E: Write>(
    options: &CliOptions,
    source: &str,
    out: &mut O,
    diagnostics: &mut TerminalEmitter<E>,
) -> i32 {
    let tree = match parse_with(source, &options.parse_config()) {
        Ok(tree) => tree,
        Err(err) => {
            diagnostics.emit_parse_error(display_path(&options.path), source, &err);
            return EXIT_PARSE;
        }
    };
    debug!(path = %options.path, depth = tree.depth(), "parsed");

    if options.quiet {
        return EXIT_SUCCESS;
    }
    let written = tree
        .render(out)
        .and_then(|()| out.flush().map_err(Into::into));
    match written {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            diagnostics.emit_message(&err.to_string());
            EXIT_IO
        }
    }
}
