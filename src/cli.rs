use crate::{find_file, SelectError, TimeComparator};
use anyhow::Context;
use clap::builder::TypedValueParser;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "oldest",
    version,
    about = "Print the name of the oldest or newest file in a directory",
    after_help = "Note: Search is not recursive. Default path is CWD"
)]
pub struct Args {
    /// Search for the oldest file (default)
    #[arg(long)]
    pub oldest: bool,

    /// Search for the newest file
    #[arg(long)]
    pub newest: bool,

    /// Print error details before exiting
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory to search
    #[arg(
        value_name = "PATH",
        value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from)
    )]
    pub path: Option<PathBuf>,
}

impl Args {
    /// `--oldest` wins over `--newest`, which wins over the name the binary
    /// was invoked under.
    pub fn comparator(&self, invoked_as: Option<&OsStr>) -> TimeComparator {
        if self.oldest {
            TimeComparator::Before
        } else if self.newest || invoked_as.is_some_and(invoked_as_newest) {
            TimeComparator::After
        } else {
            TimeComparator::Before
        }
    }
}

/// True when the executable's file stem ends in `newest`, e.g. a `newest`
/// symlink pointing at this binary.
pub fn invoked_as_newest(argv0: &OsStr) -> bool {
    Path::new(argv0)
        .file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with("newest"))
}

/// Returns the directory to search. A missing or empty path means the
/// working directory.
pub fn resolve_target(path: Option<&Path>) -> crate::Result<PathBuf> {
    match path.filter(|path| !path.as_os_str().is_empty()) {
        Some(path) => {
            let metadata = path
                .metadata()
                .map_err(|e| SelectError::io(path, e))?;
            if !metadata.is_dir() {
                return Err(SelectError::io(
                    path,
                    std::io::Error::other("not a directory"),
                ));
            }
            Ok(path.to_path_buf())
        }
        None => std::env::current_dir().map_err(|e| SelectError::io(Path::new("."), e)),
    }
}

/// Resolves the target and comparator from `args`, then searches.
pub fn run(args: &Args, invoked_as: Option<&OsStr>) -> anyhow::Result<String> {
    let target = resolve_target(args.path.as_deref())?;
    let comparator = args.comparator(invoked_as);
    let name = find_file(&target, comparator)
        .with_context(|| format!("searching {}", target.display()))?;
    Ok(name)
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the level picked
/// from `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Decides how a failed run is reported before the process exits.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// The message to print for `err`, or `None` when running quietly.
    pub fn render(&self, err: &anyhow::Error) -> Option<String> {
        self.verbose.then(|| format!("Error: {:#}", err))
    }

    pub fn fail(&self, err: &anyhow::Error) -> ExitCode {
        if let Some(message) = self.render(err) {
            eprintln!("{}", message);
        }
        ExitCode::FAILURE
    }
}
