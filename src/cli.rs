//! Command-line interface module for sortdir.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - Organize and dry-run orchestration
//! - Undo operation handling

use crate::config::OutputSettings;
use crate::error::{OrganizeError, OrganizeResult};
use crate::organizer::{PlannedMove, organize_with};
use crate::output::OutputFormatter;
use crate::undo::{UndoOutcome, undo};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "sortdir")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sort the files of a directory into category folders by extension")]
#[command(after_help = "EXAMPLES:\n  \
    sortdir --path ~/Downloads --simulate\n  \
    sortdir --path ~/Downloads\n  \
    sortdir --path ~/Downloads --undo")]
pub struct Cli {
    /// Directory whose files should be sorted
    #[arg(long, value_name = "DIR", required_unless_present = "undo")]
    pub path: Option<PathBuf>,

    /// Show what would be moved without touching anything
    #[arg(long, conflicts_with = "undo")]
    pub simulate: bool,

    /// Reverse the most recent sort
    #[arg(long)]
    pub undo: bool,

    /// Move log location (defaults to a log file inside --path)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Returns the command selected by the flags.
    pub fn sort_command(&self) -> SortCommand {
        match (&self.path, self.undo) {
            (Some(directory), false) => SortCommand::Organize {
                directory: directory.clone(),
                simulate: self.simulate,
            },
            _ => SortCommand::Undo,
        }
    }
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortCommand {
    /// Sort the files of a directory.
    Organize {
        directory: PathBuf,
        /// If true, simulate the operation without making changes.
        simulate: bool,
    },
    /// Undo the most recent sort recorded in the log.
    Undo,
}

/// Runs `command` against the move log at `log_path`, printing progress and
/// results.
///
/// # Examples
///
/// ```no_run
/// use sortdir::cli::{SortCommand, run_cli};
/// use sortdir::config::OutputSettings;
/// use std::path::{Path, PathBuf};
///
/// let command = SortCommand::Organize {
///     directory: PathBuf::from("/path/to/directory"),
///     simulate: true,
/// };
/// let log = Path::new("/path/to/directory/.sortdir_log.json");
/// if let Err(e) = run_cli(command, log, &OutputSettings::default()) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(command: SortCommand, log_path: &Path, settings: &OutputSettings) -> OrganizeResult<()> {
    match command {
        SortCommand::Organize {
            directory,
            simulate: true,
        } => organize_dry_run(&directory, log_path),
        SortCommand::Organize {
            directory,
            simulate: false,
        } => organize_directory(&directory, log_path, settings),
        SortCommand::Undo => undo_last_session(log_path),
    }
}

/// Simulates sorting and prints the plan and the summary.
fn organize_dry_run(directory: &Path, log_path: &Path) -> OrganizeResult<()> {
    OutputFormatter::dry_run_notice(&format!("Analyzing contents of: {}", directory.display()));

    let counts = organize_with(directory, log_path, true, |planned| {
        OutputFormatter::planned_move(planned)
    })?;

    if counts.is_empty() {
        OutputFormatter::info("No files found to organize.");
        return Ok(());
    }

    OutputFormatter::summary_table(&counts);
    OutputFormatter::dry_run_notice("No files were modified.");
    Ok(())
}

/// Sorts the directory for real, recording the session in the log.
fn organize_directory(directory: &Path, log_path: &Path, settings: &OutputSettings) -> OrganizeResult<()> {
    OutputFormatter::info(&format!("Organizing contents of: {}", directory.display()));

    let progress = settings
        .progress
        .then(|| OutputFormatter::create_progress_bar(0));

    let result = organize_with(directory, log_path, false, |planned: &PlannedMove<'_>| {
        if let Some(pb) = &progress {
            pb.set_length(planned.total as u64);
            pb.set_message(planned.file_name.to_string());
            pb.inc(1);
        }
    });

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let counts = result?;

    if counts.is_empty() {
        OutputFormatter::info("No files found to organize.");
        return Ok(());
    }

    OutputFormatter::summary_table(&counts);
    OutputFormatter::success(&format!(
        "Organization complete. Run '{}' to revert.",
        undo_hint(directory, log_path)
    ));
    Ok(())
}

/// The command that undoes a run of `directory` logged at `log_path`.
///
/// `--log-file` is only needed when the log is not kept in the directory.
fn undo_hint(directory: &Path, log_path: &Path) -> String {
    let in_directory = log_path
        .file_name()
        .is_some_and(|name| directory.join(name) == log_path);

    if in_directory {
        format!("sortdir --path {} --undo", directory.display())
    } else {
        format!(
            "sortdir --path {} --undo --log-file {}",
            directory.display(),
            log_path.display()
        )
    }
}

/// Reverses the last recorded session.
fn undo_last_session(log_path: &Path) -> OrganizeResult<()> {
    match undo(log_path)? {
        UndoOutcome::NothingToUndo => {
            OutputFormatter::info("Nothing to undo.");
        }
        UndoOutcome::Restored(report) => {
            OutputFormatter::undo_report(&report);
        }
    }
    Ok(())
}

/// Prints a failed command's error in the same style as other output.
pub fn report_error(error: &OrganizeError) {
    OutputFormatter::error(&error.to_string());
    if let OrganizeError::CorruptedLog { .. } = error {
        OutputFormatter::error("Undo aborted: no files were moved and the log was left as is.");
    }
}
