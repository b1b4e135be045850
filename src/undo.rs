/// Undo functionality for reverting the most recent sort.
///
/// Each call reverses exactly one session, the last one pushed onto the move
/// log. Sorting twice and undoing twice walks the directory back through both
/// runs in reverse order.
use crate::error::OrganizeResult;
use crate::move_log::{Move, MoveLog, Session};
use std::fs;
use std::path::Path;

/// Result of an [`undo`] call.
#[derive(Debug)]
pub enum UndoOutcome {
    /// The log was missing or empty.
    NothingToUndo,
    /// The last session was reversed.
    Restored(UndoReport),
}

/// Describes what happened to each move of the undone session.
#[derive(Debug, Default)]
pub struct UndoReport {
    /// Number of files moved back to where they came from.
    pub restored_files: usize,
    /// Moves whose destination no longer exists.
    pub skipped: Vec<Move>,
    /// Moves that could not be reversed, with the reason.
    pub failed: Vec<(Move, String)>,
    /// Sessions left in the log afterwards.
    pub remaining_sessions: usize,
}

impl UndoReport {
    /// Returns true if every move was reversed.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

enum Restore {
    Restored,
    Skipped,
    Failed(String),
}

/// Reverses the most recent session recorded in the log at `log_path`.
///
/// Moves are reversed last-moved-first. A move whose file is gone from its
/// destination is skipped. A file already present at the original location
/// is replaced by the one being restored. If any move fails for another
/// reason, only the failed moves are pushed back onto the log as a session,
/// so running undo again retries just those.
///
/// # Errors
///
/// Returns [`crate::OrganizeError::CorruptedLog`] without touching any file
/// if the log cannot be parsed, and a log write error if the updated log
/// cannot be saved.
///
/// # Examples
///
/// ```no_run
/// use sortdir::undo::{UndoOutcome, undo};
/// use std::path::Path;
///
/// match undo(Path::new("/home/me/Downloads/.sortdir_log.json"))? {
///     UndoOutcome::NothingToUndo => println!("nothing to undo"),
///     UndoOutcome::Restored(report) => println!("restored {} files", report.restored_files),
/// }
/// # Ok::<(), sortdir::OrganizeError>(())
/// ```
pub fn undo(log_path: &Path) -> OrganizeResult<UndoOutcome> {
    let mut log = MoveLog::load(log_path)?;
    let Some(session) = log.pop() else {
        return Ok(UndoOutcome::NothingToUndo);
    };

    tracing::info!(moves = session.len(), "undoing last session");

    let mut report = UndoReport::default();
    for mv in session.moves().iter().rev() {
        match restore_move(mv) {
            Restore::Restored => report.restored_files += 1,
            Restore::Skipped => {
                tracing::warn!(dest = %mv.dest.display(), "file no longer at destination, skipping");
                report.skipped.push(mv.clone());
            }
            Restore::Failed(reason) => {
                tracing::warn!(dest = %mv.dest.display(), %reason, "could not restore file");
                report.failed.push((mv.clone(), reason));
            }
        }
    }

    // Only the moves still in place go back on the stack, in their recorded order.
    if !report.failed.is_empty() {
        let pending: Vec<Move> = report.failed.iter().rev().map(|(mv, _)| mv.clone()).collect();
        log.push(Session::from(pending));
    }
    log.save(log_path)?;
    report.remaining_sessions = log.len();

    Ok(UndoOutcome::Restored(report))
}

/// Moves one file back from its destination to its source.
fn restore_move(mv: &Move) -> Restore {
    if !mv.dest.exists() {
        return Restore::Skipped;
    }

    if let Some(parent) = mv.src.parent()
        && !parent.as_os_str().is_empty()
        && let Err(e) = fs::create_dir_all(parent)
    {
        return Restore::Failed(format!("Could not recreate {}: {}", parent.display(), e));
    }

    match fs::rename(&mv.dest, &mv.src) {
        Ok(()) => {
            tracing::debug!(src = %mv.src.display(), dest = %mv.dest.display(), "restored");
            Restore::Restored
        }
        Err(e) => Restore::Failed(format!("Failed to restore file: {}", e)),
    }
}
