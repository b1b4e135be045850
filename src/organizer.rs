/// Sorting a directory's files into category folders.
///
/// [`organize`] moves every top-level file of a directory into
/// `<directory>/<Category>/<file name>` and pushes the moves onto the move log
/// as one session, so that [`crate::undo::undo`] can reverse them.
///
/// Moves use [`std::fs::rename`]. If a file with the same name already sits in
/// the category folder it is replaced. Files are moved one at a time and the
/// log is written once at the end; a crash in between leaves the files moved
/// with no record to undo them.
use crate::categorizer::{Category, categorize};
use crate::error::{OrganizeError, OrganizeResult};
use crate::move_log::{Move, MoveLog, Session};
use crate::scanner::list_files;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of files per category, ordered by category.
pub type CategoryCounts = BTreeMap<Category, usize>;

/// A file about to be sorted, handed to the [`organize_with`] observer.
#[derive(Debug)]
pub struct PlannedMove<'a> {
    /// Zero-based position of this file in the run.
    pub index: usize,
    /// Number of files in the run.
    pub total: usize,
    pub file_name: &'a str,
    pub category: Category,
    /// Where the file goes (or would go, when simulating).
    pub destination: &'a Path,
}

/// Sorts the files of `directory` into category folders.
///
/// With `simulate` set nothing on disk changes: no folder is created, no file
/// moves and the log is neither read nor written. The returned counts are the
/// same either way.
///
/// # Errors
///
/// Fails with [`OrganizeError::NotADirectory`] before touching anything if
/// `directory` is not a directory. A failed folder creation or move stops the
/// run; files moved before it stay moved and are saved to the log as a
/// session of their own before the error is returned.
///
/// # Examples
///
/// ```no_run
/// use sortdir::organizer::organize;
/// use std::path::Path;
///
/// let dir = Path::new("/home/me/Downloads");
/// let counts = organize(dir, &dir.join(".sortdir_log.json"), false)?;
/// for (category, count) in &counts {
///     println!("{}: {}", category, count);
/// }
/// # Ok::<(), sortdir::OrganizeError>(())
/// ```
pub fn organize(directory: &Path, log_path: &Path, simulate: bool) -> OrganizeResult<CategoryCounts> {
    organize_with(directory, log_path, simulate, |_| {})
}

/// Like [`organize`], calling `observer` for each file before it is handled.
pub fn organize_with<F>(
    directory: &Path,
    log_path: &Path,
    simulate: bool,
    mut observer: F,
) -> OrganizeResult<CategoryCounts>
where
    F: FnMut(&PlannedMove<'_>),
{
    if !directory.is_dir() {
        return Err(OrganizeError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }
    // Absolute paths in the log keep undo independent of the working directory.
    let directory = fs::canonicalize(directory).map_err(|e| OrganizeError::ReadDirFailed {
        path: directory.to_path_buf(),
        source: e,
    })?;

    let files = list_files(&directory, log_name_inside(&directory, log_path))?;
    let total = files.len();
    tracing::info!(directory = %directory.display(), files = total, simulate, "organizing");

    let mut counts = CategoryCounts::new();
    let mut session = Session::new();

    for (index, file_name) in files.iter().enumerate() {
        let category = categorize(file_name);
        let destination = destination_for(&directory, category, file_name);

        observer(&PlannedMove {
            index,
            total,
            file_name,
            category,
            destination: &destination,
        });

        if !simulate {
            match move_to_category(&directory, file_name, &destination) {
                Ok(mv) => session.record(mv),
                Err(e) => return Err(record_partial_session(log_path, session, e)),
            }
        }

        *counts.entry(category).or_insert(0) += 1;
    }

    if !session.is_empty() {
        let mut log = MoveLog::load_or_empty(log_path);
        log.push(session);
        log.save(log_path)?;
    }

    Ok(counts)
}

/// Returns `directory/<category>/<file_name>`.
pub fn destination_for(directory: &Path, category: Category, file_name: &str) -> PathBuf {
    directory.join(category.dir_name()).join(file_name)
}

/// Moves one file into its (possibly new) category folder.
fn move_to_category(directory: &Path, file_name: &str, destination: &Path) -> OrganizeResult<Move> {
    let source = directory.join(file_name);

    if let Some(category_dir) = destination.parent() {
        fs::create_dir_all(category_dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: category_dir.to_path_buf(),
            source: e,
        })?;
    }

    fs::rename(&source, destination).map_err(|e| OrganizeError::FileMoveFailure {
        from: source.clone(),
        to: destination.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(src = %source.display(), dest = %destination.display(), "moved");
    Ok(Move::new(source, destination))
}

/// Returns the log's file name if the log lives directly in `directory`.
///
/// A log kept elsewhere excludes nothing, so a user file that happens to share
/// its name is still sorted.
fn log_name_inside<'a>(directory: &Path, log_path: &'a Path) -> Option<&'a OsStr> {
    let name = log_path.file_name()?;
    let parent = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let parent = fs::canonicalize(parent).ok()?;
    (parent.as_path() == directory).then_some(name)
}

/// Saves the moves completed before `failure` so they can still be undone.
///
/// Returns the error to report: `failure` itself, or
/// [`OrganizeError::UnrecordedMoves`] if the log could not be written.
fn record_partial_session(log_path: &Path, session: Session, failure: OrganizeError) -> OrganizeError {
    if session.is_empty() {
        return failure;
    }
    let moved = session.len();
    let mut log = MoveLog::load_or_empty(log_path);
    log.push(session);
    match log.save(log_path) {
        Ok(()) => failure,
        Err(log_error) => {
            tracing::warn!(error = %log_error, moved, "could not record the partial session");
            OrganizeError::UnrecordedMoves {
                moved,
                source: Box::new(failure),
                log_error: Box::new(log_error),
            }
        }
    }
}
