/// Persistent record of sort sessions, used to undo them.
///
/// The log is a stack of [`Session`]s. Every real sort pushes one session and
/// every undo pops the most recent one. On disk it is a JSON array of sessions,
/// each an array of `{"src": ..., "dest": ...}` records:
///
/// ```json
/// [
///   [
///     { "src": "/home/me/Downloads/a.jpg", "dest": "/home/me/Downloads/Images/a.jpg" }
///   ]
/// ]
/// ```
///
/// A flat array of moves (the older single-session layout) is still accepted
/// on load and read as one session.
///
/// The file is always replaced as a whole: the new contents are written to a
/// temporary file next to the log and renamed over it. An empty log is stored
/// by removing the file.
use crate::error::{OrganizeError, OrganizeResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One completed file relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Where the file was before sorting.
    pub src: PathBuf,
    /// Where the file was moved to.
    pub dest: PathBuf,
}

impl Move {
    pub fn new(src: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }
}

/// The moves of one sort invocation, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    moves: Vec<Move>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed move.
    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl From<Vec<Move>> for Session {
    fn from(moves: Vec<Move>) -> Self {
        Self { moves }
    }
}

/// Stack of sessions that have not been undone yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoveLog {
    sessions: Vec<Session>,
}

/// Layouts accepted when reading a log file.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLog {
    Stack(Vec<Session>),
    Legacy(Vec<Move>),
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a session on top of the stack.
    pub fn push(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// Removes and returns the most recent session.
    pub fn pop(&mut self) -> Option<Session> {
        self.sessions.pop()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Loads the log stored at `log_path`.
    ///
    /// A missing file, or one holding only whitespace, is an empty log.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::LogReadFailed`] if the file exists but cannot be
    /// read, and [`OrganizeError::CorruptedLog`] if its contents are not a log.
    pub fn load(log_path: &Path) -> OrganizeResult<Self> {
        if !log_path.exists() {
            return Ok(Self::new());
        }

        let contents =
            fs::read_to_string(log_path).map_err(|e| OrganizeError::LogReadFailed {
                path: log_path.to_path_buf(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Ok(Self::new());
        }

        let stored: StoredLog =
            serde_json::from_str(&contents).map_err(|e| OrganizeError::CorruptedLog {
                path: log_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(match stored {
            StoredLog::Stack(sessions) => Self { sessions },
            StoredLog::Legacy(moves) => Self {
                sessions: vec![Session::from(moves)],
            },
        })
    }

    /// Loads the log, treating an unreadable or corrupted file as empty.
    ///
    /// The problem is reported as a warning. The next [`MoveLog::save`] will
    /// overwrite the damaged file.
    pub fn load_or_empty(log_path: &Path) -> Self {
        match Self::load(log_path) {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!(error = %e, "starting a fresh move log");
                Self::new()
            }
        }
    }

    /// Writes the whole log to `log_path`, replacing any previous contents.
    ///
    /// An empty log removes the file instead.
    pub fn save(&self, log_path: &Path) -> OrganizeResult<()> {
        let write_failed = |source: std::io::Error| OrganizeError::LogWriteFailed {
            path: log_path.to_path_buf(),
            source,
        };

        if self.is_empty() {
            if log_path.exists() {
                fs::remove_file(log_path).map_err(write_failed)?;
            }
            return Ok(());
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| {
            write_failed(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        let parent = match log_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(parent).map_err(write_failed)?;
        temp.write_all(json.as_bytes()).map_err(write_failed)?;
        temp.as_file().sync_all().map_err(write_failed)?;
        temp.persist(log_path).map_err(|e| write_failed(e.error))?;

        tracing::debug!(path = %log_path.display(), sessions = self.len(), "move log saved");
        Ok(())
    }
}
