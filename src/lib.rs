//! sortdir - sort a directory's files into category folders
//!
//! This library categorizes files by extension, moves the top-level files of a
//! directory into `Images`, `Documents`, `Videos` and `Others` folders, and keeps
//! a stack of sort sessions in a JSON move log so each run can be undone.
//!
//! There is no locking: two runs against the same directory at once may lose
//! log updates. Run one instance per directory.

pub mod categorizer;
pub mod cli;
pub mod config;
pub mod error;
pub mod move_log;
pub mod organizer;
pub mod output;
pub mod scanner;
pub mod undo;

pub use categorizer::{Category, CategoryTable, categorize};
pub use config::{Config, ConfigError};
pub use error::{OrganizeError, OrganizeResult};
pub use move_log::{Move, MoveLog, Session};
pub use organizer::{CategoryCounts, organize};
pub use undo::{UndoOutcome, UndoReport, undo};

pub use cli::{Cli, SortCommand, run_cli};
