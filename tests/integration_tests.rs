use sortdir::cli::{SortCommand, run_cli};
use sortdir::config::OutputSettings;
use sortdir::{Category, MoveLog, OrganizeError, UndoOutcome, organize, undo};
/// Integration tests for sortdir
///
/// These tests run complete organize / undo workflows against temporary
/// directories.
///
/// Test categories:
/// 1. Basic organization workflows
/// 2. Simulate mode
/// 3. Undo and session stacking
/// 4. Damaged or missing log state
/// 5. Command-line binary
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const LOG_NAME: &str = ".sortdir_log.json";

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary directory with helpers to populate and inspect it.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn log_path(&self) -> PathBuf {
        self.path().join(LOG_NAME)
    }

    fn create_text_file(&self, name: &str, content: &str) {
        let mut file = File::create(self.path().join(name)).expect("Failed to create file");
        file.write_all(content.as_bytes())
            .expect("Failed to write file content");
    }

    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_text_file(name, name);
        }
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_file(),
            "File should exist: {}",
            path.display()
        );
    }

    fn assert_file_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "File should not exist: {}", path.display());
    }

    /// Sorted names of the top-level files, excluding the move log.
    fn top_level_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .expect("Failed to read directory")
            .flatten()
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name != LOG_NAME)
            .collect();
        names.sort();
        names
    }

    /// Every file below the directory, relative to it, excluding the move log.
    fn list_files_recursive(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        Self::walk_dir(self.path(), &mut files);
        let mut relative: Vec<PathBuf> = files
            .into_iter()
            .filter_map(|p| p.strip_prefix(self.path()).ok().map(Path::to_path_buf))
            .filter(|p| p != Path::new(LOG_NAME))
            .collect();
        relative.sort();
        relative
    }

    fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) {
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    files.push(path);
                } else if path.is_dir() {
                    Self::walk_dir(&path, files);
                }
            }
        }
    }

    fn organize(&self) -> sortdir::CategoryCounts {
        organize(self.path(), &self.log_path(), false).expect("Organize failed")
    }

    fn undo(&self) -> UndoOutcome {
        undo(&self.log_path()).expect("Undo failed")
    }

    fn session_count(&self) -> usize {
        MoveLog::load(&self.log_path()).expect("Load failed").len()
    }
}

fn quiet_settings() -> OutputSettings {
    OutputSettings {
        color: false,
        progress: false,
    }
}

// ============================================================================
// Test Suite 1: Basic Organization
// ============================================================================

#[test]
fn test_concrete_scenario_round_trip() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.jpg", "b.pdf", "c.mp4", "d.xyz"]);

    let counts = fixture.organize();

    assert_eq!(counts.len(), 4);
    for category in [
        Category::Images,
        Category::Documents,
        Category::Videos,
        Category::Others,
    ] {
        assert_eq!(counts[&category], 1, "{}", category);
    }
    fixture.assert_file_exists("Images/a.jpg");
    fixture.assert_file_exists("Documents/b.pdf");
    fixture.assert_file_exists("Videos/c.mp4");
    fixture.assert_file_exists("Others/d.xyz");
    assert!(fixture.top_level_files().is_empty());

    assert!(matches!(fixture.undo(), UndoOutcome::Restored(_)));

    assert_eq!(
        fixture.top_level_files(),
        vec!["a.jpg", "b.pdf", "c.mp4", "d.xyz"]
    );
    fixture.assert_file_not_exists(LOG_NAME);
}

#[test]
fn test_organize_mixed_case_extensions() {
    let fixture = TestFixture::new();
    fixture.create_files(&["UPPER.JPG", "Mixed.Pdf", "clip.MoV"]);

    let counts = fixture.organize();

    assert_eq!(counts[&Category::Images], 1);
    assert_eq!(counts[&Category::Documents], 1);
    assert_eq!(counts[&Category::Videos], 1);
    fixture.assert_file_exists("Images/UPPER.JPG");
    fixture.assert_file_exists("Documents/Mixed.Pdf");
    fixture.assert_file_exists("Videos/clip.MoV");
}

#[test]
fn test_files_without_extension_go_to_others() {
    let fixture = TestFixture::new();
    fixture.create_files(&["Makefile", ".gitignore", "archive.tar.gz"]);

    let counts = fixture.organize();

    assert_eq!(counts[&Category::Others], 3);
    fixture.assert_file_exists("Others/Makefile");
    fixture.assert_file_exists("Others/.gitignore");
    fixture.assert_file_exists("Others/archive.tar.gz");
}

#[test]
fn test_organize_leaves_subdirectories_alone() {
    let fixture = TestFixture::new();
    fs::create_dir(fixture.path().join("projects")).expect("Failed to create dir");
    fs::write(fixture.path().join("projects").join("inner.jpg"), "x").expect("write");
    fixture.create_files(&["top.jpg"]);

    let counts = fixture.organize();

    assert_eq!(counts.values().sum::<usize>(), 1);
    fixture.assert_file_exists("projects/inner.jpg");
    fixture.assert_file_exists("Images/top.jpg");
}

#[test]
fn test_organize_preserves_file_content() {
    let fixture = TestFixture::new();
    fixture.create_text_file("notes.txt", "important notes");
    fixture.create_text_file("my photo (1).png", "pixels");

    fixture.organize();

    let content = fs::read_to_string(fixture.path().join("Documents/notes.txt"))
        .expect("Failed to read file");
    assert_eq!(content, "important notes");
    fixture.assert_file_exists("Images/my photo (1).png");
}

#[test]
fn test_organize_into_existing_category_folders() {
    let fixture = TestFixture::new();
    fixture.create_files(&["one.jpg"]);
    fixture.organize();

    fixture.create_files(&["two.jpg", "three.docx"]);
    let counts = fixture.organize();

    assert_eq!(counts[&Category::Images], 1);
    assert_eq!(counts[&Category::Documents], 1);
    fixture.assert_file_exists("Images/one.jpg");
    fixture.assert_file_exists("Images/two.jpg");
    let category_dirs = fs::read_dir(fixture.path())
        .expect("Failed to read directory")
        .flatten()
        .filter(|e| e.path().is_dir())
        .count();
    assert_eq!(category_dirs, 2);
}

#[test]
fn test_organize_empty_directory_writes_no_log() {
    let fixture = TestFixture::new();

    let counts = fixture.organize();

    assert!(counts.is_empty());
    fixture.assert_file_not_exists(LOG_NAME);
}

#[test]
fn test_organize_invalid_directory() {
    let fixture = TestFixture::new();
    let missing = fixture.path().join("missing");

    let result = organize(&missing, &missing.join(LOG_NAME), false);

    match result {
        Err(e @ OrganizeError::NotADirectory { .. }) => assert_eq!(e.exit_code(), 3),
        other => panic!("expected NotADirectory, got {:?}", other),
    }
    assert!(!missing.exists());
}

// ============================================================================
// Test Suite 2: Simulate Mode
// ============================================================================

#[test]
fn test_simulate_matches_real_counts() {
    let names = [
        "a.jpg", "b.jpeg", "c.gif", "d.pdf", "e.txt", "f.mkv", "g.avi", "h.zip", "i",
    ];

    let simulated = TestFixture::new();
    simulated.create_files(&names);
    let before = simulated.list_files_recursive();
    let simulated_counts =
        organize(simulated.path(), &simulated.log_path(), true).expect("Simulate failed");

    assert_eq!(simulated.list_files_recursive(), before);
    simulated.assert_file_not_exists(LOG_NAME);

    let real = TestFixture::new();
    real.create_files(&names);
    let real_counts = real.organize();

    assert_eq!(simulated_counts, real_counts);
    assert_eq!(real_counts[&Category::Images], 3);
    assert_eq!(real_counts[&Category::Others], 2);
}

#[test]
fn test_simulate_ignores_corrupted_log() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.jpg"]);
    fs::write(fixture.log_path(), "not json").expect("Failed to write log");

    organize(fixture.path(), &fixture.log_path(), true).expect("Simulate failed");

    assert_eq!(
        fs::read_to_string(fixture.log_path()).expect("Read failed"),
        "not json"
    );
}

// ============================================================================
// Test Suite 3: Undo and Session Stacking
// ============================================================================

#[test]
fn test_two_sessions_undo_one_at_a_time() {
    let fixture = TestFixture::new();
    fixture.create_files(&["first.jpg", "first.pdf"]);
    fixture.organize();
    fixture.create_files(&["second.mp4", "second.txt"]);
    fixture.organize();
    assert_eq!(fixture.session_count(), 2);

    fixture.undo();

    assert_eq!(fixture.top_level_files(), vec!["second.mp4", "second.txt"]);
    fixture.assert_file_exists("Images/first.jpg");
    fixture.assert_file_exists("Documents/first.pdf");
    assert_eq!(fixture.session_count(), 1);

    fixture.undo();

    assert_eq!(
        fixture.top_level_files(),
        vec!["first.jpg", "first.pdf", "second.mp4", "second.txt"]
    );
    fixture.assert_file_not_exists(LOG_NAME);
    assert!(matches!(fixture.undo(), UndoOutcome::NothingToUndo));
}

#[test]
fn test_round_trip_many_files() {
    let fixture = TestFixture::new();
    let names: Vec<String> = (0..40)
        .map(|i| {
            let ext = ["jpg", "PNG", "pdf", "docx", "mp4", "mov", "bin", "md"][i % 8];
            format!("file_{:02}.{}", i, ext)
        })
        .collect();
    for name in &names {
        fixture.create_text_file(name, name);
    }
    let before = fixture.list_files_recursive();

    fixture.organize();
    assert!(fixture.top_level_files().is_empty());
    fixture.undo();

    assert_eq!(fixture.list_files_recursive(), before);
    for name in &names {
        let content = fs::read_to_string(fixture.path().join(name)).expect("Read failed");
        assert_eq!(&content, name);
    }
}

#[test]
fn test_undo_after_file_was_removed() {
    let fixture = TestFixture::new();
    fixture.create_files(&["keep.jpg", "gone.jpg"]);
    fixture.organize();
    fs::remove_file(fixture.path().join("Images/gone.jpg")).expect("Failed to remove");

    let report = match fixture.undo() {
        UndoOutcome::Restored(report) => report,
        UndoOutcome::NothingToUndo => panic!("expected a restored session"),
    };

    assert_eq!(report.restored_files, 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].dest.ends_with("gone.jpg"));
    fixture.assert_file_exists("keep.jpg");
    fixture.assert_file_not_exists(LOG_NAME);
}

#[test]
fn test_legacy_single_session_log() {
    let fixture = TestFixture::new();
    fs::create_dir(fixture.path().join("Videos")).expect("Failed to create dir");
    fixture.create_text_file("Videos/old.mp4", "old");
    let src = fixture.path().join("old.mp4");
    let dest = fixture.path().join("Videos").join("old.mp4");
    let legacy = serde_json::json!([{ "src": src, "dest": dest }]);
    fs::write(fixture.log_path(), legacy.to_string()).expect("Failed to write log");

    fixture.undo();

    fixture.assert_file_exists("old.mp4");
    fixture.assert_file_not_exists(LOG_NAME);
}

// ============================================================================
// Test Suite 4: Damaged or Missing Log State
// ============================================================================

#[test]
fn test_corrupted_log_leaves_everything_untouched() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.jpg", "b.pdf"]);
    fixture.organize();
    fs::write(fixture.log_path(), "[[{\"src\": 42}]]").expect("Failed to write log");
    let before = fixture.list_files_recursive();

    let result = run_cli(SortCommand::Undo, &fixture.log_path(), &quiet_settings());

    match result {
        Err(e @ OrganizeError::CorruptedLog { .. }) => assert_eq!(e.exit_code(), 4),
        other => panic!("expected CorruptedLog, got {:?}", other),
    }
    assert_eq!(fixture.list_files_recursive(), before);
    assert_eq!(
        fs::read_to_string(fixture.log_path()).expect("Read failed"),
        "[[{\"src\": 42}]]"
    );
}

#[test]
fn test_organize_replaces_corrupted_log() {
    let fixture = TestFixture::new();
    fs::write(fixture.log_path(), "{{{").expect("Failed to write log");
    fixture.create_files(&["a.jpg"]);

    fixture.organize();

    assert_eq!(fixture.session_count(), 1);
    fixture.undo();
    fixture.assert_file_exists("a.jpg");
}

#[test]
fn test_lost_log_write_leaves_session_unrecoverable() {
    // Moves and the log write are not atomic together. Losing the write
    // (simulated by deleting the log) leaves the files sorted with no way back.
    let fixture = TestFixture::new();
    fixture.create_files(&["a.jpg", "b.txt"]);
    fixture.organize();
    fs::remove_file(fixture.log_path()).expect("Failed to remove log");

    assert!(matches!(fixture.undo(), UndoOutcome::NothingToUndo));
    fixture.assert_file_exists("Images/a.jpg");
    fixture.assert_file_exists("Documents/b.txt");
}

#[test]
fn test_undo_without_history_via_cli() {
    let fixture = TestFixture::new();

    let result = run_cli(SortCommand::Undo, &fixture.log_path(), &quiet_settings());

    assert!(result.is_ok());
    fixture.assert_file_not_exists(LOG_NAME);
}

#[test]
fn test_run_cli_organize_and_dry_run() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.png", "b.mkv"]);

    run_cli(
        SortCommand::Organize {
            directory: fixture.path().to_path_buf(),
            simulate: true,
        },
        &fixture.log_path(),
        &quiet_settings(),
    )
    .expect("Dry run failed");
    assert_eq!(fixture.top_level_files(), vec!["a.png", "b.mkv"]);

    run_cli(
        SortCommand::Organize {
            directory: fixture.path().to_path_buf(),
            simulate: false,
        },
        &fixture.log_path(),
        &quiet_settings(),
    )
    .expect("Organize failed");
    fixture.assert_file_exists("Images/a.png");
    fixture.assert_file_exists("Videos/b.mkv");
    assert_eq!(fixture.session_count(), 1);
}

#[test]
fn test_custom_log_outside_directory() {
    let fixture = TestFixture::new();
    let log_dir = TempDir::new().expect("Failed to create temp directory");
    let log_path = log_dir.path().join("moves.json");
    fixture.create_files(&["a.jpg"]);

    organize(fixture.path(), &log_path, false).expect("Organize failed");
    assert!(log_path.exists());
    fixture.assert_file_not_exists(LOG_NAME);

    undo(&log_path).expect("Undo failed");
    fixture.assert_file_exists("a.jpg");
    assert!(!log_path.exists());
}

#[test]
fn test_outside_log_name_does_not_hide_user_file() {
    let fixture = TestFixture::new();
    let log_dir = TempDir::new().expect("Failed to create temp directory");
    let log_path = log_dir.path().join("moves.json");
    fixture.create_files(&["a.jpg", "moves.json"]);

    let counts = organize(fixture.path(), &log_path, false).expect("Organize failed");

    assert_eq!(counts.get(&Category::Images), Some(&1));
    assert_eq!(counts.get(&Category::Others), Some(&1));
    fixture.assert_file_not_exists("moves.json");
    fixture.assert_file_exists("Others/moves.json");

    undo(&log_path).expect("Undo failed");
    fixture.assert_file_exists("moves.json");
    fixture.assert_file_exists("a.jpg");
}

// ============================================================================
// Test Suite 5: Command-Line Binary
// ============================================================================

fn sortdir() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sortdir"));
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn test_binary_without_mode_is_usage_error() {
    let output = sortdir().output().expect("Failed to run binary");

    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--path"));
}

#[test]
fn test_binary_rejects_missing_directory() {
    let fixture = TestFixture::new();
    let output = sortdir()
        .arg("--path")
        .arg(fixture.path().join("missing"))
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_binary_organize_then_undo() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.jpg", "b.pdf", "c.mp4", "d.xyz"]);

    let organized = sortdir()
        .arg("--path")
        .arg(fixture.path())
        .output()
        .expect("Failed to run binary");
    assert!(organized.status.success());
    let stdout = String::from_utf8_lossy(&organized.stdout);
    assert!(stdout.contains("Images"));
    assert!(stdout.contains("Others"));
    fixture.assert_file_exists("Videos/c.mp4");

    let undone = sortdir()
        .arg("--path")
        .arg(fixture.path())
        .arg("--undo")
        .output()
        .expect("Failed to run binary");
    assert!(undone.status.success());
    assert!(String::from_utf8_lossy(&undone.stdout).contains("Restored 4 files"));
    assert_eq!(
        fixture.top_level_files(),
        vec!["a.jpg", "b.pdf", "c.mp4", "d.xyz"]
    );

    let again = sortdir()
        .arg("--path")
        .arg(fixture.path())
        .arg("--undo")
        .output()
        .expect("Failed to run binary");
    assert!(again.status.success());
    assert!(String::from_utf8_lossy(&again.stdout).contains("Nothing to undo"));
}
