//! Output formatting and styling module.
//!
//! All user-facing output goes through [`OutputFormatter`]: colored status
//! lines, the progress bar shown while moving files, the per-category summary
//! table and the undo report. Diagnostics go through `tracing` instead.

use crate::config::OutputSettings;
use crate::organizer::{CategoryCounts, PlannedMove};
use crate::undo::UndoReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Applies output settings; with `color` off every style is a no-op.
    pub fn configure(settings: &OutputSettings) {
        if !settings.color {
            colored::control::set_override(false);
        }
    }

    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints one line of a dry-run plan.
    pub fn planned_move(planned: &PlannedMove<'_>) {
        println!(
            " - {} {} {}/",
            planned.file_name,
            "→".cyan(),
            planned.category.dir_name()
        );
    }

    /// Creates a progress bar for `total` file moves.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb
    }

    /// Prints the per-category summary table.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sortdir::categorizer::Category;
    /// use sortdir::organizer::CategoryCounts;
    /// use sortdir::output::OutputFormatter;
    ///
    /// let mut counts = CategoryCounts::new();
    /// counts.insert(Category::Documents, 15);
    /// counts.insert(Category::Images, 8);
    /// OutputFormatter::summary_table(&counts);
    /// ```
    pub fn summary_table(counts: &CategoryCounts) {
        Self::header("Summary of files:");

        let width = counts
            .keys()
            .map(|category| category.dir_name().len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!("{:<width$} | {}", "Category".bold(), "Files".bold(), width = width);
        println!("{}", "-".repeat(width + 10));

        for (category, count) in counts {
            println!(
                "{:<width$} | {} {}",
                category.dir_name(),
                count.to_string().green(),
                plural(*count),
                width = width
            );
        }

        let total: usize = counts.values().sum();
        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            plural(total),
            width = width
        );
    }

    /// Prints the outcome of an undo.
    pub fn undo_report(report: &UndoReport) {
        Self::success(&format!(
            "Restored {} {}.",
            report.restored_files,
            plural(report.restored_files)
        ));

        if !report.skipped.is_empty() {
            Self::warning(&format!(
                "Skipped {} (no longer at destination):",
                report.skipped.len()
            ));
            for mv in &report.skipped {
                println!("    - {}", mv.dest.display());
            }
        }

        if !report.failed.is_empty() {
            Self::error(&format!("Failed to restore {}:", report.failed.len()));
            for (mv, reason) in &report.failed {
                eprintln!("    - {}: {}", mv.dest.display(), reason);
            }
            Self::error("The session was kept in the log; fix the issues and run --undo again.");
        }

        match report.remaining_sessions {
            0 => Self::info("Nothing left to undo."),
            n => Self::info(&format!("{} earlier {} can still be undone.", n, session_word(n))),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

fn session_word(count: usize) -> &'static str {
    if count == 1 { "session" } else { "sessions" }
}
