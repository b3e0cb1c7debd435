// CLI output formatting with consistent styling using indicatif and colored.
// Textual output goes through println!/eprintln!; diagnostics go through tracing on stderr.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead as _, Write as _};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use transync_core::{KeyParseError, LocaleSummary};

const PD_TICK: Duration = Duration::from_millis(100);

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

/// Installs the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!is_e2e())
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

/// Asks a yes/no question on stdin. Anything but `y`/`yes` declines.
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{} {} ", question, "[y/N]".dimmed());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

// Overview

pub fn print_overview_header() {
    println!("{}", "Translation overview".dimmed());
}

pub fn print_no_locales() {
    eprintln!("{}", "No translation files found.".red());
}

pub fn print_overview(summaries: &[LocaleSummary]) {
    println!(
        "{:<12} {:>7} {:>8} {:>8}",
        "Locale".bold(),
        "Files".bold(),
        "Values".bold(),
        "Missing".bold()
    );
    for summary in summaries {
        let locale = if summary.primary {
            format!("{} (default)", summary.locale)
        } else {
            summary.locale.clone()
        };
        let missing = summary.missing.to_string();
        let missing = if summary.missing == 0 {
            missing.green()
        } else {
            missing.yellow()
        };
        println!(
            "{:<12} {:>7} {:>8} {:>8}",
            locale,
            summary.files,
            summary.values,
            missing
        );
    }
}

// Export

pub fn print_export_header() {
    println!("{}", "Translation export".dimmed());
}

pub fn print_export_default_locale(locale: &str) {
    println!(
        "{} '{}' is the default locale; choose another target locale",
        "Nothing to export:".yellow(),
        locale.white().bold()
    );
}

pub fn print_nothing_to_export(locale: &str) {
    println!("{} {}", "No missing values for".green(), locale.cyan());
}

pub fn print_exported(count: usize, path: &Path) {
    println!(
        "{} {} value(s) to {}",
        "Exported".green(),
        count,
        path.display()
    );
}

// Import

pub fn print_import_header() {
    println!("{}", "Translation import".dimmed());
}

pub fn print_nothing_to_import(path: &Path) {
    println!(
        "{} {}",
        "No filled-in translations in".yellow(),
        path.display()
    );
}

// Auto-translate

pub fn print_auto_translate_header() {
    println!("{}", "Machine translation".dimmed());
}

pub fn print_all_translated(locale: &str) {
    println!("{} {}", "Nothing to translate for".green(), locale.cyan());
}

pub fn print_default_locale_target(locale: &str) {
    println!(
        "{} '{}' is the default locale",
        "Nothing to translate:".yellow(),
        locale.white().bold()
    );
}

pub fn print_translation_cost(count: usize, provider: &str, cost: f64) {
    println!(
        "Translating {} value(s) with {} costs {}",
        count,
        provider.cyan(),
        format!("${cost:.2}").bold()
    );
}

pub fn print_aborted() {
    println!("{}", "Aborted.".yellow());
}

pub fn print_translation_failed(key: &str, error: &str) {
    eprintln!("{} {}: {}", "Translation failed for".red(), key.white().bold(), error);
}

pub fn print_translation_summary(translated: usize, total: usize) {
    println!("{} {}/{} value(s)", "Translated".green(), translated, total);
}

// Writing

pub fn print_would_write(path: &Path, values: usize, created: bool) {
    let verb = if created { "Would create" } else { "Would update" };
    println!("{} {} ({} value(s))", verb.yellow(), path.display(), values);
}

pub fn print_written(path: &Path, values: usize, created: bool) {
    let verb = if created { "Created" } else { "Updated" };
    println!("{} {} ({} value(s))", verb.green(), path.display(), values);
}

pub fn print_unchanged(path: &Path) {
    println!("{} {}", "Unchanged".dimmed(), path.display());
}

pub fn print_skipped_key(error: &KeyParseError) {
    eprintln!("{} {}", "Skipping:".yellow(), error);
}

pub fn print_write_summary(files: usize, values: usize) {
    println!(
        "{} {} value(s) written to {} file(s)",
        "Done:".green(),
        values,
        files
    );
}

pub fn print_dry_run_summary(files: usize, values: usize) {
    println!(
        "{} {} value(s) would be written to {} file(s)",
        "Dry run:".yellow(),
        values,
        files
    );
}

pub fn print_diff(old: &str, new: &str) {
    // Colors are suppressed in e2e mode by `colored::control::set_override(false)`.
    use similar::{ChangeTag, TextDiff};

    let diff = TextDiff::from_lines(old, new);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("{}", "  ...".dimmed());
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let line = format!("{} {}", sign, change);
                match change.tag() {
                    ChangeTag::Delete => print!("{}", line.red()),
                    ChangeTag::Insert => print!("{}", line.green()),
                    ChangeTag::Equal => print!("{}", line.dimmed()),
                }
            }
        }
    }
}
