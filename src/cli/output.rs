//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print a diff report, coloring `-got` red and `+want` green
pub fn diff_report(report: &str) {
    for line in report.lines() {
        let Some((at, change)) = line.split_once(": ") else {
            println!("{}", line);
            continue;
        };
        match split_change(change) {
            (Some(got), Some(want)) => println!("{}: {} {}", at, got.red(), want.green()),
            (Some(got), None) => println!("{}: {}", at, got.red()),
            (None, Some(want)) => println!("{}: {}", at, want.green()),
            (None, None) => println!("{}", line),
        }
    }
}

/// Split `-"got" +"want"` into its removed and added halves.
///
/// Values are `{:?}`-quoted, so a literal `"` inside one is escaped and
/// ` +"` can only appear where the added half starts.
fn split_change(change: &str) -> (Option<&str>, Option<&str>) {
    if change.starts_with('+') {
        return (None, Some(change));
    }
    if !change.starts_with('-') {
        return (None, None);
    }
    match change.find(" +\"") {
        Some(at) => (Some(&change[..at]), Some(&change[at + 1..])),
        None => (Some(change), None),
    }
}

/// Print plain output (no color, for records and JSON)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
