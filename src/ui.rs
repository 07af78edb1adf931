// UI module for consistent terminal output with spinners and styling

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::time::Duration;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Check if stderr is a TTY (for interactive output)
fn is_tty() -> bool {
    Term::stderr().is_term()
}

/// Create a styled spinner for one in-flight check.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if !is_tty() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars(SPINNER_CHARS)
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());

    if is_tty() {
        pb.enable_steady_tick(Duration::from_millis(80));
    }

    pb
}

fn finish_with(pb: &ProgressBar, msg: String, to_stderr: bool) {
    if is_tty() {
        pb.set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        pb.finish_with_message(msg);
    } else {
        pb.finish_and_clear();
        if to_stderr {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }
    }
}

/// Finish a spinner for a plugin that is already current.
pub fn finish_up_to_date(pb: &ProgressBar, name: &str, version: &str) {
    finish_with(
        pb,
        format!("{} {} {}", style("✓").green(), name, style(version).dim()),
        false,
    );
}

/// Finish a spinner for a plugin with a newer upstream version.
pub fn finish_update_available(pb: &ProgressBar, name: &str, current: &str, latest: &str) {
    finish_with(
        pb,
        format!(
            "{} {} {} {}",
            style("↑").yellow(),
            name,
            style(current).dim(),
            style(format!("→ {latest}")).yellow()
        ),
        false,
    );
}

/// Finish a spinner for a plugin that is tracked manually.
pub fn finish_skipped(pb: &ProgressBar, name: &str, note: &str) {
    finish_with(
        pb,
        format!("{} {} {}", style("-").dim(), name, style(note).dim()),
        false,
    );
}

/// Finish a spinner with an error.
pub fn finish_error(pb: &ProgressBar, name: &str, message: &str) {
    finish_with(
        pb,
        format!("{} {} {}", style("✗").red(), name, style(message).red()),
        true,
    );
}

/// Print a success message with checkmark
pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print an info/action message with arrow
pub fn action(message: &str) {
    println!("{} {}", style("→").cyan(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Print a header/section message
pub fn header(message: &str) {
    println!("{}", style(message).bold());
}

/// Print a dimmed/secondary message
pub fn dim(message: &str) {
    println!("{}", style(message).dim());
}

/// Print an unstyled line (table rows and similar)
pub fn plain(message: &str) {
    println!("{}", message);
}
