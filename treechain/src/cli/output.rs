//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Section header (cyan bold), without trailing newline
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) -> String {
    msg.to_string().cyan().bold().to_string()
}

/// Turn coloring off for the rest of the process.
pub fn disable_color() {
    colored::control::set_override(false);
}
