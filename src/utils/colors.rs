/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

/// Greys out placeholders ("", "--:--", "-") so real values stand out.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--:--" || v == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Green when an image can be opened, red when it is missing.
pub fn availability(readable: bool) -> String {
    if readable {
        format!("{GREEN}available{RESET}")
    } else {
        format!("{RED}not found{RESET}")
    }
}
