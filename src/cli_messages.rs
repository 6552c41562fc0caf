//! CLI command messaging
//!
//! Consistent tagged output for the one-shot commands (`labels`, `snapshot`,
//! `config`).

const YELLOW: &str = "\x1b[1;33m";
const RED: &str = "\x1b[1;31m";
const BRIGHT_RED: &str = "\x1b[1;91m";
const GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

fn tagged(color: &str, tag: &str, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{}[{}]{} {}", color, tag, RESET, title)
    } else {
        format!("{}[{}]{} {}\t {}", color, tag, RESET, title, details)
    }
}

pub fn print_info(title: &str, details: &str) {
    println!("{}", tagged(YELLOW, "INFO", title, details));
}

pub fn print_warn(title: &str, details: &str) {
    println!("{}", tagged(BRIGHT_RED, "WARN", title, details));
}

/// Errors go to stderr so piped output stays clean.
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{}", tagged(RED, "ERROR", title, details.unwrap_or_default()));
}

pub fn print_success(title: &str, details: &str) {
    println!("{}", tagged(GREEN, "SUCCESS", title, details));
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_tab_separated_when_present() {
        assert_eq!(
            tagged(GREEN, "SUCCESS", "Saved", "~/.quadrant-dash/config.json"),
            "\x1b[1;32m[SUCCESS]\x1b[0m Saved\t ~/.quadrant-dash/config.json"
        );
        assert_eq!(tagged(YELLOW, "INFO", "Done", ""), "\x1b[1;33m[INFO]\x1b[0m Done");
    }
}
