//! Stdout-only logging for code paths that have no [`LogClient`](crate::client::LogClient).

use crate::record::CallSite;
use chrono::{SecondsFormat, Utc};
use std::fmt;

fn line(kind: &str, site: &CallSite, text: &dyn fmt::Display) -> String {
    format!(
        "{} | {} ({} on line {}) | {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        kind,
        site.scope,
        site.line,
        text
    )
}

/// Print `<RFC3339> | Log from (<file> on line <n>) | <msg>`.
#[track_caller]
pub fn log(msg: &str) {
    println!("{}", line("Log from", &CallSite::caller(), &msg));
}

/// Print `<RFC3339> | Error in (<file> on line <n>) | <err>`.
#[track_caller]
pub fn log_err(err: &dyn fmt::Display) {
    println!("{}", line("Error in", &CallSite::caller(), err));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_layout() {
        let rendered = line("Error in", &CallSite::new("svc::db", 4), &"connection reset");
        let (timestamp, rest) = rendered.split_once(" | ").unwrap();

        assert!(timestamp.ends_with('Z'));
        assert_eq!(rest, "Error in (svc::db on line 4) | connection reset");
    }

    #[test]
    fn log_helpers_print_without_panicking() {
        log("starting");
        log_err(&std::io::Error::new(std::io::ErrorKind::Other, "nope"));
    }
}
