//! Operator-facing status lines (colour + icon), one per outcome kind.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Kind of status message shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
    Error,
}

impl Status {
    fn color(&self) -> &'static str {
        match self {
            Status::Info => "\x1b[34m",
            Status::Success => "\x1b[32m",
            Status::Warning => "\x1b[33m",
            Status::Error => "\x1b[31m",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Status::Info => "ℹ️",
            Status::Success => "✅",
            Status::Warning => "⚠️",
            Status::Error => "❌",
        }
    }
}

/// Format a status line; errors and warnings go to stderr.
pub fn status<T: fmt::Display>(kind: Status, msg: T) {
    let line = format!("{}{}{} {}{}", kind.color(), BOLD, kind.icon(), RESET, msg);
    match kind {
        Status::Error | Status::Warning => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    status(Status::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    status(Status::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    status(Status::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    status(Status::Error, msg);
}
