//! Coloured one-line status messages for the terminal.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
}

impl Level {
    fn colour(self) -> &'static str {
        match self {
            Level::Info => "\x1b[34m",
            Level::Success => "\x1b[32m",
            Level::Warning => "\x1b[33m",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
        }
    }
}

fn emit<T: fmt::Display>(level: Level, msg: T) {
    println!("{}{}{} {}{}", level.colour(), BOLD, level.icon(), RESET, msg);
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Level::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Level::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Level::Warning, msg);
}

/// Section header, e.g. above a report table.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}== {} =={}\n", Level::Info.colour(), BOLD, msg, RESET);
}
