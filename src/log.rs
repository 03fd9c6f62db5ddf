use std::sync::Mutex;

use bounded_vec_deque::BoundedVecDeque;
use lazy_static::lazy_static;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Clone, Debug)]
pub struct LogEntry(pub LogLevel, pub String);

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let LogEntry(level, ref text) = self;
        match level {
            LogLevel::Info => write!(f, "{}", text),
            LogLevel::Warn => write!(f, "WARN: {}", text),
            LogLevel::Error => write!(f, "ERR: {}", text),
        }
    }
}

const MESSAGE_HISTORY_SIZE: usize = 200;

lazy_static! {
    static ref LOG_LINES: Mutex<BoundedVecDeque<LogEntry>> =
        Mutex::new(BoundedVecDeque::new(MESSAGE_HISTORY_SIZE));
}

pub fn push_log(level: LogLevel, text: String) {
    // A poisoned lock just means someone panicked mid-push; the entries are still fine
    let mut lines = match LOG_LINES.lock() {
        Ok(lines) => lines,
        Err(poisoned) => poisoned.into_inner(),
    };
    lines.push_back(LogEntry(level, text));
}

/// Returns (up to) the `count` most recent entries, oldest first
pub fn recent(count: usize) -> Vec<LogEntry> {
    let lines = match LOG_LINES.lock() {
        Ok(lines) => lines,
        Err(poisoned) => poisoned.into_inner(),
    };
    let skip = lines.len().saturating_sub(count);
    lines.iter().skip(skip).cloned().collect()
}

#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)*) => {{
        crate::log::push_log($level, format!($($arg)*).to_string());
    }}
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        crate::log!(crate::log::LogLevel::Info, $($arg)*);
    }}
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        crate::log!(crate::log::LogLevel::Warn, $($arg)*);
    }}
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        crate::log!(crate::log::LogLevel::Error, $($arg)*);
    }}
}
