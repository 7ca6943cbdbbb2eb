//! Core log types: level ranking, status classes, and output formats.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ── Log Level ─────────────────────────────────────────────────

/// Log level, ordered from least to most severe.
///
/// Variant declaration order matters: `#[derive(Ord)]` uses it,
/// so Debug < Info < Notice < Warning < Error < Critical < Fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Fatal => "fatal",
        }
    }

    /// Rank a level string as found in a row. Returns `None` for anything
    /// outside the known vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debug" | "trace" => Some(Self::Debug),
            "info" | "information" | "informational" => Some(Self::Info),
            "notice" => Some(Self::Notice),
            "warning" | "warn" => Some(Self::Warning),
            "error" | "err" => Some(Self::Error),
            "critical" | "crit" => Some(Self::Critical),
            "fatal" | "panic" | "alert" | "emergency" | "emerg" => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "unknown level '{s}' (expected debug, info, notice, warning, error, critical, fatal)"
            )
        })
    }
}

// ── Status Class ──────────────────────────────────────────────

/// HTTP status class: the hundreds digit of a status code (`5xx` → 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusClass(u8);

impl StatusClass {
    pub fn new(digit: u8) -> Option<Self> {
        (1..=5).contains(&digit).then_some(Self(digit))
    }

    pub fn digit(&self) -> u8 {
        self.0
    }

    /// Whether an integer status code falls into this class.
    pub fn contains(&self, status: i64) -> bool {
        status >= 0 && status / 100 == i64::from(self.0)
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}xx", self.0)
    }
}

impl FromStr for StatusClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let digits = lowered.strip_suffix("xx").unwrap_or(&lowered);
        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("invalid status class '{s}' (expected 1xx..5xx)"))
    }
}

// ── Output Format ─────────────────────────────────────────────

/// How fetched rows are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Summary header plus one `ts [level] message` line per row.
    Compact,
    /// Fixed-width columns.
    Table,
    /// Pretty-printed JSON array.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}' (expected compact, table, json)")),
        }
    }
}
