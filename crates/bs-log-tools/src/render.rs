//! Terminal and JSON rendering of fetched rows.

use serde::Serialize;
use std::io::{self, Write};

use crate::row::LogRow;

/// Marker appended when a value is cut to fit its column.
pub const ELLIPSIS: char = '…';
/// Placeholder for a missing value in table and compact output.
pub const PLACEHOLDER: &str = "-";

const TIME_WIDTH: usize = 24;
const LEVEL_WIDTH: usize = 8;
const STATUS_WIDTH: usize = 6;
const METHOD_WIDTH: usize = 7;
const PATH_WIDTH: usize = 40;
const MESSAGE_WIDTH: usize = 80;

/// Squeeze embedded newlines to spaces, then cut to `width` characters.
///
/// When cut, the last kept character is replaced by `ELLIPSIS`, so the
/// result is exactly `width` characters and truncating it again is a no-op.
pub fn truncate(s: &str, width: usize) -> String {
    let flat = squeeze_newlines(s);
    if flat.chars().count() <= width {
        return flat;
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = flat.chars().take(width - 1).collect();
    out.push(ELLIPSIS);
    out
}

fn squeeze_newlines(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// The six display fields of a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub time: Option<String>,
    pub level: Option<String>,
    pub status: Option<i64>,
    pub method: Option<String>,
    pub path: Option<String>,
    pub message: Option<String>,
}

impl From<&LogRow> for RenderedRow {
    fn from(row: &LogRow) -> Self {
        let http = row.http_bits();
        Self {
            time: row.timestamp(),
            level: row.level_text(),
            status: http.status,
            method: http.method,
            path: http.path,
            message: row.message(),
        }
    }
}

fn cell(value: Option<&str>, width: usize) -> String {
    let text = truncate(value.unwrap_or(PLACEHOLDER), width);
    format!("{text:<width$}")
}

/// Write rows as fixed-width columns with a header line.
pub fn write_table<W: Write>(out: &mut W, rows: &[LogRow]) -> io::Result<()> {
    writeln!(
        out,
        "{} {} {} {} {} {}",
        cell(Some("TIME"), TIME_WIDTH),
        cell(Some("LEVEL"), LEVEL_WIDTH),
        cell(Some("STATUS"), STATUS_WIDTH),
        cell(Some("METHOD"), METHOD_WIDTH),
        cell(Some("PATH"), PATH_WIDTH),
        "MESSAGE"
    )?;
    for row in rows {
        let r = RenderedRow::from(row);
        let status = r.status.map(|s| s.to_string());
        let line = format!(
            "{} {} {} {} {} {}",
            cell(r.time.as_deref(), TIME_WIDTH),
            cell(r.level.as_deref(), LEVEL_WIDTH),
            cell(status.as_deref(), STATUS_WIDTH),
            cell(r.method.as_deref(), METHOD_WIDTH),
            cell(r.path.as_deref(), PATH_WIDTH),
            truncate(r.message.as_deref().unwrap_or(PLACEHOLDER), MESSAGE_WIDTH),
        );
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

/// Write rows as a pretty-printed JSON array of `RenderedRow` objects.
pub fn write_json<W: Write>(out: &mut W, rows: &[LogRow]) -> io::Result<()> {
    let rendered: Vec<RenderedRow> = rows.iter().map(RenderedRow::from).collect();
    serde_json::to_writer_pretty(&mut *out, &rendered)?;
    writeln!(out)
}

/// Write a `From/To/Count` header followed by one `ts [level] message` line per row.
pub fn write_compact<W: Write>(
    out: &mut W,
    rows: &[LogRow],
    meta: Option<&serde_json::Value>,
) -> io::Result<()> {
    let meta_field = |key: &str| {
        meta.and_then(|m| m.get(key))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    };
    writeln!(
        out,
        "From: {}  To: {}  Count: {}",
        meta_field("from"),
        meta_field("to"),
        rows.len()
    )?;
    for row in rows {
        let ts = row.timestamp().unwrap_or_default();
        let level = row.level_text().unwrap_or_default();
        let message = row.message().map(|m| squeeze_newlines(&m)).unwrap_or_default();
        writeln!(out, "{ts} [{level}] {message}")?;
    }
    Ok(())
}
