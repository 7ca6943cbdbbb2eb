//! A fetched log row and the fields read out of it.
//!
//! Rows come from two different endpoints and several ingestion paths, so
//! nothing here assumes a schema. Each accessor tries the row itself first,
//! then the decoded `raw` payload, and returns `None` when nothing usable is
//! present.

use serde::Serialize;
use serde_json::Value;

use crate::fields::{
    Object, coerce_int, extract_string, extract_value, get_object, parse_raw_obj, value_to_string,
};
use crate::types::LogLevel;

const TIME_KEYS: &[&str] = &["timestamp", "dt", "@timestamp"];
const LEVEL_KEYS: &[&str] = &["level", "severity"];
const MESSAGE_KEYS: &[&str] = &["message", "msg", "log"];
const RAW_KEYS: &[&str] = &["raw", "_raw"];

const STATUS_KEYS: &[&str] = &["status_code", "statusCode", "status"];
const METHOD_KEYS: &[&str] = &["method", "request_method", "requestMethod"];
const PATH_KEYS: &[&str] = &["path", "request_path", "requestPath"];
const DEPLOYMENT_KEYS: &[&str] = &["deployment_id", "deploymentId"];
const ENVIRONMENT_KEYS: &[&str] = &["environment", "env"];
const SOURCE_KEYS: &[&str] = &["source"];

/// HTTP request details pulled from a Vercel payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HttpBits {
    pub status: Option<i64>,
    pub method: Option<String>,
    pub path: Option<String>,
}

/// One log entry returned by the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    fields: Object,
    raw: Option<Object>,
}

impl LogRow {
    /// Wrap a decoded JSON value. Non-object values become an empty row.
    pub fn from_value(value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Object::new(),
        };
        let raw = extract_value(&fields, RAW_KEYS).and_then(parse_raw_obj);
        Self { fields, raw }
    }

    /// Top-level fields as received.
    pub fn fields(&self) -> &Object {
        &self.fields
    }

    /// The decoded raw payload, if the row carried one.
    pub fn raw(&self) -> Option<&Object> {
        self.raw.as_ref()
    }

    /// Look up the first non-empty key, row first then raw payload.
    pub fn lookup(&self, keys: &[&str]) -> Option<&Value> {
        extract_value(&self.fields, keys)
            .or_else(|| self.raw.as_ref().and_then(|raw| extract_value(raw, keys)))
    }

    fn lookup_string(&self, keys: &[&str]) -> Option<String> {
        extract_string(&self.fields, keys)
            .or_else(|| self.raw.as_ref().and_then(|raw| extract_string(raw, keys)))
    }

    pub fn timestamp(&self) -> Option<String> {
        self.lookup_string(TIME_KEYS)
    }

    /// Level text exactly as it appears in the row.
    pub fn level_text(&self) -> Option<String> {
        self.lookup_string(LEVEL_KEYS)
    }

    /// Ranked level, `None` when missing or outside the known vocabulary.
    pub fn level(&self) -> Option<LogLevel> {
        self.level_text().as_deref().and_then(LogLevel::parse)
    }

    pub fn message(&self) -> Option<String> {
        self.lookup_string(MESSAGE_KEYS)
    }

    /// The `vercel` sub-object, from the raw payload or the row itself.
    fn vercel(&self) -> Option<&Object> {
        self.raw
            .as_ref()
            .and_then(|raw| get_object(raw, "vercel"))
            .or_else(|| get_object(&self.fields, "vercel"))
    }

    /// Search `vercel.proxy`, then `vercel`, then the row and raw payload.
    fn vercel_lookup(&self, keys: &[&str], check_proxy: bool) -> Option<&Value> {
        let vercel = self.vercel();
        let proxy = vercel.filter(|_| check_proxy).and_then(|v| get_object(v, "proxy"));
        proxy
            .and_then(|p| extract_value(p, keys))
            .or_else(|| vercel.and_then(|v| extract_value(v, keys)))
            .or_else(|| self.lookup(keys))
    }

    fn vercel_string(&self, keys: &[&str], check_proxy: bool) -> Option<String> {
        self.vercel_lookup(keys, check_proxy)
            .filter(|v| v.is_string() || v.is_number())
            .map(value_to_string)
    }

    /// Status, method, and path of the proxied request.
    pub fn http_bits(&self) -> HttpBits {
        HttpBits {
            status: self.vercel_lookup(STATUS_KEYS, true).and_then(coerce_int),
            method: self
                .vercel_string(METHOD_KEYS, true)
                .map(|m| m.trim().to_uppercase()),
            path: self.vercel_string(PATH_KEYS, true),
        }
    }

    pub fn deployment_id(&self) -> Option<String> {
        self.vercel_string(DEPLOYMENT_KEYS, false)
    }

    pub fn environment(&self) -> Option<String> {
        self.vercel_string(ENVIRONMENT_KEYS, false)
    }

    /// Emitting source (`lambda`, `edge`, `static`, `build`, ...).
    pub fn source(&self) -> Option<String> {
        self.vercel_string(SOURCE_KEYS, false)
    }
}

impl From<Value> for LogRow {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
