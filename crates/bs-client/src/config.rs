//! Client configuration, loaded from environment variables.
//!
//! Every loader has a `from_lookup` form taking a variable-lookup function;
//! `from_env` is a thin wrapper over `std::env::var`.

use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};

pub const TOKEN_VAR: &str = "BETTERSTACK_TELEMETRY_API_TOKEN";
pub const API_URL_VAR: &str = "BETTERSTACK_API_URL";
pub const SOURCE_ID_PRODUCTION_VAR: &str = "BETTERSTACK_SOURCE_ID_PRODUCTION";
pub const SOURCE_ID_PREVIEW_VAR: &str = "BETTERSTACK_SOURCE_ID_PREVIEW";

pub const QUERY_HOST_VAR: &str = "BETTERSTACK_QUERY_HOST";
pub const QUERY_USERNAME_VAR: &str = "BETTERSTACK_QUERY_USERNAME";
pub const QUERY_PASSWORD_VAR: &str = "BETTERSTACK_QUERY_PASSWORD";
pub const TABLE_PREFIX_VAR: &str = "BETTERSTACK_TABLE_PREFIX";
pub const TABLE_PREFIX_PRODUCTION_VAR: &str = "BETTERSTACK_TABLE_PREFIX_PRODUCTION";
pub const TABLE_PREFIX_PREVIEW_VAR: &str = "BETTERSTACK_TABLE_PREFIX_PREVIEW";

pub const DEFAULT_SEARCH_URL: &str = "https://api.betterstack.com/api/v2/logs/search";
pub const SEARCH_TIMEOUT_SECS: u64 = 15;
pub const SQL_TIMEOUT_SECS: u64 = 60;

/// Which deployment environment's logs to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Preview,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "prod",
            Self::Preview => "preview",
        }
    }

    fn source_id_var(&self) -> &'static str {
        match self {
            Self::Production => SOURCE_ID_PRODUCTION_VAR,
            Self::Preview => SOURCE_ID_PREVIEW_VAR,
        }
    }

    fn table_prefix_var(&self) -> &'static str {
        match self {
            Self::Production => TABLE_PREFIX_PRODUCTION_VAR,
            Self::Preview => TABLE_PREFIX_PREVIEW_VAR,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Ok(Self::Production),
            "preview" => Ok(Self::Preview),
            other => Err(format!("unknown environment '{other}' (expected prod or preview)")),
        }
    }
}

/// Read a variable, trimming whitespace and stray CR/LF. Empty counts as unset.
fn read_var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.replace(['\r', '\n'], "").trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// ── Search API ────────────────────────────────────────────────

/// Settings for the token-authenticated search endpoint.
#[derive(Clone)]
pub struct SearchConfig {
    pub api_url: String,
    pub token: String,
    /// Source id for the selected environment, sent as `sources`.
    pub source_id: Option<String>,
    pub timeout_secs: u64,
}

impl SearchConfig {
    pub fn from_env(env: Environment) -> ConfigResult<Self> {
        Self::from_lookup(env, env_lookup)
    }

    pub fn from_lookup<F>(env: Environment, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token =
            read_var(&lookup, TOKEN_VAR).ok_or_else(|| ConfigError::Missing(vec![TOKEN_VAR.into()]))?;
        Ok(Self {
            api_url: read_var(&lookup, API_URL_VAR).unwrap_or_else(|| DEFAULT_SEARCH_URL.into()),
            token,
            source_id: read_var(&lookup, env.source_id_var()),
            timeout_secs: SEARCH_TIMEOUT_SECS,
        })
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("source_id", &self.source_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// ── SQL Query API ─────────────────────────────────────────────

/// Settings for the basic-auth SQL query endpoint.
#[derive(Clone)]
pub struct QueryConfig {
    /// Endpoint URL, scheme included.
    pub url: String,
    pub username: String,
    pub password: String,
    /// Table name stem; rows are read from `<prefix>_logs`.
    pub table_prefix: String,
    pub timeout_secs: u64,
}

impl QueryConfig {
    pub fn from_env(env: Environment) -> ConfigResult<Self> {
        Self::from_lookup(env, env_lookup)
    }

    pub fn from_lookup<F>(env: Environment, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = read_var(&lookup, QUERY_HOST_VAR);
        let username = read_var(&lookup, QUERY_USERNAME_VAR);
        let password = read_var(&lookup, QUERY_PASSWORD_VAR);
        let table_prefix = read_var(&lookup, env.table_prefix_var())
            .or_else(|| read_var(&lookup, TABLE_PREFIX_VAR));

        let (Some(host), Some(username), Some(password), Some(table_prefix)) =
            (host.clone(), username.clone(), password.clone(), table_prefix.clone())
        else {
            let mut missing = Vec::new();
            if host.is_none() {
                missing.push(QUERY_HOST_VAR.to_string());
            }
            if username.is_none() {
                missing.push(QUERY_USERNAME_VAR.to_string());
            }
            if password.is_none() {
                missing.push(QUERY_PASSWORD_VAR.to_string());
            }
            if table_prefix.is_none() {
                missing.push(format!("{} (or {TABLE_PREFIX_VAR})", env.table_prefix_var()));
            }
            return Err(ConfigError::Missing(missing));
        };

        validate_table_prefix(&table_prefix)?;

        Ok(Self {
            url: normalize_host(&host),
            username,
            password,
            table_prefix,
            timeout_secs: SQL_TIMEOUT_SECS,
        })
    }
}

impl std::fmt::Debug for QueryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("table_prefix", &self.table_prefix)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Prefix `https://` when the host has no scheme, and drop trailing slashes.
fn normalize_host(host: &str) -> String {
    let trimmed = host.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// The prefix is interpolated into SQL, so only identifier characters are allowed.
fn validate_table_prefix(prefix: &str) -> ConfigResult<()> {
    if prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name: TABLE_PREFIX_VAR.into(),
            reason: format!("'{prefix}' may only contain letters, digits, and underscores"),
        })
    }
}
