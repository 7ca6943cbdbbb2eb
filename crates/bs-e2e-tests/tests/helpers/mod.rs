//! Shared harness: a mock Better Stack server plus an in-memory environment.

#![allow(dead_code)]

use std::collections::HashMap;

use clap::Parser;
use serde_json::{Value, json};
use wiremock::MockServer;

use bs_cli::CliResult;
use bs_cli::search_cmd::{self, SearchArgs};
use bs_cli::vercel_cmd::{self, VercelArgs};

pub const SEARCH_PATH: &str = "/api/v2/logs/search";
pub const TOKEN: &str = "e2e-token";
pub const USERNAME: &str = "e2e-reader";
pub const PASSWORD: &str = "e2e-secret";
pub const TABLE_PREFIX: &str = "t42_vercel";

/// Mock server wired to an environment map the CLIs read from.
pub struct TestHarness {
    pub server: MockServer,
    pub vars: HashMap<String, String>,
}

impl TestHarness {
    /// A running server and an empty environment.
    pub async fn empty() -> Self {
        Self {
            server: MockServer::start().await,
            vars: HashMap::new(),
        }
    }

    /// Environment for `bs-logs` pointed at the mock search endpoint.
    pub async fn for_search() -> Self {
        let mut h = Self::empty().await;
        let url = format!("{}{SEARCH_PATH}", h.server.uri());
        h.set("BETTERSTACK_TELEMETRY_API_TOKEN", TOKEN);
        h.set("BETTERSTACK_API_URL", &url);
        h.set("BETTERSTACK_SOURCE_ID_PRODUCTION", "1001");
        h.set("BETTERSTACK_SOURCE_ID_PREVIEW", "2002");
        h
    }

    /// Environment for `bs-vercel-logs` pointed at the mock query endpoint.
    pub async fn for_sql() -> Self {
        let mut h = Self::empty().await;
        let host = h.server.uri();
        h.set("BETTERSTACK_QUERY_HOST", &host);
        h.set("BETTERSTACK_QUERY_USERNAME", USERNAME);
        h.set("BETTERSTACK_QUERY_PASSWORD", PASSWORD);
        h.set("BETTERSTACK_TABLE_PREFIX_PRODUCTION", TABLE_PREFIX);
        h
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    pub fn unset(&mut self, name: &str) {
        self.vars.remove(name);
    }

    fn lookup(&self) -> impl Fn(&str) -> Option<String> + '_ {
        move |name: &str| self.vars.get(name).cloned()
    }

    /// Run `bs-logs` with the given flags; returns the result and stdout.
    pub async fn bs_logs(&self, argv: &[&str]) -> (CliResult<()>, String) {
        let args = SearchArgs::try_parse_from(std::iter::once("bs-logs").chain(argv.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let result = search_cmd::run(&args, self.lookup(), &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    /// Run `bs-vercel-logs` with the given flags; returns the result and stdout.
    pub async fn bs_vercel_logs(&self, argv: &[&str]) -> (CliResult<()>, String) {
        let args =
            VercelArgs::try_parse_from(std::iter::once("bs-vercel-logs").chain(argv.iter().copied()))
                .unwrap();
        let mut out = Vec::new();
        let result = vercel_cmd::run(&args, self.lookup(), &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    /// Body text of every request the server saw, in order.
    pub async fn request_bodies(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| String::from_utf8_lossy(&r.body).into_owned())
            .collect()
    }
}

/// One row as the SQL endpoint returns it, with `raw` string-encoded.
pub fn sql_row(dt: &str, level: &str, status: Value, method: &str, path: &str, message: &str) -> String {
    let raw = json!({
        "level": level,
        "message": message,
        "vercel": {
            "deployment_id": "dpl_e2e",
            "environment": "production",
            "source": "lambda",
            "proxy": {"status_code": status, "method": method, "path": path}
        }
    });
    json!({"dt": dt, "raw": raw.to_string()}).to_string()
}

/// Join rows into a newline-delimited body.
pub fn ndjson(rows: &[String]) -> String {
    let mut body = rows.join("\n");
    body.push('\n');
    body
}
