//! Client for the basic-auth SQL query endpoint.
//!
//! The statement is POSTed as the raw request body; the endpoint answers
//! with one JSON object per line (`FORMAT JSONEachRow`).

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use bs_log_tools::render::truncate;
use bs_log_tools::{LogBatch, LogError, LogQuery, LogResult, LogRow, LogSource, SqlQuery};

use crate::config::QueryConfig;
use crate::search::{ERROR_BODY_LIMIT, transport_error};

/// Client for the SQL query endpoint.
pub struct SqlClient {
    client: reqwest::Client,
    config: QueryConfig,
}

impl SqlClient {
    pub fn new(config: QueryConfig) -> LogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LogError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Run one SQL statement and decode the newline-delimited rows.
    pub async fn query(&self, sql: &SqlQuery) -> LogResult<LogBatch> {
        tracing::debug!(url = %self.config.url, sql = %sql.statement, "running SQL query");

        let response = self
            .client
            .post(&self.config.url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(sql.statement.clone())
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_secs))?;

        if !status.is_success() {
            tracing::warn!(status = %status, "query endpoint returned an error");
            return Err(LogError::Status {
                status: status.as_u16(),
                body: truncate(body.trim(), ERROR_BODY_LIMIT),
            });
        }

        let rows = parse_ndjson(&body)?;
        tracing::info!(rows = rows.len(), "SQL query complete");
        Ok(LogBatch::new(rows.into_iter().map(LogRow::from_value).collect()))
    }
}

/// Decode newline-delimited JSON, skipping blank lines.
///
/// A single malformed line fails the whole body.
pub fn parse_ndjson(body: &str) -> LogResult<Vec<Value>> {
    body.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line.trim())
                .map_err(|e| LogError::Decode(format!("line {}: {e}", i + 1)))
        })
        .collect()
}

#[async_trait]
impl LogSource for SqlClient {
    fn name(&self) -> &str {
        "sql"
    }

    async fn fetch(&self, query: &LogQuery) -> LogResult<LogBatch> {
        match query {
            LogQuery::Sql(sql) => self.query(sql).await,
            LogQuery::Search(_) => Err(LogError::Unsupported(
                "the SQL endpoint does not accept search queries".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{basic_auth, body_string, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Build a SqlClient pointed at the mock server.
    fn client_for(server: &MockServer, timeout_secs: u64) -> SqlClient {
        SqlClient::new(QueryConfig {
            url: server.uri(),
            username: "reader".into(),
            password: "secret".into(),
            table_prefix: "t1_app".into(),
            timeout_secs,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn query_posts_sql_with_basic_auth() {
        let server = MockServer::start().await;
        let sql = SqlQuery::verbatim("SELECT dt, raw FROM remote(t1_app_logs) FORMAT JSONEachRow");
        let body = concat!(
            r#"{"dt":"2024-01-15 12:00:01","raw":"{\"level\":\"info\",\"message\":\"a\"}"}"#,
            "\n",
            "\n",
            r#"{"dt":"2024-01-15 12:00:02","raw":{"level":"error","message":"b"}}"#,
            "\n",
        );
        Mock::given(method("POST"))
            .and(basic_auth("reader", "secret"))
            .and(header("content-type", "text/plain; charset=utf-8"))
            .and(body_string(sql.statement.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, 5);
        let batch = client.query(&sql).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.rows[0].message().as_deref(), Some("a"));
        assert_eq!(batch.rows[1].message().as_deref(), Some("b"));
        assert!(batch.meta.is_none());
    }

    #[tokio::test]
    async fn query_empty_body_is_no_rows() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let client = client_for(&server, 5);
        let batch = client.query(&SqlQuery::verbatim("SELECT 1")).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn query_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_string("Code: 60. DB::Exception: Table t1_app_logs does not exist"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, 5);
        let err = client.query(&SqlQuery::verbatim("SELECT 1")).await.unwrap_err();
        match err {
            LogError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("does not exist"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn query_malformed_line_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"dt\":1}\n{broken\n"))
            .mount(&server)
            .await;

        let client = client_for(&server, 5);
        let err = client.query(&SqlQuery::verbatim("SELECT 1")).await.unwrap_err();
        match err {
            LogError::Decode(msg) => assert!(msg.starts_with("line 2"), "got {msg}"),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn query_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = client_for(&server, 1);
        let err = client.query(&SqlQuery::verbatim("SELECT 1")).await.unwrap_err();
        assert!(matches!(err, LogError::Transport(_)));
    }

    #[tokio::test]
    async fn query_rejects_search() {
        let server = MockServer::start().await;
        let client = client_for(&server, 5);
        let query = LogQuery::Search(bs_log_tools::SearchQuery::build(
            None,
            bs_log_tools::TimeWindow::lookback(chrono::Utc::now(), 1),
            1,
            None,
        ));
        assert!(matches!(
            client.fetch(&query).await.unwrap_err(),
            LogError::Unsupported(_)
        ));
    }

    #[test]
    fn ndjson_parsing() {
        let rows = parse_ndjson("{\"a\":1}\r\n  \n{\"b\":2}").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["b"], 2);
        assert!(parse_ndjson("").unwrap().is_empty());
    }
}
