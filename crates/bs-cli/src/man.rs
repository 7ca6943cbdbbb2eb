//! Extended help pages printed by `--man`.

pub const SEARCH_MAN: &str = r#"BS-LOGS(1)

NAME
    bs-logs - fetch recent Better Stack logs via the search API

SYNOPSIS
    bs-logs [--env prod|preview] [--n N] [--hours H] [--q QUERY]
            [--format compact|table|json] [--verbose] [--log-json] [--man]

DESCRIPTION
    Issues one GET request against the Better Stack log search endpoint for
    the last H hours and prints the returned entries. With no --q the query
    matches every entry ("*"); otherwise the query string is sent verbatim
    (for example "level:error" or "status:500").

OPTIONS
    --env prod|preview
        Selects which source id scopes the search (default: prod). When the
        matching source id variable is unset, every source the token can
        read is searched.
    --n N
        Number of entries to fetch, clamped to 1..500 (default: 100).
    --hours H
        Lookback window in hours, clamped to 1..168 (default: 24).
    --q QUERY
        Better Stack query string, sent as-is.
    --format compact|table|json
        compact (default): a "From/To/Count" header, then "<ts> [<level>] <msg>".
        table: fixed-width time/level/status/method/path/message columns.
        json: an array of objects with those six fields.
    --verbose
        Debug diagnostics on stderr (RUST_LOG overrides).
    --log-json
        Emit diagnostics as JSON lines.
    --man
        Print this page and exit.

ENVIRONMENT
    BETTERSTACK_TELEMETRY_API_TOKEN   read/search API token (required)
    BETTERSTACK_SOURCE_ID_PRODUCTION  source id used with --env prod
    BETTERSTACK_SOURCE_ID_PREVIEW     source id used with --env preview
    BETTERSTACK_API_URL               override the search endpoint URL

EXIT STATUS
    0  success
    1  missing configuration (no request is made)
    2  request, decode, or output failure
"#;

pub const VERCEL_MAN: &str = r#"BS-VERCEL-LOGS(1)

NAME
    bs-vercel-logs - query Vercel request logs stored in Better Stack via SQL

SYNOPSIS
    bs-vercel-logs [--env prod|preview] [--n N] [--hours H]
                   [--since TIME] [--before TIME] [--order asc|desc]
                   [--sql STATEMENT] [--level LEVEL] [--source NAME,...]
                   [--status-class Nxx,...] [--min-status CODE]
                   [--method METHOD] [--path PATH] [--path-contains TEXT]
                   [--contains TEXT] [--deployment ID] [--environment NAME]
                   [--format table|json|compact] [--verbose] [--log-json] [--man]

DESCRIPTION
    POSTs one SQL statement to the Better Stack query endpoint and reads the
    newline-delimited JSON rows it returns. Only the time window, sort order,
    and row limit are evaluated server-side:

        SELECT dt, raw FROM remote(<prefix>_logs)
        WHERE dt >= <from> AND dt < <to>
        ORDER BY dt DESC LIMIT <n> FORMAT JSONEachRow

    Every other filter runs locally against the decoded "raw" payload, reading
    vercel.proxy.* first and vercel.* second. While any local filter is set,
    5x the requested rows are fetched and the result is cut back to --n
    afterwards. Highly selective filters can still return fewer than --n rows;
    widen the window or raise --n if that happens.

TIME WINDOW
    --since and --before accept RFC 3339, "YYYY-MM-DD HH:MM:SS" (UTC), or
    "YYYY-MM-DD". With both set the window is [since, before); with only
    --since it ends now; with only --before it spans --hours before it; with
    neither it is the last --hours (default 1, clamped to 1..168).

LIMIT
    --n is clamped to 1..500. Without --n the limit is 100, except when both
    --since and --before are given: then every row in the window is returned.

FILTERS
    --level LEVEL           minimum level: debug < info < notice < warning
                            < error < critical < fatal; rows with an
                            unrecognized level are dropped
    --source NAME,...       vercel source (lambda, edge, static, build, ...)
    --status-class Nxx,...  e.g. 5xx or 4xx,5xx
    --min-status CODE       status >= CODE
    --method METHOD         HTTP method, case-insensitive
    --path PATH             exact request path
    --path-contains TEXT    request path substring, case-insensitive
    --contains TEXT         message substring, case-insensitive
    --deployment ID         vercel deployment id
    --environment NAME      vercel environment (production, preview, ...)

    Rows missing a field that an active filter needs are dropped.

OTHER OPTIONS
    --env prod|preview      picks the table prefix variable (default: prod)
    --order asc|desc        sort by dt (default: desc)
    --sql STATEMENT         send this statement verbatim; window, order, and
                            limit flags no longer shape the query. Include
                            FORMAT JSONEachRow.
    --format                table (default), json, or compact

ENVIRONMENT
    BETTERSTACK_QUERY_HOST                query endpoint host (https assumed)
    BETTERSTACK_QUERY_USERNAME            basic-auth user
    BETTERSTACK_QUERY_PASSWORD            basic-auth password
    BETTERSTACK_TABLE_PREFIX_PRODUCTION   table prefix for --env prod
    BETTERSTACK_TABLE_PREFIX_PREVIEW      table prefix for --env preview
    BETTERSTACK_TABLE_PREFIX              fallback table prefix

EXIT STATUS
    0  success
    1  missing configuration (no request is made)
    2  request, decode, or output failure
"#;
