//! End-to-end tests for the Better Stack log CLIs.
//!
//! The tests live under `tests/`; each one parses real argv, resolves
//! configuration from an in-memory environment, and talks HTTP to a
//! `wiremock` server standing in for Better Stack.
