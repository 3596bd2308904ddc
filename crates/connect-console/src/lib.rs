//! connect-console - terminal administration console for Amazon Connect
//!
//! Fetches an instance's queues and contact flows into local CSV snapshots,
//! lets the operator mark rows, and replays the marked subset into batch
//! delete or quick-connect analysis calls.

pub mod aws;
pub mod config;
pub mod store;
pub mod tui;
pub mod workflow;
