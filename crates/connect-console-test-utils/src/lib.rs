//! Shared test utilities for connect-console
//!
//! ## Modules
//!
//! - [`fixtures`]: Record builders for queues, flows and quick connects
//! - [`workspace`]: Temporary data directories for snapshot store tests

pub mod fixtures;
pub mod workspace;

// Re-export commonly used items
pub use fixtures::{flow, instance, queue, queues, quick_connect, TEST_INSTANCE_ID};
pub use workspace::TestWorkspace;
