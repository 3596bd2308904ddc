//! AWS client modules
//!
//! This module provides:
//! - context: shared SDK configuration for creating service clients
//! - connect: Amazon Connect client for instances, queues and contact flows
//! - operations: the mockable trait the workflow is written against
//! - error: classification of provider and local failures into error kinds

pub mod connect;
pub mod context;
pub mod error;
pub mod operations;

pub use connect::ConnectClient;
pub use context::{AwsContext, FromAwsContext};
pub use error::{classify_anyhow_error, classify_aws_error, ActionError, ErrorKind};
pub use operations::ConnectOperations;

#[cfg(test)]
pub use operations::MockConnectOperations;
