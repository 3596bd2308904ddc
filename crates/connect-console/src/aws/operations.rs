//! Amazon Connect operations trait for testing

use super::ConnectClient;
use anyhow::Result;
use connect_console_common::{FlowRecord, InstanceInfo, QueueRecord, QuickConnectRecord};

/// Trait for the Amazon Connect operations the console uses.
///
/// The workflow is written against this trait so it can be unit tested
/// without hitting real AWS.
///
/// Note: Some parameters use owned values instead of slices of `&str` to work
/// around mockall lifetime limitations.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait ConnectOperations: Send + Sync {
    /// Describe an instance, returning its id and ARN
    async fn describe_instance(&self, instance_id: &str) -> Result<InstanceInfo>;

    /// List all queues of the given types
    async fn list_queues(
        &self,
        instance_id: &str,
        queue_types: Vec<String>,
    ) -> Result<Vec<QueueRecord>>;

    /// List all contact flows (unfiltered)
    async fn list_contact_flows(&self, instance_id: &str) -> Result<Vec<FlowRecord>>;

    /// Delete a queue
    async fn delete_queue(&self, instance_id: &str, queue_id: &str) -> Result<()>;

    /// Delete a contact flow
    async fn delete_contact_flow(&self, instance_id: &str, contact_flow_id: &str) -> Result<()>;

    /// List the quick connects associated with a queue
    async fn list_queue_quick_connects(
        &self,
        instance_id: &str,
        queue_id: &str,
    ) -> Result<Vec<QuickConnectRecord>>;
}

impl ConnectOperations for ConnectClient {
    async fn describe_instance(&self, instance_id: &str) -> Result<InstanceInfo> {
        ConnectClient::describe_instance(self, instance_id).await
    }

    async fn list_queues(
        &self,
        instance_id: &str,
        queue_types: Vec<String>,
    ) -> Result<Vec<QueueRecord>> {
        ConnectClient::list_queues(self, instance_id, &queue_types).await
    }

    async fn list_contact_flows(&self, instance_id: &str) -> Result<Vec<FlowRecord>> {
        ConnectClient::list_contact_flows(self, instance_id).await
    }

    async fn delete_queue(&self, instance_id: &str, queue_id: &str) -> Result<()> {
        ConnectClient::delete_queue(self, instance_id, queue_id).await
    }

    async fn delete_contact_flow(&self, instance_id: &str, contact_flow_id: &str) -> Result<()> {
        ConnectClient::delete_contact_flow(self, instance_id, contact_flow_id).await
    }

    async fn list_queue_quick_connects(
        &self,
        instance_id: &str,
        queue_id: &str,
    ) -> Result<Vec<QuickConnectRecord>> {
        ConnectClient::list_queue_quick_connects(self, instance_id, queue_id).await
    }
}
