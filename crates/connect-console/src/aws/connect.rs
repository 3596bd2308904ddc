//! Amazon Connect client
//!
//! Thin wrapper over `aws_sdk_connect::Client` that follows pagination and
//! maps the SDK summaries into the console's record types.

use super::context::{AwsContext, FromAwsContext};
use anyhow::{Context, Result};
use aws_sdk_connect::types::{ContactFlowSummary, QueueSummary, QueueType, QuickConnectSummary};
use aws_sdk_connect::Client;
use connect_console_common::{FlowRecord, InstanceInfo, QueueRecord, QuickConnectRecord};
use tracing::{debug, info};

/// Amazon Connect client for one AWS account/region
pub struct ConnectClient {
    pub(crate) client: Client,
}

impl FromAwsContext for ConnectClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.connect_client(),
        }
    }
}

impl ConnectClient {
    /// Describe an instance and keep only its id and ARN
    pub async fn describe_instance(&self, instance_id: &str) -> Result<InstanceInfo> {
        let response = self
            .client
            .describe_instance()
            .instance_id(instance_id)
            .send()
            .await
            .with_context(|| format!("Failed to describe instance {instance_id}"))?;

        let instance = response
            .instance()
            .context("DescribeInstance returned no instance")?;

        let info = InstanceInfo {
            id: instance.id().context("Instance has no id")?.to_string(),
            arn: instance.arn().context("Instance has no ARN")?.to_string(),
        };

        debug!(instance_id = %info.id, arn = %info.arn, "Described instance");
        Ok(info)
    }

    /// List every queue of the given types, following `next_token`
    pub async fn list_queues(
        &self,
        instance_id: &str,
        queue_types: &[String],
    ) -> Result<Vec<QueueRecord>> {
        let mut queues = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_queues()
                .instance_id(instance_id)
                .set_next_token(next_token.take());
            for queue_type in queue_types {
                request = request.queue_types(QueueType::from(queue_type.as_str()));
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("Failed to list queues for instance {instance_id}"))?;

            queues.extend(response.queue_summary_list().iter().filter_map(queue_record));

            match response.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        info!(instance_id = %instance_id, count = queues.len(), "Listed queues");
        Ok(queues)
    }

    /// List every contact flow, following `next_token`
    pub async fn list_contact_flows(&self, instance_id: &str) -> Result<Vec<FlowRecord>> {
        let mut flows = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_contact_flows()
                .instance_id(instance_id)
                .set_next_token(next_token.take())
                .send()
                .await
                .with_context(|| {
                    format!("Failed to list contact flows for instance {instance_id}")
                })?;

            flows.extend(
                response
                    .contact_flow_summary_list()
                    .iter()
                    .filter_map(flow_record),
            );

            match response.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        info!(instance_id = %instance_id, count = flows.len(), "Listed contact flows");
        Ok(flows)
    }

    /// Delete a queue
    pub async fn delete_queue(&self, instance_id: &str, queue_id: &str) -> Result<()> {
        self.client
            .delete_queue()
            .instance_id(instance_id)
            .queue_id(queue_id)
            .send()
            .await
            .with_context(|| format!("Failed to delete queue {queue_id}"))?;

        info!(queue_id = %queue_id, "Deleted queue");
        Ok(())
    }

    /// Delete a contact flow
    pub async fn delete_contact_flow(&self, instance_id: &str, contact_flow_id: &str) -> Result<()> {
        self.client
            .delete_contact_flow()
            .instance_id(instance_id)
            .contact_flow_id(contact_flow_id)
            .send()
            .await
            .with_context(|| format!("Failed to delete contact flow {contact_flow_id}"))?;

        info!(contact_flow_id = %contact_flow_id, "Deleted contact flow");
        Ok(())
    }

    /// List the quick connects associated with a queue, following `next_token`
    pub async fn list_queue_quick_connects(
        &self,
        instance_id: &str,
        queue_id: &str,
    ) -> Result<Vec<QuickConnectRecord>> {
        let mut quick_connects = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_queue_quick_connects()
                .instance_id(instance_id)
                .queue_id(queue_id)
                .set_next_token(next_token.take())
                .send()
                .await
                .with_context(|| format!("Failed to list quick connects for queue {queue_id}"))?;

            quick_connects.extend(
                response
                    .quick_connect_summary_list()
                    .iter()
                    .filter_map(quick_connect_record),
            );

            match response.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(queue_id = %queue_id, count = quick_connects.len(), "Listed quick connects");
        Ok(quick_connects)
    }
}

// Summaries without an id or ARN cannot be acted on and are skipped.

fn queue_record(summary: &QueueSummary) -> Option<QueueRecord> {
    Some(QueueRecord {
        id: summary.id()?.to_string(),
        arn: summary.arn()?.to_string(),
        name: summary.name().unwrap_or_default().to_string(),
        queue_type: summary.queue_type().map(|t| t.as_str().to_string()),
    })
}

fn flow_record(summary: &ContactFlowSummary) -> Option<FlowRecord> {
    Some(FlowRecord {
        id: summary.id()?.to_string(),
        arn: summary.arn()?.to_string(),
        name: summary.name().unwrap_or_default().to_string(),
        contact_flow_type: summary
            .contact_flow_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        contact_flow_state: summary
            .contact_flow_state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        contact_flow_status: summary.contact_flow_status().map(|s| s.as_str().to_string()),
    })
}

fn quick_connect_record(summary: &QuickConnectSummary) -> Option<QuickConnectRecord> {
    Some(QuickConnectRecord {
        id: summary.id()?.to_string(),
        arn: summary.arn()?.to_string(),
        name: summary.name().unwrap_or_default().to_string(),
        quick_connect_type: summary.quick_connect_type().map(|t| t.as_str().to_string()),
    })
}
