//! Batch execution over a selected subset
//!
//! One provider call per selected row, keyed by the row's `Id`, in subset
//! order. There is no atomicity across the batch: the first failure stops
//! it, calls already made stay applied, and the remaining rows are not
//! attempted. The caller sees a single aggregate outcome.

use crate::aws::{ActionError, ConnectOperations};
use connect_console_common::{QuickConnectRecord, Resource};
use tracing::{info, warn};

/// Provider call replayed for every selected row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    DeleteQueue,
    DeleteContactFlow,
    ListQueueQuickConnects,
}

impl BatchOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            BatchOperation::DeleteQueue => "delete-queue",
            BatchOperation::DeleteContactFlow => "delete-contact-flow",
            BatchOperation::ListQueueQuickConnects => "list-queue-quick-connects",
        }
    }

    /// Whether the operation changes provider state
    pub fn is_mutating(self) -> bool {
        !matches!(self, BatchOperation::ListQueueQuickConnects)
    }
}

/// Quick connects found for one queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueAnalysis {
    pub queue_id: String,
    pub queue_name: String,
    pub quick_connects: Vec<QuickConnectRecord>,
}

/// Aggregate outcome of a successful batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub operation: BatchOperation,
    /// Provider calls made
    pub applied: usize,
    /// Per-queue results of [`BatchOperation::ListQueueQuickConnects`]
    pub analysis: Vec<QueueAnalysis>,
}

impl BatchSummary {
    pub fn empty(operation: BatchOperation) -> Self {
        Self {
            operation,
            applied: 0,
            analysis: Vec::new(),
        }
    }
}

/// Run `operation` for every row of `subset`.
///
/// An empty subset makes no provider calls.
pub async fn apply_batch<C, R>(
    client: &C,
    instance_id: &str,
    subset: &[R],
    operation: BatchOperation,
) -> Result<BatchSummary, ActionError>
where
    C: ConnectOperations,
    R: Resource,
{
    let mut summary = BatchSummary::empty(operation);

    for row in subset {
        let id = row.id();
        let result = match operation {
            BatchOperation::DeleteQueue => client.delete_queue(instance_id, id).await,
            BatchOperation::DeleteContactFlow => client.delete_contact_flow(instance_id, id).await,
            BatchOperation::ListQueueQuickConnects => client
                .list_queue_quick_connects(instance_id, id)
                .await
                .map(|quick_connects| {
                    summary.analysis.push(QueueAnalysis {
                        queue_id: id.to_string(),
                        queue_name: row.name().to_string(),
                        quick_connects,
                    });
                }),
        };

        if let Err(e) = result {
            warn!(
                operation = operation.as_str(),
                resource_id = %id,
                error = ?e,
                "Batch call failed, stopping"
            );
            return Err(ActionError::from_anyhow(&e));
        }
        summary.applied += 1;
    }

    info!(
        operation = operation.as_str(),
        applied = summary.applied,
        "Batch complete"
    );
    Ok(summary)
}
