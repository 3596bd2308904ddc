//! Console actions
//!
//! Each action is one operator request: it awaits its provider calls and
//! file writes, updates the session, and reduces any failure to an
//! [`ActionError`] the shell can render.

use super::batch::{apply_batch, BatchOperation, BatchSummary};
use super::session::{InstanceId, KindState, Phase, Session};
use crate::aws::{ActionError, ConnectOperations, ErrorKind};
use crate::store::{ClearReport, InstanceConfig, SnapshotStore};
use connect_console_common::defaults::DEFAULT_QUEUE_TYPES;
use connect_console_common::{derive_selected_subset, filter_flows, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of a load action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows kept after filtering
    pub rows: usize,
    /// Rows returned by the provider before filtering
    pub fetched: usize,
    /// Whether the snapshot file was rewritten
    pub written: bool,
    /// Selected ids dropped because they are no longer in the snapshot
    pub dropped_selection: usize,
}

/// Describe `instance_id`, persist `{Id, Arn}` and make it the session's
/// instance.
pub async fn load_configuration<C: ConnectOperations>(
    client: &C,
    store: &SnapshotStore,
    session: &mut Session,
    instance_id: &str,
) -> Result<InstanceConfig, ActionError> {
    let instance_id = InstanceId::parse(instance_id)
        .ok_or_else(|| ActionError::new(ErrorKind::NotFound, "Instance id is empty"))?;

    let info = client.describe_instance(&instance_id).await?;
    store.save_instance_config(&info)?;

    info!(instance_id = %info.id, arn = %info.arn, "Configuration loaded");
    if let Some(id) = InstanceId::parse(&info.id) {
        session.set_instance_id(id);
    }
    Ok(info)
}

/// Fetch the instance's standard queues into the queue snapshot
pub async fn load_queues<C: ConnectOperations>(
    client: &C,
    store: &SnapshotStore,
    session: &mut Session,
) -> Result<LoadSummary, ActionError> {
    let instance_id = session.require_instance_id()?;
    let queue_types = DEFAULT_QUEUE_TYPES.iter().map(|t| t.to_string()).collect();

    let queues = client.list_queues(&instance_id, queue_types).await?;
    let fetched = queues.len();

    replace_snapshot(store, &mut session.queues, queues, fetched)
}

/// Fetch the instance's contact flows, keep the active allow-listed ones,
/// and store them as the flow snapshot
pub async fn load_flows<C: ConnectOperations>(
    client: &C,
    store: &SnapshotStore,
    session: &mut Session,
) -> Result<LoadSummary, ActionError> {
    let instance_id = session.require_instance_id()?;

    let flows = client.list_contact_flows(&instance_id).await?;
    let fetched = flows.len();
    let flows = filter_flows(flows);

    replace_snapshot(store, &mut session.flows, flows, fetched)
}

/// Delete the selected queues
pub async fn delete_queues<C: ConnectOperations>(
    client: &C,
    store: &SnapshotStore,
    session: &mut Session,
) -> Result<BatchSummary, ActionError> {
    let instance_id = session.require_instance_id()?;
    run_selected(client, store, &mut session.queues, &instance_id, BatchOperation::DeleteQueue)
        .await
}

/// List the quick connects of the selected queues
pub async fn analyse_queues<C: ConnectOperations>(
    client: &C,
    store: &SnapshotStore,
    session: &mut Session,
) -> Result<BatchSummary, ActionError> {
    let instance_id = session.require_instance_id()?;
    let summary = run_selected(
        client,
        store,
        &mut session.queues,
        &instance_id,
        BatchOperation::ListQueueQuickConnects,
    )
    .await?;

    session.analysis = summary.analysis.clone();
    Ok(summary)
}

/// Delete the selected contact flows
pub async fn delete_flows<C: ConnectOperations>(
    client: &C,
    store: &SnapshotStore,
    session: &mut Session,
) -> Result<BatchSummary, ActionError> {
    let instance_id = session.require_instance_id()?;
    run_selected(
        client,
        store,
        &mut session.flows,
        &instance_id,
        BatchOperation::DeleteContactFlow,
    )
    .await
}

/// Remove all snapshot and subset files and reset the session's kinds
pub fn clear(store: &SnapshotStore, session: &mut Session) -> Result<ClearReport, ActionError> {
    let report = store.clear()?;
    session.reset_snapshots();

    info!(removed = report.removed, "Local data cleared");
    Ok(report)
}

fn replace_snapshot<R>(
    store: &SnapshotStore,
    state: &mut KindState<R>,
    rows: Vec<R>,
    fetched: usize,
) -> Result<LoadSummary, ActionError>
where
    R: Resource + Clone + Serialize,
{
    let kind = R::KIND;

    // An empty result leaves the previous snapshot file in place.
    let written = !rows.is_empty();
    if written {
        store.write_snapshot(kind, &rows)?;
    } else {
        info!(kind = %kind, "Nothing to store, keeping previous snapshot file");
    }

    let summary = LoadSummary {
        rows: rows.len(),
        fetched,
        written,
        dropped_selection: state.replace_snapshot(rows),
    };

    info!(
        kind = %kind,
        rows = summary.rows,
        fetched = summary.fetched,
        dropped_selection = summary.dropped_selection,
        "Snapshot loaded"
    );
    Ok(summary)
}

/// Derive the selected subset from the snapshot file, persist it, read it
/// back and replay it into `operation`.
async fn run_selected<C, R>(
    client: &C,
    store: &SnapshotStore,
    state: &mut KindState<R>,
    instance_id: &InstanceId,
    operation: BatchOperation,
) -> Result<BatchSummary, ActionError>
where
    C: ConnectOperations,
    R: Resource + Clone + Serialize + DeserializeOwned,
{
    let kind = R::KIND;

    if !store.has_snapshot(kind) {
        warn!(kind = %kind, "No snapshot file, nothing to do");
        return Ok(BatchSummary::empty(operation));
    }

    let snapshot: Vec<R> = store.read_snapshot(kind)?;

    let missing = state.selection.missing_from(&snapshot);
    if !missing.is_empty() {
        warn!(kind = %kind, ids = ?missing, "Selected ids not in snapshot file, skipping them");
    }

    let marks = state.selection.marks(&snapshot);
    let subset = derive_selected_subset(&snapshot, &marks)?;
    store.write_subset(kind, &subset)?;
    state.phase = Phase::Selected;

    let subset: Vec<R> = store.read_subset(kind)?;
    info!(
        kind = %kind,
        operation = operation.as_str(),
        count = subset.len(),
        "Applying batch"
    );

    let summary = apply_batch(client, instance_id, &subset, operation).await?;
    state.phase = Phase::Applied;
    if operation.is_mutating() {
        state.selection.clear();
    }

    Ok(summary)
}
