//! Per-session console state

use crate::aws::{ActionError, ErrorKind};
use crate::store::SnapshotStore;
use crate::workflow::batch::QueueAnalysis;
use connect_console_common::{FlowRecord, QueueRecord, Resource, ResourceKind, Selection};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Strongly-typed Amazon Connect instance id
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::Deref)]
pub struct InstanceId(String);

impl InstanceId {
    /// Trimmed, non-empty instance id
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        (!s.is_empty()).then(|| InstanceId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle of one resource kind within a session
///
/// `Empty -> Loaded -> Selected -> Applied`; Clear returns to `Empty` and a
/// re-fetch returns to `Loaded` from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Empty,
    /// Snapshot fetched (or restored from disk)
    Loaded,
    /// Selected subset persisted
    Selected,
    /// Batch executed
    Applied,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Empty => "empty",
            Phase::Loaded => "loaded",
            Phase::Selected => "selected",
            Phase::Applied => "applied",
        }
    }
}

/// Snapshot and selection for one resource kind
#[derive(Debug, Clone)]
pub struct KindState<R> {
    pub phase: Phase,
    pub snapshot: Vec<R>,
    pub selection: Selection,
}

impl<R> Default for KindState<R> {
    fn default() -> Self {
        Self {
            phase: Phase::Empty,
            snapshot: Vec::new(),
            selection: Selection::new(),
        }
    }
}

impl<R: Resource + Clone> KindState<R> {
    /// Replace the snapshot after a fetch. Selected ids that no longer exist
    /// are dropped; returns how many.
    pub fn replace_snapshot(&mut self, rows: Vec<R>) -> usize {
        let dropped = self.selection.retain_present(&rows);
        self.snapshot = rows;
        self.phase = Phase::Loaded;
        dropped
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Mark vector parallel to the snapshot
    pub fn marks(&self) -> Vec<bool> {
        self.selection.marks(&self.snapshot)
    }

    /// Toggle the mark on the row at `index`. Returns the new state, or
    /// `None` when the index is out of range.
    pub fn toggle_row(&mut self, index: usize) -> Option<bool> {
        let id = self.snapshot.get(index)?.id().to_string();
        Some(self.selection.toggle(&id))
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.snapshot);
    }

    pub fn is_selected(&self, row: &R) -> bool {
        self.selection.contains(row.id())
    }
}

/// Console state for one operator session
#[derive(Debug, Default)]
pub struct Session {
    instance_id: Option<InstanceId>,
    pub queues: KindState<QueueRecord>,
    pub flows: KindState<FlowRecord>,
    /// Results of the last queue analysis
    pub analysis: Vec<QueueAnalysis>,
}

impl Session {
    pub fn new(instance_id: Option<InstanceId>) -> Self {
        Self {
            instance_id,
            ..Default::default()
        }
    }

    /// Rebuild a session from the data directory: the persisted instance id
    /// (unless one is given) and any snapshot files left from a previous run.
    /// Rebuild a session from the data directory.
    ///
    /// Unreadable files are logged and leave that part of the session empty,
    /// so Clear and a re-fetch stay reachable.
    pub fn restore(store: &SnapshotStore, instance_id: Option<InstanceId>) -> Self {
        let instance_id = instance_id.or_else(|| match store.load_instance_config() {
            Ok(config) => config.and_then(|config| InstanceId::parse(&config.id)),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable instance configuration");
                None
            }
        });

        let mut session = Self::new(instance_id);
        restore_kind(store, &mut session.queues);
        restore_kind(store, &mut session.flows);

        info!(
            instance_id = ?session.instance_id.as_ref().map(InstanceId::as_str),
            queues = session.queues.snapshot.len(),
            flows = session.flows.snapshot.len(),
            "Session restored"
        );
        session
    }

    pub fn instance_id(&self) -> Option<&InstanceId> {
        self.instance_id.as_ref()
    }

    pub fn set_instance_id(&mut self, instance_id: InstanceId) {
        self.instance_id = Some(instance_id);
    }

    /// The configured instance id, or an error for actions that need one
    pub fn require_instance_id(&self) -> Result<InstanceId, ActionError> {
        self.instance_id.clone().ok_or_else(|| {
            ActionError::new(
                ErrorKind::NotFound,
                "No Connect instance configured; load a configuration first",
            )
        })
    }

    pub fn phase(&self, kind: ResourceKind) -> Phase {
        match kind {
            ResourceKind::Queue => self.queues.phase,
            ResourceKind::ContactFlow => self.flows.phase,
        }
    }

    pub fn row_count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Queue => self.queues.snapshot.len(),
            ResourceKind::ContactFlow => self.flows.snapshot.len(),
        }
    }

    pub fn selected_count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Queue => self.queues.selection.len(),
            ResourceKind::ContactFlow => self.flows.selection.len(),
        }
    }

    pub fn toggle_row(&mut self, kind: ResourceKind, index: usize) -> Option<bool> {
        match kind {
            ResourceKind::Queue => self.queues.toggle_row(index),
            ResourceKind::ContactFlow => self.flows.toggle_row(index),
        }
    }

    pub fn select_all(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Queue => self.queues.select_all(),
            ResourceKind::ContactFlow => self.flows.select_all(),
        }
    }

    pub fn clear_selection(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Queue => self.queues.selection.clear(),
            ResourceKind::ContactFlow => self.flows.selection.clear(),
        }
    }

    /// Drop all snapshots, selections and analysis results
    pub fn reset_snapshots(&mut self) {
        self.queues.reset();
        self.flows.reset();
        self.analysis.clear();
    }
}

fn restore_kind<R>(store: &SnapshotStore, state: &mut KindState<R>)
where
    R: Resource + Clone + DeserializeOwned,
{
    if !store.has_snapshot(R::KIND) {
        return;
    }
    match store.read_snapshot::<R>(R::KIND) {
        Ok(rows) => {
            debug!(kind = %R::KIND, rows = rows.len(), "Restored snapshot");
            state.replace_snapshot(rows);
        }
        Err(e) => {
            warn!(
                kind = %R::KIND,
                path = %store.snapshot_path(R::KIND).display(),
                error = %e,
                "Ignoring unreadable snapshot file"
            );
        }
    }
}
