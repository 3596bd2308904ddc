//! End-to-end workflow tests against an in-memory Amazon Connect fake
//!
//! Exercises the actions the way the console drives them: load, mark rows,
//! run a batch, re-fetch, clear. Files are written to a temporary data
//! directory and inspected directly.

use anyhow::{bail, Result};
use connect_console::aws::{ConnectOperations, ErrorKind};
use connect_console::store::SnapshotStore;
use connect_console::workflow::{self, InstanceId, Phase, Session};
use connect_console_common::defaults::{
    FLOWS_FILE, INSTANCE_CONFIG_FILE, QUEUES_FILE, SELECTED_FLOWS_FILE, SELECTED_QUEUES_FILE,
};
use connect_console_common::{
    FlowRecord, InstanceInfo, QueueRecord, QuickConnectRecord, ResourceKind,
};
use connect_console_test_utils::{
    flow, instance, queue, queues, quick_connect, TestWorkspace, TEST_INSTANCE_ID,
};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    DeleteQueue(String),
    DeleteContactFlow(String),
    ListQueueQuickConnects(String),
}

/// In-memory stand-in for one Connect instance
#[derive(Default)]
struct FakeConnect {
    queues: Mutex<Vec<QueueRecord>>,
    flows: Mutex<Vec<FlowRecord>>,
    quick_connects: HashMap<String, Vec<QuickConnectRecord>>,
    /// Resource id whose call fails with the given error code
    fail_on: Option<(String, &'static str)>,
    calls: Mutex<Vec<Call>>,
}

impl FakeConnect {
    fn with_queues(rows: Vec<QueueRecord>) -> Self {
        Self {
            queues: Mutex::new(rows),
            ..Default::default()
        }
    }

    fn with_flows(rows: Vec<FlowRecord>) -> Self {
        Self {
            flows: Mutex::new(rows),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_on {
            Some((failing, code)) if failing == id => bail!("{code}: injected failure for {id}"),
            _ => Ok(()),
        }
    }
}

impl ConnectOperations for FakeConnect {
    async fn describe_instance(&self, instance_id: &str) -> Result<InstanceInfo> {
        if instance_id != TEST_INSTANCE_ID {
            bail!("ResourceNotFoundException: instance {instance_id} not found");
        }
        Ok(instance())
    }

    async fn list_queues(
        &self,
        _instance_id: &str,
        queue_types: Vec<String>,
    ) -> Result<Vec<QueueRecord>> {
        let queues = self.queues.lock().unwrap();
        Ok(queues
            .iter()
            .filter(|q| {
                q.queue_type
                    .as_ref()
                    .is_some_and(|t| queue_types.contains(t))
            })
            .cloned()
            .collect())
    }

    async fn list_contact_flows(&self, _instance_id: &str) -> Result<Vec<FlowRecord>> {
        Ok(self.flows.lock().unwrap().clone())
    }

    async fn delete_queue(&self, _instance_id: &str, queue_id: &str) -> Result<()> {
        self.record(Call::DeleteQueue(queue_id.to_string()), queue_id)?;
        self.queues.lock().unwrap().retain(|q| q.id != queue_id);
        Ok(())
    }

    async fn delete_contact_flow(&self, _instance_id: &str, contact_flow_id: &str) -> Result<()> {
        self.record(
            Call::DeleteContactFlow(contact_flow_id.to_string()),
            contact_flow_id,
        )?;
        self.flows.lock().unwrap().retain(|f| f.id != contact_flow_id);
        Ok(())
    }

    async fn list_queue_quick_connects(
        &self,
        _instance_id: &str,
        queue_id: &str,
    ) -> Result<Vec<QuickConnectRecord>> {
        self.record(Call::ListQueueQuickConnects(queue_id.to_string()), queue_id)?;
        Ok(self
            .quick_connects
            .get(queue_id)
            .cloned()
            .unwrap_or_default())
    }
}

fn setup() -> (TestWorkspace, SnapshotStore, Session) {
    let ws = TestWorkspace::new().unwrap();
    let store = SnapshotStore::new(ws.path());
    let session = Session::new(InstanceId::parse(TEST_INSTANCE_ID));
    (ws, store, session)
}

#[tokio::test]
async fn configure_then_restore_session() {
    let ws = TestWorkspace::new().unwrap();
    let store = SnapshotStore::new(ws.path());
    let mut session = Session::default();
    let fake = FakeConnect::default();

    workflow::load_configuration(&fake, &store, &mut session, TEST_INSTANCE_ID)
        .await
        .unwrap();

    let json = ws.read(INSTANCE_CONFIG_FILE).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["Id"], TEST_INSTANCE_ID);
    assert_eq!(value["Arn"], instance().arn);

    let restored = Session::restore(&store, None);
    assert_eq!(restored.instance_id().unwrap().as_str(), TEST_INSTANCE_ID);
}

#[tokio::test]
async fn unknown_instance_is_not_found() {
    let (ws, store, mut session) = setup();
    let fake = FakeConnect::default();

    let err = workflow::load_configuration(&fake, &store, &mut session, "other")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(!ws.exists(INSTANCE_CONFIG_FILE));
}

#[tokio::test]
async fn load_keeps_only_standard_queues() {
    let (ws, store, mut session) = setup();
    let mut rows = queues(2);
    let mut agent_queue = queue("agent");
    agent_queue.queue_type = Some("AGENT".to_string());
    rows.push(agent_queue);
    let fake = FakeConnect::with_queues(rows);

    let summary = workflow::load_queues(&fake, &store, &mut session)
        .await
        .unwrap();

    assert_eq!(summary.rows, 2);
    assert!(ws.exists(QUEUES_FILE));
    let csv = ws.read(QUEUES_FILE).unwrap();
    assert!(csv.starts_with("Id,Arn,Name,QueueType"));
    assert!(!csv.contains("agent"));
}

#[tokio::test]
async fn flow_filter_reaches_the_snapshot_file() {
    let (ws, store, mut session) = setup();
    let fake = FakeConnect::with_flows(vec![
        flow("a", "ACTIVE", "contact_flow"),
        flow("b", "INACTIVE", "CONTACT_FLOW"),
        flow("c", "ACTIVE", "CAMPAIGN"),
    ]);

    workflow::load_flows(&fake, &store, &mut session)
        .await
        .unwrap();

    let stored: Vec<FlowRecord> = store.read_snapshot(ResourceKind::ContactFlow).unwrap();
    assert_eq!(stored, vec![flow("a", "ACTIVE", "contact_flow")]);
    assert!(ws.read(FLOWS_FILE).unwrap().contains("ContactFlowState"));
}

#[tokio::test]
async fn delete_selected_queues_in_snapshot_order() {
    let (ws, store, mut session) = setup();
    let fake = FakeConnect::with_queues(queues(4));
    workflow::load_queues(&fake, &store, &mut session)
        .await
        .unwrap();

    session.toggle_row(ResourceKind::Queue, 3);
    session.toggle_row(ResourceKind::Queue, 1);

    let summary = workflow::delete_queues(&fake, &store, &mut session)
        .await
        .unwrap();

    assert_eq!(summary.applied, 2);
    assert_eq!(
        fake.calls(),
        vec![
            Call::DeleteQueue("q-1".to_string()),
            Call::DeleteQueue("q-3".to_string()),
        ]
    );
    let subset: Vec<QueueRecord> = store.read_subset(ResourceKind::Queue).unwrap();
    assert_eq!(subset, vec![queue("q-1"), queue("q-3")]);
    assert!(ws.exists(SELECTED_QUEUES_FILE));
    assert_eq!(session.phase(ResourceKind::Queue), Phase::Applied);
}

#[tokio::test]
async fn empty_selection_makes_no_calls() {
    let (ws, store, mut session) = setup();
    let fake = FakeConnect::with_flows(vec![flow("f-1", "ACTIVE", "CONTACT_FLOW")]);
    workflow::load_flows(&fake, &store, &mut session)
        .await
        .unwrap();

    let summary = workflow::delete_flows(&fake, &store, &mut session)
        .await
        .unwrap();

    assert_eq!(summary.applied, 0);
    assert!(fake.calls().is_empty());
    assert!(ws.exists(SELECTED_FLOWS_FILE));
    assert!(ws.read(SELECTED_FLOWS_FILE).unwrap().starts_with("Id,Arn"));
    let subset: Vec<FlowRecord> = store.read_subset(ResourceKind::ContactFlow).unwrap();
    assert!(subset.is_empty());
}

#[tokio::test]
async fn failure_mid_batch_stops_remaining_rows() {
    let (_ws, store, mut session) = setup();
    let mut fake = FakeConnect::with_flows(vec![
        flow("f-1", "ACTIVE", "CONTACT_FLOW"),
        flow("f-2", "ACTIVE", "CONTACT_FLOW"),
        flow("f-3", "ACTIVE", "CONTACT_FLOW"),
    ]);
    fake.fail_on = Some(("f-2".to_string(), "AccessDeniedException"));
    workflow::load_flows(&fake, &store, &mut session)
        .await
        .unwrap();
    session.select_all(ResourceKind::ContactFlow);

    let err = workflow::delete_flows(&fake, &store, &mut session)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::AccessDenied);
    assert_eq!(
        fake.calls(),
        vec![
            Call::DeleteContactFlow("f-1".to_string()),
            Call::DeleteContactFlow("f-2".to_string()),
        ]
    );
    // f-1 stays deleted upstream
    assert_eq!(fake.flows.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn refetch_leaves_persisted_subset_untouched() {
    let (ws, store, mut session) = setup();
    let mut fake = FakeConnect::with_queues(queues(3));
    fake.quick_connects
        .insert("q-0".to_string(), vec![quick_connect("qc-1")]);

    workflow::load_queues(&fake, &store, &mut session)
        .await
        .unwrap();
    session.toggle_row(ResourceKind::Queue, 0);
    session.toggle_row(ResourceKind::Queue, 2);
    workflow::analyse_queues(&fake, &store, &mut session)
        .await
        .unwrap();
    let subset_before = ws.read(SELECTED_QUEUES_FILE).unwrap();

    // q-0 disappears upstream, a new queue shows up
    {
        let mut upstream = fake.queues.lock().unwrap();
        upstream.remove(0);
        upstream.push(queue("q-9"));
    }
    let summary = workflow::load_queues(&fake, &store, &mut session)
        .await
        .unwrap();

    assert_eq!(ws.read(SELECTED_QUEUES_FILE).unwrap(), subset_before);
    assert_eq!(summary.dropped_selection, 1);
    assert!(session.queues.selection.contains("q-2"));
    assert!(!session.queues.selection.contains("q-0"));
    assert_eq!(session.phase(ResourceKind::Queue), Phase::Loaded);
}

#[tokio::test]
async fn analyse_collects_quick_connects() {
    let (_ws, store, mut session) = setup();
    let mut fake = FakeConnect::with_queues(queues(2));
    fake.quick_connects.insert(
        "q-1".to_string(),
        vec![quick_connect("qc-1"), quick_connect("qc-2")],
    );
    workflow::load_queues(&fake, &store, &mut session)
        .await
        .unwrap();
    session.select_all(ResourceKind::Queue);

    let summary = workflow::analyse_queues(&fake, &store, &mut session)
        .await
        .unwrap();

    assert_eq!(summary.applied, 2);
    assert!(session.analysis[0].quick_connects.is_empty());
    assert_eq!(session.analysis[1].quick_connects.len(), 2);
    // Analysis never deletes anything
    assert_eq!(fake.queues.lock().unwrap().len(), 2);
    assert_eq!(session.selected_count(ResourceKind::Queue), 2);
}

#[tokio::test]
async fn clear_removes_every_csv_but_keeps_configuration() {
    let (ws, store, mut session) = setup();
    let fake = FakeConnect::with_queues(queues(1));
    workflow::load_configuration(&fake, &store, &mut session, TEST_INSTANCE_ID)
        .await
        .unwrap();
    workflow::load_queues(&fake, &store, &mut session)
        .await
        .unwrap();
    workflow::delete_queues(&fake, &store, &mut session)
        .await
        .unwrap();

    let report = workflow::clear(&store, &mut session).unwrap();
    assert_eq!(report.removed, 2);
    assert_eq!(report.absent, 2);

    for name in [QUEUES_FILE, SELECTED_QUEUES_FILE, FLOWS_FILE, SELECTED_FLOWS_FILE] {
        assert!(!ws.exists(name), "{name} should be gone");
    }
    assert!(ws.exists(INSTANCE_CONFIG_FILE));

    // Clearing again is harmless
    let report = workflow::clear(&store, &mut session).unwrap();
    assert_eq!(report.removed, 0);
}

#[tokio::test]
async fn corrupt_snapshot_file_is_local_io() {
    let (ws, store, mut session) = setup();
    ws.write(QUEUES_FILE, "Name\nonly-a-name\n").unwrap();
    session.queues.selection.select("q-0");
    let fake = FakeConnect::default();

    let err = workflow::delete_queues(&fake, &store, &mut session)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::LocalIo);
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn clear_recovers_from_corrupt_snapshot_file() {
    let (ws, store, _session) = setup();
    ws.write(QUEUES_FILE, "Name\nonly-a-name\n").unwrap();
    ws.write(SELECTED_FLOWS_FILE, "Id,Arn\n").unwrap();

    let mut session = Session::restore(&store, None);
    assert_eq!(session.row_count(ResourceKind::Queue), 0);

    let report = workflow::clear(&store, &mut session).unwrap();

    assert_eq!(report.removed, 2);
    for file in [QUEUES_FILE, SELECTED_QUEUES_FILE, FLOWS_FILE, SELECTED_FLOWS_FILE] {
        assert!(!ws.exists(file), "{file} should be gone");
    }
}
