//! Record fixtures
//!
//! ARNs follow the provider's shape so anything that logs or displays them
//! looks realistic.

use connect_console_common::{FlowRecord, InstanceInfo, QueueRecord, QuickConnectRecord};

/// Instance id used across tests
pub const TEST_INSTANCE_ID: &str = "11111111-2222-3333-4444-555555555555";

const TEST_ARN_PREFIX: &str = "arn:aws:connect:us-east-1:123456789012:instance";

/// Instance identity for [`TEST_INSTANCE_ID`]
pub fn instance() -> InstanceInfo {
    InstanceInfo {
        id: TEST_INSTANCE_ID.to_string(),
        arn: format!("{TEST_ARN_PREFIX}/{TEST_INSTANCE_ID}"),
    }
}

/// A standard queue with the given id
pub fn queue(id: &str) -> QueueRecord {
    QueueRecord {
        id: id.to_string(),
        arn: format!("{TEST_ARN_PREFIX}/{TEST_INSTANCE_ID}/queue/{id}"),
        name: format!("Queue {id}"),
        queue_type: Some("STANDARD".to_string()),
    }
}

/// `n` queues with ids `q-0 .. q-{n-1}`
pub fn queues(n: usize) -> Vec<QueueRecord> {
    (0..n).map(|i| queue(&format!("q-{i}"))).collect()
}

/// A contact flow with the given state and type
pub fn flow(id: &str, state: &str, flow_type: &str) -> FlowRecord {
    FlowRecord {
        id: id.to_string(),
        arn: format!("{TEST_ARN_PREFIX}/{TEST_INSTANCE_ID}/contact-flow/{id}"),
        name: format!("Flow {id}"),
        contact_flow_type: flow_type.to_string(),
        contact_flow_state: state.to_string(),
        contact_flow_status: Some("PUBLISHED".to_string()),
    }
}

/// A phone-number quick connect
pub fn quick_connect(id: &str) -> QuickConnectRecord {
    QuickConnectRecord {
        id: id.to_string(),
        arn: format!("{TEST_ARN_PREFIX}/{TEST_INSTANCE_ID}/transfer-destination/{id}"),
        name: format!("Quick connect {id}"),
        quick_connect_type: Some("PHONE_NUMBER".to_string()),
    }
}
