//! Default values shared between the console and its tests

/// Persisted instance configuration (`{"Id": .., "Arn": ..}`)
pub const INSTANCE_CONFIG_FILE: &str = "connect.json";

/// Full queue snapshot
pub const QUEUES_FILE: &str = "queues.csv";

/// Queues selected by the last delete/analyse action
pub const SELECTED_QUEUES_FILE: &str = "selected_queues.csv";

/// Full contact flow snapshot
pub const FLOWS_FILE: &str = "flows.csv";

/// Contact flows selected by the last delete action
pub const SELECTED_FLOWS_FILE: &str = "selected_flows.csv";

/// Queue types requested when listing queues
pub const DEFAULT_QUEUE_TYPES: &[&str] = &["STANDARD"];

/// Contact flow state kept by the flow filter
pub const ACTIVE_FLOW_STATE: &str = "ACTIVE";

/// Contact flow types kept by the flow filter (compared case-insensitively)
pub const ALLOWED_FLOW_TYPES: &[&str] = &[
    "CONTACT_FLOW",
    "AGENT_WHISPER",
    "AGENT_TRANSFER",
    "AGENT_HOLD",
    "CUSTOMER_QUEUE",
    "QUEUE_TRANSFER",
    "OUTBOUND_WHISPER",
];
