//! Records fetched from an Amazon Connect instance
//!
//! Field names follow the provider's PascalCase so the snapshot files carry
//! the same column headers as the API summaries they come from.

use crate::resource_kind::ResourceKind;
use serde::{Deserialize, Serialize};

/// A fetched row that can be selected and acted on by its provider `Id`.
pub trait Resource {
    /// Kind of resource this record describes
    const KIND: ResourceKind;

    /// CSV header, in serialized field order
    const COLUMNS: &'static [&'static str];

    /// Provider-assigned identifier, unique within the kind
    fn id(&self) -> &str;

    /// Globally unique ARN
    fn arn(&self) -> &str;

    /// Human readable name (may be empty)
    fn name(&self) -> &str;
}

/// Identity of the target Connect instance (persisted as `connect.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceInfo {
    pub id: String,
    pub arn: String,
}

/// One row of the queue snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueRecord {
    pub id: String,
    pub arn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub queue_type: Option<String>,
}

/// One row of the contact flow snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlowRecord {
    pub id: String,
    pub arn: String,
    #[serde(default)]
    pub name: String,
    pub contact_flow_type: String,
    pub contact_flow_state: String,
    #[serde(default)]
    pub contact_flow_status: Option<String>,
}

/// A quick connect attached to a queue (inspection only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuickConnectRecord {
    pub id: String,
    pub arn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quick_connect_type: Option<String>,
}

impl Resource for QueueRecord {
    const KIND: ResourceKind = ResourceKind::Queue;
    const COLUMNS: &'static [&'static str] = &["Id", "Arn", "Name", "QueueType"];

    fn id(&self) -> &str {
        &self.id
    }

    fn arn(&self) -> &str {
        &self.arn
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for FlowRecord {
    const KIND: ResourceKind = ResourceKind::ContactFlow;
    const COLUMNS: &'static [&'static str] = &[
        "Id",
        "Arn",
        "Name",
        "ContactFlowType",
        "ContactFlowState",
        "ContactFlowStatus",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn arn(&self) -> &str {
        &self.arn
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_info_uses_provider_field_names() {
        let info = InstanceInfo {
            id: "inst-1".to_string(),
            arn: "arn:aws:connect:us-east-1:123456789012:instance/inst-1".to_string(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["Id"], "inst-1");
        assert!(json.get("Arn").is_some());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_flow_record_requires_type_and_state() {
        let missing_state = serde_json::json!({
            "Id": "f-1",
            "Arn": "arn:f-1",
            "ContactFlowType": "CONTACT_FLOW",
        });
        assert!(serde_json::from_value::<FlowRecord>(missing_state).is_err());
    }

    #[test]
    fn test_queue_record_name_defaults_to_empty() {
        let value = serde_json::json!({ "Id": "q-1", "Arn": "arn:q-1" });
        let queue: QueueRecord = serde_json::from_value(value).unwrap();
        assert_eq!(queue.name(), "");
        assert_eq!(queue.queue_type, None);
        assert_eq!(QueueRecord::KIND, ResourceKind::Queue);
    }
}
