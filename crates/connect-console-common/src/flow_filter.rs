//! Contact flow filtering
//!
//! Only active flows of the allow-listed types are kept in the flow
//! snapshot. The state comparison is exact; the type comparison ignores case.

use crate::defaults::{ACTIVE_FLOW_STATE, ALLOWED_FLOW_TYPES};
use crate::records::FlowRecord;

/// Whether a flow type is on the allow-list (case-insensitive)
pub fn is_allowed_flow_type(flow_type: &str) -> bool {
    ALLOWED_FLOW_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(flow_type))
}

/// Whether a flow survives into the snapshot
pub fn is_allowed_flow(flow: &FlowRecord) -> bool {
    flow.contact_flow_state == ACTIVE_FLOW_STATE && is_allowed_flow_type(&flow.contact_flow_type)
}

/// Keep the active, allow-listed flows, preserving order
pub fn filter_flows(flows: Vec<FlowRecord>) -> Vec<FlowRecord> {
    flows.into_iter().filter(is_allowed_flow).collect()
}
