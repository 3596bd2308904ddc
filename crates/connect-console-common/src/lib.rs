//! connect-console-common - Shared types and selection logic
//!
//! This crate holds the pieces of the console that do not talk to AWS,
//! so they can be tested and reused without pulling in the SDK.
//!
//! ## Modules
//!
//! - [`defaults`]: File names and default values
//! - [`flow_filter`]: Active-state and flow-type allow-list filtering
//! - [`records`]: Queue, contact flow, quick connect and instance records
//! - [`resource_kind`]: The resource kinds the console manages
//! - [`selection`]: Deriving the selected subset of a snapshot

pub mod defaults;
pub mod flow_filter;
pub mod records;
pub mod resource_kind;
pub mod selection;

// Re-export commonly used types
pub use flow_filter::{filter_flows, is_allowed_flow};
pub use records::{FlowRecord, InstanceInfo, QueueRecord, QuickConnectRecord, Resource};
pub use resource_kind::ResourceKind;
pub use selection::{derive_selected_subset, Selection, SelectionError};
