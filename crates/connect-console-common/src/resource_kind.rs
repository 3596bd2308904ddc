//! Resource kinds managed by the console
//!
//! Each kind owns one pair of snapshot files and a fixed set of batch
//! actions.

use crate::defaults::{FLOWS_FILE, QUEUES_FILE, SELECTED_FLOWS_FILE, SELECTED_QUEUES_FILE};
use std::fmt;

/// Types of Amazon Connect resources listed by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// Routing queue
    Queue,
    /// Contact flow
    ContactFlow,
}

impl ResourceKind {
    /// All kinds, in display order
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Queue, ResourceKind::ContactFlow];

    /// Stable identifier used in logs and CLI output
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Queue => "queue",
            ResourceKind::ContactFlow => "contact_flow",
        }
    }

    /// Plural label for banners and table titles
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Queue => "Queues",
            ResourceKind::ContactFlow => "Flows",
        }
    }

    /// File name of the full snapshot
    pub fn snapshot_file(self) -> &'static str {
        match self {
            ResourceKind::Queue => QUEUES_FILE,
            ResourceKind::ContactFlow => FLOWS_FILE,
        }
    }

    /// File name of the persisted selected subset
    pub fn subset_file(self) -> &'static str {
        match self {
            ResourceKind::Queue => SELECTED_QUEUES_FILE,
            ResourceKind::ContactFlow => SELECTED_FLOWS_FILE,
        }
    }

    /// Whether the kind supports the quick-connect analysis action
    pub fn supports_analysis(self) -> bool {
        matches!(self, ResourceKind::Queue)
    }

    /// The other kind (used to cycle tabs)
    pub fn next(self) -> Self {
        match self {
            ResourceKind::Queue => ResourceKind::ContactFlow,
            ResourceKind::ContactFlow => ResourceKind::Queue,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
