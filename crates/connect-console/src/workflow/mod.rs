//! Selection workflow
//!
//! Load a snapshot, let the operator mark rows, derive the selected subset,
//! persist it, and replay it into a batch of provider calls. The session
//! state is an explicit struct owned by the presentation shell and handed to
//! each action by `&mut`.

pub mod actions;
pub mod batch;
pub mod session;

pub use actions::{
    analyse_queues, clear, delete_flows, delete_queues, load_configuration, load_flows,
    load_queues, LoadSummary,
};
pub use batch::{apply_batch, BatchOperation, BatchSummary, QueueAnalysis};
pub use session::{InstanceId, KindState, Phase, Session};
