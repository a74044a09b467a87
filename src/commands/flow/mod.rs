//! Microsoft Flow commands

mod state;

pub use state::{flow_action_path, FlowAction, FlowStateCommand, FLOW_API_VERSION};
