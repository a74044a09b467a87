//! Command registry

pub mod flow;
pub mod yammer;

use crate::command::Command;

/// Command names as typed on the command line
pub mod names {
    pub const FLOW_DISABLE: &str = "flow disable";
    pub const FLOW_ENABLE: &str = "flow enable";
    pub const YAMMER_MESSAGE_LIST: &str = "yammer message list";
}

/// Every available command
pub fn registry() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(flow::FlowStateCommand::disable()),
        Box::new(flow::FlowStateCommand::enable()),
        Box::new(yammer::MessageListCommand),
    ]
}
