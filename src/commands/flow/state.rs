//! `flow disable` / `flow enable`

use crate::command::{Command, CommandContext, OptionDescriptor, Options};
use crate::commands::names;
use crate::config::Resource;
use crate::error::Result;
use crate::http::RequestDescriptor;
use crate::output::CommandOutput;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::info;

/// API version of the Flow management endpoints
pub const FLOW_API_VERSION: &str = "2016-11-01";

/// Which way a flow is switched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    /// Turn the flow off (`/stop`)
    Disable,
    /// Turn the flow on (`/start`)
    Enable,
}

impl FlowAction {
    /// Last path segment of the action endpoint
    pub fn verb(self) -> &'static str {
        match self {
            FlowAction::Disable => "stop",
            FlowAction::Enable => "start",
        }
    }
}

/// Path of a flow action, relative to the Flow management endpoint
pub fn flow_action_path(environment: &str, name: &str, as_admin: bool, action: FlowAction) -> String {
    let scope = if as_admin { "scopes/admin/" } else { "" };
    format!(
        "/providers/Microsoft.ProcessSimple/{scope}environments/{environment}/flows/{name}/{}?api-version={FLOW_API_VERSION}",
        action.verb()
    )
}

/// Switches a flow on or off
#[derive(Debug, Clone, Copy)]
pub struct FlowStateCommand {
    action: FlowAction,
}

impl FlowStateCommand {
    /// `flow disable`
    pub fn disable() -> Self {
        Self {
            action: FlowAction::Disable,
        }
    }

    /// `flow enable`
    pub fn enable() -> Self {
        Self {
            action: FlowAction::Enable,
        }
    }

    /// The action this command performs
    pub fn action(&self) -> FlowAction {
        self.action
    }
}

#[async_trait]
impl Command for FlowStateCommand {
    fn name(&self) -> &'static str {
        match self.action {
            FlowAction::Disable => names::FLOW_DISABLE,
            FlowAction::Enable => names::FLOW_ENABLE,
        }
    }

    fn description(&self) -> &'static str {
        match self.action {
            FlowAction::Disable => "Disables specified Microsoft Flow",
            FlowAction::Enable => "Enables specified Microsoft Flow",
        }
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        vec![
            OptionDescriptor::value("name", "name", "The name of the Microsoft Flow to switch")
                .short('n'),
            OptionDescriptor::value(
                "environment",
                "environment",
                "The name of the environment in which the Microsoft Flow exists",
            )
            .short('e'),
            OptionDescriptor::flag(
                "asAdmin",
                "Set, to switch the Microsoft Flow as administrator",
            ),
        ]
    }

    fn validate(&self, options: &Options) -> std::result::Result<(), String> {
        if !options.is_set("name") {
            return Err("Required option name not specified".to_string());
        }

        if !options.is_set("environment") {
            return Err("Required option environment not specified".to_string());
        }

        Ok(())
    }

    fn help(&self) -> &'static str {
        match self.action {
            FlowAction::Disable => DISABLE_HELP,
            FlowAction::Enable => ENABLE_HELP,
        }
    }

    fn telemetry_properties(&self, options: &Options) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("asAdmin".to_string(), Value::Bool(options.flag("asAdmin")));
        props
    }

    async fn execute(&self, ctx: &CommandContext, options: &Options) -> Result<CommandOutput> {
        let name = options.text("name").unwrap_or_default();
        let environment = options.text("environment").unwrap_or_default();
        let as_admin = options.flag("asAdmin");

        info!(
            "{} Microsoft Flow {name} in environment {environment}",
            match self.action {
                FlowAction::Disable => "Disabling",
                FlowAction::Enable => "Enabling",
            }
        );

        let request = RequestDescriptor::new(flow_action_path(
            &environment,
            &name,
            as_admin,
            self.action,
        ))
        .header("accept", "application/json");

        let client = ctx.client(Resource::Flow)?;
        client.post(&request).await?;

        Ok(CommandOutput::Done)
    }
}

const DISABLE_HELP: &str = "\
Remarks:

  If the environment with the name you specified doesn't exist, you will get
  the Access to the environment 'xyz' is denied. error.

  By default, the command will try to disable Microsoft Flows you own. If you
  want to disable a Microsoft Flow owned by another user, use the asAdmin
  flag.

  If the Microsoft Flow with the name you specified doesn't exist, you will
  get the Could not find flow 'xyz'. error.

Examples:

  Disables Microsoft Flow owned by the currently signed-in user
    o365 flow disable --environment Default-d87a7535-dd31-4437-bfe1-95340acd55c5 --name 3989cb59-ce1a-4a5c-bb78-257c5c39381d

  Disables Microsoft Flow owned by another user
    o365 flow disable --environment Default-d87a7535-dd31-4437-bfe1-95340acd55c5 --name 3989cb59-ce1a-4a5c-bb78-257c5c39381d --asAdmin
";

const ENABLE_HELP: &str = "\
Remarks:

  If the environment with the name you specified doesn't exist, you will get
  the Access to the environment 'xyz' is denied. error.

  By default, the command will try to enable Microsoft Flows you own. If you
  want to enable a Microsoft Flow owned by another user, use the asAdmin
  flag.

  If the Microsoft Flow with the name you specified doesn't exist, you will
  get the Could not find flow 'xyz'. error.

Examples:

  Enables Microsoft Flow owned by the currently signed-in user
    o365 flow enable --environment Default-d87a7535-dd31-4437-bfe1-95340acd55c5 --name 3989cb59-ce1a-4a5c-bb78-257c5c39381d

  Enables Microsoft Flow owned by another user
    o365 flow enable --environment Default-d87a7535-dd31-4437-bfe1-95340acd55c5 --name 3989cb59-ce1a-4a5c-bb78-257c5c39381d --asAdmin
";
