//! Tests for command module

use super::*;
use crate::config::Settings;
use crate::http::UpstreamFailure;
use crate::output::OutputFormat;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use test_case::test_case;

/// Command that fails with a canned error and counts executions
struct StubCommand {
    failure: Option<UpstreamFailure>,
    executions: AtomicUsize,
}

impl StubCommand {
    fn succeeding() -> Self {
        Self {
            failure: None,
            executions: AtomicUsize::new(0),
        }
    }

    fn failing(failure: UpstreamFailure) -> Self {
        Self {
            failure: Some(failure),
            executions: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Command for StubCommand {
    fn name(&self) -> &'static str {
        "stub run"
    }

    fn description(&self) -> &'static str {
        "Does nothing"
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        vec![OptionDescriptor::value("id", "id", "Identifier").short('i')]
    }

    fn validate(&self, options: &Options) -> std::result::Result<(), String> {
        if options.is_set("id") {
            Ok(())
        } else {
            Err("Required option id not specified".to_string())
        }
    }

    fn help(&self) -> &'static str {
        "Examples:\n\n  o365 stub run --id 1\n"
    }

    fn telemetry_properties(&self, options: &Options) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("id".to_string(), Value::Bool(options.is_set("id")));
        props
    }

    async fn execute(&self, _ctx: &CommandContext, _options: &Options) -> Result<CommandOutput> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(failure) => Err(failure.clone().into()),
            None => Ok(CommandOutput::Done),
        }
    }
}

// ============================================================================
// Option coercion
// ============================================================================

#[test_case("10", json!(10) ; "integer")]
#[test_case("-3", json!(-3) ; "negative integer")]
#[test_case("5611239081", json!(5611239081u64) ; "large integer")]
#[test_case("007", json!("007") ; "leading zeros stay text")]
#[test_case("1e3", json!("1e3") ; "exponent stays text")]
#[test_case("1.5", json!("1.5") ; "decimal stays text")]
#[test_case("Sent", json!("Sent") ; "word")]
#[test_case("", json!("") ; "empty")]
fn test_coerce(raw: &str, expected: Value) {
    assert_eq!(coerce(raw), expected);
}

#[test]
fn test_options_is_set() {
    let options = Options::new()
        .with("empty", "")
        .with("off", false)
        .with("on", true)
        .with("zero", 0)
        .with("text", "x")
        .with("null", Value::Null);

    assert!(!options.is_set("missing"));
    assert!(!options.is_set("empty"));
    assert!(!options.is_set("off"));
    assert!(!options.is_set("null"));
    assert!(options.is_set("on"));
    assert!(options.is_set("zero"));
    assert!(options.is_set("text"));
}

#[test]
fn test_options_accessors() {
    let mut options = Options::new();
    options.set_raw("limit", "20");
    options.set_raw("feedType", "Sent");
    options.set("threaded", true);

    assert!(options.is_number("limit"));
    assert_eq!(options.u64("limit"), Some(20));
    assert_eq!(options.text("limit"), Some("20".to_string()));
    assert_eq!(options.text("feedType"), Some("Sent".to_string()));
    assert_eq!(options.u64("feedType"), None);
    assert!(options.flag("threaded"));
    assert!(!options.flag("feedType"));

    let mut names: Vec<&str> = options.names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["feedType", "limit", "threaded"]);
}

#[test]
fn test_options_from_value() {
    let options = Options::from(json!({ "name": "flow", "asAdmin": true }));
    assert_eq!(options.text("name"), Some("flow".to_string()));
    assert!(options.flag("asAdmin"));

    assert_eq!(Options::from(json!([1, 2])), Options::new());
}

// ============================================================================
// Descriptors and global options
// ============================================================================

#[test]
fn test_descriptor_usage() {
    let feed = OptionDescriptor::value("feedType", "feedType", "Feed").short('f');
    assert_eq!(feed.usage(), "-f, --feedType [feedType]");
    assert!(feed.takes_value());

    let threaded = OptionDescriptor::flag("threaded", "Threads only");
    assert_eq!(threaded.usage(), "--threaded");
    assert!(!threaded.takes_value());
}

#[test]
fn test_all_options_appends_globals() {
    let longs: Vec<&str> = all_options(&StubCommand::succeeding())
        .iter()
        .map(|o| o.long)
        .collect();
    assert_eq!(longs, vec!["id", "output", "verbose", "debug"]);
}

#[test]
fn test_global_options_defaults() {
    let global = GlobalOptions::from_options(&Options::new()).unwrap();
    assert_eq!(global, GlobalOptions::default());
    assert_eq!(global.output, OutputFormat::Text);
}

#[test]
fn test_global_options_parsed() {
    let options = Options::new()
        .with("output", "json")
        .with("verbose", true)
        .with("debug", true);

    let global = GlobalOptions::from_options(&options).unwrap();
    assert_eq!(global.output, OutputFormat::Json);
    assert!(global.verbose);
    assert!(global.debug);
}

#[test]
fn test_global_options_rejects_unknown_output() {
    let err = GlobalOptions::from_options(&Options::new().with("output", "xml")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "xml is not a valid value for the output option. Allowed values are json|text"
    );
}

#[test]
fn test_telemetry_properties_merge() {
    let command = StubCommand::succeeding();
    let options = Options::new().with("id", 1).with("debug", true);

    let props = telemetry_properties(&command, &options);
    assert_eq!(props.get("debug"), Some(&json!(true)));
    assert_eq!(props.get("verbose"), Some(&json!(false)));
    assert_eq!(props.get("output"), Some(&json!("text")));
    assert_eq!(props.get("id"), Some(&json!(true)));
}

// ============================================================================
// Running commands
// ============================================================================

#[tokio::test]
async fn test_run_executes_valid_command() {
    let command = StubCommand::succeeding();
    let ctx = CommandContext::new(Settings::default());

    let output = run(&command, &ctx, &Options::new().with("id", 1))
        .await
        .unwrap();

    assert_eq!(output, CommandOutput::Done);
    assert_eq!(command.executions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_run_logs_telemetry_at_debug_level() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let command = StubCommand::succeeding();
    let ctx = CommandContext::default();

    let output = run(&command, &ctx, &Options::new().with("id", 7).with("debug", true))
        .await
        .unwrap();

    assert_eq!(output, CommandOutput::Done);
    assert_eq!(command.executions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_run_stops_on_validation_failure() {
    let command = StubCommand::succeeding();
    let ctx = CommandContext::default();

    let err = run(&command, &ctx, &Options::new()).await.unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(err.to_string(), "Required option id not specified");
    assert_eq!(command.executions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_run_checks_global_options_first() {
    let command = StubCommand::succeeding();
    let ctx = CommandContext::default();

    let err = run(&command, &ctx, &Options::new().with("output", "csv"))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("csv is not a valid value"));
    assert_eq!(command.executions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_run_normalizes_upstream_failures() {
    let command = StubCommand::failing(UpstreamFailure::Response {
        status: 404,
        body: r#"{"error":{"code":"FlowNotFound","message":"Could not find flow 'x'."}}"#
            .to_string(),
    });
    let ctx = CommandContext::default();

    let err = run(&command, &ctx, &Options::new().with("id", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Command { .. }));
    assert_eq!(err.to_string(), "Could not find flow 'x'.");
}

#[tokio::test]
async fn test_run_normalizes_transport_failures() {
    let command = StubCommand::failing(UpstreamFailure::Transport(
        "connection refused".to_string(),
    ));
    let ctx = CommandContext::default();

    let err = run(&command, &ctx, &Options::new().with("id", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Command { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_context_client_uses_resource_settings() {
    let mut settings = Settings::default();
    settings.endpoints.yammer = "http://localhost:1234/api".to_string();
    let ctx = CommandContext::new(settings);

    let client = ctx.client(crate::config::Resource::Yammer).unwrap();
    let url = client.resolve_url(&crate::http::RequestDescriptor::new("/v1/messages.json"));
    assert_eq!(url, "http://localhost:1234/api/v1/messages.json");
    assert!(client.has_rate_limiter());
}
