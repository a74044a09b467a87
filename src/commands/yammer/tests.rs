//! Tests for yammer commands

use super::*;
use crate::command::{self, Command, CommandContext, Options};
use crate::config::Settings;
use crate::error::Error;
use crate::output::{render, CommandOutput, OutputFormat};
use crate::pagination::{Cursor, CursorPaginator, Paginator};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context_for(mock_server: &MockServer) -> CommandContext {
    let mut settings = Settings::default();
    settings.endpoints.yammer = mock_server.uri();
    settings.auth.yammer_token = Some("yammer-token".to_string());
    settings.http.rate_limit.yammer = None;
    CommandContext::new(settings)
}

fn message(id: u64, body: &str) -> Value {
    json!({
        "id": id,
        "sender_id": 1496550646,
        "replied_to_id": null,
        "thread_id": id,
        "group_id": 11231456,
        "body": { "parsed": body, "plain": body, "rich": body },
        "privacy": "public"
    })
}

fn page(ids: &[u64], older_available: bool) -> Value {
    let messages: Vec<Value> = ids
        .iter()
        .map(|id| message(*id, &format!("message {id}")))
        .collect();
    json!({ "messages": messages, "meta": { "older_available": older_available } })
}

fn ids(output: &CommandOutput) -> Vec<u64> {
    match output {
        CommandOutput::Items { raw, .. } => raw.iter().filter_map(|m| m["id"].as_u64()).collect(),
        CommandOutput::Done => Vec::new(),
    }
}

// ============================================================================
// Feed types and endpoints
// ============================================================================

#[test_case(FeedType::All, "/v1/messages.json")]
#[test_case(FeedType::Top, "/v1/messages/algo.json")]
#[test_case(FeedType::My, "/v1/messages/my_feed.json")]
#[test_case(FeedType::Following, "/v1/messages/following.json")]
#[test_case(FeedType::Sent, "/v1/messages/sent.json")]
#[test_case(FeedType::Private, "/v1/messages/private.json")]
#[test_case(FeedType::Received, "/v1/messages/received.json")]
fn test_feed_paths(feed: FeedType, expected: &str) {
    assert_eq!(MessageSource::Feed(feed).path(), expected);
    assert_eq!(feed.as_str().parse::<FeedType>(), Ok(feed));
}

#[test]
fn test_thread_and_group_paths() {
    assert_eq!(
        MessageSource::Thread(123).path(),
        "/v1/messages/in_thread/123.json"
    );
    assert_eq!(
        MessageSource::Group(5785177).path(),
        "/v1/messages/in_group/5785177.json"
    );
}

#[test]
fn test_feed_type_is_case_sensitive() {
    let err = "sent".parse::<FeedType>().unwrap_err();
    assert_eq!(
        err,
        "sent is not a valid value for the feedType option. Allowed values are All|Top|My|Following|Sent|Private|Received"
    );
}

#[test]
fn test_request_query_order() {
    let query = MessageQuery {
        source: MessageSource::Feed(FeedType::All),
        older_than: None,
        threaded: true,
        limit: None,
    };

    let cursor_param = CursorPaginator::yammer_messages().cursor_param().to_string();

    let first = query.request(&cursor_param, None);
    assert_eq!(first.url_with_query(), "/v1/messages.json?threaded=true");

    let next = query.request(&cursor_param, Some(&Cursor::new("42")));
    assert_eq!(
        next.url_with_query(),
        "/v1/messages.json?older_than=42&threaded=true"
    );
    assert!(next
        .headers
        .contains(&("accept".to_string(), "application/json;odata.metadata=none".to_string())));
    assert!(next.headers.contains(&(
        "content-type".to_string(),
        "application/json;odata=nometadata".to_string()
    )));
}

#[test]
fn test_request_uses_paginator_cursor_param() {
    let query = MessageQuery {
        source: MessageSource::Thread(7),
        older_than: None,
        threaded: false,
        limit: None,
    };
    let paginator = CursorPaginator::new("before", "messages", "id", "meta.older_available");

    let request = query.request(paginator.cursor_param(), Some(&Cursor::new("99")));
    assert_eq!(
        request.url_with_query(),
        "/v1/messages/in_thread/7.json?before=99"
    );
}

// ============================================================================
// Validation
// ============================================================================

#[test_case(Options::new().with("groupId", 1).with("threadId", 2), "You cannot specify groupId and threadId at the same time" ; "group and thread")]
#[test_case(Options::new().with("feedType", "All").with("groupId", 1), "You cannot specify the feedType with groupId or threadId at the same time" ; "feed and group")]
#[test_case(Options::new().with("feedType", "Top").with("threadId", 1), "You cannot specify the feedType with groupId or threadId at the same time" ; "feed and thread")]
#[test_case(Options::new().with("feedType", "Nonsense"), "Nonsense is not a valid value for the feedType option. Allowed values are All|Top|My|Following|Sent|Private|Received" ; "unknown feed")]
#[test_case(Options::new().with("olderThanId", "abc"), "abc is not a number" ; "older than not numeric")]
#[test_case(Options::new().with("groupId", "abc"), "abc is not a number" ; "group not numeric")]
#[test_case(Options::new().with("threadId", "12a"), "12a is not a number" ; "thread not numeric")]
#[test_case(Options::new().with("limit", "ten"), "ten is not a number" ; "limit not numeric")]
#[test_case(Options::new().with("limit", -5), "-5 is not a positive number" ; "limit negative")]
fn test_validation_failures(options: Options, expected: &str) {
    assert_eq!(
        MessageListCommand.validate(&options),
        Err(expected.to_string())
    );
}

#[test_case(Options::new() ; "no options")]
#[test_case(Options::new().with("feedType", "Sent").with("limit", 20) ; "feed with limit")]
#[test_case(Options::new().with("groupId", 5785177).with("threaded", true) ; "group threaded")]
#[test_case(Options::new().with("threadId", 1).with("olderThanId", 5611239081u64) ; "thread older than")]
fn test_validation_passes(options: Options) {
    assert_eq!(MessageListCommand.validate(&options), Ok(()));
}

#[test]
fn test_query_from_options() {
    let options = Options::new()
        .with("groupId", 5785177)
        .with("olderThanId", 10)
        .with("limit", 3)
        .with("threaded", true);

    let query = MessageQuery::from_options(&options).unwrap();
    assert_eq!(
        query,
        MessageQuery {
            source: MessageSource::Group(5785177),
            older_than: Some(10),
            threaded: true,
            limit: Some(3),
        }
    );
}

#[test]
fn test_zero_limit_means_everything() {
    let query = MessageQuery::from_options(&Options::new().with("limit", 0)).unwrap();
    assert_eq!(query.limit, None);
    assert_eq!(query.source, MessageSource::Feed(FeedType::All));
}

#[test]
fn test_telemetry_properties() {
    let options = Options::new()
        .with("feedType", "Sent")
        .with("limit", 20)
        .with("threaded", true);

    let props = MessageListCommand.telemetry_properties(&options);
    assert_eq!(props.get("feedType"), Some(&json!(true)));
    assert_eq!(props.get("limit"), Some(&json!(true)));
    assert_eq!(props.get("threaded"), Some(&json!(true)));
    assert_eq!(props.get("groupId"), Some(&json!(false)));
    assert_eq!(props.get("olderThanId"), Some(&json!(false)));
}

#[test]
fn test_feed_type_has_short_alias() {
    let feed = MessageListCommand
        .options()
        .into_iter()
        .find(|o| o.long == "feedType")
        .unwrap();
    assert_eq!(feed.usage(), "-f, --feedType [feedType]");
}

// ============================================================================
// Summary projection
// ============================================================================

#[test_case("Hello", "Hello" ; "short body kept")]
#[test_case("line one\nline two", "line one line two" ; "newlines flattened")]
#[test_case("12345678901234567890123456789012345", "12345678901234567890123456789012345..." ; "exactly at the cut")]
#[test_case("1234567890123456789012345678901234", "1234567890123456789012345678901234" ; "one below the cut")]
#[test_case("This is a rather long message body that goes on", "This is a rather long message body ..." ; "long body cut")]
fn test_short_body(body: &str, expected: &str) {
    assert_eq!(short_body(body), expected);
}

#[test]
fn test_short_body_counts_characters() {
    let body = "é".repeat(40);
    assert_eq!(short_body(&body), format!("{}...", "é".repeat(35)));
}

#[test]
fn test_summarize() {
    let summary = summarize(&json!({
        "id": 10123190123128u64,
        "replied_to_id": 10123190123127u64,
        "thread_id": 10123190123120u64,
        "group_id": 11231456,
        "body": { "plain": "Hi there\nall" },
        "sender_id": 1
    }));

    assert_eq!(
        summary,
        json!({
            "id": 10123190123128u64,
            "replied_to_id": 10123190123127u64,
            "thread_id": 10123190123120u64,
            "group_id": 11231456,
            "shortBody": "Hi there all"
        })
    );
}

#[test]
fn test_summarize_without_body() {
    let summary = summarize(&json!({ "id": 1 }));
    assert_eq!(summary["shortBody"], Value::Null);
    assert_eq!(summary["group_id"], Value::Null);
}

#[test]
fn test_summarize_empty_body() {
    let summary = summarize(&json!({ "id": 2, "body": { "plain": "" } }));
    assert_eq!(summary["shortBody"], Value::Null);
    assert_eq!(summary["id"], json!(2));
}

// ============================================================================
// Execution
// ============================================================================

#[tokio::test]
async fn test_sent_feed_with_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages/sent.json"))
        .and(query_param_is_missing("older_than"))
        .and(header("authorization", "Bearer yammer-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[30, 29, 28], true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/messages/sent.json"))
        .and(query_param("older_than", "28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[27, 26], false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let options = Options::new().with("feedType", "Sent").with("limit", 20);
    let output = command::run(&MessageListCommand, &ctx, &options)
        .await
        .unwrap();

    assert_eq!(ids(&output), vec![30, 29, 28, 27, 26]);
}

#[tokio::test]
async fn test_limit_stops_paging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages.json"))
        .and(query_param_is_missing("older_than"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[9, 8, 7], true)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/messages.json"))
        .and(query_param("older_than", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[6, 5, 4], true)))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let output = command::run(
        &MessageListCommand,
        &ctx,
        &Options::new().with("limit", 4),
    )
    .await
    .unwrap();

    assert_eq!(ids(&output), vec![9, 8, 7, 6]);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_group_threaded_older_than() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages/in_group/5785177.json"))
        .and(query_param("older_than", "100"))
        .and(query_param("threaded", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[99, 98], false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let options = Options::new()
        .with("groupId", 5785177)
        .with("olderThanId", 100)
        .with("threaded", true);
    let output = command::run(&MessageListCommand, &ctx, &options)
        .await
        .unwrap();

    assert_eq!(ids(&output), vec![99, 98]);
}

#[tokio::test]
async fn test_text_output_uses_summary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages/in_thread/77.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [message(78, "A reply that is definitely longer than the cut")],
            "meta": { "older_available": false }
        })))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let output = command::run(
        &MessageListCommand,
        &ctx,
        &Options::new().with("threadId", 77),
    )
    .await
    .unwrap();

    let text = render(&output, OutputFormat::Text).unwrap();
    assert!(text.contains("shortBody"));
    assert!(text.contains("A reply that is definitely longer t..."));
    assert!(!text.contains("sender_id"));

    let json = render(&output, OutputFormat::Json).unwrap();
    assert!(json.contains("sender_id"));
}

#[tokio::test]
async fn test_failure_discards_collected_messages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages.json"))
        .and(query_param_is_missing("older_than"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[9, 8, 7], true)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/messages.json"))
        .and(query_param("older_than", "7"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Rate limited" }
        })))
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let err = command::run(&MessageListCommand, &ctx, &Options::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Command { .. }));
    assert_eq!(err.to_string(), "Rate limited");
}

#[tokio::test]
async fn test_page_guard_from_settings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[5], true)))
        .mount(&mock_server)
        .await;

    let mut settings = Settings::default();
    settings.endpoints.yammer = mock_server.uri();
    settings.http.rate_limit.yammer = None;
    settings.pagination.max_pages = 3;
    let ctx = CommandContext::new(settings);

    let err = command::run(&MessageListCommand, &ctx, &Options::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MaxPagesExceeded { max_pages: 3 }));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[], false)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = context_for(&mock_server);
    let err = command::run(
        &MessageListCommand,
        &ctx,
        &Options::new().with("groupId", 1).with("threadId", 2),
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "You cannot specify groupId and threadId at the same time"
    );
}
