//! `yammer message list`

use crate::command::{Command, CommandContext, OptionDescriptor, Options};
use crate::commands::names;
use crate::config::Resource;
use crate::error::{Error, Result};
use crate::http::RequestDescriptor;
use crate::output::CommandOutput;
use crate::pagination::{AggregationConfig, Cursor, CursorAggregator, CursorPaginator, Paginator};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Columns of the text-mode summary
pub const SUMMARY_COLUMNS: &[&str] = &["id", "replied_to_id", "thread_id", "group_id", "shortBody"];

/// Characters of the message body kept in the summary
pub const SHORT_BODY_LENGTH: usize = 35;

// ============================================================================
// Feed selection
// ============================================================================

/// Named message feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedType {
    /// All company messages
    #[default]
    All,
    /// Algorithmic "top" conversations
    Top,
    /// The user's own feed
    My,
    /// Threads the user follows
    Following,
    /// Messages sent by the user
    Sent,
    /// Private messages
    Private,
    /// Messages received by the user
    Received,
}

impl FeedType {
    /// Every feed type, in help order
    pub const ALL: [FeedType; 7] = [
        FeedType::All,
        FeedType::Top,
        FeedType::My,
        FeedType::Following,
        FeedType::Sent,
        FeedType::Private,
        FeedType::Received,
    ];

    /// Option value naming this feed
    pub fn as_str(self) -> &'static str {
        match self {
            FeedType::All => "All",
            FeedType::Top => "Top",
            FeedType::My => "My",
            FeedType::Following => "Following",
            FeedType::Sent => "Sent",
            FeedType::Private => "Private",
            FeedType::Received => "Received",
        }
    }

    /// Endpoint path below `/v1`
    pub fn path(self) -> &'static str {
        match self {
            FeedType::All => "/messages.json",
            FeedType::Top => "/messages/algo.json",
            FeedType::My => "/messages/my_feed.json",
            FeedType::Following => "/messages/following.json",
            FeedType::Sent => "/messages/sent.json",
            FeedType::Private => "/messages/private.json",
            FeedType::Received => "/messages/received.json",
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FeedType::ALL
            .into_iter()
            .find(|feed| feed.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = FeedType::ALL.iter().map(|f| f.as_str()).collect();
                format!(
                    "{s} is not a valid value for the feedType option. Allowed values are {}",
                    allowed.join("|")
                )
            })
    }
}

/// Which messages to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    /// Messages of one thread
    Thread(u64),
    /// Messages posted in one group
    Group(u64),
    /// A named feed
    Feed(FeedType),
}

impl MessageSource {
    /// Endpoint path, relative to the Yammer API root
    pub fn path(self) -> String {
        match self {
            MessageSource::Thread(id) => format!("/v1/messages/in_thread/{id}.json"),
            MessageSource::Group(id) => format!("/v1/messages/in_group/{id}.json"),
            MessageSource::Feed(feed) => format!("/v1{}", feed.path()),
        }
    }
}

// ============================================================================
// Typed query
// ============================================================================

/// A validated `yammer message list` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageQuery {
    pub source: MessageSource,
    pub older_than: Option<u64>,
    pub threaded: bool,
    /// Maximum number of messages; `None` lists the whole feed
    pub limit: Option<usize>,
}

impl MessageQuery {
    /// Build the typed query from options that passed validation
    pub fn from_options(options: &Options) -> Result<Self> {
        let source = if let Some(id) = number(options, "threadId")? {
            MessageSource::Thread(id)
        } else if let Some(id) = number(options, "groupId")? {
            MessageSource::Group(id)
        } else {
            let feed = match options.text("feedType") {
                Some(value) => value.parse().map_err(Error::validation)?,
                None => FeedType::default(),
            };
            MessageSource::Feed(feed)
        };

        let limit = match number(options, "limit")? {
            Some(limit) => Some(
                usize::try_from(limit)
                    .map_err(|_| Error::validation(format!("{limit} is not a number")))?,
            ),
            None => None,
        };

        Ok(Self {
            source,
            older_than: number(options, "olderThanId")?,
            threaded: options.flag("threaded"),
            limit,
        })
    }

    /// Request for one page; the cursor parameter precedes `threaded` in the query
    pub fn request(&self, cursor_param: &str, cursor: Option<&Cursor>) -> RequestDescriptor {
        let mut request = RequestDescriptor::new(self.source.path())
            .header("accept", "application/json;odata.metadata=none")
            .header("content-type", "application/json;odata=nometadata")
            .query_opt(cursor_param, cursor.map(Cursor::to_string));
        if self.threaded {
            request = request.query("threaded", "true");
        }
        request
    }

    /// Pagination settings for this query
    pub fn aggregation(&self, max_pages: usize) -> AggregationConfig {
        AggregationConfig::new()
            .with_start_cursor(self.older_than.map(|id| Cursor::new(id.to_string())))
            .with_limit(self.limit)
            .with_max_pages(max_pages)
    }
}

/// A set numeric option; unset (or zero-length) options are `None`
fn number(options: &Options, name: &str) -> Result<Option<u64>> {
    if !options.is_set(name) {
        return Ok(None);
    }
    check_number(options, name).map_err(Error::validation)?;
    Ok(options.u64(name).filter(|n| *n > 0))
}

fn check_number(options: &Options, name: &str) -> std::result::Result<(), String> {
    if !options.is_set(name) || options.u64(name).is_some() {
        return Ok(());
    }

    let shown = match options.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    if options.is_number(name) {
        Err(format!("{shown} is not a positive number"))
    } else {
        Err(format!("{shown} is not a number"))
    }
}

// ============================================================================
// Summary projection
// ============================================================================

/// Flatten a message body for one-line display
pub fn short_body(body: &str) -> String {
    let flat = body.replace('\n', " ");
    if flat.chars().count() < SHORT_BODY_LENGTH {
        flat
    } else {
        let head: String = flat.chars().take(SHORT_BODY_LENGTH).collect();
        format!("{head}...")
    }
}

/// Text-mode view of one message
pub fn summarize(message: &Value) -> Value {
    let short = message
        .pointer("/body/plain")
        .and_then(Value::as_str)
        .filter(|body| !body.is_empty())
        .map(short_body);

    json!({
        "id": message["id"].clone(),
        "replied_to_id": message["replied_to_id"].clone(),
        "thread_id": message["thread_id"].clone(),
        "group_id": message["group_id"].clone(),
        "shortBody": short,
    })
}

// ============================================================================
// Command
// ============================================================================

/// Lists Yammer messages
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageListCommand;

#[async_trait]
impl Command for MessageListCommand {
    fn name(&self) -> &'static str {
        names::YAMMER_MESSAGE_LIST
    }

    fn description(&self) -> &'static str {
        "Returns all accessible messages from the user's Yammer network"
    }

    fn options(&self) -> Vec<OptionDescriptor> {
        vec![
            OptionDescriptor::value(
                "olderThanId",
                "olderThanId",
                "Returns messages older than the message ID specified as a numeric string",
            ),
            OptionDescriptor::value(
                "feedType",
                "feedType",
                "Returns messages from a specific feed. Available options: All|Top|My|Following|Sent|Private|Received. Default All",
            )
            .short('f'),
            OptionDescriptor::value(
                "groupId",
                "groupId",
                "Returns the messages from a specific group",
            ),
            OptionDescriptor::value(
                "threadId",
                "threadId",
                "Returns the messages from a specific thread",
            ),
            OptionDescriptor::flag(
                "threaded",
                "Will only return the thread starter (first message) for each thread",
            ),
            OptionDescriptor::value(
                "limit",
                "limit",
                "Limits the messages returned",
            ),
        ]
    }

    fn validate(&self, options: &Options) -> std::result::Result<(), String> {
        if options.is_set("groupId") && options.is_set("threadId") {
            return Err("You cannot specify groupId and threadId at the same time".to_string());
        }

        if options.is_set("feedType") && (options.is_set("groupId") || options.is_set("threadId")) {
            return Err(
                "You cannot specify the feedType with groupId or threadId at the same time"
                    .to_string(),
            );
        }

        if let Some(feed) = options.text("feedType") {
            feed.parse::<FeedType>()?;
        }

        for name in ["olderThanId", "groupId", "threadId", "limit"] {
            check_number(options, name)?;
        }

        Ok(())
    }

    fn help(&self) -> &'static str {
        HELP
    }

    fn telemetry_properties(&self, options: &Options) -> Map<String, Value> {
        let mut props = Map::new();
        for name in ["olderThanId", "feedType", "groupId", "threadId", "limit"] {
            props.insert(name.to_string(), Value::Bool(options.is_set(name)));
        }
        props.insert("threaded".to_string(), Value::Bool(options.flag("threaded")));
        props
    }

    async fn execute(&self, ctx: &CommandContext, options: &Options) -> Result<CommandOutput> {
        let query = MessageQuery::from_options(options)?;
        debug!("Listing messages from {}", query.source.path());

        let client = ctx.client(Resource::Yammer)?;
        let paginator = CursorPaginator::yammer_messages();
        let mut aggregator = CursorAggregator::new(&client, &paginator)
            .with_config(query.aggregation(ctx.settings().pagination.max_pages));

        let messages = aggregator
            .collect(|cursor| query.request(paginator.cursor_param(), cursor))
            .await?;
        debug!(
            "Retrieved {} messages in {} requests",
            messages.len(),
            aggregator.pages_fetched()
        );

        let summary = messages.iter().map(summarize).collect();
        Ok(CommandOutput::Items {
            raw: messages,
            summary,
            columns: SUMMARY_COLUMNS,
        })
    }
}

const HELP: &str = "\
Remarks:

  Use --feedType to select the feed to read from:
    All        all company messages (default)
    Top        algorithmic feed of top conversations
    My         messages from the user's feed
    Following  threads the user is following
    Sent       messages sent by the user
    Private    private messages received by the user
    Received   messages received by the user

  --feedType cannot be combined with --groupId or --threadId, and --groupId
  cannot be combined with --threadId.

  Without --limit every available message is retrieved, which may take many
  requests on a busy network.

Examples:

  Returns all Yammer network messages
    o365 yammer message list

  Returns all Yammer network messages older than the message ID 5611239081
    o365 yammer message list --olderThanId 5611239081

  Returns all Yammer network thread starter messages
    o365 yammer message list --threaded

  Returns the first 10 Yammer network messages
    o365 yammer message list --limit 10

  Returns the first 10 Yammer network messages within the group 5785177
    o365 yammer message list --groupId 5785177 --limit 10

  Returns the first 20 messages sent by the current user
    o365 yammer message list --feedType Sent --limit 20
";
