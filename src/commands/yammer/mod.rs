//! Yammer commands

mod message_list;

pub use message_list::{
    short_body, summarize, FeedType, MessageListCommand, MessageQuery, MessageSource,
    SHORT_BODY_LENGTH, SUMMARY_COLUMNS,
};

#[cfg(test)]
mod tests;
