//! HTTP module
//!
//! Provides the transport used by every command.
//!
//! # Features
//!
//! - **Request descriptors**: ordered query parameters and headers
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error normalization**: upstream error bodies collapsed to one message

mod client;
mod failure;
mod rate_limit;
mod request;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use failure::{ErrorEnvelope, UpstreamFailure};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use request::RequestDescriptor;
