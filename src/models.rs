//! Request and result types for the Save Page Now API.
//!
//! A [`CaptureRequest`] is built by the caller and consumed by a single
//! [`SpnClient::submit`](crate::client::SpnClient::submit) call. The four result
//! shapes ([`SubmissionAck`], [`JobStatus`], [`SystemStatus`], [`UserStatus`]) are
//! produced by the normalizer and every field in them is optional: the remote
//! service may omit any key and that is not treated as an error.
//!
//! # Example
//!
//! ```
//! use spn2::models::{CaptureRequest, TargetCredentials};
//!
//! let request = CaptureRequest::builder()
//!     .url("https://www.npmjs.com/package/spn2")
//!     .capture_all(true)
//!     .capture_screenshot(true)
//!     .if_not_archived_within("1h")
//!     .target_credentials(TargetCredentials::new("user", "pass"))
//!     .build();
//!
//! assert_eq!(request.freshness().as_deref(), Some("1h"));
//! ```

use bon::Builder;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A single capture submission.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct CaptureRequest {
    /// Absolute URL of the page to archive.
    #[builder(into)]
    pub url: String,
    #[builder(default)]
    pub capture_all: bool,
    #[builder(default)]
    pub capture_outlinks: bool,
    #[builder(default)]
    pub capture_screenshot: bool,
    #[builder(default)]
    pub delay_wb_availability: bool,
    #[builder(default)]
    pub force_get: bool,
    #[builder(default)]
    pub skip_first_archive: bool,
    /// Single freshness token such as `"3d"` or `"1h"`.
    #[builder(into)]
    pub if_not_archived_within: Option<String>,
    /// `[min, max]` freshness range. Wins over `if_not_archived_within`.
    pub if_not_archived_within_between: Option<(String, String)>,
    #[builder(default)]
    pub outlinks_availability: bool,
    #[builder(default)]
    pub email_result: bool,
    #[builder(into)]
    pub capture_cookie: Option<String>,
    #[builder(into)]
    pub use_user_agent: Option<String>,
    pub target_credentials: Option<TargetCredentials>,
}

impl CaptureRequest {
    /// Request with no capture modifiers set.
    pub fn new(url: impl Into<String>) -> Self {
        Self::builder().url(url).build()
    }

    /// The freshness window that will go on the wire, if any.
    ///
    /// The range form is comma-joined and takes precedence; an empty single
    /// token counts as absent.
    pub fn freshness(&self) -> Option<Cow<'_, str>> {
        if let Some((min, max)) = &self.if_not_archived_within_between {
            return Some(Cow::Owned(format!("{min},{max}")));
        }

        self.if_not_archived_within
            .as_deref()
            .filter(|window| !window.is_empty())
            .map(Cow::Borrowed)
    }
}

/// Basic-auth credentials for the target site (not for the archive).
///
/// Either half may be missing; a missing half is sent as an empty string.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TargetCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl TargetCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    pub fn username_only(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: None,
        }
    }
}

impl std::fmt::Debug for TargetCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Acknowledgment returned by the submission endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionAck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_ext: Option<String>,
}

/// State of one capture job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Status code the archive crawler saw when fetching the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<f64>,
    pub counters: JobCounters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlinks: Option<Outlinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Archive timestamp (`YYYYMMDDhhmmss`), passed through unparsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl JobStatus {
    /// Original URLs of the outlinks, whichever shape the service sent.
    pub fn outlink_urls(&self) -> Vec<&str> {
        match &self.outlinks {
            Some(Outlinks::Archived(map)) => map.keys().map(String::as_str).collect(),
            Some(Outlinks::Plain(urls)) => urls.iter().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobCounters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlinks: Option<u64>,
}

/// Outlinks come back either as `original -> archived` or as a bare list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outlinks {
    Archived(BTreeMap<String, String>),
    Plain(Vec<String>),
}

/// Service-wide load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_captures: Option<u64>,
    pub queues: QueueDepths,
}

/// Pending jobs per processing lane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueDepths {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_misc: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_outlink: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_outlink_misc: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_fidelity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_misc: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_outlink: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_outlink_misc: Option<u64>,
}

impl QueueDepths {
    /// Sum of the queues that were reported, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        [
            self.api,
            self.api_misc,
            self.api_outlink,
            self.api_outlink_misc,
            self.high_fidelity,
            self.main,
            self.main_misc,
            self.main_outlink,
            self.main_outlink_misc,
        ]
        .into_iter()
        .flatten()
        .fold(0, u64::saturating_add)
    }
}

/// Per-account quota.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_captures: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_captures_limit: Option<u64>,
}

impl UserStatus {
    pub fn daily_captures_remaining(&self) -> Option<u64> {
        Some(self.daily_captures_limit?.saturating_sub(self.daily_captures?))
    }
}
