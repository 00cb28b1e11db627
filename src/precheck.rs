//! Reachability gate run against the target URL before submission.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::Result;

/// Decides whether a target URL is worth submitting.
///
/// `Ok(false)` means the target answered with something other than 200.
/// `Err` means it could not be reached at all.
#[async_trait]
pub trait ReachabilityCheck: Send + Sync {
    async fn check(&self, url: &str) -> Result<bool>;
}

/// One GET against the target, using the transport's default timeout and
/// redirect policy.
#[derive(Debug, Clone)]
pub struct HttpGate {
    http: Client,
}

impl HttpGate {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Status code of one GET against `url`.
    pub async fn status_of(&self, url: &str) -> Result<StatusCode> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "Reachability check answered");
        Ok(status)
    }
}

#[async_trait]
impl ReachabilityCheck for HttpGate {
    async fn check(&self, url: &str) -> Result<bool> {
        Ok(self.status_of(url).await? == StatusCode::OK)
    }
}
