//! Client facade: the one entry point for all four operations.
//!
//! Submission runs
//! `Idle → Checking → (Rejected | Encoding → Sending → (Succeeded | Failed))`.
//! The precheck round trip always finishes before the submission round trip starts.
//! Status queries skip the precheck: `Idle → Sending → (Succeeded | Failed)`.
//!
//! Nothing is retried and nothing is shared between calls except the immutable
//! credential pair, so one client can be used from many tasks at once.

use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{ApiConfig, Credentials};
use crate::encoder;
use crate::error::{Result, Spn2Error};
use crate::models::{CaptureRequest, JobStatus, SubmissionAck, SystemStatus, UserStatus};
use crate::normalize;
use crate::precheck::{HttpGate, ReachabilityCheck};
use crate::transport::{HeaderPolicy, Transport};

/// Where a submission is in its lifecycle. Used for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Checking,
    Rejected,
    Encoding,
    Sending,
    Succeeded,
    Failed,
}

impl fmt::Display for SubmitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmitPhase::Checking => "checking",
            SubmitPhase::Rejected => "rejected",
            SubmitPhase::Encoding => "encoding",
            SubmitPhase::Sending => "sending",
            SubmitPhase::Succeeded => "succeeded",
            SubmitPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub struct SpnClient {
    transport: Transport,
    precheck: Arc<dyn ReachabilityCheck>,
}

impl SpnClient {
    /// Build a client with the default HTTP reachability gate.
    pub fn new(api: &ApiConfig, credentials: &Credentials) -> Result<Self> {
        let http = Client::builder().build()?;
        Self::with_http_client(http, api, credentials)
    }

    /// Build a client on top of an existing reqwest client, shared by the
    /// precheck and the archive calls.
    pub fn with_http_client(
        http: Client,
        api: &ApiConfig,
        credentials: &Credentials,
    ) -> Result<Self> {
        let transport = Transport::new(http.clone(), api, credentials)?;
        Ok(Self {
            transport,
            precheck: Arc::new(HttpGate::new(http)),
        })
    }

    /// Replace the reachability gate.
    pub fn with_precheck(mut self, precheck: impl ReachabilityCheck + 'static) -> Self {
        self.precheck = Arc::new(precheck);
        self
    }

    /// Ask the archive to capture `request.url`.
    ///
    /// The target is checked first. Anything but HTTP 200 yields
    /// [`Spn2Error::InvalidTarget`] and the archive is never contacted; a check
    /// that cannot connect yields [`Spn2Error::TransportFailure`].
    pub async fn submit(&self, request: &CaptureRequest) -> Result<SubmissionAck> {
        let url = request.url.as_str();

        debug!(url, phase = %SubmitPhase::Checking, "Submission phase");
        if !self.precheck.check(url).await? {
            warn!(url, phase = %SubmitPhase::Rejected, "Target failed reachability check");
            return Err(Spn2Error::InvalidTarget {
                url: url.to_string(),
            });
        }

        debug!(url, phase = %SubmitPhase::Encoding, "Submission phase");
        let submission = encoder::encode(request);

        debug!(url, phase = %SubmitPhase::Sending, "Submission phase");
        let raw = match self.transport.submit(&submission).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(url, phase = %SubmitPhase::Failed, error = %e, "Submission failed");
                return Err(e);
            }
        };

        let ack = normalize::submission_ack(&raw);
        info!(
            url,
            phase = %SubmitPhase::Succeeded,
            job_id = ack.job_id.as_deref().unwrap_or("-"),
            status = ack.status.as_deref().unwrap_or("-"),
            "Capture submitted"
        );
        Ok(ack)
    }

    /// Current state of a capture job. Public endpoint, no credentials sent.
    pub async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        let raw = self.transport.status(job_id, HeaderPolicy::Public).await?;
        Ok(normalize::job_status(&raw))
    }

    /// Service-wide queue depths. Public endpoint, no credentials sent.
    pub async fn system_status(&self) -> Result<SystemStatus> {
        let raw = self.transport.status("system", HeaderPolicy::Public).await?;
        Ok(normalize::system_status(&raw))
    }

    /// Quota of the account behind the credentials.
    pub async fn user_status(&self) -> Result<UserStatus> {
        let raw = self
            .transport
            .status("user", HeaderPolicy::AuthorizationOnly)
            .await?;
        Ok(normalize::user_status(&raw))
    }
}
