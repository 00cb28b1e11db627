//! Authenticated HTTP exchange with the archive service.
//!
//! One round trip per call, no retry. The header set depends on the endpoint:
//!
//! | Endpoint                 | Fixed headers | `authorization` |
//! |--------------------------|---------------|-----------------|
//! | `POST <base>`            | yes           | yes             |
//! | `GET <base>/status/<id>` | no            | no              |
//! | `GET <base>/status/system` | no          | no              |
//! | `GET <base>/status/user` | no            | yes             |
//!
//! The user-status endpoint only gets the authorization header. That matches
//! what the service expects and is kept as is.

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::{ApiConfig, Credentials};
use crate::encoder::EncodedSubmission;
use crate::error::{Result, Spn2Error};

/// Which headers go on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Nothing added.
    Public,
    /// `authorization` only.
    AuthorizationOnly,
    /// Fixed header set plus `authorization`.
    FixedWithAuthorization,
}

#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    endpoint: Url,
    fixed_headers: HeaderMap,
    authorization: HeaderValue,
}

impl Transport {
    pub fn new(http: Client, api: &ApiConfig, credentials: &Credentials) -> Result<Self> {
        let endpoint = Url::parse(&api.base_url)?;
        if endpoint.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        let mut fixed_headers = HeaderMap::new();
        for (name, value) in &api.fixed_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Spn2Error::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Spn2Error::InvalidHeader(format!("{name}: {e}")))?;
            fixed_headers.insert(name, value);
        }

        let mut authorization = HeaderValue::from_str(&credentials.authorization())
            .map_err(|e| Spn2Error::InvalidHeader(format!("authorization: {e}")))?;
        authorization.set_sensitive(true);

        Ok(Self {
            http,
            endpoint,
            fixed_headers,
            authorization,
        })
    }

    /// `<endpoint>/status/<segment>`, with `segment` percent-encoded as one path segment.
    pub fn status_url(&self, segment: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| Spn2Error::from(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push("status")
            .push(segment);
        Ok(url)
    }

    fn headers(&self, policy: HeaderPolicy) -> HeaderMap {
        let mut headers = match policy {
            HeaderPolicy::FixedWithAuthorization => self.fixed_headers.clone(),
            HeaderPolicy::Public | HeaderPolicy::AuthorizationOnly => HeaderMap::new(),
        };
        if policy != HeaderPolicy::Public {
            headers.insert(AUTHORIZATION, self.authorization.clone());
        }
        headers
    }

    /// POST a capture to the submission endpoint.
    pub async fn submit(&self, submission: &EncodedSubmission) -> Result<Value> {
        debug!(endpoint = %self.endpoint, fields = submission.len(), "Submitting capture");

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(self.headers(HeaderPolicy::FixedWithAuthorization))
            .body(submission.to_form_body())
            .send()
            .await?;

        debug!(status = response.status().as_u16(), "Submission answered");
        Ok(response.json::<Value>().await?)
    }

    /// GET one of the status endpoints.
    pub async fn status(&self, segment: &str, policy: HeaderPolicy) -> Result<Value> {
        let url = self.status_url(segment)?;
        debug!(%url, ?policy, "Querying status");

        let response = self.http.get(url).headers(self.headers(policy)).send().await?;

        debug!(status = response.status().as_u16(), "Status answered");
        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> Transport {
        let api = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        Transport::new(Client::new(), &api, &Credentials::new("key", "secret")).unwrap()
    }

    #[test]
    fn test_status_url_variants() {
        let transport = transport("https://web.archive.org/save");

        assert_eq!(
            transport.status_url("system").unwrap().as_str(),
            "https://web.archive.org/save/status/system"
        );
        assert_eq!(
            transport.status_url("spn2-abc").unwrap().as_str(),
            "https://web.archive.org/save/status/spn2-abc"
        );
    }

    #[test]
    fn test_status_url_trailing_slash_and_escaping() {
        let transport = transport("https://web.archive.org/save/");

        assert_eq!(
            transport.status_url("a/b").unwrap().as_str(),
            "https://web.archive.org/save/status/a%2Fb"
        );
    }

    #[test]
    fn test_header_policies() {
        let transport = transport("https://web.archive.org/save");

        let public = transport.headers(HeaderPolicy::Public);
        assert!(public.is_empty());

        let auth_only = transport.headers(HeaderPolicy::AuthorizationOnly);
        assert_eq!(auth_only.len(), 1);
        assert_eq!(auth_only[AUTHORIZATION], "LOW key:secret");

        let full = transport.headers(HeaderPolicy::FixedWithAuthorization);
        assert_eq!(full[AUTHORIZATION], "LOW key:secret");
        assert_eq!(full[reqwest::header::ACCEPT], "application/json");
        assert_eq!(
            full[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_rejects_unparseable_endpoint() {
        let api = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let result = Transport::new(Client::new(), &api, &Credentials::new("k", "s"));

        assert!(matches!(result, Err(Spn2Error::InvalidEndpoint(_))));
    }

    #[test]
    fn test_rejects_credentials_that_are_not_header_safe() {
        let result = Transport::new(
            Client::new(),
            &ApiConfig::default(),
            &Credentials::new("key\n", "secret"),
        );

        assert!(matches!(result, Err(Spn2Error::InvalidHeader(_))));
    }
}
