//! Capture request → form fields.
//!
//! Encoding is sparse: a flag that is off, or a text modifier that is empty,
//! contributes no field at all. The service treats absence as the default, so
//! `"0"` is never sent. Values are not validated here; the service decides what
//! a valid duration token or cookie string is.

use std::borrow::Cow;
use url::form_urlencoded;

use crate::models::CaptureRequest;

/// How one modifier maps onto the wire.
enum Rule {
    /// Sent as `"1"` when true, omitted otherwise.
    Flag(fn(&CaptureRequest) -> bool),
    /// Sent verbatim when present and non-empty.
    Text(fn(&CaptureRequest) -> Option<Cow<'_, str>>),
}

const RULES: &[(&str, Rule)] = &[
    ("capture_all", Rule::Flag(|r| r.capture_all)),
    ("capture_outlinks", Rule::Flag(|r| r.capture_outlinks)),
    ("capture_screenshot", Rule::Flag(|r| r.capture_screenshot)),
    ("delay_wb_availability", Rule::Flag(|r| r.delay_wb_availability)),
    ("force_get", Rule::Flag(|r| r.force_get)),
    ("skip_first_archive", Rule::Flag(|r| r.skip_first_archive)),
    ("if_not_archived_within", Rule::Text(|r| r.freshness())),
    ("outlinks_availability", Rule::Flag(|r| r.outlinks_availability)),
    ("email_result", Rule::Flag(|r| r.email_result)),
    ("capture_cookie", Rule::Text(|r| r.capture_cookie.as_deref().map(Cow::Borrowed))),
    ("use_user_agent", Rule::Text(|r| r.use_user_agent.as_deref().map(Cow::Borrowed))),
];

const FLAG_ON: &str = "1";

/// Ordered wire fields for one submission. `url` is always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSubmission {
    fields: Vec<(&'static str, String)>,
}

impl EncodedSubmission {
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `application/x-www-form-urlencoded` body, fields in order.
    pub fn to_form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter().map(|(name, value)| (*name, value.as_str())))
            .finish()
    }
}

pub fn encode(request: &CaptureRequest) -> EncodedSubmission {
    let mut fields = vec![("url", request.url.clone())];

    for (name, rule) in RULES {
        let value = match rule {
            Rule::Flag(get) => get(request).then(|| FLAG_ON.to_string()),
            Rule::Text(get) => get(request)
                .filter(|value| !value.is_empty())
                .map(Cow::into_owned),
        };

        if let Some(value) = value {
            fields.push((*name, value));
        }
    }

    // Any credentials object, even an empty one, yields both fields.
    if let Some(credentials) = &request.target_credentials {
        fields.push((
            "target_username",
            credentials.username.clone().unwrap_or_default(),
        ));
        fields.push((
            "target_password",
            credentials.password.clone().unwrap_or_default(),
        ));
    }

    EncodedSubmission { fields }
}
