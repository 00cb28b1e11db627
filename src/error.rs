use thiserror::Error;

#[derive(Debug, Error)]
pub enum Spn2Error {
    /// The precheck reached the target but did not get an HTTP 200 back.
    #[error("invalid URL: {url} did not answer with HTTP 200")]
    InvalidTarget { url: String },

    /// Network failure or a body that is not JSON. Never retried.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl Spn2Error {
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, Spn2Error::InvalidTarget { .. })
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Spn2Error::TransportFailure(_))
    }
}

pub type Result<T> = std::result::Result<T, Spn2Error>;
