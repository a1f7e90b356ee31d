use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("http status {0}")]
    Status(reqwest::StatusCode),

    #[error("body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("could not decode body as {0}")]
    Decode(String),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Whether retrying the same URL later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connect(_)
            | Self::ConnectTimeout
            | Self::Timeout
            | Self::Body(_)
            | Self::Other(_) => true,
            Self::Status(status) => status.is_server_error(),
            Self::InvalidUrl(_)
            | Self::UnsupportedScheme(_)
            | Self::TooManyRedirects
            | Self::BodyTooLarge { .. }
            | Self::UnsupportedContentType(_)
            | Self::Decode(_) => false,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::Timeout
            }
        } else if err.is_redirect() {
            Self::TooManyRedirects
        } else if let Some(status) = err.status() {
            Self::Status(status)
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}
