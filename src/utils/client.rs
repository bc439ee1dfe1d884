use std::fmt;
use std::ops::Deref;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::{Client as ReqwestClient, Url};
pub use reqwest::Result;

/// HTTP client bound to one API base URL.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct Client {
    client: ReqwestClient,
    base_url: Url,
    use_mock_data: bool,
}

#[derive(Debug)]
pub enum ClientError {
    InvalidBaseUrl(String),
    InvalidSessionToken,
    Build(reqwest::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(url) => {
                write!(f, "'{url}' cannot be used as an API base URL.")
            }
            Self::InvalidSessionToken => {
                "Session token contains invalid characters.".fmt(f)
            }
            Self::Build(e) => write!(f, "Failed to set up HTTP client: {e}"),
        }
    }
}

impl Client {
    pub const DEFAULT_BASE_URL: &'static str = "https://calculated.gg/api";

    pub fn new(
        base_url: &str,
        session_token: Option<&str>,
        use_mock_data: bool,
    ) -> std::result::Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::InvalidBaseUrl(base_url.to_owned()))?;
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(10))
            .default_headers(Self::make_headers(session_token)?)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            client,
            base_url,
            use_mock_data,
        })
    }

    /// Whether read helpers should answer with canned data instead of
    /// hitting the network.
    pub fn use_mock_data(&self) -> bool {
        self.use_mock_data
    }

    /// Append percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: the base is checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn make_headers(
        session_token: Option<&str>,
    ) -> std::result::Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = session_token {
            let cookie = HeaderValue::from_str(&format!("session={token}"))
                .map_err(|_| ClientError::InvalidSessionToken)?;
            headers.insert(COOKIE, cookie);
        }
        Ok(headers)
    }
}

impl Deref for Client {
    type Target = ReqwestClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let client = Client::new("https://example.com/api", None, false)
            .expect("valid client");
        assert_eq!(
            client.endpoint(&["tag", "late game"]).as_str(),
            "https://example.com/api/tag/late%20game"
        );

        let client = Client::new("http://localhost:8080/", None, false)
            .expect("valid client");
        assert_eq!(
            client.endpoint(&["player", "42", "play_style"]).path(),
            "/player/42/play_style"
        );
    }

    #[test]
    fn test_rejects_bad_base() {
        assert!(matches!(
            Client::new("mailto:someone@example.com", None, false),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            Client::new("not a url", None, false),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_rejects_bad_token() {
        assert!(matches!(
            Client::new(Client::DEFAULT_BASE_URL, Some("a\nb"), false),
            Err(ClientError::InvalidSessionToken)
        ));
    }
}
