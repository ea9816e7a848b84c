//! HTTP transport seam
//!
//! Everything that goes over the network goes through [`Transport`]. The
//! production implementation wraps a reqwest client; tests plug in canned
//! responses.

use crate::config::UserAgentConfig;
use crate::TransportError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::collections::BTreeMap;
use std::time::Duration;

/// A response as the transport saw it, before any crawl policy is applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers, names lowercased, repeated values joined by ", "
    pub headers: BTreeMap<String, String>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Looks up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// Performs a single GET for the crawler
///
/// Implementations report faults below HTTP (bad URL, refused connection,
/// timeout, unreadable body) as [`TransportError`]. Any HTTP status,
/// including errors, is a successful transport result.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport with the crawler's identifying user agent
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        // Reject malformed URLs before reqwest turns them into builder errors
        if let Err(e) = url::Url::parse(url) {
            return Err(TransportError::MalformedUrl {
                url: url.to_string(),
                message: e.to_string(),
            });
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        let body = response.bytes().await.map_err(|e| TransportError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(RawResponse {
            url: final_url,
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Formats the User-Agent header: `Name/Version (+ContactURL; ContactEmail)`
///
/// Contact details are optional; the parenthesized part shrinks to what is
/// configured and disappears when neither is set.
///
/// # Examples
///
/// ```
/// use text_scraper::config::UserAgentConfig;
/// use text_scraper::crawler::user_agent_string;
///
/// let config = UserAgentConfig {
///     crawler_name: "text-scraper".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: Some("https://example.com/bot".to_string()),
///     contact_email: None,
/// };
/// assert_eq!(user_agent_string(&config), "text-scraper/1.0 (+https://example.com/bot)");
/// ```
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    let mut contact = Vec::new();
    if let Some(url) = &config.contact_url {
        contact.push(format!("+{}", url));
    }
    if let Some(email) = &config.contact_email {
        contact.push(email.clone());
    }

    if contact.is_empty() {
        format!("{}/{}", config.crawler_name, config.crawler_version)
    } else {
        format!(
            "{}/{} ({})",
            config.crawler_name,
            config.crawler_version,
            contact.join("; ")
        )
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Maps a reqwest failure onto the transport taxonomy
fn classify_reqwest_error(url: &str, error: reqwest::Error) -> TransportError {
    if error.is_builder() {
        TransportError::MalformedUrl {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        TransportError::Connect {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        TransportError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
