//! # kvconf Client
//!
//! Typed async client for the kvconf HTTP API.
//!
//! Used by the `kvconf` CLI and by anything else that manages configuration
//! remotely, such as a dashboard backend.
//!
//! ```rust,no_run
//! use kvconf_client::ConfigClient;
//!
//! # async fn run() -> kvconf_client::ClientResult<()> {
//! let client = ConfigClient::new("http://localhost:8000")?;
//! client.set("feature.search", "on").await?;
//! for object in client.list_all("feature.*", 50).await? {
//!     println!("{} = {}", object.key, object.value);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod error;

pub use error::{ClientError, ClientResult};
pub use kvconf_core::{ConfigObject, ConfigObjectList, Cursor, DeleteAck, PageQuery};

use kvconf_core::ErrorReply;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for a kvconf server.
#[derive(Debug, Clone)]
pub struct ConfigClient {
    base_url: Url,
    http: Client,
}

impl ConfigClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse or
    /// cannot carry a path.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Creates a client that sends requests through `http`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is unusable.
    pub fn with_client(base_url: &str, http: Client) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { base_url, http })
    }

    /// Returns the server URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Checks that the server and its store are ready.
    pub async fn health(&self) -> ClientResult<()> {
        let response = self.http.get(self.url(&["readyz"])?).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(parse_error(response).await)
        }
    }

    /// Fetches one page.
    pub async fn list(&self, query: &PageQuery) -> ClientResult<ConfigObjectList> {
        let response = self
            .http
            .get(self.url(&["config"])?)
            .query(query)
            .send()
            .await?;
        json_response(response).await
    }

    /// Fetches every object matching `pattern`, `page_size` at a time.
    ///
    /// Cursors are followed until the server reports completion. Keys
    /// written while this runs may or may not be included.
    pub async fn list_all(&self, pattern: &str, page_size: u32) -> ClientResult<Vec<ConfigObject>> {
        let mut objects = Vec::new();
        let mut query = PageQuery::new().with_match(pattern).with_limit(page_size);
        let mut pages = 0usize;

        loop {
            let page = self.list(&query).await?;
            pages += 1;
            objects.extend(page.items);
            if page.offset.is_complete() {
                break;
            }
            query = query.with_offset(page.offset);
        }

        debug!(pattern, pages, count = objects.len(), "Listed all objects");
        Ok(objects)
    }

    /// Reads one object.
    pub async fn get(&self, key: &str) -> ClientResult<ConfigObject> {
        let response = self.http.get(self.url(&["config", key])?).send().await?;
        json_response(response).await
    }

    /// Reads the raw value of one object.
    pub async fn get_raw(&self, key: &str) -> ClientResult<String> {
        let response = self
            .http
            .get(self.url(&["config", key])?)
            .header(ACCEPT, "text/plain")
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(parse_error(response).await)
        }
    }

    /// Creates or overwrites an object.
    pub async fn set(&self, key: &str, value: &str) -> ClientResult<ConfigObject> {
        let response = self
            .http
            .post(self.url(&["config"])?)
            .json(&ConfigObject::new(key, value))
            .send()
            .await?;
        json_response(response).await
    }

    /// Removes an object.
    pub async fn delete(&self, key: &str) -> ClientResult<DeleteAck> {
        let response = self.http.delete(self.url(&["config", key])?).send().await?;
        json_response(response).await
    }

    /// Appends percent-encoded `segments` to the base URL.
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn parse_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    match response.json::<ErrorReply>().await {
        Ok(reply) => ClientError::Api {
            status,
            reason: reply.reason,
        },
        Err(_) => ClientError::Api {
            status,
            reason: format!("HTTP {status}"),
        },
    }
}

async fn json_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(parse_error(response).await)
    }
}
