//! HTTP transport seam.
//!
//! Components talk to the network only through [`HttpTransport`], which makes
//! the mirror loop testable with an in-memory fake. [`ReqwestTransport`] is
//! the production implementation.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

use crate::config::Config;
use crate::error::{Error, TransportError};

/// A response body being streamed from the server.
pub type BodyReader = Pin<Box<dyn AsyncRead + Send>>;

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` and buffer the whole body. Meant for small JSON documents.
    async fn get(&self, url: &str) -> Result<Bytes, TransportError>;

    /// GET `url` and hand back the body as a stream. The status has already
    /// been checked when this returns.
    async fn open(&self, url: &str) -> Result<BodyReader, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        (**self).get(url).await
    }

    async fn open(&self, url: &str) -> Result<BodyReader, TransportError> {
        (**self).open(url).await
    }
}

/// `reqwest`-backed transport. Sends the configured `User-Agent` and applies
/// the configured timeout to connecting and to every individual read.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.http_timeout)
            .read_timeout(config.http_timeout)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        self.send(url)
            .await?
            .bytes()
            .await
            .map_err(|e| TransportError::Body {
                url: url.to_string(),
                source: std::io::Error::other(e),
            })
    }

    async fn open(&self, url: &str) -> Result<BodyReader, TransportError> {
        let stream = self
            .send(url)
            .await?
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other));
        Ok(Box::pin(StreamReader::new(stream)))
    }
}
