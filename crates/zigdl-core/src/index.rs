//! Fetching the Zig version index.
//!
//! Ordering and lookups are pure and live on
//! [`VersionCatalog`](zigdl_schema::VersionCatalog); this module only adds
//! the network round trip.

use zigdl_schema::VersionCatalog;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::io::http::HttpTransport;

/// Client for the remote version index.
#[derive(Debug, Clone)]
pub struct VersionIndex<T> {
    transport: T,
    url: String,
}

impl<T: HttpTransport> VersionIndex<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            url: config.index_url.clone(),
        }
    }

    /// Download and parse the index. Every call hits the network.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] if the request fails, [`Error::Parse`] if the
    /// body is not a well-formed index.
    pub async fn fetch(&self) -> Result<VersionCatalog> {
        tracing::debug!(url = %self.url, "Fetching version index");
        let body = self.transport.get(&self.url).await?;
        let catalog: VersionCatalog = serde_json::from_slice(&body).map_err(|source| Error::Parse {
            url: self.url.clone(),
            source,
        })?;
        tracing::debug!("Index lists {} releases", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::io::http::ReqwestTransport;
    use mockito::Server;

    const INDEX: &str = r#"{
        "master": {
            "version": "0.14.0-dev.2+0123abcd",
            "x86_64-linux": {
                "tarball": "https://ziglang.org/builds/zig-linux-x86_64-0.14.0-dev.2+0123abcd.tar.xz",
                "shasum": "1111111111111111111111111111111111111111111111111111111111111111",
                "size": "49000000"
            }
        },
        "0.10.1": {
            "date": "2023-01-19",
            "x86_64-linux": {
                "tarball": "https://ziglang.org/download/0.10.1/zig-linux-x86_64-0.10.1.tar.xz",
                "shasum": "2222222222222222222222222222222222222222222222222222222222222222",
                "size": "44000000"
            }
        },
        "0.9.0": {
            "date": "2021-12-20",
            "x86_64-linux": {
                "tarball": "https://ziglang.org/download/0.9.0/zig-linux-x86_64-0.9.0.tar.xz",
                "shasum": "3333333333333333333333333333333333333333333333333333333333333333",
                "size": "43000000"
            }
        }
    }"#;

    async fn index_for(server: &Server) -> VersionIndex<ReqwestTransport> {
        let config = Config::default().with_index_url(format!("{}/download/index.json", server.url()));
        VersionIndex::new(ReqwestTransport::new(&config).unwrap(), &config)
    }

    #[tokio::test]
    async fn fetch_parses_and_orders_versions() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/download/index.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(INDEX)
            .expect(1)
            .create_async()
            .await;

        let catalog = index_for(&server).await.fetch().await.unwrap();
        let versions: Vec<&str> = catalog.list_versions().into_iter().map(|v| v.as_str()).collect();
        assert_eq!(versions, ["0.9.0", "0.10.1"]);
        assert_eq!(catalog.latest().unwrap().as_str(), "0.10.1");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/download/index.json")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = index_for(&server).await.fetch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn http_failure_is_transport_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/download/index.json")
            .with_status(500)
            .create_async()
            .await;

        let err = index_for(&server).await.fetch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("code: 500"));
    }
}
