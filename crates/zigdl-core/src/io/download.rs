//! Mirrored download with streaming SHA256 verification.
//!
//! An artifact is fetched from each mirror in a freshly shuffled order until
//! one attempt produces a body whose digest matches the index. If every
//! mirror fails, the origin URL from the index is tried once and its result
//! is returned as-is. Mirrors are tried one at a time, never in parallel.

use std::borrow::Cow;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use reqwest::Url;
use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use zigdl_schema::ArtifactDescriptor;

use crate::config::Config;
use crate::error::{Error, Result, TransportError};
use crate::io::http::HttpTransport;
use crate::reporter::Reporter;

/// Bytes read from the response per hashing/writing step.
const CHUNK_SIZE: usize = 1024 * 1024;

/// Whether mirrors are consulted before the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorPolicy {
    /// Shuffled mirrors first, origin as the last resort.
    UseMirrors,
    /// Origin only. For artifacts the mirrors do not host.
    OriginOnly,
}

/// A completed, digest-checked download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    /// URL the bytes actually came from.
    pub url: String,
    /// Lowercase hex SHA256 of the body.
    pub digest: String,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
pub struct MirroredDownloader<T, R> {
    transport: T,
    mirrors: Vec<String>,
    reporter: R,
    seed: Option<u64>,
}

impl<T: HttpTransport, R: Reporter> MirroredDownloader<T, R> {
    pub fn new(transport: T, config: &Config, reporter: R) -> Self {
        Self {
            transport,
            mirrors: config.mirrors.clone(),
            reporter,
            seed: None,
        }
    }

    /// Use a fixed shuffle seed so every call tries mirrors in the same
    /// order.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The order mirrors will be tried in by the next download.
    pub fn mirror_order(&self) -> Vec<String> {
        match self.seed {
            Some(seed) => shuffled_mirrors(&self.mirrors, &mut StdRng::seed_from_u64(seed)),
            None => shuffled_mirrors(&self.mirrors, &mut rand::rng()),
        }
    }

    /// Download `artifact` to `dest` and verify its digest.
    ///
    /// With [`MirrorPolicy::UseMirrors`] failures against individual mirrors
    /// are reported and skipped; only the origin attempt's error can surface.
    ///
    /// # Errors
    ///
    /// Whatever the origin attempt fails with: [`Error::Transport`],
    /// [`Error::Integrity`] or [`Error::Io`].
    pub async fn download(
        &self,
        artifact: &ArtifactDescriptor,
        dest: &Path,
        policy: MirrorPolicy,
    ) -> Result<Verified> {
        if policy == MirrorPolicy::UseMirrors {
            let filename = artifact.filename();

            for mirror in self.mirror_order() {
                let url = match mirror_url(&mirror, filename) {
                    Ok(url) => url,
                    Err(e) => {
                        self.reporter.mirror_failed(&mirror, &e.to_string());
                        continue;
                    }
                };

                match self.fetch_and_verify(url.as_str(), artifact, dest).await {
                    Ok(verified) => return Ok(verified),
                    Err(e) => self.reporter.mirror_failed(url.as_str(), &e.to_string()),
                }
            }

            self.reporter.falling_back(&artifact.url);
        }

        self.fetch_and_verify(&artifact.url, artifact, dest).await
    }

    /// One attempt: stream `url` into `dest`, hashing as we go. `dest` is
    /// truncated first and removed again if the attempt fails.
    async fn fetch_and_verify(
        &self,
        url: &str,
        artifact: &ArtifactDescriptor,
        dest: &Path,
    ) -> Result<Verified> {
        let total = artifact.size_hint();
        self.reporter.download_started(url, total);

        let body = self.transport.open(url).await?;

        let (actual, bytes) = match self.stream_to_file(url, body, dest, total).await {
            Ok(done) => done,
            Err(e) => {
                tokio::fs::remove_file(dest).await.ok();
                return Err(e);
            }
        };

        if !artifact.digest.matches(&actual) {
            tokio::fs::remove_file(dest).await.ok();
            return Err(Error::Integrity {
                url: url.to_string(),
                expected: artifact.digest.to_string(),
                actual,
            });
        }

        self.reporter.verified(url, bytes);
        Ok(Verified {
            url: url.to_string(),
            digest: actual,
            bytes,
        })
    }

    async fn stream_to_file(
        &self,
        url: &str,
        mut body: impl AsyncRead + Unpin,
        dest: &Path,
        total: Option<u64>,
    ) -> Result<(String, u64)> {
        let mut file = File::create(dest).await.map_err(|e| Error::io(dest, e))?;
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut downloaded: u64 = 0;

        loop {
            let n = read_chunk(&mut body, &mut buf)
                .await
                .map_err(|source| TransportError::Body {
                    url: url.to_string(),
                    source,
                })?;
            if n == 0 {
                break;
            }

            hasher.update(&buf[..n]);
            file.write_all(&buf[..n])
                .await
                .map_err(|e| Error::io(dest, e))?;
            downloaded += n as u64;
            self.reporter.downloading(url, downloaded, total);
        }

        file.flush().await.map_err(|e| Error::io(dest, e))?;
        Ok((hex::encode(hasher.finalize()), downloaded))
    }
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
async fn read_chunk(reader: &mut (impl AsyncRead + Unpin), buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// A permuted copy of `mirrors`; the input is left untouched.
pub fn shuffled_mirrors<R: Rng + ?Sized>(mirrors: &[String], rng: &mut R) -> Vec<String> {
    let mut order = mirrors.to_vec();
    order.shuffle(rng);
    order
}

/// Candidate URL for `filename` on the mirror rooted at `base`.
///
/// # Errors
///
/// [`Error::InvalidUrl`] if `base` is not an absolute URL.
pub fn mirror_url(base: &str, filename: &str) -> Result<Url> {
    let base: Cow<'_, str> = if base.ends_with('/') {
        Cow::Borrowed(base)
    } else {
        Cow::Owned(format!("{base}/"))
    };

    Url::parse(&base)
        .and_then(|root| root.join(filename))
        .map_err(|e| Error::InvalidUrl {
            url: base.into_owned(),
            reason: e.to_string(),
        })
}
