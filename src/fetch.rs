//! Content transports
//!
//! [`Fetch`] is the seam between the loaders and wherever the site is served
//! from. A non-success status is a regular [`Response`], not an error; errors
//! are reserved for requests that produced no response at all.

use std::path::PathBuf;

use reqwest::StatusCode;
use tracing::trace;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    /// Empty unless `status` is a success.
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

pub trait Fetch {
    type Error: std::error::Error + Send + Sync + 'static;
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<Response, Self::Error>> + Send;
}

impl<F: Fetch> Fetch for &F {
    type Error = F::Error;
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<Response, Self::Error>> + Send {
        (**self).fetch(url)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error ({url}): {error}")]
    Transport { url: Url, error: reqwest::Error },
    #[error("failed to read local file ({path:?}): {error}")]
    ReadLocal {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("not a local file url: {0}")]
    NotAFile(Url),
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(Url),
}

#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    type Error = Error;
    async fn fetch(&self, url: &Url) -> Result<Response, Self::Error> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|error| Error::Transport {
                url: url.clone(),
                error,
            })?;
        let status = response.status();
        trace!(%url, %status, "http response");
        if !status.is_success() {
            return Ok(Response::status(status));
        }
        let body = response.text().await.map_err(|error| Error::Transport {
            url: url.clone(),
            error,
        })?;
        Ok(Response { status, body })
    }
}

/// Serves `file://` URLs, mapping a missing file to `404 Not Found`.
#[derive(Clone, Copy, Default)]
pub struct FileFetcher;

impl Fetch for FileFetcher {
    type Error = Error;
    async fn fetch(&self, url: &Url) -> Result<Response, Self::Error> {
        let path = url
            .to_file_path()
            .map_err(|()| Error::NotAFile(url.clone()))?;
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(Response::ok(body)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                trace!(?path, "local file not found");
                Ok(Response::status(StatusCode::NOT_FOUND))
            }
            Err(error) => Err(Error::ReadLocal { path, error }),
        }
    }
}

/// Dispatches on the URL scheme.
#[derive(Clone, Default)]
pub struct SiteFetcher {
    pub http: HttpFetcher,
    pub file: FileFetcher,
}

impl Fetch for SiteFetcher {
    type Error = Error;
    async fn fetch(&self, url: &Url) -> Result<Response, Self::Error> {
        match url.scheme() {
            "http" | "https" => self.http.fetch(url).await,
            "file" => self.file.fetch(url).await,
            _ => Err(Error::UnsupportedScheme(url.clone())),
        }
    }
}
