//! Fetch-with-fallback resolution of relative content paths
//!
//! The same static deployment may be served from a domain root or below a
//! repository-name subpath, so a relative path is tried against a short,
//! fixed list of candidate URLs.

use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::fetch::Fetch;

#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: Url,
        #[source]
        source: E,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: Url, status: StatusCode },
    #[error("failed to fetch {path}")]
    Exhausted { path: String },
}

pub struct Resolver<F> {
    page_url: Url,
    fetcher: F,
}

impl<F> Resolver<F> {
    pub fn new(page_url: Url, fetcher: F) -> Self {
        Self { page_url, fetcher }
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Candidate URLs for `relative`, in the order they are tried.
    ///
    /// 1. `relative` next to the page
    /// 2. `relative` one directory up
    /// 3. `relative` below the first segment of the page path
    /// 4. `relative` at the site root
    pub fn candidates(&self, relative: &str) -> Vec<Url> {
        let mut references = vec![relative.to_owned(), format!("../{relative}")];
        if let Some(first) = self
            .page_url
            .path_segments()
            .and_then(|mut segments| segments.find(|segment| !segment.is_empty()))
        {
            references.push(format!("/{first}/{relative}"));
        }
        references.push(format!("/{relative}"));

        references
            .iter()
            .filter_map(|reference| {
                self.page_url
                    .join(reference)
                    .inspect_err(|error| debug!(%error, %reference, "skipping candidate"))
                    .ok()
            })
            .collect()
    }
}

impl<F: Fetch> Resolver<F> {
    /// Text of the first candidate answering with a success status.
    ///
    /// Failures only advance to the next candidate; once all are exhausted
    /// the last one is returned.
    pub async fn resolve(&self, relative: &str) -> Result<String, Error<F::Error>> {
        let mut last_error = None;
        for url in self.candidates(relative) {
            match self.fetcher.fetch(&url).await {
                Ok(response) if response.status.is_success() => {
                    debug!(%url, "resolved");
                    return Ok(response.body);
                }
                Ok(response) => {
                    debug!(%url, status = %response.status, "candidate rejected");
                    last_error = Some(Error::Status {
                        url,
                        status: response.status,
                    });
                }
                Err(source) => {
                    debug!(%url, error = %source, "candidate failed");
                    last_error = Some(Error::Fetch { url, source });
                }
            }
        }
        Err(last_error.unwrap_or_else(|| Error::Exhausted {
            path: relative.to_owned(),
        }))
    }
}
