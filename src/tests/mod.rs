use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use url::Url;

use crate::fetch::{Fetch, Response};

mod listing;

#[derive(Debug, thiserror::Error)]
#[error("connection refused: {0}")]
pub(crate) struct Unreachable(String);

/// In-memory site: known URLs answer `200`, unknown ones `404`, and
/// unreachable ones fail without a response.
#[derive(Default)]
pub(crate) struct StaticFetcher {
    files: HashMap<String, String>,
    unreachable: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub(crate) fn file(mut self, url: &str, body: &str) -> Self {
        self.files.insert(url.to_owned(), body.to_owned());
        self
    }

    pub(crate) fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_owned());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetch for StaticFetcher {
    type Error = Unreachable;
    async fn fetch(&self, url: &Url) -> Result<Response, Self::Error> {
        let url = url.as_str();
        self.requests.lock().unwrap().push(url.to_owned());
        if self.unreachable.contains(url) {
            return Err(Unreachable(url.to_owned()));
        }
        Ok(match self.files.get(url) {
            Some(body) => Response::ok(body.clone()),
            None => Response::status(reqwest::StatusCode::NOT_FOUND),
        })
    }
}
