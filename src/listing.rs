//! Shared loader for the news and shop listings
//!
//! A listing is loaded as a whole: every content file is fetched
//! concurrently and a single failure discards the others.

use futures::future::try_join_all;
use tracing::{debug, error};

use crate::{
    config::{ContentIndex, Messages},
    fetch::Fetch,
    frontmatter::{self, Document},
    record::{NewsRecord, ProductRecord},
    render,
    resolve::{self, Resolver},
};

#[derive(Debug, thiserror::Error)]
pub enum ListingError<E> {
    #[error("content index has no {listing} entries")]
    MissingIndex { listing: &'static str },
    #[error("{path}: {source}")]
    Resolve {
        path: String,
        #[source]
        source: resolve::Error<E>,
    },
}

pub trait Listing {
    type Record;
    const NAME: &'static str;
    /// Directory below `content/` holding this listing's files.
    const DIRECTORY: &'static str;

    fn ids(index: &ContentIndex) -> Option<&[String]>;
    fn normalize(document: Document) -> Self::Record;
    fn render(records: &[Self::Record], messages: &Messages) -> String;

    fn path(id: &str) -> String {
        format!("content/{}/{id}.md", Self::DIRECTORY)
    }
}

pub struct News;

impl Listing for News {
    type Record = NewsRecord;
    const NAME: &'static str = "news";
    const DIRECTORY: &'static str = "news";

    fn ids(index: &ContentIndex) -> Option<&[String]> {
        index.news.as_deref()
    }

    fn normalize(document: Document) -> Self::Record {
        NewsRecord::from_document(document)
    }

    fn render(records: &[Self::Record], _: &Messages) -> String {
        render::news(records)
    }
}

pub struct Shop;

impl Listing for Shop {
    type Record = ProductRecord;
    const NAME: &'static str = "shop";
    const DIRECTORY: &'static str = "shop";

    fn ids(index: &ContentIndex) -> Option<&[String]> {
        index.shop.as_deref()
    }

    fn normalize(document: Document) -> Self::Record {
        ProductRecord::from_document(document)
    }

    fn render(records: &[Self::Record], messages: &Messages) -> String {
        render::shop(records, messages)
    }
}

/// Fetches, parses and normalizes every entry of listing `L`, in index order.
pub async fn load<L: Listing, F: Fetch>(
    resolver: &Resolver<F>,
    index: Option<&ContentIndex>,
) -> Result<Vec<L::Record>, ListingError<F::Error>> {
    let ids = index
        .and_then(L::ids)
        .ok_or(ListingError::MissingIndex { listing: L::NAME })?;
    let tasks = ids.iter().map(|id| async move {
        let path = L::path(id);
        let raw = resolver
            .resolve(&path)
            .await
            .map_err(|source| ListingError::Resolve {
                path: path.clone(),
                source,
            })?;
        Ok::<_, ListingError<F::Error>>(L::normalize(frontmatter::parse(&raw)))
    });
    try_join_all(tasks).await
}

/// Outcome of a listing, ready to be placed into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// The index lists no entries.
    Empty,
    Rendered(String),
    /// Loading failed and has already been logged.
    Failed,
}

pub async fn prepare<L: Listing, F: Fetch>(
    resolver: &Resolver<F>,
    index: Option<&ContentIndex>,
    messages: &Messages,
) -> Prepared {
    if index.and_then(L::ids).is_some_and(<[String]>::is_empty) {
        debug!(listing = L::NAME, "no entries");
        return Prepared::Empty;
    }
    match load::<L, F>(resolver, index).await {
        Ok(records) => {
            debug!(listing = L::NAME, count = records.len(), "loaded");
            Prepared::Rendered(L::render(&records, messages))
        }
        Err(e) => {
            error!(listing = L::NAME, %e, "failed to load listing");
            Prepared::Failed
        }
    }
}
