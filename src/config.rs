use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path:?}: {error}")]
    Read {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("failed to parse {path:?}: {error}")]
    Parse {
        path: PathBuf,
        error: serde_yaml::Error,
    },
    #[error("invalid page url {url}: {error}")]
    InvalidUrl { url: String, error: url::ParseError },
}

/// Ordered content identifiers for each listing.
///
/// A listing whose sequence is absent cannot be loaded at all, which is
/// distinct from an empty sequence.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
    pub news: Option<Vec<String>>,
    pub shop: Option<Vec<String>>,
}

impl ContentIndex {
    /// Accepts YAML, and therefore JSON.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        read_yaml(path).await
    }
}

/// User-visible strings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Messages {
    pub news_empty: String,
    pub news_error: String,
    pub shop_empty: String,
    pub shop_error: String,
    pub add_to_cart: String,
    pub out_of_stock: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            news_empty: "Новостей пока нет".into(),
            news_error: "Ошибка загрузки новостей".into(),
            shop_empty: "Товаров пока нет".into(),
            shop_error: "Ошибка загрузки товаров".into(),
            add_to_cart: "В корзину".into(),
            out_of_stock: "Нет в наличии".into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ContactConfig {
    pub submit_delay_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
        }
    }
}

fn default_components() -> Vec<String> {
    ["navbar", "footer", "nav-bottom", "pie-nav"]
        .into_iter()
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Deserialize, Debug, Clone)]
pub struct SiteConfig {
    /// Address the page is served from; relative content paths resolve
    /// against it.
    pub page_url: url::Url,
    #[serde(default)]
    pub content_index: Option<ContentIndex>,
    /// Shared fragments, the first one is placed at the top of `<body>`.
    #[serde(default = "default_components")]
    pub components: Vec<String>,
    #[serde(default)]
    pub messages: Messages,
    #[serde(default)]
    pub contact: ContactConfig,
}

impl SiteConfig {
    pub fn new(page_url: url::Url) -> Self {
        Self {
            page_url,
            content_index: None,
            components: default_components(),
            messages: Messages::default(),
            contact: ContactConfig::default(),
        }
    }

    pub async fn load(path: &Path) -> Result<Self, Error> {
        read_yaml(path).await
    }

    pub fn set_page_url(&mut self, url: &str) -> Result<(), Error> {
        self.page_url = url::Url::parse(url).map_err(|error| Error::InvalidUrl {
            url: url.to_owned(),
            error,
        })?;
        Ok(())
    }
}

async fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|error| Error::Read {
            path: path.to_owned(),
            error,
        })?;
    serde_yaml::from_str(&source).map_err(|error| Error::Parse {
        path: path.to_owned(),
        error,
    })
}
