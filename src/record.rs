//! Normalized listing records
//!
//! Each content domain turns a parsed [`Document`] into a typed record,
//! filling defaults for absent fields. Normalization never fails.

use serde::Serialize;

use crate::frontmatter::Document;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsRecord {
    pub title: String,
    /// Raw frontmatter date, reformatted only at render time.
    pub date: String,
    pub tags: Vec<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub category: String,
    pub title: String,
    pub price: f64,
    pub currency: String,
    /// Either an image URL or a placeholder shown as text.
    pub image: String,
    pub in_stock: bool,
    pub featured: bool,
    pub description: String,
}

fn or_default(document: &Document, key: &str, default: &str) -> String {
    document.get(key).unwrap_or(default).to_owned()
}

/// Non-numeric and infinite prices fall back to zero instead of failing the record.
fn parse_price(raw: Option<&str>) -> f64 {
    raw.filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|price| price.is_finite())
        .unwrap_or(0.0)
}

impl NewsRecord {
    pub fn from_document(document: Document) -> Self {
        let tags = document
            .get("tags")
            .map(|tags| tags.split(',').map(|tag| tag.trim().to_owned()).collect())
            .unwrap_or_default();
        Self {
            title: or_default(&document, "title", "Untitled"),
            date: or_default(&document, "date", ""),
            tags,
            content: document.body,
        }
    }
}

impl ProductRecord {
    pub const PLACEHOLDER_IMAGE: &'static str = "[Product]";

    pub fn from_document(document: Document) -> Self {
        Self {
            category: or_default(&document, "category", "Uncategorized"),
            title: or_default(&document, "title", "Untitled Product"),
            price: parse_price(document.get("price")),
            currency: or_default(&document, "currency", "USD"),
            image: or_default(&document, "image", Self::PLACEHOLDER_IMAGE),
            in_stock: document.get("inStock") != Some("false"),
            featured: document.get("featured") == Some("true"),
            description: document.body,
        }
    }

    /// Whether [`Self::image`] points at a resource rather than a placeholder.
    pub fn has_image_url(&self) -> bool {
        ["http", "/", "."]
            .iter()
            .any(|prefix| self.image.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse;

    fn product(header: &str) -> ProductRecord {
        ProductRecord::from_document(parse(&format!("---\n{header}\n---\nDescription")))
    }

    #[test]
    fn test_news_defaults() {
        let news = NewsRecord::from_document(parse("---\n---\n"));
        assert_eq!(news.title, "Untitled");
        assert_eq!(news.date, "");
        assert!(news.tags.is_empty());
        assert_eq!(news.content, "");
    }

    #[test]
    fn test_news_fields() {
        let news = NewsRecord::from_document(parse(
            "---\ntitle: Opening day\ndate: 2024-03-05\ntags: events, shop ,  cats\n---\nWe are open.\nCome by.",
        ));
        assert_eq!(news.title, "Opening day");
        assert_eq!(news.date, "2024-03-05");
        assert_eq!(news.tags, ["events", "shop", "cats"]);
        assert_eq!(news.content, "We are open. Come by.");
    }

    #[test]
    fn test_news_tags_keep_empty_elements() {
        let news = NewsRecord::from_document(parse("---\ntags: a,,b\n---\n"));
        assert_eq!(news.tags, ["a", "", "b"]);
    }

    #[test]
    fn test_product_defaults() {
        let record = ProductRecord::from_document(parse("---\n---\n"));
        assert_eq!(record.category, "Uncategorized");
        assert_eq!(record.title, "Untitled Product");
        assert_eq!(record.price, 0.0);
        assert_eq!(record.currency, "USD");
        assert_eq!(record.image, "[Product]");
        assert!(record.in_stock);
        assert!(!record.featured);
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_product_fields() {
        let record = product(
            "category: Mugs\ntitle: Cat mug\nprice: 12.5\ncurrency: EUR\nimage: ./img/mug.png\nfeatured: true",
        );
        assert_eq!(record.category, "Mugs");
        assert_eq!(record.title, "Cat mug");
        assert_eq!(record.price, 12.5);
        assert_eq!(record.currency, "EUR");
        assert_eq!(record.image, "./img/mug.png");
        assert!(record.featured);
        assert_eq!(record.description, "Description");
    }

    #[test]
    fn test_product_in_stock_is_exact_false_only() {
        assert!(!product("inStock: false").in_stock);
        assert!(product("inStock: maybe").in_stock);
        assert!(product("inStock: False").in_stock);
        assert!(product("inStock: true").in_stock);
        assert!(product("title: x").in_stock);
    }

    #[test]
    fn test_product_featured_is_exact_true_only() {
        assert!(product("featured: true").featured);
        assert!(!product("featured: yes").featured);
        assert!(!product("featured: TRUE").featured);
    }

    #[test]
    fn test_product_non_numeric_price_is_zero() {
        assert_eq!(product("price: cheap").price, 0.0);
        assert_eq!(product("price: NaN").price, 0.0);
        assert_eq!(product("price: inf").price, 0.0);
        assert_eq!(product("price: -Infinity").price, 0.0);
        assert_eq!(product("price: 7").price, 7.0);
    }

    #[test]
    fn test_product_image_url_detection() {
        assert!(product("image: https://cdn.example.com/x.png").has_image_url());
        assert!(product("image: /img/x.png").has_image_url());
        assert!(product("image: ../img/x.png").has_image_url());
        assert!(!product("image: 🐱").has_image_url());
        assert!(!product("title: x").has_image_url());
    }
}
