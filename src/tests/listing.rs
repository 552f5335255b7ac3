use url::Url;

use super::StaticFetcher;
use crate::{
    config::{ContentIndex, Messages},
    listing::{self, ListingError, News, Prepared, Shop},
    resolve::Resolver,
};

const PAGE: &str = "https://example.com/pages/news.html";

fn index(news: &[&str], shop: &[&str]) -> ContentIndex {
    ContentIndex {
        news: Some(news.iter().map(|id| id.to_string()).collect()),
        shop: Some(shop.iter().map(|id| id.to_string()).collect()),
    }
}

fn news_file(title: &str, date: &str) -> String {
    format!("---\ntitle: {title}\ndate: {date}\ntags: a, b\n---\n{title} body\n")
}

fn site() -> StaticFetcher {
    StaticFetcher::default()
        .file("https://example.com/content/news/one.md", &news_file("One", "2024-01-02"))
        .file("https://example.com/content/news/two.md", &news_file("Two", "2024-03-04"))
        .file("https://example.com/content/news/three.md", &news_file("Three", "2024-05-06"))
        .file(
            "https://example.com/content/shop/mug.md",
            "---\ncategory: Mugs\ntitle: Mug\nprice: 9\n---\nA mug.",
        )
        .file(
            "https://example.com/content/shop/poster.md",
            "---\ncategory: Posters\ntitle: Poster\ninStock: false\n---\n",
        )
        .file(
            "https://example.com/content/shop/cup.md",
            "---\ncategory: Mugs\ntitle: Cup\n---\n",
        )
}

fn resolver(fetcher: StaticFetcher) -> Resolver<StaticFetcher> {
    Resolver::new(Url::parse(PAGE).unwrap(), fetcher)
}

#[tokio::test]
async fn test_load_keeps_index_order() {
    let resolver = resolver(site());
    let index = index(&["three", "one", "two"], &[]);
    let records = listing::load::<News, _>(&resolver, Some(&index)).await.unwrap();
    let titles = records.iter().map(|r| r.title.as_str()).collect::<Vec<_>>();
    assert_eq!(titles, ["Three", "One", "Two"]);
    assert_eq!(records[1].tags, ["a", "b"]);
    assert_eq!(records[1].content, "One body");
}

#[tokio::test]
async fn test_missing_index_is_an_error() {
    let resolver = resolver(site());
    let error = listing::load::<News, _>(&resolver, None).await.unwrap_err();
    assert!(matches!(error, ListingError::MissingIndex { listing: "news" }));

    let partial = ContentIndex {
        news: Some(vec!["one".into()]),
        shop: None,
    };
    let error = listing::load::<Shop, _>(&resolver, Some(&partial))
        .await
        .unwrap_err();
    assert!(matches!(error, ListingError::MissingIndex { listing: "shop" }));
    assert!(resolver.fetcher().requests().is_empty());
}

#[tokio::test]
async fn test_one_missing_file_fails_the_whole_listing() {
    let resolver = resolver(site());
    let index = index(&["one", "gone", "two"], &[]);

    let error = listing::load::<News, _>(&resolver, Some(&index))
        .await
        .unwrap_err();
    assert!(matches!(error, ListingError::Resolve { ref path, .. } if path == "content/news/gone.md"));

    let prepared = listing::prepare::<News, _>(&resolver, Some(&index), &Messages::default()).await;
    assert_eq!(prepared, Prepared::Failed);
}

#[tokio::test]
async fn test_empty_index_renders_nothing() {
    let resolver = resolver(site());
    let prepared =
        listing::prepare::<Shop, _>(&resolver, Some(&index(&[], &[])), &Messages::default()).await;
    assert_eq!(prepared, Prepared::Empty);
    assert!(resolver.fetcher().requests().is_empty());
}

#[tokio::test]
async fn test_prepare_shop_groups_categories() {
    let resolver = resolver(site());
    let index = index(&[], &["mug", "poster", "cup"]);
    let Prepared::Rendered(html) =
        listing::prepare::<Shop, _>(&resolver, Some(&index), &Messages::default()).await
    else {
        panic!("expected rendered shop");
    };
    let mugs = html.find("<h2>Mugs</h2>").unwrap();
    let mug = html.find("<h3>Mug</h3>").unwrap();
    let cup = html.find("<h3>Cup</h3>").unwrap();
    let posters = html.find("<h2>Posters</h2>").unwrap();
    assert!(mugs < mug && mug < cup && cup < posters);
    assert!(html.contains("goods__item--out-of-stock"));
    assert!(html.contains("$9 USD"));
}
