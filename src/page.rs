//! Placing prepared listings into a page
//!
//! Pages provide a `.news` container and a `.goods` container, each holding
//! a loading indicator; the shop additionally renders into a `.goods__grid`
//! which is created when missing.

use std::sync::LazyLock;

use scraper::Selector;
use tracing::{debug, info};

use crate::{
    components,
    config::SiteConfig,
    dom::Page,
    fetch::Fetch,
    listing::{self, News, Prepared, Shop},
    render,
    resolve::Resolver,
};

static NEWS: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".news").unwrap());
static NEWS_LOADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".news__loading").unwrap());
static NEWS_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".news__item").unwrap());
static GOODS: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".goods").unwrap());
static GOODS_LOADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".goods__loading").unwrap());
static GOODS_GRID: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".goods__grid").unwrap());

fn remove_all_in(page: &mut Page, scope: ego_tree::NodeId, selector: &Selector) {
    for id in page.find_in(scope, selector) {
        page.remove(id);
    }
}

fn remove_first_in(page: &mut Page, scope: ego_tree::NodeId, selector: &Selector) {
    if let Some(id) = page.first_in(scope, selector) {
        page.remove(id);
    }
}

pub fn mount_news(page: &mut Page, prepared: &Prepared, config: &SiteConfig) {
    let Some(section) = page.first(&NEWS) else {
        debug!("page has no news section");
        return;
    };
    let messages = &config.messages;
    match prepared {
        Prepared::Empty => page.append_html(section, &render::notice(&messages.news_empty)),
        Prepared::Rendered(items) => {
            remove_first_in(page, section, &NEWS_LOADING);
            remove_all_in(page, section, &NEWS_ITEM);
            page.append_html(section, items);
        }
        Prepared::Failed => {
            remove_first_in(page, section, &NEWS_LOADING);
            page.append_html(section, &render::notice(&messages.news_error));
        }
    }
}

pub fn mount_shop(page: &mut Page, prepared: &Prepared, config: &SiteConfig) {
    let Some(section) = page.first(&GOODS) else {
        debug!("page has no shop section");
        return;
    };
    let messages = &config.messages;
    match prepared {
        Prepared::Empty => {
            if let Some(grid) = page.first_in(section, &GOODS_GRID) {
                page.clear_children(grid);
                page.append_html(grid, &render::notice(&messages.shop_empty));
            }
        }
        Prepared::Rendered(categories) => {
            remove_first_in(page, section, &GOODS_LOADING);
            let grid = match page.first_in(section, &GOODS_GRID) {
                Some(grid) => grid,
                None => {
                    page.append_html(section, r#"<div class="goods__grid"></div>"#);
                    let Some(grid) = page.first_in(section, &GOODS_GRID) else {
                        return;
                    };
                    grid
                }
            };
            page.clear_children(grid);
            page.append_html(grid, categories);
        }
        Prepared::Failed => {
            remove_first_in(page, section, &GOODS_LOADING);
            if let Some(grid) = page.first_in(section, &GOODS_GRID) {
                page.append_html(grid, &render::notice(&messages.shop_error));
            }
        }
    }
}

/// Injects shared components and both listings into `source`.
///
/// Components, news and shop are fetched concurrently and fail
/// independently of each other.
pub async fn render_page<F: Fetch>(source: &str, config: &SiteConfig, fetcher: F) -> String {
    let resolver = Resolver::new(config.page_url.clone(), fetcher);
    let index = config.content_index.as_ref();

    let mut page = Page::parse(source);
    let (fragments, news, shop) = futures::join!(
        components::load_all(&resolver, &config.components, components::has_nav(&page)),
        listing::prepare::<News, F>(&resolver, index, &config.messages),
        listing::prepare::<Shop, F>(&resolver, index, &config.messages),
    );

    components::inject(&mut page, &fragments, resolver.page_url());
    mount_news(&mut page, &news, config);
    mount_shop(&mut page, &shop, config);
    info!(page = %config.page_url, "page rendered");
    page.to_html()
}
