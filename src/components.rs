//! Shared page components
//!
//! Navigation and footer markup lives in `components/<name>.html` files that
//! are fetched and spliced into every page, after which the links pointing
//! at the current page are highlighted.

use std::sync::LazyLock;

use futures::future::join_all;
use scraper::Selector;
use tracing::{debug, error};
use url::Url;

use crate::{dom::Page, fetch::Fetch, resolve::Resolver};

static NAV: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".nav").unwrap());
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());
static NAV_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".nav__link, .nav-bottom__link, .pie-menu__item").unwrap()
});

const BASE_PATH_PLACEHOLDER: &str = "{basePath}";

/// Link classes and their active modifiers, in priority order.
const LINK_MODIFIERS: [(&str, &str); 3] = [
    ("nav__link", "nav__link--active"),
    ("nav-bottom__link", "nav-bottom__link--active"),
    ("pie-menu__item", "pie-menu__item--active"),
];

/// Prefix leading from the page back to the site root.
pub fn base_path(page_url: &Url) -> &'static str {
    if page_url.path().contains("/pages/") {
        "../"
    } else {
        ""
    }
}

pub fn has_nav(page: &Page) -> bool {
    page.first(&NAV).is_some()
}

/// Markup of one component with `{basePath}` substituted; empty when the
/// component cannot be loaded.
pub async fn load_component<F: Fetch>(resolver: &Resolver<F>, name: &str) -> String {
    let base = base_path(resolver.page_url());
    let reference = format!("{base}components/{name}.html");
    let url = match resolver.page_url().join(&reference) {
        Ok(url) => url,
        Err(e) => {
            error!(component = name, %e, "invalid component url");
            return String::new();
        }
    };
    match resolver.fetcher().fetch(&url).await {
        Ok(response) if response.status.is_success() => {
            response.body.replace(BASE_PATH_PLACEHOLDER, base)
        }
        Ok(response) => {
            error!(component = name, %url, status = %response.status, "failed to load component");
            String::new()
        }
        Err(e) => {
            error!(component = name, %url, %e, "failed to load component");
            String::new()
        }
    }
}

/// Loads every component concurrently, or nothing if the page already
/// carries its navigation.
pub async fn load_all<F: Fetch>(
    resolver: &Resolver<F>,
    names: &[String],
    already_present: bool,
) -> Option<Vec<String>> {
    if already_present {
        debug!("components already present");
        return None;
    }
    Some(join_all(names.iter().map(|name| load_component(resolver, name))).await)
}

/// Places the first fragment at the top of `<body>` and the rest at its end,
/// then highlights the active links.
pub fn inject(page: &mut Page, fragments: &Option<Vec<String>>, page_url: &Url) {
    let Some(fragments) = fragments else {
        return;
    };
    let Some(body) = page.first(&BODY) else {
        error!("page has no body");
        return;
    };
    let mut fragments = fragments.iter();
    if let Some(first) = fragments.next().filter(|html| !html.is_empty()) {
        page.prepend_html(body, first);
    }
    for html in fragments.filter(|html| !html.is_empty()) {
        page.append_html(body, html);
    }
    apply_active_links(page, page_url);
}

fn normalize_path(path: &str) -> String {
    path.to_lowercase().replace('\\', "/")
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Whether a link `href` points at the page at `current_path`.
pub fn is_active(current_path: &str, href: &str) -> bool {
    let current = normalize_path(current_path);
    let current_file = match file_name(&current) {
        "" => "index.html",
        file => file,
    };
    let link = normalize_path(href);
    let link_file = file_name(&link);

    link_file == current_file
        || ((current_file == "index.html" || current.ends_with('/')) && link_file == "index.html")
        || current.ends_with(&link)
        || link.ends_with(&current)
}

pub fn apply_active_links(page: &mut Page, page_url: &Url) {
    let current_path = page_url.path();
    for id in page.all(&NAV_LINKS) {
        let Some(href) = page.attr(id, "href").filter(|href| !href.is_empty()) else {
            continue;
        };
        let active = is_active(current_path, href);
        let classes = page.classes(id);

        let updated: Option<Vec<String>> = if active {
            LINK_MODIFIERS
                .iter()
                .find(|(class, _)| classes.contains(class))
                .filter(|(_, modifier)| !classes.contains(modifier))
                .map(|(_, modifier)| {
                    let mut updated = classes
                        .iter()
                        .map(|class| class.to_string())
                        .collect::<Vec<_>>();
                    updated.push(modifier.to_string());
                    updated
                })
        } else {
            let kept = classes
                .iter()
                .filter(|class| LINK_MODIFIERS.iter().all(|(_, modifier)| modifier != *class))
                .map(|class| class.to_string())
                .collect::<Vec<_>>();
            (kept.len() != classes.len()).then_some(kept)
        };

        if let Some(updated) = updated {
            let updated = updated.iter().map(String::as_str).collect::<Vec<_>>();
            page.set_classes(id, &updated);
        }
    }
}
