//! HTML fragments for listings
//!
//! Every record field passes through [`escape`] or [`escape_attr`] before it
//! reaches the markup.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::{
    config::Messages,
    record::{NewsRecord, ProductRecord},
};

pub fn escape(text: &str) -> std::borrow::Cow<'_, str> {
    html_escape::encode_text(text)
}

pub fn escape_attr(text: &str) -> std::borrow::Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// `YYYY-MM-DD` becomes `DD.MM.YYYY`; anything that is not exactly three
/// hyphen-separated parts is returned unchanged.
pub fn format_date(date: &str) -> String {
    let parts = date.split('-').collect::<Vec<_>>();
    match parts.as_slice() {
        [year, month, day] => format!("{day}.{month}.{year}"),
        _ => date.to_owned(),
    }
}

pub fn news_item(article: &NewsRecord) -> String {
    let tags = article
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="news__tag">{}</span>"#, escape(tag)))
        .collect::<String>();
    format!(
        r#"<article class="news__item"><h2>{title}</h2><p>{content}</p><div class="news__meta"><div class="news__tags">{tags}</div><div class="news__date">{date}</div></div></article>"#,
        title = escape(&article.title),
        content = escape(&article.content),
        date = escape(&format_date(&article.date)),
    )
}

pub fn news(articles: &[NewsRecord]) -> String {
    articles.iter().map(news_item).collect()
}

/// Number formatting as a browser prints it: plain digits without a trailing
/// `.0`, exponent notation from `1e+21` and below `1e-6`.
fn format_price(price: f64) -> String {
    let magnitude = price.abs();
    if magnitude == 0.0 {
        return "0".into();
    }
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{price:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    price.to_string()
}

pub fn product_item(product: &ProductRecord, messages: &Messages) -> String {
    let mut class = String::from("goods__item");
    if !product.in_stock {
        class.push_str(" goods__item--out-of-stock");
    }
    if product.featured {
        class.push_str(" goods__item--featured");
    }

    let image = if product.has_image_url() {
        format!(
            r#"<img src="{}" alt="{}">"#,
            escape_attr(&product.image),
            escape_attr(&product.title),
        )
    } else {
        escape(&product.image).into_owned()
    };

    let (disabled, label) = if product.in_stock {
        ("", &messages.add_to_cart)
    } else {
        (" disabled", &messages.out_of_stock)
    };

    let price = format!("${} {}", format_price(product.price), product.currency);

    format!(
        r#"<div class="{class}"><div class="goods__image">{image}</div><h3>{title}</h3><p>{description}</p><div class="goods__price">{price}</div><button class="button button--buy"{disabled}>{label}</button></div>"#,
        title = escape(&product.title),
        description = escape(&product.description),
        price = escape(&price),
        label = escape(label),
    )
}

/// Groups products by category in first-seen order, keeping the relative
/// order of products within each category.
pub fn group_by_category(products: &[ProductRecord]) -> IndexMap<&str, Vec<&ProductRecord>> {
    let mut categories = IndexMap::<&str, Vec<_>>::new();
    for product in products {
        categories
            .entry(product.category.as_str())
            .or_default()
            .push(product);
    }
    categories
}

pub fn shop(products: &[ProductRecord], messages: &Messages) -> String {
    let mut html = String::new();
    for (category, products) in group_by_category(products) {
        let items = products
            .into_iter()
            .map(|product| product_item(product, messages))
            .collect::<String>();
        let _ = write!(
            html,
            r#"<div class="goods__category"><h2>{}</h2><div class="goods__items">{items}</div></div>"#,
            escape(category),
        );
    }
    html
}

/// The muted paragraph used for empty and failed listings.
pub fn notice(message: &str) -> String {
    format!(r#"<p style="opacity: 0.5;">{}</p>"#, escape(message))
}
