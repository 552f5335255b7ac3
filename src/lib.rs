pub mod components;
pub mod config;
pub mod contact;
pub mod dom;
pub mod fetch;
pub mod frontmatter;
pub mod listing;
pub mod page;
pub mod record;
pub mod render;
pub mod resolve;

#[cfg(test)]
mod tests;
