//! # Feed — article model and the content-source seam
//!
//! Input side of the news container pipeline. A [`Source`] produces a batch
//! of [`Article`] records for one locale; the assembler never sees anything
//! else of the scraper world: no HTML, no HTTP, no geocoding.
//!
//! The concrete scrapers live behind the [`Source`] trait and are selected
//! per locale from [`CountryConfig::source`]. The assembler passes the
//! titles of every article already published this day into
//! [`Source::articles`] so a scraper can drop near-duplicates before they
//! ever reach the container.

use thiserror::Error;

mod config;
mod topic;

pub use config::{Countries, CountryConfig};
pub use topic::{topic_names, Topic, TOPIC_COUNT};

/// One news article as produced by a content source.
///
/// Immutable once handed to the assembler. Optional fields stay `None` when
/// the upstream page had nothing usable; the container encodes sentinels
/// for them rather than dropping the article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Headline shown in menus and tickers.
    pub title: String,
    /// Sanitized body text. `None` for headline-only items.
    pub content: Option<String>,
    /// Category bucket the article belongs to.
    pub topic: Topic,
    /// Geographic point the story is about, if one was resolved.
    pub location: Option<Location>,
    /// Lead image, if the source page carried one.
    pub thumbnail: Option<Thumbnail>,
}

/// A resolved geographic point with a display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// A lead image plus its caption text (caption may be empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub image: Vec<u8>,
    pub caption: String,
}

/// Errors surfaced by a content source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The upstream fetch or parse failed. Aborts the locale's run.
    #[error("feed fetch failed: {0}")]
    Fetch(String),

    /// Reading a local feed fixture failed.
    #[error("feed io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability interface for one locale's content source.
///
/// `prior_titles` carries the titles of every article already cached for
/// the current day; implementations use it to skip stories they already
/// delivered in an earlier hour.
pub trait Source {
    /// Fetches this hour's batch of articles.
    fn articles(&self, prior_titles: &[String]) -> Result<Vec<Article>, SourceError>;

    /// The source's logo image (JPEG bytes, already sized for the client).
    fn logo(&self) -> Vec<u8>;

    /// Copyright line displayed alongside every article.
    fn copyright(&self) -> String;
}

#[cfg(test)]
mod tests;
