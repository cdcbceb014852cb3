use feed::{Article, Location, Source, SourceError, Thumbnail, Topic};
use serde::Deserialize;
use std::path::Path;

/// On-disk shape of one pre-fetched feed file: `{feed_dir}/{name}.json`.
///
/// Image fields reference files relative to the feed directory rather than
/// embedding bytes in the JSON.
#[derive(Debug, Deserialize)]
struct FeedFile {
    logo: Option<String>,
    copyright: String,
    articles: Vec<FeedArticle>,
}

#[derive(Debug, Deserialize)]
struct FeedArticle {
    title: String,
    content: Option<String>,
    topic: Topic,
    location: Option<FeedLocation>,
    image: Option<String>,
    caption: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedLocation {
    latitude: f64,
    longitude: f64,
    name: String,
}

/// A [`Source`] backed by a pre-fetched feed file.
///
/// The feed and its referenced image files are loaded eagerly at open time
/// so that `logo()` and `copyright()` can stay infallible, matching the
/// scraper contract.
#[derive(Debug)]
pub struct FileFeed {
    articles: Vec<Article>,
    logo: Vec<u8>,
    copyright: String,
}

impl FileFeed {
    /// Loads `{dir}/{name}.json` and every image file it references.
    pub fn open(dir: &Path, name: &str) -> Result<Self, SourceError> {
        let path = dir.join(format!("{}.json", name));
        let raw = std::fs::read_to_string(&path)?;
        let parsed: FeedFile = serde_json::from_str(&raw)
            .map_err(|err| SourceError::Fetch(format!("{}: {}", path.display(), err)))?;

        let logo = match &parsed.logo {
            Some(rel) => std::fs::read(dir.join(rel))?,
            None => Vec::new(),
        };

        let mut articles = Vec::with_capacity(parsed.articles.len());
        for entry in parsed.articles {
            articles.push(entry.into_article(dir)?);
        }

        Ok(Self {
            articles,
            logo,
            copyright: parsed.copyright,
        })
    }
}

impl FeedArticle {
    fn into_article(self, dir: &Path) -> Result<Article, SourceError> {
        let thumbnail = match self.image {
            Some(rel) => Some(Thumbnail {
                image: std::fs::read(dir.join(&rel))?,
                caption: self.caption.unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Article {
            title: self.title,
            content: self.content,
            topic: self.topic,
            location: self.location.map(|loc| Location {
                latitude: loc.latitude,
                longitude: loc.longitude,
                name: loc.name,
            }),
            thumbnail,
        })
    }
}

impl Source for FileFeed {
    /// Returns the feed's articles, dropping any whose title matches one
    /// already published this day. Fuzzy near-duplicate detection belongs
    /// to the live scrapers; a pre-fetched feed only needs exact matching.
    fn articles(&self, prior_titles: &[String]) -> Result<Vec<Article>, SourceError> {
        Ok(self
            .articles
            .iter()
            .filter(|article| !prior_titles.contains(&article.title))
            .cloned()
            .collect())
    }

    fn logo(&self) -> Vec<u8> {
        self.logo.clone()
    }

    fn copyright(&self) -> String {
        self.copyright.clone()
    }
}
