use crate::RunContext;
use feed::{Article, Location, Source, SourceError, Thumbnail, Topic};

/// Fixed run clock: 2026-03-01T12:00:00Z.
pub const TEST_NOW: i64 = 1_772_366_400;

pub fn ctx(hour: u8) -> RunContext {
    RunContext {
        now_unix: TEST_NOW,
        hour,
        country_code: 49,
        language_code: 1,
    }
}

pub fn article(title: &str, topic: Topic) -> Article {
    Article {
        title: title.to_string(),
        content: Some(format!("{} body text", title)),
        topic,
        location: None,
        thumbnail: None,
    }
}

pub fn located(title: &str, topic: Topic, lat: f64, lon: f64, place: &str) -> Article {
    Article {
        location: Some(Location {
            latitude: lat,
            longitude: lon,
            name: place.to_string(),
        }),
        ..article(title, topic)
    }
}

pub fn with_thumbnail(mut a: Article, image: &[u8], caption: &str) -> Article {
    a.thumbnail = Some(Thumbnail {
        image: image.to_vec(),
        caption: caption.to_string(),
    });
    a
}

/// Canned in-memory source for driving the assembler without any scraper.
pub struct StubSource {
    pub articles: Vec<Article>,
    pub logo: Vec<u8>,
    pub copyright: String,
}

impl StubSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            logo: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02],
            copyright: "© Test Wire Service".to_string(),
        }
    }
}

impl Source for StubSource {
    fn articles(&self, _prior_titles: &[String]) -> Result<Vec<Article>, SourceError> {
        Ok(self.articles.clone())
    }

    fn logo(&self) -> Vec<u8> {
        self.logo.clone()
    }

    fn copyright(&self) -> String {
        self.copyright.clone()
    }
}

/// Reads a big-endian u32 at `offset`.
pub fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// Decodes `len` bytes at `offset` as big-endian UTF-16 text.
pub fn read_utf16(bytes: &[u8], offset: usize, len: usize) -> String {
    let units: Vec<u16> = bytes[offset..offset + len]
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).unwrap()
}
