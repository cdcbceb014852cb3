//! # Assemble — the news container builder
//!
//! Turns one hour's worth of [`feed::Article`] records plus the rest of the
//! day's cached metadata into the client's self-describing binary container.
//!
//! ## Container layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ HEADER (104 bytes)                                            │
//! │ version | filesize | crc32 | timestamps | locale | per-table  │
//! │ {count, offset} pairs                                         │
//! ├───────────────────────────────────────────────────────────────┤
//! │ HEADLINES table (8 B/record) + UTF-16 text pool               │
//! ├───────────────────────────────────────────────────────────────┤
//! │ ARTICLES table (44 B/record) + UTF-16 text pool               │
//! │ (title then body, per article)                                │
//! ├───────────────────────────────────────────────────────────────┤
//! │ TOPICS table (12 B/record) + TIMESTAMPS table (8 B/record)    │
//! │ + UTF-16 topic name pool                                      │
//! ├───────────────────────────────────────────────────────────────┤
//! │ SOURCES table (28 B/record) + logo blob + copyright pool      │
//! ├───────────────────────────────────────────────────────────────┤
//! │ LOCATIONS table (16 B/record) + UTF-16 name pool              │
//! ├───────────────────────────────────────────────────────────────┤
//! │ IMAGES table (24 B/record) + picture blobs + caption pool     │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are big-endian. Every offset is absolute from the start of
//! the file and every section is a multiple of 4 bytes long.
//!
//! ## Build order
//!
//! Builders run strictly in emission order because each one's offsets are
//! the total length of everything already accumulated:
//!
//! cache read → fetch → headlines → articles → topics/timestamps →
//! sources → cache save → locations → images → filesize
//!
//! The cache save sits in the middle on purpose: it needs the finalized
//! article ids but must complete before the artifact can be published, and
//! the original generator wrote it between the source and location tables.
//!
//! ## Module responsibilities
//!
//! | Module        | Purpose                                        |
//! |---------------|------------------------------------------------|
//! | [`header`]    | fixed header record                            |
//! | [`headlines`] | ticker projection (first 11 titles)            |
//! | [`articles`]  | article records + title/body text              |
//! | [`topics`]    | rolling-day topic buckets + timestamp rows     |
//! | [`sources`]   | the single source record + logo/copyright      |
//! | [`locations`] | coordinate dedup + fixed-point encoding        |
//! | [`images`]    | thumbnail records + article back-patching      |

mod articles;
mod header;
mod headlines;
mod images;
mod locations;
mod sources;
mod time;
mod topics;

pub use articles::ArticleRecord;
pub use header::{Header, HEADER_BYTES};
pub use headlines::HeadlineRecord;
pub use images::ImageRecord;
pub use locations::{encode_coordinate, LocationRecord, NO_INDEX};
pub use sources::SourceRecord;
pub use time::encode_timestamp;
pub use topics::{TimestampRecord, TopicRecord};

use anyhow::{Context, Result};
use cache::{CacheStore, CachedArticle};
use feed::{Article, Location, Source, TOPIC_COUNT};
use wire::{BinaryWriter, BlobPool, Utf16Pool};

/// Everything one run needs to know about "now" and "where".
///
/// Threaded explicitly into every builder so tests can assemble with
/// synthetic clocks; no builder ever reads the wall clock itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    /// Wall-clock unix seconds the run started at.
    pub now_unix: i64,
    /// Hour-of-day slot (0..=23) this run fills.
    pub hour: u8,
    /// Client country code.
    pub country_code: u8,
    /// Client language code.
    pub language_code: u8,
}

/// The in-memory container: one fixed header plus every table and pool,
/// held as typed records until [`to_bytes`](NewsFile::to_bytes) serializes
/// them in emission order.
#[derive(Debug, Clone)]
pub struct NewsFile {
    /// Fixed header. Public so the finishing pipeline can patch the
    /// checksum field and re-serialize.
    pub header: Header,

    headlines: Vec<HeadlineRecord>,
    headline_text: Utf16Pool,
    articles: Vec<ArticleRecord>,
    article_text: Utf16Pool,
    topics: Vec<TopicRecord>,
    timestamps: Vec<TimestampRecord>,
    topic_text: Utf16Pool,
    sources: Vec<SourceRecord>,
    source_pictures: BlobPool,
    copyright_text: Utf16Pool,
    locations: Vec<LocationRecord>,
    location_text: Utf16Pool,
    images: Vec<ImageRecord>,
    image_data: BlobPool,
    caption_text: Utf16Pool,

    // build-time state, never serialized
    input: Vec<Article>,
    known_locations: Vec<Location>,
    topic_buckets: Vec<Vec<TimestampRecord>>,
    prior_titles: Vec<String>,
}

impl NewsFile {
    /// Creates an empty container for one run. Tables fill in during
    /// [`assemble`](NewsFile::assemble).
    #[must_use]
    pub fn new(ctx: &RunContext) -> Self {
        Self {
            header: Header::new(ctx),
            headlines: Vec::new(),
            headline_text: Utf16Pool::new(),
            articles: Vec::new(),
            article_text: Utf16Pool::new(),
            topics: Vec::new(),
            timestamps: Vec::new(),
            topic_text: Utf16Pool::new(),
            sources: Vec::new(),
            source_pictures: BlobPool::new(),
            copyright_text: Utf16Pool::new(),
            locations: Vec::new(),
            location_text: Utf16Pool::new(),
            images: Vec::new(),
            image_data: BlobPool::new(),
            caption_text: Utf16Pool::new(),
            input: Vec::new(),
            known_locations: Vec::new(),
            topic_buckets: vec![Vec::new(); TOPIC_COUNT + 1],
            prior_titles: Vec::new(),
        }
    }

    /// Runs the full build: reads the other hours' cache, fetches this
    /// hour's articles from `source`, and fills every table in emission
    /// order. Returns the finished container ready for the finishing
    /// pipeline.
    ///
    /// # Errors
    ///
    /// Fails on source fetch errors, a malformed cache slot, or a cache
    /// save failure. There is no partial result; the container is only
    /// returned when every table is complete.
    pub fn assemble(
        ctx: &RunContext,
        source: &dyn Source,
        cache: &CacheStore,
    ) -> Result<NewsFile> {
        let mut file = NewsFile::new(ctx);

        file.seed_from_cache(cache, ctx.hour)
            .context("reading cross-hour cache")?;

        file.input = source
            .articles(&file.prior_titles)
            .context("fetching articles")?;
        tracing::info!(
            articles = file.input.len(),
            prior = file.prior_titles.len(),
            "feed fetched"
        );

        file.build_headlines();
        file.build_article_table(ctx);
        file.build_topic_table(ctx);
        file.build_source_table(source);
        file.save_cache(ctx, cache)
            .context("writing cross-hour cache")?;
        file.build_location_table();
        file.build_images(ctx);

        file.header.filesize = file.current_len();

        tracing::info!(
            filesize = file.header.filesize,
            articles = file.articles.len(),
            locations = file.locations.len(),
            images = file.images.len(),
            "container assembled"
        );
        Ok(file)
    }

    /// Total byte length of the container as accumulated so far.
    ///
    /// Every offset in the format is captured from this value at the moment
    /// the referenced data is appended. Record tables contribute
    /// `count * record size` and pools their padded byte length, so the
    /// computation is constant time no matter how large the container is.
    #[must_use]
    pub fn current_len(&self) -> u32 {
        HEADER_BYTES
            + self.headlines.len() as u32 * HeadlineRecord::BYTES
            + self.headline_text.byte_len()
            + self.articles.len() as u32 * ArticleRecord::BYTES
            + self.article_text.byte_len()
            + self.topics.len() as u32 * TopicRecord::BYTES
            + self.timestamps.len() as u32 * TimestampRecord::BYTES
            + self.topic_text.byte_len()
            + self.sources.len() as u32 * SourceRecord::BYTES
            + self.source_pictures.byte_len()
            + self.copyright_text.byte_len()
            + self.locations.len() as u32 * LocationRecord::BYTES
            + self.location_text.byte_len()
            + self.images.len() as u32 * ImageRecord::BYTES
            + self.image_data.byte_len()
            + self.caption_text.byte_len()
    }

    /// Serializes the whole container in emission order.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = BinaryWriter::with_capacity(self.current_len() as usize);

        self.header.encode(&mut w);
        for record in &self.headlines {
            record.encode(&mut w);
        }
        self.headline_text.encode(&mut w);
        for record in &self.articles {
            record.encode(&mut w);
        }
        self.article_text.encode(&mut w);
        for record in &self.topics {
            record.encode(&mut w);
        }
        for record in &self.timestamps {
            record.encode(&mut w);
        }
        self.topic_text.encode(&mut w);
        for record in &self.sources {
            record.encode(&mut w);
        }
        self.source_pictures.encode(&mut w);
        self.copyright_text.encode(&mut w);
        for record in &self.locations {
            record.encode(&mut w);
        }
        self.location_text.encode(&mut w);
        for record in &self.images {
            record.encode(&mut w);
        }
        self.image_data.encode(&mut w);
        self.caption_text.encode(&mut w);

        debug_assert_eq!(w.len(), self.current_len());
        w.into_bytes()
    }

    /// Builds this run's cache records from the finalized article table and
    /// overwrites the run's own hour slot.
    fn save_cache(&self, ctx: &RunContext, cache: &CacheStore) -> Result<(), cache::CacheError> {
        let now = encode_timestamp(ctx.now_unix);
        let records: Vec<CachedArticle> = self
            .input
            .iter()
            .zip(&self.articles)
            .map(|(article, record)| CachedArticle {
                id: record.id,
                timestamp: now,
                topic: article.topic,
                title: article.title.clone(),
            })
            .collect();

        cache.save(ctx.hour, &records)
    }

    /// Article records in table order.
    #[must_use]
    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    /// Headline records in table order.
    #[must_use]
    pub fn headlines(&self) -> &[HeadlineRecord] {
        &self.headlines
    }

    /// Topic records, bucket 0 first.
    #[must_use]
    pub fn topics(&self) -> &[TopicRecord] {
        &self.topics
    }

    /// Timestamp rows, concatenated bucket by bucket.
    #[must_use]
    pub fn timestamps(&self) -> &[TimestampRecord] {
        &self.timestamps
    }

    /// Source records (always exactly one after assembly).
    #[must_use]
    pub fn sources(&self) -> &[SourceRecord] {
        &self.sources
    }

    /// Deduplicated location records.
    #[must_use]
    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    /// Image records in table order.
    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }
}

#[cfg(test)]
mod tests;
