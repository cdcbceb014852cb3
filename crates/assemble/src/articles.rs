use crate::locations::NO_INDEX;
use crate::time::encode_timestamp;
use crate::topics::TimestampRecord;
use crate::{NewsFile, RunContext};
use wire::BinaryWriter;

/// One article's fixed metadata record.
///
/// `location_index` and `picture_index` are table indices, not offsets;
/// [`NO_INDEX`] marks an absent reference. Text fields are byte offset /
/// byte size pairs into the article text pool.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArticleRecord {
    pub id: u32,
    pub source_index: u32,
    pub location_index: u32,
    pub picture_timestamp: u32,
    pub picture_index: u32,
    pub published_time: u32,
    pub updated_time: u32,
    pub headline_size: u32,
    pub headline_offset: u32,
    pub body_size: u32,
    pub body_offset: u32,
}

impl ArticleRecord {
    pub const BYTES: u32 = 44;

    pub(crate) fn encode(&self, w: &mut BinaryWriter) {
        w.put_u32(self.id);
        w.put_u32(self.source_index);
        w.put_u32(self.location_index);
        w.put_u32(self.picture_timestamp);
        w.put_u32(self.picture_index);
        w.put_u32(self.published_time);
        w.put_u32(self.updated_time);
        w.put_u32(self.headline_size);
        w.put_u32(self.headline_offset);
        w.put_u32(self.body_size);
        w.put_u32(self.body_offset);
    }
}

impl NewsFile {
    /// Builds the article table in two passes.
    ///
    /// Pass 1 allocates every record: dense 1-based ids, the resolved (or
    /// sentinel) location index, both timestamps set to the run clock, text
    /// fields zeroed. Each fresh article also lands in its topic's
    /// timestamp bucket here. Pass 2 appends title and body to the text
    /// pool and records their offsets, which is only correct once pass 1
    /// has fixed the table's full size.
    pub(crate) fn build_article_table(&mut self, ctx: &RunContext) {
        self.header.article_table_offset = self.current_len();
        let now = encode_timestamp(ctx.now_unix);

        for i in 0..self.input.len() {
            let location = self.input[i].location.clone();
            let location_index = match location {
                Some(ref loc) => self.resolve_location(loc),
                None => NO_INDEX,
            };

            let id = (i + 1) as u32;
            self.articles.push(ArticleRecord {
                id,
                source_index: 0,
                location_index,
                picture_timestamp: 0,
                picture_index: NO_INDEX,
                published_time: now,
                updated_time: now,
                ..ArticleRecord::default()
            });

            let bucket = self.input[i].topic.index() + 1;
            self.topic_buckets[bucket].push(TimestampRecord {
                time: now,
                article_id: id,
            });
        }

        for i in 0..self.input.len() {
            let title = self.input[i].title.clone();
            let body = self.input[i].content.clone().unwrap_or_default();

            let offset = self.current_len();
            let size = self.article_text.push(&title);
            self.articles[i].headline_offset = offset;
            self.articles[i].headline_size = size;

            let offset = self.current_len();
            let size = self.article_text.push(&body);
            self.articles[i].body_offset = offset;
            self.articles[i].body_size = size;
        }

        self.header.number_of_articles = self.articles.len() as u32;
    }
}
