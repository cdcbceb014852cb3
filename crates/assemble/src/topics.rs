use crate::{NewsFile, RunContext};
use cache::CacheStore;
use feed::topic_names;
use wire::BinaryWriter;

/// One topic bucket: display-name offset, entry count, and the offset of
/// the bucket's slice of the timestamp table.
///
/// Record 0 is reserved and stays all-zero; the seven real categories
/// occupy records 1..=7.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TopicRecord {
    pub text_offset: u32,
    pub article_count: u32,
    pub timestamp_table_offset: u32,
}

impl TopicRecord {
    pub const BYTES: u32 = 12;

    pub(crate) fn encode(&self, w: &mut BinaryWriter) {
        w.put_u32(self.text_offset);
        w.put_u32(self.article_count);
        w.put_u32(self.timestamp_table_offset);
    }
}

/// One row of the rolling-day index: when an article appeared and which
/// article id it was.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimestampRecord {
    pub time: u32,
    pub article_id: u32,
}

impl TimestampRecord {
    pub const BYTES: u32 = 8;

    pub(crate) fn encode(&self, w: &mut BinaryWriter) {
        w.put_u32(self.time);
        w.put_u32(self.article_id);
    }
}

impl NewsFile {
    /// Merges the other 23 hour-slots into the in-memory topic buckets and
    /// collects their titles for scraper-side duplicate suppression.
    pub(crate) fn seed_from_cache(
        &mut self,
        cache: &CacheStore,
        current_hour: u8,
    ) -> Result<(), cache::CacheError> {
        for record in cache.load_other_hours(current_hour)? {
            self.topic_buckets[record.topic.index() + 1].push(TimestampRecord {
                time: record.timestamp,
                article_id: record.id,
            });
            self.prior_titles.push(record.title);
        }

        Ok(())
    }

    /// Writes the topic table, the per-bucket timestamp rows, and the
    /// localized topic names.
    ///
    /// Buckets already hold cached entries plus this run's articles; each
    /// one is sorted newest-first before its rows are appended so the
    /// client lists the latest stories at the top.
    pub(crate) fn build_topic_table(&mut self, ctx: &RunContext) {
        self.header.topic_table_offset = self.current_len();

        let names = topic_names(ctx.language_code);
        let bucket_count = names.len() + 1;

        self.topics = vec![TopicRecord::default(); bucket_count];
        self.header.number_of_topics = bucket_count as u32;

        // record 0 stays zeroed
        for i in 1..bucket_count {
            let offset = self.current_len();
            let mut bucket = std::mem::take(&mut self.topic_buckets[i]);
            bucket.sort_by(|a, b| b.time.cmp(&a.time));

            self.topics[i] = TopicRecord {
                text_offset: 0,
                article_count: bucket.len() as u32,
                timestamp_table_offset: offset,
            };
            self.timestamps.extend(bucket);
        }

        for (i, name) in names.iter().enumerate() {
            let offset = self.current_len();
            self.topics[i + 1].text_offset = offset;
            self.topic_text.push(name);
        }
    }
}
