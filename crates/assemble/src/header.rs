use crate::time::encode_timestamp;
use crate::RunContext;
use wire::BinaryWriter;

/// Serialized size of the header in bytes.
pub const HEADER_BYTES: u32 = 104;

/// Container format version understood by the client.
const FORMAT_VERSION: u32 = 512;

/// Minutes after the update timestamp at which the client considers the
/// file stale.
const VALIDITY_MINUTES: u32 = 1500;

/// Minutes between client re-downloads.
const DOWNLOAD_INTERVAL_MINUTES: u8 = 30;

/// Download count advertised to the client.
const DOWNLOAD_COUNT: u16 = 480;

/// Language codes offered by the service; unused slots are 0xFF.
const SUPPORTED_LANGUAGES: [u8; 16] = [
    1, 3, 4, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

/// The fixed 104-byte header.
///
/// The first three fields (version, filesize, checksum; 12 bytes) are
/// excluded from the CRC region, which is why the finishing pipeline can
/// patch the checksum without recomputing it over itself.
///
/// Count and offset fields start at zero and are filled by the table
/// builders as their sections land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub filesize: u32,
    pub crc32: u32,
    pub updated_timestamp: u32,
    pub end_timestamp: u32,
    pub country_code: u8,
    pub updated_timestamp_2: u32,
    pub supported_languages: [u8; 16],
    pub language_code: u8,
    pub goo_flag: u8,
    pub show_language_select: u8,
    pub download_interval: u8,
    pub message_offset: u32,
    pub number_of_topics: u32,
    pub topic_table_offset: u32,
    pub number_of_articles: u32,
    pub article_table_offset: u32,
    pub number_of_sources: u32,
    pub source_table_offset: u32,
    pub number_of_locations: u32,
    pub location_table_offset: u32,
    pub number_of_images: u32,
    pub images_table_offset: u32,
    pub download_count: u16,
    pub number_of_headlines: u32,
    pub headlines_table_offset: u32,
}

impl Header {
    /// Builds the header for one run: locale and timestamps from `ctx`,
    /// every count/offset zeroed, checksum zeroed.
    #[must_use]
    pub fn new(ctx: &RunContext) -> Self {
        let updated = encode_timestamp(ctx.now_unix);

        Self {
            version: FORMAT_VERSION,
            filesize: 0,
            crc32: 0,
            updated_timestamp: updated,
            end_timestamp: updated + VALIDITY_MINUTES,
            country_code: ctx.country_code,
            updated_timestamp_2: updated,
            supported_languages: SUPPORTED_LANGUAGES,
            language_code: ctx.language_code,
            goo_flag: 0,
            show_language_select: 0,
            download_interval: DOWNLOAD_INTERVAL_MINUTES,
            message_offset: 0,
            number_of_topics: 0,
            topic_table_offset: 0,
            number_of_articles: 0,
            article_table_offset: 0,
            number_of_sources: 0,
            source_table_offset: 0,
            number_of_locations: 0,
            location_table_offset: 0,
            number_of_images: 0,
            images_table_offset: 0,
            download_count: DOWNLOAD_COUNT,
            number_of_headlines: 0,
            headlines_table_offset: 0,
        }
    }

    /// Serializes the header, explicit padding included.
    pub fn encode(&self, w: &mut BinaryWriter) {
        let before = w.len();

        w.put_u32(self.version);
        w.put_u32(self.filesize);
        w.put_u32(self.crc32);
        w.put_u32(self.updated_timestamp);
        w.put_u32(self.end_timestamp);
        w.put_u8(self.country_code);
        w.put_zeros(3);
        w.put_u32(self.updated_timestamp_2);
        w.put_bytes(&self.supported_languages);
        w.put_u8(self.language_code);
        w.put_u8(self.goo_flag);
        w.put_u8(self.show_language_select);
        w.put_u8(self.download_interval);
        w.put_u32(self.message_offset);
        w.put_u32(self.number_of_topics);
        w.put_u32(self.topic_table_offset);
        w.put_u32(self.number_of_articles);
        w.put_u32(self.article_table_offset);
        w.put_u32(self.number_of_sources);
        w.put_u32(self.source_table_offset);
        w.put_u32(self.number_of_locations);
        w.put_u32(self.location_table_offset);
        w.put_u32(self.number_of_images);
        w.put_u32(self.images_table_offset);
        w.put_u16(self.download_count);
        w.put_zeros(2);
        w.put_u32(self.number_of_headlines);
        w.put_u32(self.headlines_table_offset);

        debug_assert_eq!(w.len() - before, HEADER_BYTES);
    }
}
