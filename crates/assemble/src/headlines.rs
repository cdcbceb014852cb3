use crate::NewsFile;
use wire::BinaryWriter;

/// Most headlines the client's menu ticker can show.
const MAX_HEADLINES: usize = 11;

/// One ticker entry: a size/offset pair into the headline text pool.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeadlineRecord {
    pub size: u32,
    pub offset: u32,
}

impl HeadlineRecord {
    pub const BYTES: u32 = 8;

    pub(crate) fn encode(&self, w: &mut BinaryWriter) {
        w.put_u32(self.size);
        w.put_u32(self.offset);
    }
}

impl NewsFile {
    /// Projects the first articles (input order, at most 11) onto the
    /// ticker table.
    pub(crate) fn build_headlines(&mut self) {
        self.header.headlines_table_offset = self.current_len();

        let count = self.input.len().min(MAX_HEADLINES);

        // Allocate the whole table first so each text offset accounts for
        // every record, not just the ones already filled.
        self.headlines = vec![HeadlineRecord::default(); count];

        for i in 0..count {
            let title = self.input[i].title.clone();
            let offset = self.current_len();
            let size = self.headline_text.push(&title);
            self.headlines[i] = HeadlineRecord { size, offset };
        }

        self.header.number_of_headlines = count as u32;
    }
}
