use crate::NewsFile;
use feed::Source;
use wire::BinaryWriter;

/// The single record describing the locale's content source: logo blob and
/// copyright text, each as a size/offset pair. The name fields exist in
/// the format but the client never renders them, so they stay zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceRecord {
    pub logo_id: u8,
    pub position: u8,
    pub picture_size: u32,
    pub picture_offset: u32,
    pub name_size: u32,
    pub name_offset: u32,
    pub copyright_size: u32,
    pub copyright_offset: u32,
}

impl SourceRecord {
    pub const BYTES: u32 = 28;

    pub(crate) fn encode(&self, w: &mut BinaryWriter) {
        w.put_u8(self.logo_id);
        w.put_u8(self.position);
        w.put_zeros(2);
        w.put_u32(self.picture_size);
        w.put_u32(self.picture_offset);
        w.put_u32(self.name_size);
        w.put_u32(self.name_offset);
        w.put_u32(self.copyright_size);
        w.put_u32(self.copyright_offset);
    }
}

impl NewsFile {
    /// Writes the source table: one record, the logo blob, then the
    /// copyright text.
    pub(crate) fn build_source_table(&mut self, source: &dyn Source) {
        self.header.source_table_offset = self.current_len();

        let logo = source.logo();
        let copyright = source.copyright();

        self.sources.push(SourceRecord {
            logo_id: 0,
            position: 1,
            ..SourceRecord::default()
        });

        let offset = self.current_len();
        let size = self.source_pictures.push(&logo);
        self.sources[0].picture_offset = offset;
        self.sources[0].picture_size = size;

        let offset = self.current_len();
        let size = self.copyright_text.push(&copyright);
        self.sources[0].copyright_offset = offset;
        self.sources[0].copyright_size = size;

        self.header.number_of_sources = 1;
    }
}
