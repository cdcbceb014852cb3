use crate::locations::NO_INDEX;
use crate::time::encode_timestamp;
use crate::{NewsFile, RunContext};
use wire::BinaryWriter;

/// One thumbnail: credit (unused), caption, and picture references. Images
/// without captions keep caption size/offset at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImageRecord {
    pub credit_size: u32,
    pub credit_offset: u32,
    pub caption_size: u32,
    pub caption_offset: u32,
    pub picture_size: u32,
    pub picture_offset: u32,
}

impl ImageRecord {
    pub const BYTES: u32 = 24;

    pub(crate) fn encode(&self, w: &mut BinaryWriter) {
        w.put_u32(self.credit_size);
        w.put_u32(self.credit_offset);
        w.put_u32(self.caption_size);
        w.put_u32(self.caption_offset);
        w.put_u32(self.picture_size);
        w.put_u32(self.picture_offset);
    }
}

impl NewsFile {
    /// Builds the image table from articles carrying a non-empty thumbnail.
    ///
    /// Three passes over the input, all in article order: allocate one
    /// record per image, append the picture bytes while back-patching the
    /// owning article's picture index and timestamp, then append the
    /// captions that exist. Articles without a thumbnail keep the sentinel
    /// index and never touch this table.
    pub(crate) fn build_images(&mut self, ctx: &RunContext) {
        self.header.images_table_offset = self.current_len();

        for article in &self.input {
            let Some(thumb) = &article.thumbnail else {
                continue;
            };
            if thumb.image.is_empty() {
                continue;
            }

            self.images.push(ImageRecord {
                picture_size: thumb.image.len() as u32,
                ..ImageRecord::default()
            });
        }

        let now = encode_timestamp(ctx.now_unix);
        let mut image_index = 0usize;
        for i in 0..self.input.len() {
            let image = match &self.input[i].thumbnail {
                Some(thumb) if !thumb.image.is_empty() => thumb.image.clone(),
                _ => continue,
            };

            let offset = self.current_len();
            self.image_data.push(&image);
            self.images[image_index].picture_offset = offset;

            debug_assert_eq!(self.articles[i].picture_index, NO_INDEX);
            self.articles[i].picture_index = image_index as u32;
            self.articles[i].picture_timestamp = now;
            image_index += 1;
        }

        let mut image_index = 0usize;
        for article in &self.input {
            let caption = match &article.thumbnail {
                Some(thumb) if !thumb.image.is_empty() => thumb.caption.clone(),
                _ => continue,
            };
            if caption.is_empty() {
                image_index += 1;
                continue;
            }

            let offset = self.current_len();
            let size = self.caption_text.push(&caption);
            self.images[image_index].caption_offset = offset;
            self.images[image_index].caption_size = size;
            image_index += 1;
        }

        self.header.number_of_images = self.images.len() as u32;
    }
}
