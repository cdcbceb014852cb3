use crate::BinaryWriter;

/// UTF-16 text pool with per-entry null termination and 4-byte alignment.
///
/// Entries are stored as 16-bit code units. After each entry the pool
/// appends one zero unit as terminator, then zero units until the pool's
/// byte length is a multiple of 4. Because every section of the container
/// is itself a multiple of 4 bytes, the pool's local alignment equals the
/// alignment of the full stream.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Utf16Pool {
    units: Vec<u16>,
}

impl Utf16Pool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte length of the pool (two bytes per unit).
    #[must_use]
    pub fn byte_len(&self) -> u32 {
        (self.units.len() * 2) as u32
    }

    /// Encodes `text`, appends it with terminator and padding, and returns
    /// the encoded size in bytes (terminator and padding excluded).
    ///
    /// An empty string still emits the terminator and padding, so callers
    /// can record an offset for it unconditionally.
    pub fn push(&mut self, text: &str) -> u32 {
        let before = self.units.len();
        self.units.extend(text.encode_utf16());
        let size = ((self.units.len() - before) * 2) as u32;

        // terminator, then pad to a 4-byte boundary
        self.units.push(0);
        while self.byte_len() % 4 != 0 {
            self.units.push(0);
        }

        size
    }

    /// Serializes every unit big-endian into `w`.
    pub fn encode(&self, w: &mut BinaryWriter) {
        for &unit in &self.units {
            w.put_u16(unit);
        }
    }
}

/// Raw byte pool with 4-byte alignment and no terminators.
///
/// Used for image data: JPEG logos and article pictures are appended
/// verbatim and padded with zero bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlobPool {
    bytes: Vec<u8>,
}

impl BlobPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte length of the pool, padding included.
    #[must_use]
    pub fn byte_len(&self) -> u32 {
        self.bytes.len() as u32
    }

    /// Appends `blob` followed by zero padding to a 4-byte boundary and
    /// returns the blob's size in bytes (padding excluded).
    pub fn push(&mut self, blob: &[u8]) -> u32 {
        self.bytes.extend_from_slice(blob);
        while self.bytes.len() % 4 != 0 {
            self.bytes.push(0);
        }

        blob.len() as u32
    }

    /// Serializes the pool bytes into `w`.
    pub fn encode(&self, w: &mut BinaryWriter) {
        w.put_bytes(&self.bytes);
    }
}
