use crate::NewsFile;
use feed::Location;
use wire::BinaryWriter;

/// Sentinel table index meaning "no reference".
pub const NO_INDEX: u32 = u32::MAX;

/// Degrees per fixed-point unit: 360 / 65536.
const COORDINATE_UNIT: f64 = 0.0054931640625;

/// Coordinates closer than this are the same place.
const COORDINATE_EPSILON: f64 = 1e-9;

/// Map zoom level the client opens location views at.
const ZOOM_LEVEL: u8 = 6;

/// One deduplicated place: fixed-point coordinates, a zoom level, and a
/// name-text reference. The country/region/location code fields exist in
/// the format but are not populated by this generator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocationRecord {
    pub text_offset: u32,
    pub latitude: i16,
    pub longitude: i16,
    pub country_code: u8,
    pub region_code: u8,
    pub location_code: u16,
    pub zoom: u8,
}

impl LocationRecord {
    pub const BYTES: u32 = 16;

    pub(crate) fn encode(&self, w: &mut BinaryWriter) {
        w.put_u32(self.text_offset);
        w.put_i16(self.latitude);
        w.put_i16(self.longitude);
        w.put_u8(self.country_code);
        w.put_u8(self.region_code);
        w.put_u16(self.location_code);
        w.put_u8(self.zoom);
        w.put_zeros(3);
    }
}

/// Converts decimal degrees to the client's 16-bit fixed-point unit,
/// truncating toward zero.
#[must_use]
pub fn encode_coordinate(degrees: f64) -> i16 {
    (degrees / COORDINATE_UNIT) as i16
}

fn coordinates_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= COORDINATE_EPSILON
}

impl NewsFile {
    /// Returns the index of an already-registered location matching `loc`
    /// by coordinates, registering it if it is new.
    ///
    /// A location whose latitude is exactly zero is an unresolved
    /// placeholder (the geocoding collaborator produced nothing) and is
    /// never registered; the article gets the sentinel instead.
    pub(crate) fn resolve_location(&mut self, loc: &Location) -> u32 {
        for (i, known) in self.known_locations.iter().enumerate() {
            if coordinates_equal(known.latitude, loc.latitude)
                && coordinates_equal(known.longitude, loc.longitude)
            {
                return i as u32;
            }
        }

        if loc.latitude != 0.0 {
            self.known_locations.push(loc.clone());
            return (self.known_locations.len() - 1) as u32;
        }

        NO_INDEX
    }

    /// Writes the location table from the registrations collected during
    /// the article pass: records first, then each location's name text.
    pub(crate) fn build_location_table(&mut self) {
        self.header.location_table_offset = self.current_len();

        for loc in &self.known_locations {
            self.locations.push(LocationRecord {
                text_offset: 0,
                latitude: encode_coordinate(loc.latitude),
                longitude: encode_coordinate(loc.longitude),
                country_code: 0,
                region_code: 0,
                location_code: 0,
                zoom: ZOOM_LEVEL,
            });
        }

        for i in 0..self.known_locations.len() {
            let name = self.known_locations[i].name.clone();
            let offset = self.current_len();
            self.locations[i].text_offset = offset;
            self.location_text.push(&name);
        }

        self.header.number_of_locations = self.locations.len() as u32;
    }
}
