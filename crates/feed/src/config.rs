use serde::{Deserialize, Serialize};

/// One locale the generator produces a container for.
///
/// Mirrors one entry of the operator's `countries.json`. The `source` name
/// selects which scraper serves the locale; unknown names fall back to the
/// driver's default source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryConfig {
    #[serde(rename = "countryCode")]
    pub country_code: u8,
    #[serde(rename = "languageCode")]
    pub language_code: u8,
    pub name: String,
    pub language: String,
    pub source: String,
}

/// Top-level shape of `countries.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countries {
    pub countries: Vec<CountryConfig>,
}
