use serde::{Deserialize, Serialize};

/// Number of real topic categories (the container reserves bucket 0 on top
/// of these).
pub const TOPIC_COUNT: usize = 7;

/// News category. The discriminants are the container's wire values and the
/// cache-file encoding; they must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Topic {
    National = 0,
    International = 1,
    Sports = 2,
    Entertainment = 3,
    Business = 4,
    Science = 5,
    Technology = 6,
}

impl Topic {
    /// All topics in wire order.
    pub const ALL: [Topic; TOPIC_COUNT] = [
        Topic::National,
        Topic::International,
        Topic::Sports,
        Topic::Entertainment,
        Topic::Business,
        Topic::Science,
        Topic::Technology,
    ];

    /// The wire discriminant.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<Topic> for u8 {
    fn from(topic: Topic) -> u8 {
        topic as u8
    }
}

impl TryFrom<u8> for Topic {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Topic::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("invalid topic discriminant: {}", value))
    }
}

/// Localized topic display names, in wire order.
///
/// Keyed by the client's language code. Unrecognized codes fall back to
/// English so a misconfigured locale still produces a readable container.
#[must_use]
pub fn topic_names(language_code: u8) -> &'static [&'static str; TOPIC_COUNT] {
    match language_code {
        // Japanese
        0 => &[
            "国内",
            "海外",
            "スポーツ",
            "芸能",
            "経済",
            "科学",
            "テクノロジー",
        ],
        // German
        2 => &[
            "Inland",
            "Ausland",
            "Sport",
            "Unterhaltung",
            "Wirtschaft",
            "Wissenschaft",
            "Technik",
        ],
        // French
        3 => &[
            "National",
            "International",
            "Sports",
            "Divertissement",
            "Économie",
            "Science",
            "Technologie",
        ],
        // Spanish
        4 => &[
            "Nacional",
            "Internacional",
            "Deportes",
            "Entretenimiento",
            "Economía",
            "Ciencia",
            "Tecnología",
        ],
        // Italian
        5 => &[
            "Nazionale",
            "Internazionale",
            "Sport",
            "Spettacolo",
            "Economia",
            "Scienza",
            "Tecnologia",
        ],
        // Dutch
        6 => &[
            "Binnenland",
            "Buitenland",
            "Sport",
            "Entertainment",
            "Economie",
            "Wetenschap",
            "Technologie",
        ],
        // English and anything unknown
        _ => &[
            "National News",
            "International News",
            "Sports",
            "Entertainment",
            "Business",
            "Science",
            "Technology",
        ],
    }
}
