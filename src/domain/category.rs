//! Keyword-based channel categorization.
//!
//! Categories are checked in declaration order and the first one with a
//! keyword contained in the lowercased channel name wins. Several keyword
//! lists overlap ("colors" is both Entertainment and Regional - Bengali), so
//! the order of [`CATEGORY_RULES`] is significant.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    News,
    Entertainment,
    Movies,
    Sports,
    Kids,
    Music,
    Devotional,
    #[serde(rename = "Regional - Tamil")]
    RegionalTamil,
    #[serde(rename = "Regional - Telugu")]
    RegionalTelugu,
    #[serde(rename = "Regional - Malayalam")]
    RegionalMalayalam,
    #[serde(rename = "Regional - Kannada")]
    RegionalKannada,
    #[serde(rename = "Regional - Bengali")]
    RegionalBengali,
    #[serde(rename = "Regional - Marathi")]
    RegionalMarathi,
    #[serde(rename = "Regional - Gujarati")]
    RegionalGujarati,
    #[serde(rename = "Regional - Punjabi")]
    RegionalPunjabi,
    Infotainment,
    English,
    #[default]
    General,
}

/// Ordered rule table. `General` is absent: it is the fallback.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::News,
        &[
            "news", "ndtv", "aaj tak", "india today", "zee news", "republic", "times now", "cnbc",
            "mirror now", "tv9", "news18", "wion", "dd news", "loksabha", "rajyasabha",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "star plus", "zee tv", "sony", "colors", "life ok", "sab tv", "star one", "imagine",
            "bindass", "&tv", "star utsav", "zee anmol", "rishtey",
        ],
    ),
    (
        Category::Movies,
        &[
            "star gold", "zee cinema", "sony max", "b4u movies", "movie", "cinema", "films",
            "zee bollywood", "& pictures", "set max", "mastii", "hit movies", "movies now",
            "romedy now", "mca",
        ],
    ),
    (
        Category::Sports,
        &[
            "star sports", "sony six", "sony ten", "dd sports", "eurosport", "sony esp", "sports",
            "cricket", "kabaddi", "sony liv",
        ],
    ),
    (
        Category::Kids,
        &[
            "cartoon", "disney", "nick", "nickelodeon", "pogo", "hungama", "discovery kids",
            "cbeebies", "baby tv", "kids",
        ],
    ),
    (
        Category::Music,
        &[
            "mtv", "vh1", "9xm", "9x", "zing", "music", "b4u music", "eros now music", "zee music",
        ],
    ),
    (
        Category::Devotional,
        &[
            "aastha", "sanskar", "ishwar", "sadhna", "divya", "god", "bhakti", "spiritual", "peace",
            "qtv", "mta",
        ],
    ),
    (
        Category::RegionalTamil,
        &[
            "sun tv", "vijay", "kalaignar", "puthiya", "jaya", "captain", "raj tv", "star vijay",
            "kolam", "tamil",
        ],
    ),
    (
        Category::RegionalTelugu,
        &[
            "gemini", "maa tv", "tv9 telugu", "ntv", "hmtv", "etv telugu", "zee telugu", "star maa",
            "telugu",
        ],
    ),
    (
        Category::RegionalMalayalam,
        &[
            "asianet", "surya", "mazhavil", "flowers", "safari", "reporter", "media one", "kerala",
            "malayalam",
        ],
    ),
    (
        Category::RegionalKannada,
        &[
            "star suvarna", "zee kannada", "colors kannada", "udaya", "kasturi", "suvarna", "kannada",
        ],
    ),
    (
        Category::RegionalBengali,
        &["star jalsha", "zee bangla", "sony aath", "colors", "bengali", "bangla"],
    ),
    (
        Category::RegionalMarathi,
        &["star pravah", "zee marathi", "colors marathi", "sony marathi", "saam", "marathi"],
    ),
    (Category::RegionalGujarati, &["dd girnar", "gujarati", "vtv", "zee 24 kalak"]),
    (Category::RegionalPunjabi, &["ptc", "punjabi", "mh1"]),
    (
        Category::Infotainment,
        &[
            "discovery", "nat geo", "national geographic", "history", "animal planet", "tlc",
            "travel", "food", "living",
        ],
    ),
    (
        Category::English,
        &[
            "bbc", "cnn", "fox", "espn", "hbo", "star world", "zee café", "movies now", "romedy",
            "wion english",
        ],
    ),
];

impl Category {
    /// All categories in priority order, `General` last.
    pub const ALL: [Category; 18] = [
        Category::News,
        Category::Entertainment,
        Category::Movies,
        Category::Sports,
        Category::Kids,
        Category::Music,
        Category::Devotional,
        Category::RegionalTamil,
        Category::RegionalTelugu,
        Category::RegionalMalayalam,
        Category::RegionalKannada,
        Category::RegionalBengali,
        Category::RegionalMarathi,
        Category::RegionalGujarati,
        Category::RegionalPunjabi,
        Category::Infotainment,
        Category::English,
        Category::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Entertainment => "Entertainment",
            Category::Movies => "Movies",
            Category::Sports => "Sports",
            Category::Kids => "Kids",
            Category::Music => "Music",
            Category::Devotional => "Devotional",
            Category::RegionalTamil => "Regional - Tamil",
            Category::RegionalTelugu => "Regional - Telugu",
            Category::RegionalMalayalam => "Regional - Malayalam",
            Category::RegionalKannada => "Regional - Kannada",
            Category::RegionalBengali => "Regional - Bengali",
            Category::RegionalMarathi => "Regional - Marathi",
            Category::RegionalGujarati => "Regional - Gujarati",
            Category::RegionalPunjabi => "Regional - Punjabi",
            Category::Infotainment => "Infotainment",
            Category::English => "English",
            Category::General => "General",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        CATEGORY_RULES
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a channel name to its category.
pub fn categorize(name: &str) -> Category {
    let name_lower = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| name_lower.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}
