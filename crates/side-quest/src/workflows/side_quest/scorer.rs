/// Words that usually point at a quick fix a technician can do in passing.
pub const STANDARD_KEYWORDS: [&str; 11] = [
    "safe",
    "tv",
    "HDMI",
    "Chromecast",
    "arc",
    "charger",
    "ipad",
    "cable",
    "Airplay",
    "battery",
    "hairdrier",
];

/// Case-insensitive substring keywords that flag side quest material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn standard() -> Self {
        Self::new(STANDARD_KEYWORDS)
    }

    /// Keywords are trimmed and lowercased; blanks and duplicates are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }
        Self {
            keywords: normalized,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, description: &str) -> bool {
        self.first_match(description).is_some()
    }

    /// Substring match, not whole-word: "carchargerxyz" hits "charger".
    pub fn first_match(&self, description: &str) -> Option<&str> {
        let haystack = description.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| haystack.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::standard()
    }
}
