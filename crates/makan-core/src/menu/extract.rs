//! Menu extraction: clean dish names out of a pasted chat message.
//!
//! Sellers post menus as free text peppered with greetings, prices, phone
//! numbers, and delivery notes. Each line either survives every rejection
//! rule below and becomes a menu item, or is dropped. The thresholds and
//! the keyword blocklist are policy values on [`ExtractRules`]; existing
//! chat groups depend on the defaults, so tests pin them exactly.

/// Longest trimmed line still considered a dish name.
pub const MAX_LINE_CHARS: usize = 30;

/// Smallest word count accepted for a dish name.
pub const MIN_WORDS: usize = 2;

/// Largest word count accepted for a dish name.
pub const MAX_WORDS: usize = 5;

/// Boilerplate vocabulary. A line containing any of these (case-insensitive)
/// is greeting or logistics text, not a dish.
pub const BLOCKED_KEYWORDS: [&str; 12] = [
    "assalamualaikum",
    "wassup",
    "walaikumsalam",
    "menu",
    "servis",
    "penghantaran",
    "menyediakan",
    "delivery",
    "order",
    "close",
    "open",
    "today",
];

/// Staple rice dish assumed present on every menu.
pub const STAPLE_ITEM: &str = "Nasi Putih";

/// Tunable extraction policy. [`ExtractRules::default`] carries the
/// contractual values; changing any of them changes which lines are
/// accepted.
#[derive(Debug, Clone)]
pub struct ExtractRules {
    pub max_line_chars: usize,
    pub min_words: usize,
    pub max_words: usize,
    pub blocked_keywords: Vec<String>,
    pub staple_item: String,
}

impl Default for ExtractRules {
    fn default() -> Self {
        Self {
            max_line_chars: MAX_LINE_CHARS,
            min_words: MIN_WORDS,
            max_words: MAX_WORDS,
            blocked_keywords: BLOCKED_KEYWORDS.iter().map(|kw| (*kw).to_owned()).collect(),
            staple_item: STAPLE_ITEM.to_owned(),
        }
    }
}

impl ExtractRules {
    /// Rejection rules in contractual order. Each returns `true` when the
    /// line survives that rule.
    fn checks(&self) -> [fn(&Self, &str) -> bool; 6] {
        [
            Self::within_length,
            Self::free_of_digits,
            Self::letters_and_spaces_only,
            Self::has_lowercase,
            Self::within_word_window,
            Self::clear_of_keywords,
        ]
    }

    /// True when a trimmed, non-empty line passes every rule.
    pub fn accepts(&self, line: &str) -> bool {
        self.checks().iter().all(|check| check(self, line))
    }

    fn within_length(&self, line: &str) -> bool {
        line.chars().count() <= self.max_line_chars
    }

    /// Digits mark prices, phone numbers, and dates.
    fn free_of_digits(&self, line: &str) -> bool {
        !line.chars().any(|c| c.is_ascii_digit())
    }

    /// Punctuation and emoji mark decorated marketing text.
    fn letters_and_spaces_only(&self, line: &str) -> bool {
        line.chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    }

    /// A line with no lowercase letters is a shouted banner.
    fn has_lowercase(&self, line: &str) -> bool {
        line.chars().any(|c| c.is_ascii_lowercase())
    }

    fn within_word_window(&self, line: &str) -> bool {
        let words = line.split_whitespace().count();
        (self.min_words..=self.max_words).contains(&words)
    }

    fn clear_of_keywords(&self, line: &str) -> bool {
        let lowered = line.to_lowercase();
        !self
            .blocked_keywords
            .iter()
            .any(|kw| lowered.contains(kw.as_str()))
    }
}

/// Extract dish names from a pasted chat message using the default rules.
pub fn extract_menu_items(raw_text: &str) -> Vec<String> {
    extract_with_rules(raw_text, &ExtractRules::default())
}

/// Extract dish names using caller-supplied rules.
///
/// Total over any input: empty or fully-rejected text still yields the
/// staple item. Surviving lines keep their input order and are already
/// trimmed. Duplicate lines stay duplicated, and the staple is prepended
/// unconditionally even when the text lists it again.
pub fn extract_with_rules(raw_text: &str, rules: &ExtractRules) -> Vec<String> {
    let mut items = vec![rules.staple_item.clone()];
    items.extend(
        raw_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && rules.accepts(line))
            .map(str::to_owned),
    );
    items
}
