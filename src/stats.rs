//! Word frequencies and rare words.
//!
//! [WordCounts] counts every token of every accepted text, per language.
//! Once a run is over, it is consumed read-only by [WordCounts::rare_words]
//! and [WordCounts::common_rare_words] to build a diagnostic report.
//!
//! A word is rare when it has been seen exactly once, is made of letters only,
//! and has between 8 and 10 characters (bounds excluded: 7 and 11).
use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use unic_ucd::GeneralCategory;

use crate::lang::Language;

/// Words shorter than this are never rare.
pub const RARE_MIN_EXCLUSIVE: usize = 7;
/// Words longer than this are never rare.
pub const RARE_MAX_EXCLUSIVE: usize = 11;

/// Rare words of a language, sorted.
pub type RareWords = BTreeSet<String>;

/// Per-language word counts.
///
/// The table only grows: there is no way to remove a word.
#[derive(Debug, Default)]
pub struct WordCounts {
    counts: HashMap<Language, HashMap<String, u64>>,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add 1 to the count of `word` in `lang`.
    /// Creates the entry if the word is not counted yet.
    #[inline]
    pub fn record(&mut self, word: &str, lang: Language) {
        let words = self.counts.entry(lang).or_default();
        match words.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                words.insert(word.to_string(), 1);
            }
        }
    }

    /// Record each whitespace separated token of a normalized text.
    pub fn record_text(&mut self, text: &str, lang: Language) {
        text.split_whitespace()
            .for_each(|word| self.record(word, lang));
    }

    /// Number of occurrences of `word` in `lang` (0 if unseen).
    pub fn count(&self, word: &str, lang: Language) -> u64 {
        self.counts
            .get(&lang)
            .and_then(|words| words.get(word))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct words seen in `lang`.
    pub fn unique_words(&self, lang: Language) -> usize {
        self.counts.get(&lang).map_or(0, HashMap::len)
    }

    /// Total number of tokens seen in `lang`.
    pub fn total_words(&self, lang: Language) -> u64 {
        self.counts
            .get(&lang)
            .map_or(0, |words| words.values().sum())
    }

    /// Rare words of `lang`.
    pub fn rare_words(&self, lang: Language) -> RareWords {
        match self.counts.get(&lang) {
            Some(words) => words
                .par_iter()
                .filter(|(word, count)| is_rare(word, **count))
                .map(|(word, _)| word.clone())
                .collect::<Vec<_>>()
                .into_iter()
                .collect(),
            None => RareWords::new(),
        }
    }

    /// Words that are rare in both languages, as identical strings.
    ///
    /// This does not say anything about translations: it catches shared proper nouns,
    /// false cognates and corpus artifacts.
    pub fn common_rare_words(&self, lang_a: Language, lang_b: Language) -> RareWords {
        let (a, b) = rayon::join(|| self.rare_words(lang_a), || self.rare_words(lang_b));
        common_words(&a, &b)
    }
}

/// Words present in both sets, as identical strings.
pub fn common_words(a: &RareWords, b: &RareWords) -> RareWords {
    a.intersection(b).cloned().collect()
}

/// Rarity predicate on a word and its count.
pub fn is_rare(word: &str, count: u64) -> bool {
    if count != 1 {
        return false;
    }
    let length = word.chars().count();
    length > RARE_MIN_EXCLUSIVE
        && length < RARE_MAX_EXCLUSIVE
        && word.chars().all(|c| GeneralCategory::of(c).is_letter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let mut wc = WordCounts::new();
        wc.record_text("le chat et le chien", Language::Fr);
        wc.record("the", Language::En);

        assert_eq!(wc.count("le", Language::Fr), 2);
        assert_eq!(wc.count("chat", Language::Fr), 1);
        assert_eq!(wc.count("the", Language::En), 1);
        assert_eq!(wc.count("the", Language::Fr), 0);
        assert_eq!(wc.count("anything", Language::De), 0);
        assert_eq!(wc.unique_words(Language::Fr), 4);
        assert_eq!(wc.total_words(Language::Fr), 5);
        assert_eq!(wc.unique_words(Language::De), 0);
    }

    #[test]
    fn rarity_predicate() {
        assert!(is_rare("xylophone", 1)); // 9
        assert!(is_rare("absolute", 1)); // 8
        assert!(is_rare("abcdefghij", 1)); // 10
        assert!(!is_rare("xylophone", 2));
        assert!(!is_rare("abcdefg", 1)); // 7
        assert!(!is_rare("abcdefghijk", 1)); // 11
        assert!(!is_rare("state-of-art", 1));
        assert!(!is_rare("abc12345", 1));
        // length is in chars, not bytes
        assert!(is_rare("éléphant", 1));
        assert!(is_rare("österreich", 1));
    }

    #[test]
    fn rare_words_are_seen_once() {
        let mut wc = WordCounts::new();
        wc.record_text(
            "xylophone xylophone saxophone elephants pianos . , ! 12345678",
            Language::En,
        );
        let rare = wc.rare_words(Language::En);
        assert_eq!(
            rare.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["elephants", "saxophone"]
        );
        for word in &rare {
            assert_eq!(wc.count(word, Language::En), 1);
        }
        assert!(wc.rare_words(Language::De).is_empty());
    }

    #[test]
    fn common_rare_words() {
        let mut wc = WordCounts::new();
        wc.record_text("the xylophone is broken tomorrow elephants", Language::En);
        wc.record_text("le xylophone est cassé demain elephants", Language::Fr);
        wc.record_text("elephants", Language::Fr);

        let common = wc.common_rare_words(Language::Fr, Language::En);
        assert_eq!(
            common.into_iter().collect::<Vec<_>>(),
            vec!["xylophone".to_string()]
        );
    }
}
