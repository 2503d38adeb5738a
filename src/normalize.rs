/*! Text normalization

Turns a raw sentence into its cleaned, whitespace-tokenized form, or rejects it.

Normalization is a pure function of `(text, language, max_words)` and goes through these steps, in order:

1. markup stripping (tags, comments and script/style content), entity decoding, whitespace collapsing,
1. lowercasing,
1. a literal substitution table for corpus escape sequences (see [SUBSTITUTIONS]),
1. the language [CharPolicy]: English is decomposed and stripped of diacritics,
   the other languages keep their accented letters,
1. collapsing of repeated `.`, `!` and `?`,
1. splitting of English ordinal suffixes (`1st` -> `1 st`),
1. isolation of punctuation as separate tokens,
1. whitespace tokenization and rejection if there are more than `max_words` tokens.

Tags are replaced by a space rather than removed, so that text on both sides of a tag
never gets glued together (`Hello <b>there</b>` gives `hello there`, not `hellothere`).

A rejected text is returned as an empty [String]. Rejection is never a truncation:
truncating one side of a pair would break its correspondence with the other side.
!*/
use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::lang::Language;

/// Corpus-specific escape sequences and their replacement, applied in order.
///
/// `@-@` is the compound-word joiner of tokenized corpora.
pub const SUBSTITUTIONS: [(&str, &str); 8] = [
    ("@-@", "-"),
    ("&apos;", "'"),
    ("&quot;", "\""),
    ("&#91;", "["),
    ("&#93;", "]"),
    ("&#124;", "|"),
    ("&amp;", "&"),
    ("\"", " \" "),
];

/// Characters that always end up as a token of their own.
pub const ISOLATED_PUNCTUATION: &str = ".,!?;:\"%()$¿¡";

/// Character class body shared by every policy: ascii letters, digits, space,
/// punctuation, straight quotes and the currency sign.
const BASE_ALLOWED: &str = r#"a-z0-9 .,!?;:'"%()$\-"#;

/// Language-specific character policy.
///
/// Holds the allow-list of characters (everything else is replaced by a space)
/// and whether diacritics are stripped before applying it.
#[derive(Debug)]
pub struct CharPolicy {
    decompose: bool,
    extra_chars: &'static str,
    disallowed: Regex,
}

impl CharPolicy {
    fn new(decompose: bool, extra_chars: &'static str) -> Self {
        // no case folding: `ſ` would match `s`
        let pattern = format!("[^{}{}]+", BASE_ALLOWED, extra_chars);
        let disallowed = Regex::new(&pattern).expect("character policy patterns are valid");
        Self {
            decompose,
            extra_chars,
            disallowed,
        }
    }

    /// Truth that diacritics are removed for this language.
    pub fn decompose(&self) -> bool {
        self.decompose
    }

    /// Characters allowed on top of the shared allow-list.
    pub fn extra_chars(&self) -> &'static str {
        self.extra_chars
    }

    /// Apply the policy, replacing every run of disallowed characters by a space.
    pub fn apply(&self, text: &str) -> String {
        let text: String = if self.decompose {
            text.nfd().filter(|c| !is_combining_mark(*c)).collect()
        } else {
            // accented letters are only allowed in their precomposed form
            text.nfc().collect()
        };
        self.disallowed.replace_all(&text, " ").into_owned()
    }
}

lazy_static! {
    static ref POLICIES: HashMap<Language, CharPolicy> = {
        let mut m = HashMap::new();
        m.insert(Language::En, CharPolicy::new(true, ""));
        m.insert(Language::Es, CharPolicy::new(false, "áéíóúüñ¿¡"));
        m.insert(Language::Fr, CharPolicy::new(false, "àâæçéèêëîïôœùûüÿ"));
        m.insert(Language::De, CharPolicy::new(false, "äöüß"));
        m
    };
    static ref SCRIPT_STYLE_RE: Regex =
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap();
    static ref COMMENT_RE: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[a-zA-Z/!?][^>]*>").unwrap();
    static ref REPEATED_RE: Regex = Regex::new(r"\.{2,}|!{2,}|\?{2,}").unwrap();
    static ref ORDINAL_RE: Regex = Regex::new(r"(?i)(\d)(st|nd|rd|th)\b").unwrap();
}

/// Get the character policy of a language.
pub fn policy(lang: Language) -> &'static CharPolicy {
    &POLICIES[&lang]
}

/// Normalize `text` for `lang`.
///
/// Returns an empty string if the text is rejected, either because nothing is left
/// after cleaning or because it has more than `max_words` tokens.
pub fn normalize(text: &str, lang: Language, max_words: usize) -> String {
    let text = strip_markup(text);
    let text = text.to_lowercase();
    let text = substitute(text.trim());
    let text = policy(lang).apply(&text);
    let text = collapse_repeated(&text);
    let text = ORDINAL_RE.replace_all(&text, "$1 $2");
    let text = isolate_punctuation(&text);

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() > max_words {
        log::trace!(
            "rejected text with {} tokens (max {}): {:?}",
            tokens.len(),
            max_words,
            text
        );
        return String::new();
    }

    tokens.join(" ")
}

/// Remove markup and keep visible text only, with collapsed whitespace.
pub fn strip_markup(text: &str) -> String {
    let text = SCRIPT_STYLE_RE.replace_all(text, " ");
    let text = COMMENT_RE.replace_all(&text, " ");
    let text = TAG_RE.replace_all(&text, " ");
    let text = html_escape::decode_html_entities(&text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn substitute(text: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

fn collapse_repeated(text: &str) -> String {
    REPEATED_RE
        .replace_all(text, |caps: &Captures| caps[0][..1].to_string())
        .into_owned()
}

fn isolate_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if ISOLATED_PUNCTUATION.contains(c) {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}
