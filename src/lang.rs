//! Supported languages.
//!
//! English is always the source side of a pair, the target side is one of
//! the European languages that have a dedicated character policy
//! (see [crate::normalize]).
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Languages the corpus can hold.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
}

/// Languages that can be used as the target side of a run.
pub const TARGETS: [Language; 3] = [Language::Es, Language::Fr, Language::De];

impl Language {
    /// Two-letter code, as used in file names.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
        }
    }

    /// Three-letter code used by the tatoeba/anki archives.
    pub fn iso3(&self) -> &'static str {
        match self {
            Language::En => "eng",
            Language::Es => "spa",
            Language::Fr => "fra",
            Language::De => "deu",
        }
    }

    /// Parse a language that is accepted as a target.
    ///
    /// Unlike [FromStr], this rejects `en` since English is the fixed source side.
    pub fn parse_target(s: &str) -> Result<Self, Error> {
        let lang: Language = s.parse()?;
        if TARGETS.contains(&lang) {
            Ok(lang)
        } else {
            Err(Error::Config(format!(
                "target language should be one of es, fr or de (got {})",
                s
            )))
        }
    }

    /// Name of the language pair directory, e.g. `en-fr`.
    pub fn pair_name(&self) -> String {
        format!("{}-{}", Language::En.code(), self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            "de" => Ok(Language::De),
            _ => Err(Error::UnknownLang(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!("DE".parse::<Language>().unwrap(), Language::De);
        assert!(matches!(
            "it".parse::<Language>(),
            Err(Error::UnknownLang(_))
        ));
    }

    #[test]
    fn english_is_not_a_target() {
        assert!(matches!(Language::parse_target("en"), Err(Error::Config(_))));
        assert_eq!(Language::parse_target("es").unwrap(), Language::Es);
    }

    #[test]
    fn pair_name() {
        assert_eq!(Language::De.pair_name(), "en-de");
    }
}
