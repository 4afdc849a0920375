//! Language detection and sampling
//!
//! A sampled page's language comes from its `<html lang>` attribute when
//! present, otherwise from running a classifier over its visible text. Codes
//! are folded into the buckets the crawl reports on.

mod sampler;

pub use sampler::{LanguageSample, LanguageSource, Sampler};

use std::fmt;

/// Language buckets tallied by the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LanguageBucket {
    Chinese,
    Spanish,
    Polish,
    /// Detected, but not one of the tracked languages
    Other,
}

impl LanguageBucket {
    /// All buckets, in reporting order
    pub const ALL: [LanguageBucket; 4] = [
        LanguageBucket::Chinese,
        LanguageBucket::Spanish,
        LanguageBucket::Polish,
        LanguageBucket::Other,
    ];

    /// Maps a language code (BCP 47 tag, ISO 639-1 or ISO 639-3) to a bucket
    ///
    /// Only the primary subtag is considered, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use babel_ripple::LanguageBucket;
    ///
    /// assert_eq!(LanguageBucket::from_code("zh-Hant-TW"), LanguageBucket::Chinese);
    /// assert_eq!(LanguageBucket::from_code("spa"), LanguageBucket::Spanish);
    /// assert_eq!(LanguageBucket::from_code("PL"), LanguageBucket::Polish);
    /// assert_eq!(LanguageBucket::from_code("en-US"), LanguageBucket::Other);
    /// ```
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .trim()
            .split(&['-', '_'][..])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "zh" | "zho" | "chi" | "cmn" => Self::Chinese,
            "es" | "spa" => Self::Spanish,
            "pl" | "pol" => Self::Polish,
            _ => Self::Other,
        }
    }

    /// Lower-case label used in logs and summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Chinese => "chinese",
            Self::Spanish => "spanish",
            Self::Polish => "polish",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for LanguageBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text → language code
pub trait LanguageClassifier: Send + Sync {
    /// Returns a language code for `text`, or None if it cannot be determined
    fn detect(&self, text: &str) -> Option<String>;
}

/// Statistical classifier backed by whatlang, returning ISO 639-3 codes
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangClassifier;

impl LanguageClassifier for WhatlangClassifier {
    fn detect(&self, text: &str) -> Option<String> {
        whatlang::detect(text).map(|info| info.lang().code().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_two_letter() {
        assert_eq!(LanguageBucket::from_code("zh"), LanguageBucket::Chinese);
        assert_eq!(LanguageBucket::from_code("es"), LanguageBucket::Spanish);
        assert_eq!(LanguageBucket::from_code("pl"), LanguageBucket::Polish);
        assert_eq!(LanguageBucket::from_code("en"), LanguageBucket::Other);
    }

    #[test]
    fn test_from_code_regional_tags() {
        assert_eq!(LanguageBucket::from_code("zh-CN"), LanguageBucket::Chinese);
        assert_eq!(LanguageBucket::from_code("es_MX"), LanguageBucket::Spanish);
        assert_eq!(LanguageBucket::from_code("es-419"), LanguageBucket::Spanish);
        assert_eq!(LanguageBucket::from_code(" pl-PL "), LanguageBucket::Polish);
    }

    #[test]
    fn test_from_code_three_letter() {
        assert_eq!(LanguageBucket::from_code("cmn"), LanguageBucket::Chinese);
        assert_eq!(LanguageBucket::from_code("spa"), LanguageBucket::Spanish);
        assert_eq!(LanguageBucket::from_code("pol"), LanguageBucket::Polish);
    }

    #[test]
    fn test_lookalike_codes_are_other() {
        // Estonian and Persian share letters with "es"
        assert_eq!(LanguageBucket::from_code("est"), LanguageBucket::Other);
        assert_eq!(LanguageBucket::from_code("pes"), LanguageBucket::Other);
        assert_eq!(LanguageBucket::from_code("en-ES"), LanguageBucket::Other);
    }

    #[test]
    fn test_whatlang_detects_tracked_languages() {
        let classifier = WhatlangClassifier;

        let spanish = classifier
            .detect("El rápido zorro marrón salta sobre el perro perezoso mientras la gente mira desde la ventana.")
            .unwrap();
        assert_eq!(LanguageBucket::from_code(&spanish), LanguageBucket::Spanish);

        let polish = classifier
            .detect("Szybki brązowy lis przeskakuje nad leniwym psem, a ludzie patrzą przez okno na ulicę.")
            .unwrap();
        assert_eq!(LanguageBucket::from_code(&polish), LanguageBucket::Polish);

        let chinese = classifier.detect("敏捷的棕色狐狸跳过了懒狗，人们从窗户里看着街道上的一切。").unwrap();
        assert_eq!(LanguageBucket::from_code(&chinese), LanguageBucket::Chinese);
    }

    #[test]
    fn test_whatlang_empty_text() {
        assert_eq!(WhatlangClassifier.detect(""), None);
    }
}
