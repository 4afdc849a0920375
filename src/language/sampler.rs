use crate::crawler::Document;
use crate::language::{LanguageBucket, LanguageClassifier};
use crate::output::CrawlStats;
use rand::Rng;

/// Where a sampled language code came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    /// The document's `<html lang>` attribute
    Attribute,
    /// The classifier run over the visible text
    Classifier,
}

/// Outcome of sampling one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSample {
    /// Raw language code as declared or detected
    pub code: String,
    pub bucket: LanguageBucket,
    pub source: LanguageSource,
}

/// Selects crawled pages for language detection and tallies the results
pub struct Sampler {
    rate: f64,
    classifier: Box<dyn LanguageClassifier>,
}

impl Sampler {
    /// Creates a sampler selecting pages with probability `rate`
    ///
    /// Out-of-range rates are clamped to `[0, 1]`; NaN disables sampling.
    pub fn new(rate: f64, classifier: Box<dyn LanguageClassifier>) -> Self {
        let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        Self { rate, classifier }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Makes the per-page sampling decision
    pub fn should_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.rate)
    }

    /// Determines the page language and records it in `stats`
    ///
    /// The declared `lang` attribute is used when present; otherwise the
    /// visible text goes to the classifier. When neither yields a code the
    /// page does not count as sampled.
    pub fn maybe_sample(&self, document: &Document, stats: &mut CrawlStats) -> Option<LanguageSample> {
        let sample = self.detect(document)?;
        stats.record_sample(sample.bucket);
        Some(sample)
    }

    fn detect(&self, document: &Document) -> Option<LanguageSample> {
        if let Some(code) = document.lang_attribute() {
            return Some(LanguageSample {
                bucket: LanguageBucket::from_code(&code),
                code,
                source: LanguageSource::Attribute,
            });
        }

        tracing::debug!("No lang attribute, classifying visible text");
        let text = document.visible_text();
        match self.classifier.detect(&text) {
            Some(code) => Some(LanguageSample {
                bucket: LanguageBucket::from_code(&code),
                code,
                source: LanguageSource::Classifier,
            }),
            None => {
                tracing::debug!("Language detection failed for {} chars of text", text.len());
                None
            }
        }
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler").field("rate", &self.rate).finish_non_exhaustive()
    }
}
