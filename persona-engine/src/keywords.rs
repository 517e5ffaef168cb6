use crate::annotate::{HeuristicTagger, TextAnnotator};
use persona_core::{AnalysisError, CoreError};
use std::collections::HashSet;
use tracing::debug;

/// Casual filler that carries no persona signal in Reddit text.
pub const EXTRA_STOP_WORDS: &[&str] = &[
    "see", "would", "something", "still", "made", "new", "one", "like", "also", "guys", "know",
    "get", "got", "really", "think", "people", "just", "much", "good", "well", "want", "need",
    "time", "day", "years", "year", "say", "says", "don", "did", "does", "ok", "okay", "yes",
    "no", "yeah", "lol", "thanks", "thank", "hi", "hello", "hey",
];

/// Annotator plus stopword set, built once per process and passed by reference.
pub struct AnalysisContext {
    annotator: Box<dyn TextAnnotator + Send + Sync>,
    stopwords: HashSet<String>,
}

impl AnalysisContext {
    /// English stopwords from the `stop-words` corpus with the heuristic tagger.
    pub fn english() -> Result<Self, CoreError> {
        let base = stop_words::get(stop_words::LANGUAGE::English);
        if base.is_empty() {
            return Err(AnalysisError::StopwordsUnavailable {
                language: "english".to_string(),
            }
            .into());
        }

        Ok(Self::new(HeuristicTagger::new(), base))
    }

    /// `EXTRA_STOP_WORDS` are always added on top of `base_stopwords`.
    pub fn new<A, I, S>(annotator: A, base_stopwords: I) -> Self
    where
        A: TextAnnotator + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stopwords: HashSet<String> = base_stopwords
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        stopwords.extend(EXTRA_STOP_WORDS.iter().map(|w| w.to_string()));

        debug!("Analysis context ready with {} stopwords", stopwords.len());

        Self {
            annotator: Box::new(annotator),
            stopwords,
        }
    }

    pub fn is_stopword(&self, lemma: &str) -> bool {
        self.stopwords.contains(lemma)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    pub fn extractor(&self) -> KeywordExtractor<'_> {
        KeywordExtractor { context: self }
    }
}

#[derive(Clone, Copy)]
pub struct KeywordExtractor<'a> {
    context: &'a AnalysisContext,
}

impl<'a> KeywordExtractor<'a> {
    /// Lowercased lemmas of the noun, proper-noun and verb tokens in `text`,
    /// in token order, repeats included.
    pub fn extract(&self, text: &str) -> impl Iterator<Item = String> + 'a {
        let context = self.context;
        context
            .annotator
            .annotate(text)
            .into_iter()
            .filter(|token| token.pos.is_keyword_bearing() && token.is_alpha)
            .map(|token| token.lemma.to_lowercase())
            .filter(move |lemma| !context.is_stopword(lemma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> AnalysisContext {
        AnalysisContext::new(HeuristicTagger::new(), ["the", "and", "are", "is", "i", "be"])
    }

    #[test]
    fn test_extract_keeps_order_and_repeats() {
        let ctx = context();
        let keywords: Vec<String> = ctx
            .extractor()
            .extract("Rust compilers and rust tooling, Rust forever")
            .collect();
        assert_eq!(
            keywords,
            vec!["rust", "compiler", "rust", "tooling", "rust", "forever"]
        );
    }

    #[test]
    fn test_extra_stop_words_are_filtered() {
        let ctx = context();
        let keywords: Vec<String> = ctx.extractor().extract("lol thanks, yeah ok").collect();
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_empty_and_punctuation_input() {
        let ctx = context();
        assert_eq!(ctx.extractor().extract("").count(), 0);
        assert_eq!(ctx.extractor().extract("!!! ??? ... :)").count(), 0);
        assert_eq!(ctx.extractor().extract("the and is").count(), 0);
    }

    #[test]
    fn test_non_alphabetic_tokens_are_dropped() {
        let ctx = context();
        let keywords: Vec<String> = ctx.extractor().extract("Upgraded to 4090 GPUs").collect();
        assert_eq!(keywords, vec!["upgrade", "gpus"]);
    }

    #[test]
    fn test_adjectives_dropped_and_verb_forms_merged() {
        let ctx = context();
        let keywords: Vec<String> = ctx
            .extractor()
            .extract("Gaming tournaments are fun")
            .collect();
        assert_eq!(keywords, vec!["gaming", "tournament"]);

        let keywords: Vec<String> = ctx
            .extractor()
            .extract("I was playing, he played, she plays. Beautiful awesome amazing")
            .collect();
        assert_eq!(keywords, vec!["play", "play", "play"]);
    }

    #[test]
    fn test_stopwords_are_case_normalized() {
        let ctx = AnalysisContext::new(HeuristicTagger::new(), ["Reddit"]);
        assert!(ctx.is_stopword("reddit"));
        assert!(ctx.is_stopword("lol"));
        let keywords: Vec<String> = ctx.extractor().extract("Posting on Reddit daily").collect();
        assert_eq!(keywords, vec!["posting"]);
    }

    #[test]
    fn test_english_context_loads() {
        let ctx = AnalysisContext::english().unwrap();
        assert!(ctx.stopword_count() > EXTRA_STOP_WORDS.len());
        assert!(ctx.is_stopword("the"));
        assert!(ctx.is_stopword("yeah"));
    }
}
