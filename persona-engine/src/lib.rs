pub mod annotate;
pub mod frequency;
pub mod keywords;
pub mod phrases;
pub mod report;

pub use annotate::{AnnotatedToken, HeuristicTagger, PartOfSpeech, TextAnnotator};
pub use frequency::{KeywordStat, KeywordTable, Provenance, MAX_SOURCES};
pub use keywords::{AnalysisContext, KeywordExtractor, EXTRA_STOP_WORDS};
pub use phrases::Bucket;
pub use report::{Citation, PersonaReport, MAX_CITATIONS, NOT_ENOUGH_DATA};

use persona_core::ScrapedRecord;
use std::collections::HashSet;
use tracing::{debug, info};

/// Keywords kept after ranking, split evenly across the three buckets.
pub const TOP_KEYWORDS: usize = 15;
const BUCKET_SIZE: usize = 5;

/// Ranked keywords split positionally into persona buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedKeywords {
    pub traits: Vec<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
}

impl RankedKeywords {
    pub fn from_ranked(ranked: &[&KeywordStat]) -> Self {
        let slice = |start: usize| -> Vec<String> {
            ranked
                .iter()
                .skip(start)
                .take(BUCKET_SIZE)
                .map(|stat| stat.keyword.clone())
                .collect()
        };

        Self {
            traits: slice(0),
            interests: slice(BUCKET_SIZE),
            goals: slice(2 * BUCKET_SIZE),
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Trait => &self.traits,
            Bucket::Interest => &self.interests,
            Bucket::Goal => &self.goals,
        }
    }

    pub fn len(&self) -> usize {
        self.traits.len() + self.interests.len() + self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct PersonaBuilder<'a> {
    extractor: KeywordExtractor<'a>,
}

impl<'a> PersonaBuilder<'a> {
    pub fn new(context: &'a AnalysisContext) -> Self {
        Self {
            extractor: context.extractor(),
        }
    }

    /// Aggregates keyword frequencies over posts first, then comments.
    pub fn tally(&self, posts: &[ScrapedRecord], comments: &[ScrapedRecord]) -> KeywordTable {
        let mut table = KeywordTable::new();
        for record in posts.iter().chain(comments) {
            table.record(record, self.extractor.extract(&record.text));
        }
        debug!(
            "Tallied {} distinct keywords from {} records",
            table.len(),
            posts.len() + comments.len()
        );
        table
    }

    /// Builds the structured report, or `None` when no keyword survived extraction.
    pub fn synthesize(
        &self,
        posts: &[ScrapedRecord],
        comments: &[ScrapedRecord],
        username: &str,
    ) -> Option<PersonaReport> {
        let table = self.tally(posts, comments);
        if table.is_empty() {
            return None;
        }

        let ranked = table.ranked(TOP_KEYWORDS);
        let buckets = RankedKeywords::from_ranked(&ranked);

        let describe = |bucket: Bucket| -> Vec<String> {
            buckets
                .bucket(bucket)
                .iter()
                .map(|keyword| bucket.describe(keyword))
                .collect()
        };

        // Every tallied keyword has at least one source.
        let quote = ranked
            .first()
            .and_then(|top| top.sources.first())
            .map(|source| report::quote_excerpt(&source.text))
            .unwrap_or_default();

        let citations = collect_citations(&ranked);

        info!(
            "Persona for u/{}: {} ranked keywords, {} citations",
            username,
            buckets.len(),
            citations.len()
        );

        Some(PersonaReport {
            username: username.to_string(),
            traits: describe(Bucket::Trait),
            interests: describe(Bucket::Interest),
            goals: describe(Bucket::Goal),
            quote,
            citations,
        })
    }

    pub fn build(
        &self,
        posts: &[ScrapedRecord],
        comments: &[ScrapedRecord],
        username: &str,
    ) -> String {
        match self.synthesize(posts, comments, username) {
            Some(report) => report.render(),
            None => NOT_ENOUGH_DATA.to_string(),
        }
    }
}

/// Walks keywords in rank order and their sources in insertion order,
/// skipping snippets whose truncated form was already cited.
fn collect_citations(ranked: &[&KeywordStat]) -> Vec<Citation> {
    let mut emitted = HashSet::new();
    let mut citations = Vec::with_capacity(MAX_CITATIONS);

    'ranked: for stat in ranked {
        for source in &stat.sources {
            let snippet = report::citation_snippet(&source.text);
            if !emitted.insert(snippet.clone()) {
                continue;
            }
            citations.push(Citation {
                snippet,
                kind: source.kind,
            });
            if citations.len() >= MAX_CITATIONS {
                break 'ranked;
            }
        }
    }

    citations
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_core::RecordKind;

    fn stat(keyword: &str, count: usize, sources: &[&str]) -> KeywordStat {
        KeywordStat {
            keyword: keyword.to_string(),
            count,
            sources: sources
                .iter()
                .map(|text| Provenance {
                    kind: RecordKind::Comment,
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_partition_without_padding() {
        let stats: Vec<KeywordStat> = (0..7)
            .map(|i| stat(&format!("kw{i}"), 7 - i, &["x"]))
            .collect();
        let ranked: Vec<&KeywordStat> = stats.iter().collect();

        let buckets = RankedKeywords::from_ranked(&ranked);
        assert_eq!(buckets.traits, vec!["kw0", "kw1", "kw2", "kw3", "kw4"]);
        assert_eq!(buckets.interests, vec!["kw5", "kw6"]);
        assert!(buckets.goals.is_empty());
        assert_eq!(buckets.len(), 7);
    }

    #[test]
    fn test_citations_dedup_on_truncated_snippet() {
        let long_a = format!("{}AAAA", "s".repeat(80));
        let long_b = format!("{}BBBB", "s".repeat(80));
        let stats = vec![
            stat("one", 3, &[&long_a, &long_b, "short"]),
            stat("two", 2, &["short", "other"]),
        ];
        let ranked: Vec<&KeywordStat> = stats.iter().collect();

        let citations = collect_citations(&ranked);
        let snippets: Vec<&str> = citations.iter().map(|c| c.snippet.as_str()).collect();
        assert_eq!(snippets.len(), 3);
        assert_eq!(snippets[0], format!("{}...", "s".repeat(80)));
        assert_eq!(snippets[1], "short");
        assert_eq!(snippets[2], "other");
    }

    #[test]
    fn test_citations_stop_at_five() {
        let stats = vec![
            stat("one", 3, &["a", "b", "c"]),
            stat("two", 3, &["d", "e", "f"]),
            stat("three", 3, &["g"]),
        ];
        let ranked: Vec<&KeywordStat> = stats.iter().collect();

        let citations = collect_citations(&ranked);
        let snippets: Vec<&str> = citations.iter().map(|c| c.snippet.as_str()).collect();
        assert_eq!(snippets, vec!["a", "b", "c", "d", "e"]);
    }
}
