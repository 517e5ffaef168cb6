use persona_core::{RecordKind, ScrapedRecord};
use persona_engine::{
    AnalysisContext, AnnotatedToken, Bucket, HeuristicTagger, PartOfSpeech, PersonaBuilder,
    TextAnnotator, MAX_CITATIONS, MAX_SOURCES, NOT_ENOUGH_DATA, TOP_KEYWORDS,
};
use std::collections::HashSet;

/// Whitespace annotator: every alphabetic word is a noun, lemma is the lowercased word.
struct WordAnnotator;

impl TextAnnotator for WordAnnotator {
    fn annotate(&self, text: &str) -> Vec<AnnotatedToken> {
        text.split_whitespace()
            .map(|raw| {
                let word = raw.trim_matches(|c: char| c.is_ascii_punctuation());
                AnnotatedToken {
                    text: word.to_string(),
                    lemma: word.to_lowercase(),
                    pos: PartOfSpeech::Noun,
                    is_alpha: !word.is_empty() && word.chars().all(char::is_alphabetic),
                }
            })
            .collect()
    }
}

fn word_context() -> AnalysisContext {
    AnalysisContext::new(WordAnnotator, Vec::<String>::new())
}

fn posts(texts: &[&str]) -> Vec<ScrapedRecord> {
    texts.iter().map(|t| ScrapedRecord::post(*t)).collect()
}

fn comments(texts: &[&str]) -> Vec<ScrapedRecord> {
    texts.iter().map(|t| ScrapedRecord::comment(*t)).collect()
}

#[test]
fn test_no_records_yields_not_enough_data() {
    let ctx = word_context();
    let builder = PersonaBuilder::new(&ctx);
    assert_eq!(builder.build(&[], &[], "ghost"), NOT_ENOUGH_DATA);
    assert_eq!(
        builder.build(&[], &[], "ghost"),
        "Not enough data to generate a persona."
    );
}

#[test]
fn test_only_stopwords_yields_not_enough_data() {
    let ctx = word_context();
    let builder = PersonaBuilder::new(&ctx);
    let result = builder.build(&posts(&["lol thanks", "yeah ok!!"]), &comments(&["..."]), "u1");
    assert_eq!(result, NOT_ENOUGH_DATA);
}

#[test]
fn test_gaming_ranks_first_with_english_stopwords() {
    let ctx = AnalysisContext::english().unwrap();
    let builder = PersonaBuilder::new(&ctx);
    let posts = posts(&["I love gaming and AI", "Gaming tournaments are fun"]);

    let table = builder.tally(&posts, &[]);
    let gaming = table.get("gaming").expect("gaming extracted");
    assert_eq!(gaming.count, 2);
    assert_eq!(table.ranked(1)[0].keyword, "gaming");

    let report = builder.synthesize(&posts, &[], "gamer").unwrap();
    assert_eq!(report.traits[0], "Enjoys gaming and esports culture");
    assert_eq!(report.quote, "I love gaming and AI");
    assert_eq!(report.citations[0].snippet, "I love gaming and AI");
    assert_eq!(report.citations[0].kind, RecordKind::Post);

    let rendered = builder.build(&posts, &[], "gamer");
    assert!(rendered.contains("Reddit Handle    : u/gamer"));
    assert!(rendered.contains("• Enjoys gaming and esports culture"));
}

#[test]
fn test_buckets_sum_to_distinct_keywords_under_fifteen() {
    let ctx = word_context();
    let builder = PersonaBuilder::new(&ctx);
    let posts = posts(&["alpha beta gamma", "delta epsilon alpha", "zeta eta"]);

    let report = builder.synthesize(&posts, &[], "greek").unwrap();
    assert_eq!(report.traits.len(), 5);
    assert_eq!(report.interests.len(), 2);
    assert!(report.goals.is_empty());
    assert_eq!(report.traits[0], "Shows interest in alpha");
    assert_eq!(report.interests[1], "Interested in eta");

    let rendered = report.render();
    assert!(!rendered.contains("Aims to achieve"));
}

#[test]
fn test_top_fifteen_partition() {
    let ctx = word_context();
    let builder = PersonaBuilder::new(&ctx);
    let words: Vec<String> = (0..20).map(|i| format!("word{}", char::from(b'a' + i))).collect();
    let text = words.join(" ");
    // Earlier words get repeated in more records so ranking is strict.
    let records: Vec<ScrapedRecord> = (0..20)
        .map(|i| ScrapedRecord::post(words[..20 - i].join(" ")))
        .collect();

    let table = builder.tally(&records, &comments(&[&text]));
    assert_eq!(table.len(), 20);
    let ranked = table.ranked(TOP_KEYWORDS);
    assert_eq!(ranked.len(), TOP_KEYWORDS);

    let report = builder.synthesize(&records, &[], "counter").unwrap();
    assert_eq!(report.traits.len(), 5);
    assert_eq!(report.interests.len(), 5);
    assert_eq!(report.goals.len(), 5);
    assert_eq!(report.traits[0], "Shows interest in worda");
    assert_eq!(report.interests[0], "Interested in wordf");
    assert_eq!(report.goals[4], "Aims to achieve wordo");
}

#[test]
fn test_provenance_cap_and_citation_limits() {
    let ctx = word_context();
    let builder = PersonaBuilder::new(&ctx);
    let texts: Vec<String> = (0..9).map(|i| format!("rust note{}", i)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let posts = posts(&refs);
    let comments = comments(&["rust again", "rust again"]);

    let table = builder.tally(&posts, &comments);
    let rust = table.get("rust").unwrap();
    assert_eq!(rust.count, 11);
    assert_eq!(rust.sources.len(), MAX_SOURCES);

    let report = builder.synthesize(&posts, &comments, "crab").unwrap();
    assert!(report.citations.len() <= MAX_CITATIONS);
    let unique: HashSet<&str> = report.citations.iter().map(|c| c.snippet.as_str()).collect();
    assert_eq!(unique.len(), report.citations.len());
    assert_eq!(report.citations.len(), MAX_CITATIONS);
}

#[test]
fn test_duplicate_records_are_cited_once() {
    let ctx = word_context();
    let builder = PersonaBuilder::new(&ctx);
    let comments = comments(&["same words here", "same words here", "same words here"]);

    let report = builder.synthesize(&[], &comments, "echo").unwrap();
    assert_eq!(report.citations.len(), 1);
    assert_eq!(report.citations[0].kind, RecordKind::Comment);
    assert!(report.render().contains("— Cited from comment"));
}

#[test]
fn test_long_quote_is_truncated() {
    let ctx = word_context();
    let builder = PersonaBuilder::new(&ctx);
    let long = format!("marathon {}", "a".repeat(192));
    assert_eq!(long.chars().count(), 201);

    let report = builder.synthesize(&posts(&[&long]), &[], "runner").unwrap();
    assert_eq!(report.quote, format!("{}...", &long[..197]));
    assert!(report.citations[0].snippet.ends_with("..."));
    assert_eq!(report.citations[0].snippet.chars().count(), 83);
}

#[test]
fn test_posts_are_counted_before_comments() {
    let ctx = word_context();
    let builder = PersonaBuilder::new(&ctx);
    // Tie on count: the post keyword was encountered first.
    let report = builder
        .synthesize(&posts(&["cooking"]), &comments(&["cycling"]), "chef")
        .unwrap();
    assert_eq!(report.traits, vec!["Shows interest in cooking", "Shows interest in cycling"]);
    assert_eq!(report.quote, "cooking");
    assert_eq!(Bucket::Trait.describe("cycling"), report.traits[1]);
}

#[test]
fn test_heuristic_tagger_is_default_annotator() {
    let ctx = AnalysisContext::new(HeuristicTagger::new(), ["the"]);
    let builder = PersonaBuilder::new(&ctx);
    let report = builder
        .synthesize(&posts(&["The threads about NYC"]), &[], "local")
        .unwrap();
    assert!(report.traits.contains(&"Shows interest in thread".to_string()));
    assert!(report
        .traits
        .contains(&"Engaged with NYC-related topics and lifestyle".to_string()));
}
