//! Token annotation.
//!
//! [`TextAnnotator`] is the seam for a real tokenizer/lemmatizer/POS tagger.
//! [`HeuristicTagger`] is the built-in fallback: it segments on Unicode word
//! boundaries, tags closed-class words from lists and open-class words by
//! shape and left context, and lemmatizes regular plurals and verb forms.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Function,
    Other,
}

impl PartOfSpeech {
    /// Content tags that can carry a persona keyword.
    pub fn is_keyword_bearing(&self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Verb
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedToken {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_alpha: bool,
}

pub trait TextAnnotator {
    fn annotate(&self, text: &str) -> Vec<AnnotatedToken>;
}

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him",
        "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
        "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "this",
        "that", "these", "those", "who", "whom", "whose", "which", "what",
    ]
    .into_iter()
    .collect()
});

static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "if", "then", "than", "because",
        "as", "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
        "in", "out", "on", "off", "over", "under", "again", "further", "once", "here", "there",
        "when", "where", "why", "how", "all", "any", "both", "each", "few", "more", "most",
        "other", "some", "such", "no", "not", "only", "own", "same", "too", "very", "can",
        "will", "would", "should", "could", "may", "might", "must", "shall", "am", "is", "are",
        "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
        "did", "doing",
    ]
    .into_iter()
    .collect()
});

/// Subjects that make the following open-class word a finite verb.
static SUBJECT_PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["i", "you", "we", "they", "he", "she", "it", "who"]
        .into_iter()
        .collect()
});

/// Forms of "be" that turn a following `-ing` word into a progressive verb.
static BE_AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "am", "is", "are", "was", "were", "be", "been", "being", "i'm", "im", "you're",
        "we're", "they're", "he's", "she's", "it's",
    ]
    .into_iter()
    .collect()
});

static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "fun", "great", "awesome", "amazing", "beautiful", "good", "bad", "best", "better",
        "worse", "worst", "big", "small", "nice", "cool", "new", "old", "happy", "sad", "hard",
        "easy", "interesting", "boring", "funny", "cute", "huge", "tiny", "little", "long",
        "short", "high", "low", "real", "true", "false", "sure", "free", "full", "whole",
        "late", "early", "young", "important", "different", "large", "right", "wrong",
        "simple", "quick", "slow", "hot", "cold", "awful", "weird", "crazy", "perfect",
        "favorite", "favourite", "excellent", "terrible", "horrible", "wonderful", "fantastic",
        "incredible", "glad", "busy", "ready", "able", "cheap", "expensive", "strong", "weak",
        "serious", "actual", "legit", "epic", "insane", "stupid", "dumb", "smart", "rich",
        "poor", "safe", "dangerous", "entire", "main", "certain", "clear", "common", "fine",
        "total", "legal", "major", "minor", "similar", "recent", "excited", "interested",
        "tired", "bored", "worried", "scared", "confused", "annoyed",
    ]
    .into_iter()
    .collect()
});

const ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "al"];

/// Nouns and verbs that happen to end like adjectives.
static NOT_ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "animal", "festival", "journal", "signal", "metal", "capital", "hospital", "material",
        "rival", "arrival", "tutorial", "manual", "proposal", "approval", "survival", "portal",
        "crystal", "pedal", "mineral", "sandal", "scandal", "terminal", "editorial",
        "potential", "criminal", "professional", "individual", "rental", "arrive", "receive",
        "derive", "archive", "objective", "executive", "detective", "initiative",
        "alternative", "representative", "perspective", "incentive", "narrative",
        "vegetable", "variable", "timetable",
    ]
    .into_iter()
    .collect()
});

/// Nouns and adjectives ending in `-ing` or `-ed`.
static NOT_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "thing", "nothing", "something", "anything", "everything", "morning", "evening",
        "king", "ring", "spring", "string", "wing", "sibling", "ceiling", "wedding", "pudding",
        "hundred", "kindred", "sacred", "wicked", "naked", "rugged", "ragged", "beloved",
        "indeed",
    ]
    .into_iter()
    .collect()
});

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Restores the silent "e" dropped before `-ed`/`-ing` (`upgrad` -> `upgrade`).
fn needs_silent_e(stem: &[char]) -> bool {
    let n = stem.len();
    let Some(&last) = stem.last() else {
        return false;
    };
    let prev = if n >= 2 { Some(stem[n - 2]) } else { None };

    match last {
        'c' | 'v' | 'u' => return true,
        'g' if prev == Some('d') => return true,
        'z' => return prev != Some('z'),
        's' => {
            if prev == Some('s') {
                return false;
            }
            // "focus" keeps its ending, "caus"/"us" take an "e"
            return !(prev == Some('u') && n > 2 && stem[n - 3] != 'a');
        }
        'g' if prev == Some('n') => return n >= 5 && matches!(stem[n - 3], 'a' | 'e'),
        _ => {}
    }

    if n < 3 || !"bdgklmnrt".contains(last) {
        return false;
    }
    let vowel = stem[n - 2];
    let before = stem[n - 3];
    matches!(vowel, 'a' | 'i' | 'o' | 'u')
        && !is_vowel(before)
        && before != 'y'
        && !(vowel == 'i' && last == 't')
}

/// Base form from a stem with `-ed` or `-ing` removed.
fn verb_base(stem: &str) -> String {
    let mut chars: Vec<char> = stem.chars().collect();
    let n = chars.len();

    // "stopp" -> "stop", but "call" and "pass" keep their doubled ending
    if n >= 4
        && chars[n - 1] == chars[n - 2]
        && !is_vowel(chars[n - 1])
        && !matches!(chars[n - 1], 'l' | 's' | 'f' | 'z')
    {
        chars.pop();
        return chars.into_iter().collect();
    }

    let mut base: String = chars.iter().collect();
    if needs_silent_e(&chars) {
        base.push('e');
    }
    base
}

fn verb_lemma(lower: &str) -> String {
    let len = lower.chars().count();

    if len > 4 {
        if let Some(stem) = lower.strip_suffix("ing") {
            return verb_base(stem);
        }
        if let Some(stem) = lower.strip_suffix("ied") {
            return format!("{}y", stem);
        }
        if let Some(stem) = lower.strip_suffix("ies") {
            return format!("{}y", stem);
        }
    }
    if len > 3 {
        if let Some(stem) = lower.strip_suffix("ed") {
            return verb_base(stem);
        }
        if let Some(stem) = lower.strip_suffix("es") {
            if ["ch", "sh", "ss", "x", "z", "o"]
                .iter()
                .any(|ending| stem.ends_with(ending))
            {
                return stem.to_string();
            }
        }
        if lower.ends_with('s') && !lower.ends_with("ss") {
            return lower[..lower.len() - 1].to_string();
        }
    }

    lower.to_string()
}

fn noun_lemma(lower: &str) -> String {
    if let Some(stem) = lower.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{}y", stem);
        }
    }
    if lower.len() > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return lower[..lower.len() - 1].to_string();
    }

    lower.to_string()
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    pub fn new() -> Self {
        Self
    }

    /// `previous` is the lowercased preceding word in the same sentence.
    fn tag(word: &str, lower: &str, previous: Option<&str>) -> PartOfSpeech {
        if PRONOUNS.contains(lower) {
            return PartOfSpeech::Pronoun;
        }
        if FUNCTION_WORDS.contains(lower) {
            return PartOfSpeech::Function;
        }
        if !word.chars().all(char::is_alphabetic) {
            return PartOfSpeech::Other;
        }
        let len = lower.chars().count();
        if len > 4 && lower.ends_with("ly") {
            return PartOfSpeech::Adverb;
        }

        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        if capitalized && previous.is_some() {
            return PartOfSpeech::ProperNoun;
        }
        // Acronyms like "AI" or "NYC" are names even at sentence start.
        if len > 1 && word.chars().all(char::is_uppercase) {
            return PartOfSpeech::ProperNoun;
        }

        if ADJECTIVES.contains(lower) {
            return PartOfSpeech::Adjective;
        }
        if !NOT_VERBS.contains(lower) {
            // Bare gerunds ("I love gaming") stay nouns.
            let progressive = len > 4
                && lower.ends_with("ing")
                && previous.is_some_and(|p| BE_AUXILIARIES.contains(p));
            let past = len > 4 && lower.ends_with("ed") && !lower.ends_with("eed");
            if progressive || past {
                return PartOfSpeech::Verb;
            }
        }
        if previous.is_some_and(|p| SUBJECT_PRONOUNS.contains(p)) {
            return PartOfSpeech::Verb;
        }
        if len >= 6
            && ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
            && !NOT_ADJECTIVES.contains(lower)
        {
            return PartOfSpeech::Adjective;
        }

        PartOfSpeech::Noun
    }

    fn lemmatize(lower: &str, pos: PartOfSpeech) -> String {
        match pos {
            PartOfSpeech::Noun => noun_lemma(lower),
            PartOfSpeech::Verb => verb_lemma(lower),
            _ => lower.to_string(),
        }
    }
}

impl TextAnnotator for HeuristicTagger {
    fn annotate(&self, text: &str) -> Vec<AnnotatedToken> {
        let mut tokens = Vec::new();

        for sentence in text.unicode_sentences() {
            let mut previous: Option<String> = None;
            for word in sentence.unicode_words() {
                let lower = word.to_lowercase();
                let pos = Self::tag(word, &lower, previous.as_deref());
                let lemma = Self::lemmatize(&lower, pos);

                tokens.push(AnnotatedToken {
                    text: word.to_string(),
                    lemma,
                    pos,
                    is_alpha: word.chars().all(char::is_alphabetic),
                });
                previous = Some(lower.replace('\u{2019}', "'"));
            }
        }

        tokens
    }
}
