use persona_core::{RecordKind, ScrapedRecord};
use std::collections::{HashMap, HashSet};

/// Most source records remembered per keyword.
pub const MAX_SOURCES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub kind: RecordKind,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct KeywordStat {
    pub keyword: String,
    /// Number of records mentioning the keyword.
    pub count: usize,
    pub sources: Vec<Provenance>,
}

/// Keyword frequencies in first-encounter order.
#[derive(Debug, Default)]
pub struct KeywordTable {
    entries: Vec<KeywordStat>,
    index: HashMap<String, usize>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts each distinct keyword of one record once.
    pub fn record<I>(&mut self, record: &ScrapedRecord, keywords: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();

        for keyword in keywords {
            if !seen.insert(keyword.clone()) {
                continue;
            }

            let slot = match self.index.get(&keyword) {
                Some(&slot) => slot,
                None => {
                    self.entries.push(KeywordStat {
                        keyword: keyword.clone(),
                        count: 0,
                        sources: Vec::new(),
                    });
                    self.index.insert(keyword, self.entries.len() - 1);
                    self.entries.len() - 1
                }
            };

            let stat = &mut self.entries[slot];
            stat.count += 1;
            if stat.sources.len() < MAX_SOURCES {
                stat.sources.push(Provenance {
                    kind: record.kind,
                    text: record.text.clone(),
                });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, keyword: &str) -> Option<&KeywordStat> {
        self.index.get(keyword).map(|&slot| &self.entries[slot])
    }

    /// Top `limit` keywords by descending count; ties keep first-encounter order.
    pub fn ranked(&self, limit: usize) -> Vec<&KeywordStat> {
        let mut ranked: Vec<&KeywordStat> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }
}
