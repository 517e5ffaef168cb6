use std::fmt;

/// Which persona section a ranked keyword lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Trait,
    Interest,
    Goal,
}

const TRAIT_PHRASES: &[(&str, &str)] = &[
    ("gaming", "Enjoys gaming and esports culture"),
    ("ai", "Interested in AI and emerging technologies"),
    ("nyc", "Engaged with NYC-related topics and lifestyle"),
    ("make", "Creative and enjoys making or building things"),
    ("use", "Practical and focused on applying knowledge"),
    ("thought", "Reflective and thoughtful in discussions"),
    ("guy", "Shares personal perspectives often"),
];

const INTEREST_PHRASES: &[(&str, &str)] = &[
    ("post", "Active in posting content"),
    ("thread", "Participates in discussion threads"),
    ("seasonal", "Follows seasonal trends or events"),
    ("ai", "Interested in AI advancements"),
    ("buying", "Engages in buying or investing topics"),
];

const GOAL_PHRASES: &[(&str, &str)] = &[
    ("character", "Focuses on character development or traits"),
    ("holder", "Concerned with holding or maintaining assets"),
    ("exploit", "Looks into exploiting opportunities or systems"),
    ("investing", "Interested in investment and finance"),
    ("update", "Keeps information current and updated"),
];

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Trait, Bucket::Interest, Bucket::Goal];

    pub fn heading(&self) -> &'static str {
        match self {
            Bucket::Trait => "Personality Traits:",
            Bucket::Interest => "Interests:",
            Bucket::Goal => "Goals:",
        }
    }

    fn phrases(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Bucket::Trait => TRAIT_PHRASES,
            Bucket::Interest => INTEREST_PHRASES,
            Bucket::Goal => GOAL_PHRASES,
        }
    }

    fn fallback(&self, keyword: &str) -> String {
        match self {
            Bucket::Trait => format!("Shows interest in {}", keyword),
            Bucket::Interest => format!("Interested in {}", keyword),
            Bucket::Goal => format!("Aims to achieve {}", keyword),
        }
    }

    /// Human-readable phrase for `keyword` in this bucket.
    pub fn describe(&self, keyword: &str) -> String {
        let keyword = keyword.to_lowercase();
        self.phrases()
            .iter()
            .find(|(key, _)| *key == keyword)
            .map(|(_, phrase)| phrase.to_string())
            .unwrap_or_else(|| self.fallback(&keyword))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::Trait => "traits",
            Bucket::Interest => "interests",
            Bucket::Goal => "goals",
        };
        f.write_str(name)
    }
}
