use serde::{Deserialize, Serialize};

use super::patterns::Patterns;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Npcs,
    Encounters,
    Revelations,
    Items,
    Quests,
    Locations,
    Factions,
    Mechanics,
    Lore,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npcs => "npcs",
            Self::Encounters => "encounters",
            Self::Revelations => "revelations",
            Self::Items => "items",
            Self::Quests => "quests",
            Self::Locations => "locations",
            Self::Factions => "factions",
            Self::Mechanics => "mechanics",
            Self::Lore => "lore",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    /// Lowercased header text; empty for preamble before the first header.
    pub header: String,
    /// Trimmed, non-blank lines in source order.
    pub content: Vec<String>,
    pub category: Category,
}

impl Section {
    fn open(patterns: &Patterns, header: String) -> Self {
        let category = classify(patterns, &header);
        Section {
            header,
            content: Vec::new(),
            category,
        }
    }

    pub fn text(&self) -> String {
        self.content.join("\n")
    }
}

/// Split normalized text into header-delimited sections. Sections without
/// content lines are dropped.
pub fn segment(patterns: &Patterns, text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section::open(patterns, String::new());

    for line in text.lines() {
        let line = line.trim();
        if let Some(caps) = patterns.heading.captures(line) {
            let next = Section::open(patterns, caps[2].trim().to_lowercase());
            let done = std::mem::replace(&mut current, next);
            if !done.content.is_empty() {
                sections.push(done);
            }
        } else if !line.is_empty() {
            current.content.push(line.to_string());
        }
    }

    if !current.content.is_empty() {
        sections.push(current);
    }

    sections
}

/// First category (in table order) whose keyword occurs in the label.
pub fn classify(patterns: &Patterns, header: &str) -> Category {
    let header = header.to_lowercase();
    patterns
        .section_keywords
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| header.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Unknown)
}

// ── Tests ──
