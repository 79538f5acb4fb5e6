use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    pub description: String,
    pub role: Option<String>,
    pub secret: Option<String>,
    pub catchphrase: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterType {
    Combat,
    Social,
    Puzzle,
    Exploration,
    Unknown,
}

impl EncounterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Combat => "Combat",
            Self::Social => "Social",
            Self::Puzzle => "Puzzle",
            Self::Exploration => "Exploration",
            Self::Unknown => "Unknown",
        }
    }

    /// Case-insensitive lookup of a typed tag. `Unknown` is never a tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "combat" => Some(Self::Combat),
            "social" => Some(Self::Social),
            "puzzle" => Some(Self::Puzzle),
            "exploration" => Some(Self::Exploration),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EncounterType,
    pub cr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revelation {
    pub title: String,
    pub description: String,
    pub when: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    #[serde(rename = "Very Rare")]
    VeryRare,
    Legendary,
    Artifact,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::VeryRare => "Very Rare",
            Self::Legendary => "Legendary",
            Self::Artifact => "Artifact",
        }
    }

    /// Canonical rarity for a keyword in any casing. Inner whitespace of
    /// "very rare" may be any run of spaces.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let folded = word.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        match folded.as_str() {
            "common" => Some(Self::Common),
            "uncommon" => Some(Self::Uncommon),
            "rare" => Some(Self::Rare),
            "very rare" => Some(Self::VeryRare),
            "legendary" => Some(Self::Legendary),
            "artifact" => Some(Self::Artifact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub rarity: Option<Rarity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub title: String,
    pub description: String,
    pub giver: Option<String>,
    pub reward: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub name: String,
    pub description: String,
    pub reputation: i32,
}

/// A `mechanics` or `lore` section kept whole: header label plus its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub npcs: Vec<Npc>,
    pub encounters: Vec<Encounter>,
    pub revelations: Vec<Revelation>,
    pub items: Vec<Item>,
    pub quests: Vec<Quest>,
    pub locations: Vec<Location>,
    pub factions: Vec<Faction>,
    pub mechanics: Vec<ReferenceEntry>,
    pub lore: Vec<ReferenceEntry>,
    pub notes: Vec<String>,
    pub confidence: f64,
    pub warnings: Vec<String>,
}

impl ParseResult {
    /// Typed records across every category, excluding reference entries and notes.
    pub fn total_entities(&self) -> usize {
        self.npcs.len()
            + self.encounters.len()
            + self.revelations.len()
            + self.items.len()
            + self.quests.len()
            + self.locations.len()
            + self.factions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entities() == 0
            && self.mechanics.is_empty()
            && self.lore.is_empty()
            && self.notes.is_empty()
    }
}
