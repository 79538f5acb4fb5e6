use std::sync::LazyLock;

use regex::Regex;

use super::sections::Category;

static PATTERNS: LazyLock<Patterns> = LazyLock::new(Patterns::new);

/// Header keywords per category. Order is load-bearing: the first category
/// with a keyword contained in the header label wins.
pub const SECTION_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Npcs,
        &["npc", "character", "cast", "dramatis personae", "people", "who", "player character"],
    ),
    (
        Category::Encounters,
        &[
            "encounter", "combat", "battle", "fight", "conflict", "challenge",
            "prepared encounter", "random table",
        ],
    ),
    (
        Category::Revelations,
        &["revelation", "secret", "twist", "mystery", "plot", "spoiler", "secrets &"],
    ),
    (
        Category::Items,
        &[
            "item", "loot", "treasure", "equipment", "gear", "magic item", "reward",
            "party resources", "cargo",
        ],
    ),
    (
        Category::Quests,
        &[
            "quest", "mission", "task", "objective", "goal", "adventure hook", "plot hook",
            "timeline", "event",
        ],
    ),
    (
        Category::Locations,
        &["location", "place", "area", "room", "map", "dungeon", "setting", "ship"],
    ),
    (
        Category::Factions,
        &["faction", "organization", "group", "guild", "order", "reputation"],
    ),
    (
        Category::Mechanics,
        &[
            "mechanic", "rule", "table", "system", "homebrew", "quick reference",
            "dm reference", "reminder",
        ],
    ),
    (
        Category::Lore,
        &[
            "lore", "history", "background", "legend", "story", "world", "campaign overview",
            "setting", "act",
        ],
    ),
];

pub const RARITIES: &[&str] = &["Common", "Uncommon", "Rare", "Very Rare", "Legendary", "Artifact"];
pub const ENCOUNTER_TAGS: &[&str] = &["Combat", "Social", "Puzzle", "Exploration"];
pub const NPC_ROLE_WORDS: &[&str] = &[
    "captain", "commander", "merchant", "guard", "wizard", "priest", "noble", "king", "queen",
];
pub const ENCOUNTER_WORDS: &[&str] = &[
    "CR", "combat", "battle", "fight", "attack", "HP", "AC", "initiative",
];
pub const ITEM_WORDS: &[&str] = &[
    "sword", "armor", "potion", "ring", "wand", "staff", "gold", "gp", "treasure",
];

pub const LOW_CONFIDENCE_WARNING: &str =
    "Consider using clear headers like \"NPCs:\", \"Encounters:\", etc. for better results";

/// Every pattern and vocabulary the pipeline matches against. Built once and
/// shared read-only by reference across all stages and threads.
pub struct Patterns {
    pub section_keywords: &'static [(Category, &'static [&'static str])],

    // normalization
    pub dash_variants: Regex,
    pub blank_runs: Regex,

    // segmentation
    pub heading: Regex,

    // shared line shapes
    pub list_marker: Regex,
    pub generic_anchor: Regex,

    // npcs
    pub npc_name_anchor: Regex,
    pub npc_bold_anchor: Regex,
    pub npc_role: Regex,
    pub npc_secret: Regex,
    pub npc_catchphrase: Regex,

    // encounters
    pub encounter_cr: Regex,
    pub encounter_typed: Regex,
    pub embedded_cr: Regex,

    // revelations
    pub revelation_when: Regex,

    // items
    pub item_bullet: Regex,
    pub item_paren: Regex,
    pub item_dash: Regex,
    pub rarity: Regex,

    // fallback sniffing
    pub two_word_name: Regex,
    pub npc_role_words: Regex,
    pub encounter_words: Regex,
    pub item_words: Regex,
    pub item_value: Regex,
}

impl Patterns {
    pub fn new() -> Self {
        Self {
            section_keywords: SECTION_KEYWORDS,

            dash_variants: Regex::new(r"[–—]").unwrap(),
            blank_runs: Regex::new(r"\n{3,}").unwrap(),

            heading: Regex::new(r"^(#{1,6})\s+(.+)$").unwrap(),

            list_marker: Regex::new(r"^(?:[-•*]|\d+\.)\s+").unwrap(),
            generic_anchor: Regex::new(r"^([^-]+?)\s*-\s*(.+)$").unwrap(),

            npc_name_anchor: Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s*-\s*(.+)$").unwrap(),
            npc_bold_anchor: Regex::new(r"^\*\*([^*]+)\*\*\s*(?:[-:]\s*)?([^-:\s].*)$").unwrap(),
            npc_role: Regex::new(r"^([^.,]+?)(?:\.|,|$)").unwrap(),
            npc_secret: Regex::new(r"(?i)\bsecret\s*:\s*(.+)$").unwrap(),
            npc_catchphrase: Regex::new(
                r#"(?i)\b(?:catchphrase|says|quote)\s*:?\s*["'“](.+?)["'”]|["“](.+?)["”]"#,
            )
            .unwrap(),

            encounter_cr: Regex::new(
                r"(?i)^([^-]+?)\s*-\s*(?:CR|Challenge Rating)\s*(\d+(?:/\d+)?)(?:\s*[-,:;]?\s*(.+))?$",
            )
            .unwrap(),
            encounter_typed: Regex::new(&format!(
                r"(?i)^([^-]+?)\s*-\s*({})\b(?:\s*[-,:;]?\s*(.+))?$",
                ENCOUNTER_TAGS.join("|")
            ))
            .unwrap(),
            embedded_cr: Regex::new(r"(?i)\bCR\s*(\d+(?:/\d+)?)").unwrap(),

            revelation_when: Regex::new(r"(?i)\b(?:when|timing|act)\b\s*:?\s*([^.]+)").unwrap(),

            item_bullet: Regex::new(r"^[-•*]\s*").unwrap(),
            item_paren: Regex::new(r"^([^(]+)\s*\(([^)]+)\)").unwrap(),
            item_dash: Regex::new(r"^([^-]+)\s*-\s*(.+)$").unwrap(),
            rarity: Regex::new(&format!(
                r"(?i)\b({})\b",
                RARITIES
                    .iter()
                    .map(|r| r.replace(' ', r"\s+"))
                    .collect::<Vec<_>>()
                    .join("|")
            ))
            .unwrap(),

            two_word_name: Regex::new(r"[A-Z][a-z]+\s+[A-Z][a-z]+").unwrap(),
            npc_role_words: word_set(NPC_ROLE_WORDS),
            encounter_words: word_set(ENCOUNTER_WORDS),
            item_words: word_set(ITEM_WORDS),
            item_value: Regex::new(r"(?i)\d+\s*(?:gp|gold)").unwrap(),
        }
    }

    /// The process-wide instance.
    pub fn global() -> &'static Patterns {
        &PATTERNS
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive whole-word alternation over a vocabulary.
fn word_set(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).unwrap()
}
