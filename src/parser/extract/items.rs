use crate::parser::model::{Item, Rarity};
use crate::parser::patterns::Patterns;

const MIN_BARE_CHARS: usize = 2;
const MAX_BARE_CHARS: usize = 100;

/// Items carry no open record: every line stands alone.
pub fn extract(patterns: &Patterns, lines: &[String]) -> Vec<Item> {
    lines
        .iter()
        .filter_map(|line| parse_line(patterns, line))
        .collect()
}

/// Classify one line, in priority order: `Name (details)`, `Name - details`,
/// then a bare name.
pub fn parse_line(patterns: &Patterns, line: &str) -> Option<Item> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let clean = patterns.item_bullet.replace(line, "");
    let clean = clean.trim();

    if let Some(caps) = patterns.item_paren.captures(clean) {
        let details = caps[2].trim();
        return Some(Item {
            name: caps[1].trim().to_string(),
            description: details.to_string(),
            rarity: extract_rarity(patterns, details),
        });
    }

    if let Some(caps) = patterns.item_dash.captures(clean) {
        let details = caps[2].trim();
        return Some(Item {
            name: caps[1].trim().to_string(),
            description: details.to_string(),
            rarity: extract_rarity(patterns, details),
        });
    }

    let len = clean.chars().count();
    if len > MIN_BARE_CHARS && len < MAX_BARE_CHARS {
        return Some(Item {
            name: clean.to_string(),
            description: String::new(),
            rarity: None,
        });
    }

    None
}

/// First rarity keyword in the text, in canonical casing.
pub fn extract_rarity(patterns: &Patterns, text: &str) -> Option<Rarity> {
    let caps = patterns.rarity.captures(text)?;
    Rarity::from_keyword(&caps[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<Item> {
        let lines: Vec<String> = text.lines().map(String::from).collect();
        extract(Patterns::global(), &lines)
    }

    #[test]
    fn parenthetical_and_bare() {
        let items = run("- Longsword (Rare, +1 to hit)\n- Rope, 50ft");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Longsword");
        assert_eq!(items[0].description, "Rare, +1 to hit");
        assert_eq!(items[0].rarity, Some(Rarity::Rare));
        assert_eq!(items[1].name, "Rope, 50ft");
        assert_eq!(items[1].description, "");
        assert_eq!(items[1].rarity, None);
    }

    #[test]
    fn dash_description() {
        let items = run("• Cloak of Shadows - very rare, grants advantage on stealth");
        assert_eq!(items[0].name, "Cloak of Shadows");
        assert_eq!(items[0].description, "very rare, grants advantage on stealth");
        assert_eq!(items[0].rarity, Some(Rarity::VeryRare));
    }

    #[test]
    fn rarity_canonical_casing() {
        let p = Patterns::global();
        for (text, want) in [
            ("a COMMON trinket", Rarity::Common),
            ("uncommon", Rarity::Uncommon),
            ("Legendary blade", Rarity::Legendary),
            ("an artifact of old", Rarity::Artifact),
        ] {
            assert_eq!(extract_rarity(p, text), Some(want), "{}", text);
        }
        assert_eq!(extract_rarity(p, "rarely seen"), None);
    }

    #[test]
    fn first_rarity_wins() {
        let p = Patterns::global();
        assert_eq!(extract_rarity(p, "Legendary, once Common"), Some(Rarity::Legendary));
    }

    #[test]
    fn bare_length_bounds() {
        assert!(run("ab").is_empty());
        assert_eq!(run("abc").len(), 1);
        assert!(run(&"x".repeat(100)).is_empty());
        assert_eq!(run(&"x".repeat(99)).len(), 1);
    }

    #[test]
    fn every_line_independent() {
        let items = run("Potion of Healing (Common)\n\n* 200 gp\nWand - Uncommon");
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Potion of Healing", "200 gp", "Wand"]);
        assert_eq!(items[2].rarity, Some(Rarity::Uncommon));
    }
}
