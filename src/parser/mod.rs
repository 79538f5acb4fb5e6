pub mod confidence;
pub mod extract;
pub mod fallback;
pub mod model;
pub mod normalize;
pub mod patterns;
pub mod sections;

use tracing::debug;

use extract::{encounters, factions, items, locations, npcs, quests, reference, revelations};
use model::ParseResult;
use patterns::Patterns;
use sections::{Category, Section};

/// Five-stage pipeline: normalize → sections → classify → extract → score.
pub fn parse(raw: &str) -> ParseResult {
    parse_with(Patterns::global(), raw)
}

pub fn parse_with(patterns: &Patterns, raw: &str) -> ParseResult {
    let text = normalize::normalize(patterns, raw);
    let sections = sections::segment(patterns, &text);
    debug!("Segmented {} sections", sections.len());

    let mut result = ParseResult::default();
    for section in &sections {
        extract_section(patterns, section, &mut result);
    }

    result.confidence = confidence::score(&result);
    if result.confidence < confidence::LOW_CONFIDENCE {
        result.warnings.push(patterns::LOW_CONFIDENCE_WARNING.to_string());
    }
    result
}

fn extract_section(patterns: &Patterns, section: &Section, result: &mut ParseResult) {
    debug!(
        "Section {:?} ({} lines) -> {}",
        section.header,
        section.content.len(),
        section.category.as_str()
    );
    let lines = &section.content;
    match section.category {
        Category::Npcs => result.npcs.extend(npcs::extract(patterns, lines)),
        Category::Encounters => result.encounters.extend(encounters::extract(patterns, lines)),
        Category::Revelations => result.revelations.extend(revelations::extract(patterns, lines)),
        Category::Items => result.items.extend(items::extract(patterns, lines)),
        Category::Quests => result.quests.extend(quests::extract(patterns, lines)),
        Category::Locations => result.locations.extend(locations::extract(patterns, lines)),
        Category::Factions => result.factions.extend(factions::extract(patterns, lines)),
        Category::Mechanics => result.mechanics.push(reference::extract(section)),
        Category::Lore => result.lore.push(reference::extract(section)),
        Category::Unknown => fallback::apply(patterns, section, result),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use model::{EncounterType, Rarity};

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.md", name)).unwrap()
    }

    #[test]
    fn npc_scenario() {
        let r = parse("## NPCs\nGrakthar - Orc warlord. secret: He is the king's brother.");
        assert_eq!(r.npcs.len(), 1);
        let g = &r.npcs[0];
        assert_eq!(g.name, "Grakthar");
        assert_eq!(g.role.as_deref(), Some("Orc warlord"));
        assert_eq!(g.secret.as_deref(), Some("He is the king's brother."));
        assert_eq!(g.description, "Orc warlord.");
    }

    #[test]
    fn items_scenario() {
        let r = parse("## Items\n- Longsword (Rare, +1 to hit)\n- Rope, 50ft");
        assert_eq!(r.items.len(), 2);
        assert_eq!(r.items[0].name, "Longsword");
        assert_eq!(r.items[0].description, "Rare, +1 to hit");
        assert_eq!(r.items[0].rarity, Some(Rarity::Rare));
        assert_eq!(r.items[1].name, "Rope, 50ft");
        assert_eq!(r.items[1].description, "");
        assert_eq!(r.items[1].rarity, None);
    }

    #[test]
    fn unlabeled_scenario() {
        let r = parse("Random unlabeled text about a sword and 50 gold");
        assert_eq!(r.items.len(), 1);
        assert!(r.notes.is_empty());
    }

    #[test]
    fn empty_input() {
        let r = parse("");
        assert!(r.is_empty());
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.warnings, vec![patterns::LOW_CONFIDENCE_WARNING.to_string()]);
    }

    #[test]
    fn whitespace_and_odd_input_never_panics() {
        for input in [
            "\r\n\r\n\r\n",
            "#",
            "# ",
            "######",
            "- - - -",
            "**",
            "(((",
            "—–—",
            "Name -",
            "## NPCs\n**\n- \n\"\"",
            "## Items\n()\n(-)\n- (",
        ] {
            let r = parse(input);
            assert!((0.0..=1.0).contains(&r.confidence), "{:?}", input);
        }
    }

    #[test]
    fn dash_variants_normalized_before_matching() {
        let r = parse("# Cast\r\nVex — fence and informant\r\n");
        assert_eq!(r.npcs.len(), 1);
        assert_eq!(r.npcs[0].description, "fence and informant");
    }

    #[test]
    fn reference_sections_kept() {
        let r = parse("## House Rules\nCrits explode.\n\n## World History\nThe empire fell.");
        assert_eq!(r.mechanics.len(), 1);
        assert_eq!(r.mechanics[0].title, "house rules");
        assert_eq!(r.lore.len(), 1);
        assert_eq!(r.lore[0].content, "The empire fell.");
    }

    #[test]
    fn warnings_only_when_low() {
        let r = parse(
            "## NPCs\nAnn - guard, tall\nBo - guard, short\nCy - guard, old\n\
             ## Encounters\nGate - CR 1\nWall - CR 2\nKeep - CR 3",
        );
        assert!(r.confidence >= 0.5);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn idempotent() {
        let md = fixture("sunken_temple");
        let a = serde_json::to_string(&parse(&md)).unwrap();
        let b = serde_json::to_string(&parse(&md)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn concurrent_parses_agree() {
        let md = fixture("sunken_temple");
        let expected = parse(&md);
        let outputs: Vec<ParseResult> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| parse(&md))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for out in outputs {
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn sunken_temple_fixture() {
        let r = parse(&fixture("sunken_temple"));

        let names: Vec<&str> = r.npcs.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Mother Ysolde", "Brother Cale", "Hesk"]);
        assert_eq!(r.npcs[0].secret.as_deref(), Some("She drowned the old abbot."));
        assert_eq!(r.npcs[1].catchphrase.as_deref(), Some("The tide remembers."));
        assert_eq!(r.npcs[2].role.as_deref(), Some("Kuo-toa scout"));

        assert_eq!(r.encounters.len(), 3);
        assert_eq!(r.encounters[0].cr.as_deref(), Some("3"));
        assert_eq!(r.encounters[1].kind, EncounterType::Puzzle);
        assert_eq!(r.encounters[2].kind, EncounterType::Social);

        assert_eq!(r.revelations.len(), 2);
        assert_eq!(r.revelations[0].when.as_deref(), Some("after the flooded nave"));

        assert_eq!(r.items.len(), 3);
        assert_eq!(r.items[0].rarity, Some(Rarity::Uncommon));
        assert_eq!(r.items[2].name, "Coral key");

        assert_eq!(r.quests.len(), 1);
        assert_eq!(r.locations.len(), 2);
        assert_eq!(r.factions.len(), 1);
        assert_eq!(r.mechanics.len(), 1);
        assert_eq!(r.lore.len(), 1);
        assert_eq!(r.notes.len(), 1);

        assert!(r.confidence >= 0.5, "confidence {}", r.confidence);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn freeform_fixture_is_low_confidence() {
        let r = parse(&fixture("freeform"));
        assert!(r.confidence < 0.5);
        assert_eq!(r.warnings.len(), 1);
        assert!(!r.notes.is_empty());
    }
}
