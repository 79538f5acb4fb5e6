use super::{append_text, generic_anchor, strip_list_marker, Accumulate, Accumulator};
use crate::parser::model::{Encounter, EncounterType};
use crate::parser::patterns::Patterns;

/// Anchors are tried per line in priority order: challenge rating, typed
/// tag, then the loose `Name - description` shape, which only opens a new
/// encounter when none is open.
pub fn extract(patterns: &Patterns, lines: &[String]) -> Vec<Encounter> {
    let mut acc = Accumulator::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(enc) = rated_anchor(patterns, line).or_else(|| typed_anchor(patterns, line)) {
            acc.anchor(enc);
            continue;
        }
        if !acc.is_open() {
            if let Some(enc) = loose_anchor(patterns, line) {
                acc.anchor(enc);
                continue;
            }
        }
        acc.continue_with(patterns, line);
    }
    acc.finish()
}

/// `Name - CR <n> [description]`, the description optionally led by `-`,
/// `,`, `:` or `;`.
pub fn rated_anchor(patterns: &Patterns, line: &str) -> Option<Encounter> {
    let caps = patterns.encounter_cr.captures(strip_list_marker(patterns, line))?;
    let name = caps[1].trim();
    if name.is_empty() {
        return None;
    }
    Some(Encounter {
        name: name.to_string(),
        description: trailing(caps.get(3)),
        kind: EncounterType::Combat,
        cr: Some(caps[2].to_string()),
    })
}

/// `Name - Combat|Social|Puzzle|Exploration [description]`
pub fn typed_anchor(patterns: &Patterns, line: &str) -> Option<Encounter> {
    let caps = patterns.encounter_typed.captures(strip_list_marker(patterns, line))?;
    let name = caps[1].trim();
    if name.is_empty() {
        return None;
    }
    Some(Encounter {
        name: name.to_string(),
        description: trailing(caps.get(3)),
        kind: EncounterType::from_tag(&caps[2]).unwrap_or(EncounterType::Unknown),
        cr: None,
    })
}

/// `Name - description`, with a `CR <n>` token in the description promoting
/// it to a rated combat encounter.
pub fn loose_anchor(patterns: &Patterns, line: &str) -> Option<Encounter> {
    let (name, description) = generic_anchor(patterns, line)?;
    let cr = patterns
        .embedded_cr
        .captures(&description)
        .map(|c| c[1].to_string());
    let kind = if cr.is_some() {
        EncounterType::Combat
    } else {
        EncounterType::Unknown
    };
    Some(Encounter {
        name,
        description,
        kind,
        cr,
    })
}

/// Anchor-line text after the rating or tag, minus leading separators.
fn trailing(m: Option<regex::Match<'_>>) -> String {
    m.map(|m| {
        m.as_str()
            .trim_start_matches(|c: char| c.is_whitespace() || "-,:;.".contains(c))
            .trim_end()
            .to_string()
    })
    .unwrap_or_default()
}

impl Accumulate for Encounter {
    fn continue_with(&mut self, _: &Patterns, line: &str) {
        append_text(&mut self.description, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<Encounter> {
        let lines: Vec<String> = text.lines().map(String::from).collect();
        extract(Patterns::global(), &lines)
    }

    #[test]
    fn rated_encounter() {
        let e = run("Goblin Ambush - CR 2\nSix goblins hide in the reeds.");
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].name, "Goblin Ambush");
        assert_eq!(e[0].cr.as_deref(), Some("2"));
        assert_eq!(e[0].kind, EncounterType::Combat);
        assert_eq!(e[0].description, "Six goblins hide in the reeds.");
    }

    #[test]
    fn rated_with_trailing_description() {
        let e = run("Bridge Trolls - Challenge Rating 5 - Two trolls demand a toll");
        assert_eq!(e[0].cr.as_deref(), Some("5"));
        assert_eq!(e[0].description, "Two trolls demand a toll");
    }

    #[test]
    fn comma_led_tail_kept() {
        let e = run("Bridge - Combat, two trolls block the way\nGoblins - CR 2, six of them in the reeds");
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].kind, EncounterType::Combat);
        assert_eq!(e[0].description, "two trolls block the way");
        assert_eq!(e[1].cr.as_deref(), Some("2"));
        assert_eq!(e[1].description, "six of them in the reeds");
    }

    #[test]
    fn space_led_tail_kept() {
        let e = run("Bargain with Hesk - Social encounter with the scout\nVault - CR 12 golem guards the door");
        assert_eq!(e[0].kind, EncounterType::Social);
        assert_eq!(e[0].description, "encounter with the scout");
        assert_eq!(e[1].cr.as_deref(), Some("12"));
        assert_eq!(e[1].description, "golem guards the door");
    }

    #[test]
    fn bare_tag_keeps_empty_description() {
        let e = run("Riddle Door - Puzzle.");
        assert_eq!(e[0].kind, EncounterType::Puzzle);
        assert_eq!(e[0].description, "");
    }

    #[test]
    fn fractional_cr() {
        let e = run("Rats - CR 1/4");
        assert_eq!(e[0].cr.as_deref(), Some("1/4"));
    }

    #[test]
    fn typed_tags() {
        let e = run("The Masked Ball - social\nDance with the duke.\nRiddle Door - Puzzle");
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].kind, EncounterType::Social);
        assert_eq!(e[0].cr, None);
        assert_eq!(e[0].description, "Dance with the duke.");
        assert_eq!(e[1].kind, EncounterType::Puzzle);
        assert_eq!(e[1].description, "");
    }

    #[test]
    fn loose_anchor_only_when_idle() {
        let e = run(
            "Dock Brawl - sailors pick a fight, CR 1\n\
             Harbor guards - arrive after three rounds\n\
             Sewer Chase - Exploration",
        );
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].name, "Dock Brawl");
        assert_eq!(e[0].cr.as_deref(), Some("1"));
        assert_eq!(e[0].kind, EncounterType::Combat);
        assert_eq!(
            e[0].description,
            "sailors pick a fight, CR 1 Harbor guards - arrive after three rounds"
        );
        assert_eq!(e[1].name, "Sewer Chase");
        assert_eq!(e[1].kind, EncounterType::Exploration);
    }

    #[test]
    fn loose_without_cr_is_unknown() {
        let e = run("Strange Lights - something glows in the marsh");
        assert_eq!(e[0].kind, EncounterType::Unknown);
        assert_eq!(e[0].cr, None);
    }

    #[test]
    fn unanchored_lines_dropped_while_idle() {
        assert!(run("no dash on this line\nnor this").is_empty());
    }

    #[test]
    fn combatants_is_not_a_tag() {
        let e = run("Arena - Combatants circle each other");
        assert_eq!(e[0].kind, EncounterType::Unknown);
        assert_eq!(e[0].description, "Combatants circle each other");
    }
}
