use tracing::debug;

use super::extract::{encounters, items, npcs};
use super::model::ParseResult;
use super::patterns::Patterns;
use super::sections::Section;

const MIN_NOTE_CHARS: usize = 20;

/// What an unlabeled block was taken to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    Npcs,
    Encounters,
    Items,
    Note,
    Discard,
}

/// Content sniffing for a block whose header matched no category. The
/// sniffs are tried in fixed order and only the first hit runs.
pub fn guess(patterns: &Patterns, text: &str) -> Guess {
    if looks_like_npcs(patterns, text) {
        Guess::Npcs
    } else if looks_like_encounters(patterns, text) {
        Guess::Encounters
    } else if looks_like_items(patterns, text) {
        Guess::Items
    } else if text.trim().chars().count() > MIN_NOTE_CHARS {
        Guess::Note
    } else {
        Guess::Discard
    }
}

pub fn looks_like_npcs(patterns: &Patterns, text: &str) -> bool {
    patterns.two_word_name.is_match(text) && patterns.npc_role_words.is_match(text)
}

pub fn looks_like_encounters(patterns: &Patterns, text: &str) -> bool {
    patterns.encounter_words.is_match(text)
}

pub fn looks_like_items(patterns: &Patterns, text: &str) -> bool {
    patterns.item_words.is_match(text) || patterns.item_value.is_match(text)
}

pub fn apply(patterns: &Patterns, section: &Section, result: &mut ParseResult) {
    let text = section.text();
    let guess = guess(patterns, &text);
    debug!("Unlabeled section {:?} read as {:?}", section.header, guess);

    match guess {
        Guess::Npcs => result.npcs.extend(npcs::extract(patterns, &section.content)),
        Guess::Encounters => result
            .encounters
            .extend(encounters::extract(patterns, &section.content)),
        Guess::Items => result.items.extend(items::extract(patterns, &section.content)),
        Guess::Note => result.notes.push(text),
        Guess::Discard => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sections::Category;

    fn p() -> &'static Patterns {
        Patterns::global()
    }

    fn section(text: &str) -> Section {
        Section {
            header: String::new(),
            content: text.lines().map(String::from).collect(),
            category: Category::Unknown,
        }
    }

    #[test]
    fn npc_sniff_needs_name_and_role() {
        assert_eq!(guess(p(), "Captain Mara Holt - commands the watch"), Guess::Npcs);
        assert_ne!(guess(p(), "Mara Holt runs the docks"), Guess::Npcs);
        assert_ne!(guess(p(), "the captain is drunk again tonight"), Guess::Npcs);
    }

    #[test]
    fn priority_npc_over_encounter_over_item() {
        // matches all three sniffs
        let text = "Sir Aldric the noble guard swings his sword in combat";
        assert_eq!(guess(p(), text), Guess::Npcs);
        assert_eq!(guess(p(), "a fight breaks out over the gold"), Guess::Encounters);
        assert_eq!(guess(p(), "a chest with 50gp inside"), Guess::Items);
    }

    #[test]
    fn note_or_discard_by_length() {
        assert_eq!(guess(p(), "The weather turns cold as winter comes."), Guess::Note);
        assert_eq!(guess(p(), "short aside"), Guess::Discard);
        assert_eq!(guess(p(), "exactly twenty chars"), Guess::Discard);
    }

    #[test]
    fn unlabeled_items_block() {
        let mut result = ParseResult::default();
        apply(p(), &section("Random unlabeled text about a sword and 50 gold"), &mut result);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "Random unlabeled text about a sword and 50 gold");
        assert!(result.notes.is_empty());
    }

    #[test]
    fn unlabeled_note_kept_verbatim() {
        let mut result = ParseResult::default();
        apply(p(), &section("Session zero went long.\nEveryone wants a boat."), &mut result);
        assert_eq!(result.notes, vec!["Session zero went long.\nEveryone wants a boat.".to_string()]);
    }
}
