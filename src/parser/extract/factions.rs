use super::{append_text, extract_generic, Accumulate};
use crate::parser::model::Faction;
use crate::parser::patterns::Patterns;

/// Reputation starts at zero and is never read from the text.
pub fn extract(patterns: &Patterns, lines: &[String]) -> Vec<Faction> {
    extract_generic(patterns, lines, |_, name, description| Faction {
        name,
        description,
        reputation: 0,
    })
}

impl Accumulate for Faction {
    fn continue_with(&mut self, _: &Patterns, line: &str) {
        append_text(&mut self.description, line);
    }
}
