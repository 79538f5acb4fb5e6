use super::{append_text, extract_generic, Accumulate};
use crate::parser::model::Quest;
use crate::parser::patterns::Patterns;

/// Giver and reward are part of the record shape but no extraction path
/// fills them yet.
pub fn extract(patterns: &Patterns, lines: &[String]) -> Vec<Quest> {
    extract_generic(patterns, lines, |_, title, description| Quest {
        title,
        description,
        giver: None,
        reward: None,
    })
}

impl Accumulate for Quest {
    fn continue_with(&mut self, _: &Patterns, line: &str) {
        append_text(&mut self.description, line);
    }
}
