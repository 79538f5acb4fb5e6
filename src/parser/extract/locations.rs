use super::{append_text, extract_generic, Accumulate};
use crate::parser::model::Location;
use crate::parser::patterns::Patterns;

pub fn extract(patterns: &Patterns, lines: &[String]) -> Vec<Location> {
    extract_generic(patterns, lines, |_, name, description| Location { name, description })
}

impl Accumulate for Location {
    fn continue_with(&mut self, _: &Patterns, line: &str) {
        append_text(&mut self.description, line);
    }
}
