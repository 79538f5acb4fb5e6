use super::{append_text, extract_generic, Accumulate};
use crate::parser::model::Revelation;
use crate::parser::patterns::Patterns;

pub fn extract(patterns: &Patterns, lines: &[String]) -> Vec<Revelation> {
    extract_generic(patterns, lines, |p, title, description| {
        let when = timing_hint(p, &description);
        Revelation {
            title,
            description,
            when,
        }
    })
}

/// `when|timing|act <text>` up to the next period.
pub fn timing_hint(patterns: &Patterns, description: &str) -> Option<String> {
    patterns
        .revelation_when
        .captures(description)
        .map(|c| c[1].trim().to_string())
        .filter(|w| !w.is_empty())
}

impl Accumulate for Revelation {
    fn continue_with(&mut self, _: &Patterns, line: &str) {
        append_text(&mut self.description, line);
    }
}
