use super::{append_text, strip_list_marker, Accumulate, Accumulator};
use crate::parser::model::Npc;
use crate::parser::patterns::Patterns;

const MAX_ROLE_CHARS: usize = 50;

pub fn extract(patterns: &Patterns, lines: &[String]) -> Vec<Npc> {
    let mut acc = Accumulator::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match anchor(patterns, line) {
            Some(npc) => acc.anchor(npc),
            None => {
                acc.continue_with(patterns, line);
            }
        }
    }
    acc.finish()
}

/// `Name - description` or `**Name** - description`, optionally bulleted.
pub fn anchor(patterns: &Patterns, line: &str) -> Option<Npc> {
    let body = strip_list_marker(patterns, line);
    let caps = patterns
        .npc_name_anchor
        .captures(body)
        .or_else(|| patterns.npc_bold_anchor.captures(body))?;
    let name = caps[1].trim();
    let rest = caps[2].trim();
    if name.is_empty() || rest.is_empty() {
        return None;
    }

    let (lead, secret) = split_secret(patterns, rest);
    let role = lead.and_then(|l| infer_role(patterns, l));
    let description = lead.unwrap_or(rest).to_string();
    Some(Npc {
        name: name.to_string(),
        description,
        role,
        secret,
        catchphrase: None,
    })
}

/// Leading clause up to the first `.` or `,`, when it is short enough to
/// read as a role.
pub fn infer_role(patterns: &Patterns, description: &str) -> Option<String> {
    let caps = patterns.npc_role.captures(description)?;
    let clause = &caps[1];
    if clause.chars().count() < MAX_ROLE_CHARS {
        Some(clause.trim().to_string()).filter(|r| !r.is_empty())
    } else {
        None
    }
}

/// Separate an inline `secret: ...` clause from the text leading up to it.
/// The lead is `None` when the clause opens the text.
fn split_secret<'a>(patterns: &Patterns, text: &'a str) -> (Option<&'a str>, Option<String>) {
    let Some(caps) = patterns.npc_secret.captures(text) else {
        return (Some(text), None);
    };
    let secret = caps[1].trim().to_string();
    let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
    let lead = text[..start].trim();
    (Some(lead).filter(|l| !l.is_empty()), Some(secret))
}

pub fn match_secret(patterns: &Patterns, line: &str) -> Option<String> {
    patterns
        .npc_secret
        .captures(line)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn match_catchphrase(patterns: &Patterns, line: &str) -> Option<String> {
    let caps = patterns.npc_catchphrase.captures(line)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

impl Accumulate for Npc {
    fn continue_with(&mut self, patterns: &Patterns, line: &str) {
        if let Some(secret) = match_secret(patterns, line) {
            self.secret = Some(secret);
        } else if let Some(phrase) = match_catchphrase(patterns, line) {
            self.catchphrase = Some(phrase);
        } else {
            append_text(&mut self.description, line);
        }
    }
}
