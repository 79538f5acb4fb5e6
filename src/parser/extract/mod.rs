pub mod encounters;
pub mod factions;
pub mod items;
pub mod locations;
pub mod npcs;
pub mod quests;
pub mod reference;
pub mod revelations;

use super::patterns::Patterns;

/// A record built up across an anchor line and its continuation lines.
pub trait Accumulate {
    /// Absorb a continuation line into the open record.
    fn continue_with(&mut self, patterns: &Patterns, line: &str);
}

enum State<T> {
    Idle,
    Accumulating(T),
}

/// Two-state fold over a section's lines. An anchor always moves to
/// `Accumulating`, flushing whatever was open; a non-anchor line either feeds
/// the open record or is dropped while `Idle`.
pub struct Accumulator<T> {
    state: State<T>,
    done: Vec<T>,
}

impl<T: Accumulate> Accumulator<T> {
    pub fn new() -> Self {
        Accumulator {
            state: State::Idle,
            done: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Accumulating(_))
    }

    /// Start a new record, closing the open one first.
    pub fn anchor(&mut self, record: T) {
        if let State::Accumulating(prev) = std::mem::replace(&mut self.state, State::Accumulating(record)) {
            self.done.push(prev);
        }
    }

    /// Feed a continuation line. Returns false if nothing was open.
    pub fn continue_with(&mut self, patterns: &Patterns, line: &str) -> bool {
        match &mut self.state {
            State::Accumulating(record) => {
                record.continue_with(patterns, line);
                true
            }
            State::Idle => false,
        }
    }

    pub fn finish(mut self) -> Vec<T> {
        if let State::Accumulating(last) = self.state {
            self.done.push(last);
        }
        self.done
    }
}

impl<T: Accumulate> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Space-join a line onto a text field without leading whitespace.
pub fn append_text(field: &mut String, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    if !field.is_empty() {
        field.push(' ');
    }
    field.push_str(line);
}

/// Drop one leading list marker (`-`, `•`, `*`, `1.`) followed by whitespace.
pub fn strip_list_marker<'a>(patterns: &Patterns, line: &'a str) -> &'a str {
    match patterns.list_marker.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// `anything - description` split, used by revelations, quests, locations
/// and factions.
pub fn generic_anchor(patterns: &Patterns, line: &str) -> Option<(String, String)> {
    let caps = patterns.generic_anchor.captures(strip_list_marker(patterns, line))?;
    let name = caps[1].trim();
    let description = caps[2].trim();
    if name.is_empty() || description.is_empty() {
        return None;
    }
    Some((name.to_string(), description.to_string()))
}

/// Shared driver for extractors whose only anchor is the generic one.
pub fn extract_generic<T, F>(patterns: &Patterns, lines: &[String], build: F) -> Vec<T>
where
    T: Accumulate,
    F: Fn(&Patterns, String, String) -> T,
{
    let mut acc = Accumulator::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match generic_anchor(patterns, line) {
            Some((name, description)) => acc.anchor(build(patterns, name, description)),
            None => {
                acc.continue_with(patterns, line);
            }
        }
    }
    acc.finish()
}
