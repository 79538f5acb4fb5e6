use super::model::ParseResult;

/// Per-category scoring: (points per record, cap). The cap doubles as the
/// category's share of the denominator once it has any record.
const NPC_WEIGHT: (usize, usize) = (10, 30);
const ENCOUNTER_WEIGHT: (usize, usize) = (10, 30);
const ITEM_WEIGHT: (usize, usize) = (5, 20);
const REVELATION_WEIGHT: (usize, usize) = (10, 20);

const STRUCTURE_BONUS: usize = 10;
const MIN_DENOMINATOR: usize = 100;

pub const LOW_CONFIDENCE: f64 = 0.5;

/// Confidence from record counts and structure only, never from raw text.
pub fn score(result: &ParseResult) -> f64 {
    let mut earned = 0;
    let mut possible = 0;

    for (count, (per, cap)) in [
        (result.npcs.len(), NPC_WEIGHT),
        (result.encounters.len(), ENCOUNTER_WEIGHT),
        (result.items.len(), ITEM_WEIGHT),
        (result.revelations.len(), REVELATION_WEIGHT),
    ] {
        if count > 0 {
            earned += (count * per).min(cap);
            possible += cap;
        }
    }

    if result.npcs.iter().any(|n| n.role.is_some() || n.secret.is_some()) {
        earned += STRUCTURE_BONUS;
    }
    if result.encounters.iter().any(|e| e.cr.is_some()) {
        earned += STRUCTURE_BONUS;
    }

    let possible = possible.max(MIN_DENOMINATOR);
    (earned as f64 / possible as f64).min(1.0)
}
