//! Lookahead key selection for objective offers.
//! Each candidate is trialled on a scratch key set; nothing here mutates the held keys.

use super::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyTrial {
    pub key: KeyId,
    pub distance: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyDecision {
    pub key: KeyId,
    pub distance: f64,
    /// Every evaluated candidate in offer order.
    pub trials: Vec<KeyTrial>,
}

/// Picks the offered key that minimizes the distance from `from` to `objective`.
///
/// Candidates already held are skipped. Ties keep the earliest candidate.
/// Returns `None` when no candidate is eligible.
pub fn evaluate_offer(
    grid: &Grid,
    from: Pos,
    objective: Pos,
    candidates: &[KeyId],
    held: &KeySet,
) -> Result<Option<KeyDecision>, GridError> {
    grid.checked_index(from)?;
    grid.checked_index(objective)?;
    Ok(rank_candidates(grid, from, objective, candidates, held))
}

pub(super) fn rank_candidates(
    grid: &Grid,
    from: Pos,
    objective: Pos,
    candidates: &[KeyId],
    held: &KeySet,
) -> Option<KeyDecision> {
    let mut trials = Vec::with_capacity(candidates.len());
    let mut best: Option<KeyTrial> = None;

    for &key in candidates {
        if held.contains(key) {
            continue;
        }
        let scratch = held.with(key);
        let distance = dijkstra(grid, from, objective, &scratch).distance();
        debug!(key = key.0, distance, "key trial");

        let trial = KeyTrial { key, distance };
        if best.is_none_or(|current| distance < current.distance) {
            best = Some(trial);
        }
        trials.push(trial);
    }

    best.map(|best| KeyDecision { key: best.key, distance: best.distance, trials })
}
