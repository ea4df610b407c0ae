//! Navigation engine: traveler state, objective sequencing and the planning helpers it drives.
//! Submodules hold the search, sight and key-choice rules; this file owns run state.

use std::collections::BTreeSet;
use std::mem;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::grid::Grid;
use crate::keys::KeySet;
use crate::types::*;

mod advance;
mod key_choice;
mod pathfinding;
mod traveler;
mod visibility;

#[cfg(test)]
mod test_support;

pub use key_choice::{KeyDecision, KeyTrial, evaluate_offer};
pub use pathfinding::{Route, shortest_path};
pub use traveler::Traveler;
pub use visibility::{RevealReport, reveal};

use pathfinding::dijkstra;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Total move cap for the run; `None` runs until every objective resolves.
    #[serde(default)]
    pub max_moves: Option<u64>,
}

#[derive(Clone, Debug)]
enum LegPhase {
    Planning,
    Walking(WalkPlan),
}

/// A committed route plus how far along it the traveler has walked.
#[derive(Clone, Debug)]
struct WalkPlan {
    route: Route,
    on_route: BTreeSet<Pos>,
    taken: usize,
}

impl WalkPlan {
    fn new(route: Route) -> Self {
        let on_route = route.nodes().iter().copied().collect();
        Self { route, on_route, taken: 0 }
    }

    fn next_step(&mut self) -> Option<Pos> {
        let nodes = self.route.nodes();
        let remaining = nodes.len().checked_sub(self.taken)?.checked_sub(1)?;
        self.taken += 1;
        Some(nodes[remaining])
    }
}

pub struct Expedition {
    grid: Grid,
    traveler: Traveler,
    keys: KeySet,
    objectives: Vec<Objective>,
    next_objective: usize,
    pending_offer: Vec<KeyId>,
    offer_resolved: bool,
    phase: LegPhase,
    log: Vec<NavEvent>,
    moves: u64,
    replans: u32,
    config: EngineConfig,
    finished_outcome: Option<RunOutcome>,
}

impl Expedition {
    /// Places the traveler at `start` and performs the initial reveal.
    pub fn new(
        mut grid: Grid,
        start: Pos,
        sight_radius: u32,
        objectives: Vec<Objective>,
        config: EngineConfig,
    ) -> Result<Self, GridError> {
        grid.checked_index(start)?;
        for objective in &objectives {
            grid.checked_index(objective.target)?;
        }

        let keys = KeySet::new();
        let initial = reveal(&mut grid, start, sight_radius, None, &BTreeSet::new(), &keys);
        debug!(revealed = initial.newly_revealed, ?start, "initial sight");

        Ok(Self {
            grid,
            traveler: Traveler::new(start, sight_radius),
            keys,
            objectives,
            next_objective: 0,
            pending_offer: Vec::new(),
            offer_resolved: false,
            phase: LegPhase::Planning,
            log: Vec::new(),
            moves: 0,
            replans: 0,
            config,
            finished_outcome: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn traveler(&self) -> &Traveler {
        &self.traveler
    }

    pub fn position(&self) -> Pos {
        self.traveler.pos()
    }

    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    pub fn log(&self) -> &[NavEvent] {
        &self.log
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// The objective currently being pursued, `None` once all are reached.
    pub fn current_objective(&self) -> Option<&Objective> {
        self.objectives.get(self.next_objective)
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn replans(&self) -> u32 {
        self.replans
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.finished_outcome
    }

    /// Drives the run until it finishes.
    pub fn run_to_end(&mut self) -> RunOutcome {
        loop {
            if let AdvanceStopReason::Finished(outcome) = self.advance(u32::MAX).stop_reason {
                return outcome;
            }
        }
    }

    fn resolve_offer(&mut self, target: Pos) {
        if self.pending_offer.is_empty() {
            return;
        }
        let offer = mem::take(&mut self.pending_offer);
        let from = self.traveler.pos();
        match key_choice::rank_candidates(&self.grid, from, target, &offer, &self.keys) {
            Some(decision) => {
                info!(key = decision.key.0, distance = decision.distance, "key chosen");
                self.keys.insert(decision.key);
                self.log.push(NavEvent::KeyChosen { key: decision.key });
            }
            None => debug!(?offer, "every offered key is already held"),
        }
    }

    fn plan_leg(&self, target: Pos) -> Option<WalkPlan> {
        let route = dijkstra(&self.grid, self.traveler.pos(), target, &self.keys);
        debug!(
            from = ?self.traveler.pos(),
            ?target,
            distance = route.distance(),
            steps = route.len(),
            "planned leg"
        );
        route.is_reachable().then(|| WalkPlan::new(route))
    }

    fn step_along(&mut self, next: Pos, on_route: &BTreeSet<Pos>) -> RevealReport {
        let heading = self.traveler.step_to(next);
        self.moves += 1;
        self.log.push(NavEvent::Moved { to: next });
        reveal(
            &mut self.grid,
            next,
            self.traveler.sight_radius(),
            heading,
            on_route,
            &self.keys,
        )
    }
}
