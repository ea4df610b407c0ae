//! Per-move navigation loop and stop-reason handling.

use super::*;

impl Expedition {
    /// Advances the run by at most `max_moves` moves.
    ///
    /// Returns early when an objective is reached or the run finishes. Walking
    /// state is kept between calls, so a paused route resumes where it stopped.
    pub fn advance(&mut self, max_moves: u32) -> AdvanceResult {
        let mut moves = 0;
        if let Some(outcome) = self.finished_outcome {
            return AdvanceResult { moves: 0, stop_reason: AdvanceStopReason::Finished(outcome) };
        }

        loop {
            let Some(target) = self.current_objective().map(|objective| objective.target) else {
                return self.finish(RunOutcome::Completed, moves);
            };

            match mem::replace(&mut self.phase, LegPhase::Planning) {
                LegPhase::Planning => {
                    if !self.offer_resolved {
                        self.resolve_offer(target);
                        self.offer_resolved = true;
                    }
                    if self.traveler.pos() == target {
                        return self.reach_objective(moves);
                    }
                    match self.plan_leg(target) {
                        Some(plan) => self.phase = LegPhase::Walking(plan),
                        None => return self.halt_unreachable(moves),
                    }
                }
                LegPhase::Walking(mut plan) => {
                    if moves >= max_moves {
                        self.phase = LegPhase::Walking(plan);
                        return AdvanceResult { moves, stop_reason: AdvanceStopReason::BudgetExhausted };
                    }
                    if let Some(limit) = self.config.max_moves
                        && self.moves >= limit
                    {
                        warn!(limit, "move budget exceeded");
                        return self.finish(RunOutcome::MoveBudgetExceeded { moves: self.moves }, moves);
                    }
                    let Some(next) = plan.next_step() else {
                        continue;
                    };

                    let report = self.step_along(next, &plan.on_route);
                    moves += 1;
                    if !report.is_path_valid() {
                        self.replans += 1;
                        self.log.push(NavEvent::PathImpassable);
                        debug!(at = ?next, violations = ?report.violations, "route invalidated");
                        continue;
                    }
                    if next == target {
                        return self.reach_objective(moves);
                    }
                    self.phase = LegPhase::Walking(plan);
                }
            }
        }
    }

    fn reach_objective(&mut self, moves: u32) -> AdvanceResult {
        let index = self.next_objective + 1;
        self.log.push(NavEvent::ObjectiveReached { index });
        info!(index, at = ?self.traveler.pos(), total_moves = self.moves, "objective reached");

        self.pending_offer = self.objectives[self.next_objective].offer.clone();
        self.offer_resolved = false;
        self.next_objective += 1;
        self.phase = LegPhase::Planning;
        AdvanceResult { moves, stop_reason: AdvanceStopReason::ObjectiveReached { index } }
    }

    fn halt_unreachable(&mut self, moves: u32) -> AdvanceResult {
        let index = self.next_objective + 1;
        let at = self.traveler.pos();
        self.log.push(NavEvent::ObjectiveUnreachable { index });
        warn!(index, ?at, "objective unreachable");
        self.finish(RunOutcome::Stuck { objective: index, at }, moves)
    }

    fn finish(&mut self, outcome: RunOutcome, moves: u32) -> AdvanceResult {
        self.finished_outcome = Some(outcome);
        AdvanceResult { moves, stop_reason: AdvanceStopReason::Finished(outcome) }
    }
}
