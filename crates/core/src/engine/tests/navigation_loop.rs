//! Tests for planning, walking and replanning along objective legs.

use super::support::*;

#[test]
fn open_lattice_walks_four_steps_to_the_far_corner() {
    let mut run = expedition(open_lattice(3, 3), pos(0, 0), 1, vec![Objective::new(pos(2, 2))]);
    assert_eq!(run.run_to_end(), RunOutcome::Completed);

    let lines = transcript_lines(&run);
    assert_eq!(lines.len(), 5);
    assert!(lines[..4].iter().all(|line| line.starts_with("Moving to ")));
    assert_eq!(lines[3], "Moving to 2-2");
    assert_eq!(lines[4], "Objective 1 reached!");
    assert_eq!(run.moves(), 4);
    assert_eq!(run.position(), pos(2, 2));
}

#[test]
fn objective_at_start_is_reached_without_moving() {
    let mut run = expedition(open_lattice(2, 2), pos(1, 1), 1, vec![Objective::new(pos(1, 1))]);
    assert_eq!(run.run_to_end(), RunOutcome::Completed);
    assert_eq!(transcript_lines(&run), vec!["Objective 1 reached!"]);
    assert_eq!(run.moves(), 0);
    assert_eq!(run.traveler(), &Traveler::new(pos(1, 1), 1));
    assert_eq!(run.objectives(), &[Objective::new(pos(1, 1))]);
    assert_eq!(run.current_objective(), None);
}

#[test]
fn revealed_gate_mid_walk_forces_a_detour() {
    let grid = lattice_with(5, 3, &[(3, 1, 2)]);
    let mut run = expedition(grid, pos(0, 1), 1, vec![Objective::new(pos(4, 1))]);
    assert_eq!(run.run_to_end(), RunOutcome::Completed);

    let lines = transcript_lines(&run);
    assert_eq!(lines[..3], ["Moving to 1-1", "Moving to 2-1", "Path is impassable!"]);
    assert_eq!(lines.last().map(String::as_str), Some("Objective 1 reached!"));
    assert!(
        !lines.iter().any(|line| line == "Moving to 3-1"),
        "traveler must never step onto the locked gate"
    );
    assert_eq!(run.replans(), 1);
    assert_eq!(run.moves(), 6);
}

#[test]
fn every_move_follows_an_edge_of_the_grid() {
    let grid = lattice_with(7, 7, &[(3, 0, 2), (3, 1, 2), (3, 2, 1), (3, 4, 3), (3, 5, 1)]);
    let reference = grid.clone();
    let start = pos(0, 0);
    let mut run = expedition(
        grid,
        start,
        2,
        vec![Objective::new(pos(6, 0)), Objective::new(pos(0, 6)), Objective::new(pos(6, 6))],
    );
    assert_eq!(run.run_to_end(), RunOutcome::Completed);

    let mut prev = start;
    for event in run.log() {
        if let NavEvent::Moved { to } = event {
            assert!(reference.edge_weight(prev, *to).is_some(), "{prev:?} -> {to:?} is not an edge");
            assert_ne!(reference.tile_at(*to), TileKind::Wall);
            prev = *to;
        }
    }
}

#[test]
fn paused_walk_resumes_on_the_same_route() {
    let mut run = expedition(open_lattice(5, 1), pos(0, 0), 1, vec![Objective::new(pos(4, 0))]);

    let first = run.advance(2);
    assert_eq!(first.moves, 2);
    assert_eq!(first.stop_reason, AdvanceStopReason::BudgetExhausted);
    assert_eq!(run.position(), pos(2, 0));

    let second = run.advance(10);
    assert_eq!(second.moves, 2);
    assert_eq!(second.stop_reason, AdvanceStopReason::ObjectiveReached { index: 1 });

    let third = run.advance(10);
    assert_eq!(third.stop_reason, AdvanceStopReason::Finished(RunOutcome::Completed));
    assert!(run.current_objective().is_none());
}

#[test]
fn identical_inputs_reproduce_the_same_transcript() {
    let build = || {
        let grid = lattice_with(6, 6, &[(2, 2, 4), (2, 3, 4), (4, 1, 1), (1, 4, 6)]);
        expedition(
            grid,
            pos(0, 0),
            2,
            vec![Objective::with_offer(pos(5, 5), [4, 6]), Objective::new(pos(0, 5))],
        )
    };
    let mut left = build();
    let mut right = build();
    left.run_to_end();
    right.run_to_end();
    assert_eq!(left.log(), right.log());
}
