use fogwalk_core::mapgen::uniform_lattice_edges;
use fogwalk_core::{
    EngineConfig, KeyId, NodeRecord, Objective, Pos, RunOutcome, Scenario, Transcript,
};

fn lattice_scenario(
    width: usize,
    height: usize,
    tiles: &[(i32, i32, u32)],
    sight_radius: u32,
    start: Pos,
    objectives: Vec<Objective>,
) -> Scenario {
    Scenario {
        width,
        height,
        nodes: tiles.iter().map(|&(x, y, code)| NodeRecord { pos: Pos::new(x, y), code }).collect(),
        edges: uniform_lattice_edges(width, height, 1.0),
        sight_radius,
        start,
        objectives,
    }
}

fn run_lines(scenario: Scenario) -> (RunOutcome, Vec<String>) {
    let mut run = scenario.into_expedition(EngineConfig::default()).expect("scenario should be valid");
    let outcome = run.run_to_end();
    let lines = Transcript::new(run.log()).to_string().lines().map(str::to_string).collect();
    (outcome, lines)
}

#[test]
fn test_smoke_plain_grid_reaches_far_corner_in_four_moves() {
    let scenario =
        lattice_scenario(3, 3, &[], 1, Pos::new(0, 0), vec![Objective::new(Pos::new(2, 2))]);
    let (outcome, lines) = run_lines(scenario);
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines.iter().filter(|line| line.starts_with("Moving to")).count(), 4);
    assert_eq!(lines[3], "Moving to 2-2");
    assert_eq!(lines[4], "Objective 1 reached!");
}

#[test]
fn test_smoke_blocking_gate_without_key_ends_stuck() {
    // A single corridor whose middle cell is gate 2; it only becomes visible one step away.
    let scenario = lattice_scenario(
        5,
        1,
        &[(3, 0, 2)],
        1,
        Pos::new(0, 0),
        vec![Objective::new(Pos::new(4, 0))],
    );
    let (outcome, lines) = run_lines(scenario);
    assert_eq!(outcome, RunOutcome::Stuck { objective: 1, at: Pos::new(2, 0) });
    assert_eq!(
        lines,
        vec!["Moving to 1-0", "Moving to 2-0", "Path is impassable!", "Objective 1 is unreachable!"]
    );
}

#[test]
fn test_smoke_offer_before_second_objective_picks_cheaper_key() {
    // Column x=2 holds gate 5 on the top row and gate 7 on the bottom row; the goal is top right.
    let scenario = lattice_scenario(
        5,
        3,
        &[(2, 2, 5), (2, 1, 1), (2, 0, 7)],
        6,
        Pos::new(0, 1),
        vec![Objective::with_offer(Pos::new(0, 2), [5, 7]), Objective::new(Pos::new(4, 2))],
    );
    let (outcome, lines) = run_lines(scenario);
    assert_eq!(outcome, RunOutcome::Completed);
    let chosen: Vec<&String> = lines.iter().filter(|line| line.starts_with("Number")).collect();
    assert_eq!(chosen, vec!["Number 5 is chosen!"]);
    let chosen_at = lines.iter().position(|line| line.starts_with("Number")).unwrap();
    assert_eq!(lines[chosen_at - 1], "Objective 1 reached!");
}

#[test]
fn test_smoke_tied_offer_resolves_to_first_listed_key() {
    let scenario = lattice_scenario(
        4,
        4,
        &[],
        2,
        Pos::new(0, 0),
        vec![Objective::with_offer(Pos::new(1, 1), [5, 7]), Objective::new(Pos::new(3, 3))],
    );
    let mut run = scenario.into_expedition(EngineConfig::default()).unwrap();
    run.run_to_end();
    assert!(run.keys().contains(KeyId(5)));
    assert!(!run.keys().contains(KeyId(7)));
}
