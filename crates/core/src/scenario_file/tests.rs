use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::engine::EngineConfig;
use crate::types::RunOutcome;

const NODES: &str = "3 2\n0 0 0\n1 0 1\n2 0 0\n0 1 0\n1 1 4\n2 1 0\n";
const EDGES: &str = "0-0,0-1 1\n0-1,1-1 2.5\n1-1,2-1 1\n2-1,2-0 0.5\n";
const OBJECTIVES: &str = "2\n0 0\n0 1 4 6\n2 0\n";

fn write_inputs(dir: &Path) -> TextScenarioPaths {
    let paths = TextScenarioPaths {
        nodes: dir.join("nodes.txt"),
        edges: dir.join("edges.txt"),
        objectives: dir.join("obj.txt"),
    };
    fs::write(&paths.nodes, NODES).unwrap();
    fs::write(&paths.edges, EDGES).unwrap();
    fs::write(&paths.objectives, OBJECTIVES).unwrap();
    paths
}

#[test]
fn text_format_parses_every_section() {
    let scenario = parse_text_scenario(NODES, EDGES, OBJECTIVES).unwrap();
    assert_eq!((scenario.width, scenario.height), (3, 2));
    assert_eq!(scenario.nodes.len(), 6);
    assert_eq!(scenario.nodes[4], NodeRecord { pos: Pos::new(1, 1), code: 4 });
    assert_eq!(scenario.edges.len(), 4);
    assert_eq!(scenario.edges[1].weight, 2.5);
    assert_eq!(scenario.edges[3].to, Pos::new(2, 0));
    assert_eq!(scenario.sight_radius, 2);
    assert_eq!(scenario.start, Pos::new(0, 0));
    assert_eq!(scenario.objectives[0].offer, vec![KeyId(4), KeyId(6)]);
    assert!(scenario.objectives[1].offer.is_empty());
}

#[test]
fn loaded_text_scenario_runs() {
    let dir = tempdir().unwrap();
    let paths = write_inputs(dir.path());
    let scenario = load_text_scenario(&paths).unwrap();
    let mut run = scenario.into_expedition(EngineConfig::default()).unwrap();
    assert_eq!(run.run_to_end(), RunOutcome::Completed);
    let lines: Vec<String> = run.log().iter().map(ToString::to_string).collect();
    assert_eq!(lines.first().map(String::as_str), Some("Moving to 0-1"));
    assert!(lines.contains(&"Objective 2 reached!".to_string()));
}

#[test]
fn blank_lines_are_ignored() {
    let scenario = parse_text_scenario("\n2 1\n\n0 0 0\n", "0-0,1-0 1\n\n", "1\n\n0 0\n1 0\n").unwrap();
    assert_eq!(scenario.nodes.len(), 1);
    assert_eq!(scenario.objectives.len(), 1);
}

#[test]
fn malformed_lines_report_file_and_line() {
    let err = parse_text_scenario("2 2\n0 0\n", "", "1\n0 0\n").unwrap_err();
    assert!(matches!(err, ScenarioLoadError::Parse { file: "nodes", line: 2, .. }), "{err}");

    let err = parse_text_scenario("2 2\n", "0-0;1-0 1\n", "1\n0 0\n").unwrap_err();
    assert!(matches!(err, ScenarioLoadError::Parse { file: "edges", line: 1, .. }), "{err}");

    let err = parse_text_scenario("2 2\n", "0-0,1-0 heavy\n", "1\n0 0\n").unwrap_err();
    assert!(matches!(err, ScenarioLoadError::Parse { file: "edges", line: 1, .. }), "{err}");

    let err = parse_text_scenario("2 2\n", "", "1\n0 0\n1 1 x\n").unwrap_err();
    assert!(matches!(err, ScenarioLoadError::Parse { file: "objectives", line: 3, .. }), "{err}");

    let err = parse_text_scenario("", "", "1\n0 0\n").unwrap_err();
    assert!(matches!(err, ScenarioLoadError::Empty { file: "nodes" }));
}

#[test]
fn missing_file_is_an_io_error_naming_the_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let err = load_scenario_json(&missing).unwrap_err();
    assert!(matches!(err, ScenarioLoadError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn json_export_loads_back_equal_to_text_source() {
    let dir = tempdir().unwrap();
    let paths = write_inputs(dir.path());
    let from_text = load_text_scenario(&paths).unwrap();

    let json_path = dir.path().join("nested").join("scenario.json");
    save_scenario_json(&json_path, &from_text).unwrap();
    let from_json = load_scenario_json(&json_path).unwrap();
    assert_eq!(from_text, from_json);
}
