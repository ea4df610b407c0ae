//! File-backed scenario loading.
//!
//! Two formats are supported:
//! - The three-file text format: a nodes file (`<width> <height>` header,
//!   then `x y type` lines), an edges file (`x1-y1,x2-y2 weight` lines) and an
//!   objectives file (sight radius, `x y` start, then `x y [key ...]` lines).
//! - A single JSON document mirroring [`Scenario`].
//!
//! Blank lines are skipped. Parse errors carry the file label and the
//! 1-indexed line number.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::grid::{EdgeRecord, NodeRecord};
use crate::scenario::Scenario;
use crate::types::{KeyId, Objective, Pos};

#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{file} line {line}: {message}")]
    Parse { file: &'static str, line: usize, message: String },
    #[error("{file} is empty")]
    Empty { file: &'static str },
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Paths of the three text inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextScenarioPaths {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub objectives: PathBuf,
}

pub fn load_text_scenario(paths: &TextScenarioPaths) -> Result<Scenario, ScenarioLoadError> {
    let nodes = read_source(&paths.nodes)?;
    let edges = read_source(&paths.edges)?;
    let objectives = read_source(&paths.objectives)?;
    parse_text_scenario(&nodes, &edges, &objectives)
}

pub fn parse_text_scenario(
    nodes_src: &str,
    edges_src: &str,
    objectives_src: &str,
) -> Result<Scenario, ScenarioLoadError> {
    let (width, height, nodes) = parse_nodes(nodes_src)?;
    let edges = parse_edges(edges_src)?;
    let (sight_radius, start, objectives) = parse_objectives(objectives_src)?;
    Ok(Scenario { width, height, nodes, edges, sight_radius, start, objectives })
}

pub fn load_scenario_json(path: &Path) -> Result<Scenario, ScenarioLoadError> {
    let content = read_source(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_scenario_json(path: &Path, scenario: &Scenario) -> Result<(), ScenarioLoadError> {
    let io_error = |source| ScenarioLoadError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(scenario)?;
    fs::write(path, json).map_err(io_error)
}

fn read_source(path: &Path) -> Result<String, ScenarioLoadError> {
    fs::read_to_string(path)
        .map_err(|source| ScenarioLoadError::Io { path: path.to_path_buf(), source })
}

/// Non-blank lines paired with their 1-indexed line number.
fn numbered_lines(src: &str) -> impl Iterator<Item = (usize, &str)> {
    src.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_field<T: FromStr>(file: &'static str, line: usize, field: &str) -> Result<T, ScenarioLoadError> {
    field.parse().map_err(|_| ScenarioLoadError::Parse {
        file,
        line,
        message: format!("cannot parse `{field}`"),
    })
}

fn expect_fields<'a>(
    file: &'static str,
    line: usize,
    text: &'a str,
    expected: usize,
) -> Result<Vec<&'a str>, ScenarioLoadError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != expected {
        return Err(ScenarioLoadError::Parse {
            file,
            line,
            message: format!("expected {expected} fields, found {}", fields.len()),
        });
    }
    Ok(fields)
}

fn parse_nodes(src: &str) -> Result<(usize, usize, Vec<NodeRecord>), ScenarioLoadError> {
    const FILE: &str = "nodes";
    let mut lines = numbered_lines(src);
    let Some((line, header)) = lines.next() else {
        return Err(ScenarioLoadError::Empty { file: FILE });
    };
    let dims = expect_fields(FILE, line, header, 2)?;
    let width = parse_field(FILE, line, dims[0])?;
    let height = parse_field(FILE, line, dims[1])?;

    let mut nodes = Vec::new();
    for (line, text) in lines {
        let fields = expect_fields(FILE, line, text, 3)?;
        nodes.push(NodeRecord {
            pos: Pos { x: parse_field(FILE, line, fields[0])?, y: parse_field(FILE, line, fields[1])? },
            code: parse_field(FILE, line, fields[2])?,
        });
    }
    Ok((width, height, nodes))
}

fn parse_edges(src: &str) -> Result<Vec<EdgeRecord>, ScenarioLoadError> {
    const FILE: &str = "edges";
    let mut edges = Vec::new();
    for (line, text) in numbered_lines(src) {
        let fields = expect_fields(FILE, line, text, 2)?;
        let Some((from, to)) = fields[0].split_once(',') else {
            return Err(ScenarioLoadError::Parse {
                file: FILE,
                line,
                message: format!("expected `x1-y1,x2-y2`, found `{}`", fields[0]),
            });
        };
        edges.push(EdgeRecord {
            from: parse_dashed_pos(FILE, line, from)?,
            to: parse_dashed_pos(FILE, line, to)?,
            weight: parse_field(FILE, line, fields[1])?,
        });
    }
    Ok(edges)
}

fn parse_dashed_pos(file: &'static str, line: usize, text: &str) -> Result<Pos, ScenarioLoadError> {
    let Some((x, y)) = text.split_once('-') else {
        return Err(ScenarioLoadError::Parse {
            file,
            line,
            message: format!("expected `x-y`, found `{text}`"),
        });
    };
    Ok(Pos { x: parse_field(file, line, x)?, y: parse_field(file, line, y)? })
}

fn parse_objectives(src: &str) -> Result<(u32, Pos, Vec<Objective>), ScenarioLoadError> {
    const FILE: &str = "objectives";
    let mut lines = numbered_lines(src);
    let Some((line, radius)) = lines.next() else {
        return Err(ScenarioLoadError::Empty { file: FILE });
    };
    let radius = parse_field(FILE, line, expect_fields(FILE, line, radius, 1)?[0])?;

    let Some((line, start)) = lines.next() else {
        return Err(ScenarioLoadError::Parse {
            file: FILE,
            line: line + 1,
            message: "missing starting coordinate".to_string(),
        });
    };
    let start_fields = expect_fields(FILE, line, start, 2)?;
    let start =
        Pos { x: parse_field(FILE, line, start_fields[0])?, y: parse_field(FILE, line, start_fields[1])? };

    let mut objectives = Vec::new();
    for (line, text) in lines {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(ScenarioLoadError::Parse {
                file: FILE,
                line,
                message: format!("expected at least 2 fields, found {}", fields.len()),
            });
        }
        let target = Pos { x: parse_field(FILE, line, fields[0])?, y: parse_field(FILE, line, fields[1])? };
        let offer = fields[2..]
            .iter()
            .map(|field| parse_field(FILE, line, field).map(KeyId))
            .collect::<Result<Vec<_>, _>>()?;
        objectives.push(Objective { target, offer });
    }
    Ok((radius, start, objectives))
}

#[cfg(test)]
mod tests;
