//! Run settings: an optional TOML file overlaid by command-line flags.
//!
//! Relative paths inside the file resolve against the file's own directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use fogwalk_core::{EngineConfig, TextScenarioPaths};
use serde::Deserialize;

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// TOML file with `[input]`, `[output]` and `[engine]` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Nodes file (`<width> <height>` header, then `x y type` lines)
    #[arg(long)]
    pub nodes: Option<PathBuf>,
    /// Edges file (`x1-y1,x2-y2 weight` lines)
    #[arg(long)]
    pub edges: Option<PathBuf>,
    /// Objectives file (sight radius, start, then `x y [key ...]` lines)
    #[arg(long)]
    pub objectives: Option<PathBuf>,
    /// JSON scenario, instead of the three text files
    #[arg(long)]
    pub scenario: Option<PathBuf>,
    /// Transcript destination; stdout when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Stop the run after this many moves
    #[arg(long)]
    pub max_moves: Option<u64>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    input: InputSection,
    output: OutputSection,
    engine: EngineConfig,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct InputSection {
    nodes: Option<PathBuf>,
    edges: Option<PathBuf>,
    objectives: Option<PathBuf>,
    scenario: Option<PathBuf>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OutputSection {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioSource {
    Text(TextScenarioPaths),
    Json(PathBuf),
}

/// Everything a run needs once file values and flags are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub source: ScenarioSource,
    pub output: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        let slots = [
            &mut self.input.nodes,
            &mut self.input.edges,
            &mut self.input.objectives,
            &mut self.input.scenario,
            &mut self.output.path,
        ];
        for slot in slots {
            if let Some(path) = slot.as_mut() {
                *path = base.join(&*path);
            }
        }
    }
}

impl RunSettings {
    pub fn resolve(args: &RunArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let nodes = args.nodes.clone().or(file.input.nodes);
        let edges = args.edges.clone().or(file.input.edges);
        let objectives = args.objectives.clone().or(file.input.objectives);
        let scenario = args.scenario.clone().or(file.input.scenario);

        let source = match (scenario, nodes, edges, objectives) {
            (Some(json), None, None, None) => ScenarioSource::Json(json),
            (Some(_), ..) => bail!("a JSON scenario cannot be combined with text input files"),
            (None, Some(nodes), Some(edges), Some(objectives)) => {
                ScenarioSource::Text(TextScenarioPaths { nodes, edges, objectives })
            }
            (None, nodes, edges, objectives) => {
                let slots = [
                    ("nodes", nodes.is_none()),
                    ("edges", edges.is_none()),
                    ("objectives", objectives.is_none()),
                ];
                let missing: Vec<&str> = slots
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                bail!("missing input files: {}", missing.join(", "))
            }
        };

        let mut engine = file.engine;
        if args.max_moves.is_some() {
            engine.max_moves = args.max_moves;
        }

        Ok(Self { source, output: args.output.clone().or(file.output.path), engine })
    }
}
