//! Fully parsed run inputs and their validation into an [`Expedition`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{EngineConfig, Expedition};
use crate::grid::{EdgeRecord, Grid, NodeRecord};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    pub sight_radius: u32,
    pub start: Pos,
    pub objectives: Vec<Objective>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("invalid grid topology: {0}")]
    Topology(#[from] GridError),
    #[error("start {0:?} is outside the grid")]
    StartOutOfBounds(Pos),
    #[error("objective {index} target {pos:?} is outside the grid")]
    ObjectiveOutOfBounds { index: usize, pos: Pos },
}

impl Scenario {
    pub fn build_grid(&self) -> Result<Grid, ScenarioError> {
        Ok(Grid::from_records(self.width, self.height, &self.nodes, &self.edges)?)
    }

    /// Validates the scenario and returns an engine ready to run.
    pub fn into_expedition(self, config: EngineConfig) -> Result<Expedition, ScenarioError> {
        let grid = self.build_grid()?;
        if !grid.in_bounds(self.start) {
            return Err(ScenarioError::StartOutOfBounds(self.start));
        }
        if let Some((index, objective)) = self
            .objectives
            .iter()
            .enumerate()
            .find(|(_, objective)| !grid.in_bounds(objective.target))
        {
            return Err(ScenarioError::ObjectiveOutOfBounds { index: index + 1, pos: objective.target });
        }
        Ok(Expedition::new(grid, self.start, self.sight_radius, self.objectives, config)?)
    }
}
