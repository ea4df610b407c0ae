pub mod engine;
pub mod grid;
pub mod keys;
pub mod mapgen;
pub mod scenario;
pub mod scenario_file;
pub mod transcript;
pub mod types;

pub use engine::{EngineConfig, Expedition, Route, evaluate_offer, reveal, shortest_path};
pub use grid::{EdgeRecord, Grid, NodeRecord};
pub use keys::KeySet;
pub use scenario::{Scenario, ScenarioError};
pub use scenario_file::{ScenarioLoadError, TextScenarioPaths};
pub use transcript::Transcript;
pub use types::*;
