use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

/// Identifier of a key; gated nodes of the same type code share it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct KeyId(pub u32);

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Plain,
    Wall,
    Gated(KeyId),
}

impl TileKind {
    /// Decodes the numeric node type used by scenario inputs.
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => TileKind::Plain,
            1 => TileKind::Wall,
            key => TileKind::Gated(KeyId(key)),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            TileKind::Plain => 0,
            TileKind::Wall => 1,
            TileKind::Gated(key) => key.0,
        }
    }

    pub fn gate(self) -> Option<KeyId> {
        match self {
            TileKind::Gated(key) => Some(key),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Heading of a single axis-aligned unit step, `None` for anything else.
    pub fn between(from: Pos, to: Pos) -> Option<Self> {
        match (to.x - from.x, to.y - from.y) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            _ => None,
        }
    }
}

/// A target to reach plus the key offer that becomes available once it is reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub target: Pos,
    #[serde(default)]
    pub offer: Vec<KeyId>,
}

impl Objective {
    pub fn new(target: Pos) -> Self {
        Self { target, offer: Vec::new() }
    }

    pub fn with_offer(target: Pos, offer: impl IntoIterator<Item = u32>) -> Self {
        Self { target, offer: offer.into_iter().map(KeyId).collect() }
    }
}

/// One line of the run transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavEvent {
    KeyChosen { key: KeyId },
    Moved { to: Pos },
    PathImpassable,
    ObjectiveReached { index: usize },
    ObjectiveUnreachable { index: usize },
}

impl fmt::Display for NavEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavEvent::KeyChosen { key } => write!(f, "Number {key} is chosen!"),
            NavEvent::Moved { to } => write!(f, "Moving to {to}"),
            NavEvent::PathImpassable => write!(f, "Path is impassable!"),
            NavEvent::ObjectiveReached { index } => write!(f, "Objective {index} reached!"),
            NavEvent::ObjectiveUnreachable { index } => {
                write!(f, "Objective {index} is unreachable!")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// `objective` is 1-indexed, `at` is where the traveler halted.
    Stuck { objective: usize, at: Pos },
    MoveBudgetExceeded { moves: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    ObjectiveReached { index: usize },
    Finished(RunOutcome),
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub moves: u32,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("coordinate {pos:?} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Pos, width: usize, height: usize },
    #[error("edge {from:?} -> {to:?} references a coordinate outside the grid")]
    MalformedTopology { from: Pos, to: Pos },
    #[error("grid dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: usize, height: usize },
    #[error("edge {from:?} -> {to:?} has invalid weight {weight}")]
    InvalidWeight { from: Pos, to: Pos, weight: f64 },
}
