//! Static weighted grid graph with per-node reveal state.
//! Topology is fixed at construction; only the revealed flags change afterwards.

use serde::{Deserialize, Serialize};

use crate::types::*;

/// `(x, y, type)` node record as consumed from scenario inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub pos: Pos,
    #[serde(rename = "type")]
    pub code: u32,
}

/// Undirected weighted edge record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: Pos,
    pub to: Pos,
    pub weight: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: Pos,
    pub weight: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub pos: Pos,
    pub kind: TileKind,
    pub revealed: bool,
}

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    revealed: Vec<bool>,
    adjacency: Vec<Vec<Edge>>,
}

impl Grid {
    /// Builds the grid from parsed records. Coordinates without a node record are plain.
    pub fn from_records(
        width: usize,
        height: usize,
        nodes: &[NodeRecord],
        edges: &[EdgeRecord],
    ) -> Result<Self, GridError> {
        let cell_count = width.checked_mul(height).unwrap_or(0);
        if cell_count == 0 || i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let mut grid = Self {
            width,
            height,
            tiles: vec![TileKind::Plain; cell_count],
            revealed: vec![false; cell_count],
            adjacency: vec![Vec::new(); cell_count],
        };

        for record in nodes {
            let idx = grid.checked_index(record.pos)?;
            grid.tiles[idx] = TileKind::from_code(record.code);
        }

        for edge in edges {
            let (Some(a), Some(b)) = (grid.index(edge.from), grid.index(edge.to)) else {
                return Err(GridError::MalformedTopology { from: edge.from, to: edge.to });
            };
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(GridError::InvalidWeight {
                    from: edge.from,
                    to: edge.to,
                    weight: edge.weight,
                });
            }
            grid.adjacency[a].push(Edge { to: edge.to, weight: edge.weight });
            grid.adjacency[b].push(Edge { to: edge.from, weight: edge.weight });
        }

        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn node_at(&self, pos: Pos) -> Result<Node, GridError> {
        let idx = self.checked_index(pos)?;
        Ok(Node { pos, kind: self.tiles[idx], revealed: self.revealed[idx] })
    }

    /// Out-of-bounds coordinates read as walls.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.index(pos).map_or(TileKind::Wall, |idx| self.tiles[idx])
    }

    pub fn neighbors_of(&self, pos: Pos) -> &[Edge] {
        match self.index(pos) {
            Some(idx) => &self.adjacency[idx],
            None => &[],
        }
    }

    /// Lowest weight among the edges joining `a` and `b`.
    pub fn edge_weight(&self, a: Pos, b: Pos) -> Option<f64> {
        self.neighbors_of(a)
            .iter()
            .filter(|edge| edge.to == b)
            .map(|edge| edge.weight)
            .min_by(f64::total_cmp)
    }

    pub fn is_revealed(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|idx| self.revealed[idx])
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|revealed| **revealed).count()
    }

    /// Marks `pos` revealed. Returns true only on the first reveal.
    pub(crate) fn reveal(&mut self, pos: Pos) -> bool {
        match self.index(pos) {
            Some(idx) if !self.revealed[idx] => {
                self.revealed[idx] = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    pub(crate) fn index(&self, pos: Pos) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some((pos.y as usize) * self.width + (pos.x as usize))
    }

    pub(crate) fn checked_index(&self, pos: Pos) -> Result<usize, GridError> {
        self.index(pos).ok_or(GridError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        })
    }
}
