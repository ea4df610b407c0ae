//! Shared grid fixtures for the `engine` test suites.

use super::*;
use crate::grid::{EdgeRecord, NodeRecord};
use crate::mapgen::uniform_lattice_edges;

pub(super) fn pos(x: i32, y: i32) -> Pos {
    Pos { x, y }
}

pub(super) fn open_lattice(width: usize, height: usize) -> Grid {
    lattice_with(width, height, &[])
}

/// Unit-weight lattice with `(x, y, type)` overrides.
pub(super) fn lattice_with(width: usize, height: usize, tiles: &[(i32, i32, u32)]) -> Grid {
    let nodes: Vec<NodeRecord> =
        tiles.iter().map(|&(x, y, code)| NodeRecord { pos: pos(x, y), code }).collect();
    Grid::from_records(width, height, &nodes, &uniform_lattice_edges(width, height, 1.0))
        .expect("fixture grid must be well formed")
}

/// 3x3 ring: the direct top edge costs 10, the detour around the ring costs 6.
pub(super) fn weighted_ring_fixture() -> Grid {
    let ring = [
        ((0, 0), (1, 0), 5.0),
        ((1, 0), (2, 0), 5.0),
        ((0, 0), (0, 1), 1.0),
        ((0, 1), (0, 2), 1.0),
        ((0, 2), (1, 2), 1.0),
        ((1, 2), (2, 2), 1.0),
        ((2, 2), (2, 1), 1.0),
        ((2, 1), (2, 0), 1.0),
    ];
    let edges: Vec<EdgeRecord> = ring
        .iter()
        .map(|&((ax, ay), (bx, by), weight)| EdgeRecord { from: pos(ax, ay), to: pos(bx, by), weight })
        .collect();
    Grid::from_records(3, 3, &[], &edges).expect("ring fixture must be well formed")
}

/// 5x3 lattice split by column x=2: gate 7 on row 0, wall on row 1, gate 5 on row 2.
/// Both gates start revealed. Returns the grid, start (0,0) and goal (4,0).
pub(super) fn two_gate_fixture() -> (Grid, Pos, Pos) {
    let mut grid = lattice_with(5, 3, &[(2, 0, 7), (2, 1, 1), (2, 2, 5)]);
    grid.reveal(pos(2, 0));
    grid.reveal(pos(2, 2));
    (grid, pos(0, 0), pos(4, 0))
}

pub(super) fn expedition(grid: Grid, start: Pos, radius: u32, objectives: Vec<Objective>) -> Expedition {
    Expedition::new(grid, start, radius, objectives, EngineConfig::default())
        .expect("fixture expedition must be valid")
}

pub(super) fn transcript_lines(expedition: &Expedition) -> Vec<String> {
    expedition.log().iter().map(ToString::to_string).collect()
}
