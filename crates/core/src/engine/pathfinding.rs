//! Key-gated shortest-path search over the weighted grid.
//! Unrevealed gated nodes are treated as open, so plans are optimistic until sight proves otherwise.
//! This module does not own reveal state changes or objective sequencing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::*;

/// Result of a shortest-path query.
///
/// `nodes` runs from the goal back toward the start and excludes the start
/// itself. An unreachable goal yields an infinite distance and no nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    distance: f64,
    nodes: Vec<Pos>,
}

impl Route {
    fn empty() -> Self {
        Self { distance: 0.0, nodes: Vec::new() }
    }

    fn unreachable() -> Self {
        Self { distance: f64::INFINITY, nodes: Vec::new() }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }

    /// Goal-first node sequence, start excluded.
    pub fn nodes(&self) -> &[Pos] {
        &self.nodes
    }

    /// Nodes in walking order: first step first, goal last.
    pub fn steps(&self) -> impl DoubleEndedIterator<Item = Pos> + '_ {
        self.nodes.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Shortest route from `start` to `goal` under `keys`.
///
/// An absent goal is a no-op that returns a zero-length route.
pub fn shortest_path(
    grid: &Grid,
    start: Pos,
    goal: Option<Pos>,
    keys: &KeySet,
) -> Result<Route, GridError> {
    grid.checked_index(start)?;
    let Some(goal) = goal else {
        return Ok(Route::empty());
    };
    grid.checked_index(goal)?;
    Ok(dijkstra(grid, start, goal, keys))
}

#[derive(Clone, Copy, Debug)]
struct OpenNode {
    cost: f64,
    pos: Pos,
}

impl Ord for OpenNode {
    // Reversed so `BinaryHeap` pops the cheapest entry; equal costs pop in coordinate order.
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost).then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

/// Caller guarantees both endpoints are in bounds.
pub(super) fn dijkstra(grid: &Grid, start: Pos, goal: Pos, keys: &KeySet) -> Route {
    if start == goal {
        return Route::empty();
    }
    let (Some(start_idx), Some(goal_idx)) = (grid.index(start), grid.index(goal)) else {
        return Route::unreachable();
    };

    let cell_count = grid.cell_count();
    let mut settled = vec![false; cell_count];
    let mut best = vec![f64::INFINITY; cell_count];
    let mut came_from: Vec<Option<Pos>> = vec![None; cell_count];
    let mut open = BinaryHeap::new();

    best[start_idx] = 0.0;
    open.push(OpenNode { cost: 0.0, pos: start });

    while let Some(OpenNode { cost, pos }) = open.pop() {
        let Some(idx) = grid.index(pos) else {
            continue;
        };
        if settled[idx] {
            continue;
        }
        if idx == goal_idx {
            break;
        }
        settled[idx] = true;

        for edge in grid.neighbors_of(pos) {
            let Some(next_idx) = grid.index(edge.to) else {
                continue;
            };
            if settled[next_idx] || !is_step_open(grid, edge.to, keys) {
                continue;
            }
            let tentative = cost + edge.weight;
            if tentative < best[next_idx] {
                best[next_idx] = tentative;
                came_from[next_idx] = Some(pos);
                open.push(OpenNode { cost: tentative, pos: edge.to });
            }
        }
    }

    if !best[goal_idx].is_finite() {
        return Route::unreachable();
    }
    Route { distance: best[goal_idx], nodes: reconstruct_path(grid, &came_from, start, goal) }
}

pub(super) fn is_step_open(grid: &Grid, pos: Pos, keys: &KeySet) -> bool {
    match grid.tile_at(pos) {
        TileKind::Plain => true,
        TileKind::Wall => false,
        TileKind::Gated(key) => !grid.is_revealed(pos) || keys.contains(key),
    }
}

fn reconstruct_path(grid: &Grid, came_from: &[Option<Pos>], start: Pos, goal: Pos) -> Vec<Pos> {
    let mut nodes = Vec::new();
    let mut current = goal;
    while current != start {
        nodes.push(current);
        match grid.index(current).and_then(|idx| came_from[idx]) {
            Some(prev) => current = prev,
            None => return Vec::new(),
        }
    }
    nodes
}
