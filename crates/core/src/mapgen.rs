//! Seeded random lattice scenarios for fuzzing and property tests.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::grid::{EdgeRecord, NodeRecord};
use crate::scenario::Scenario;
use crate::types::{KeyId, Objective, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeParams {
    pub width: usize,
    pub height: usize,
    pub wall_percent: u8,
    pub gate_percent: u8,
    /// Gate types are drawn from `2..2 + key_kinds`.
    pub key_kinds: u32,
    pub objective_count: usize,
    pub sight_radius: u32,
    pub max_weight: u32,
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self {
            width: 12,
            height: 12,
            wall_percent: 15,
            gate_percent: 10,
            key_kinds: 3,
            objective_count: 3,
            sight_radius: 3,
            max_weight: 4,
        }
    }
}

/// Edges between every pair of axis-adjacent cells, all with the same weight.
pub fn uniform_lattice_edges(width: usize, height: usize, weight: f64) -> Vec<EdgeRecord> {
    let mut edges = Vec::new();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let from = Pos { x, y };
            if (x as usize) + 1 < width {
                edges.push(EdgeRecord { from, to: Pos { x: x + 1, y }, weight });
            }
            if (y as usize) + 1 < height {
                edges.push(EdgeRecord { from, to: Pos { x, y: y + 1 }, weight });
            }
        }
    }
    edges
}

/// Random lattice with walls, gates and weighted edges. Start and objective cells stay plain.
pub fn generate_lattice(seed: u64, params: &LatticeParams) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let width = params.width.max(1);
    let height = params.height.max(1);

    let start = random_cell(&mut rng, width, height);
    let mut reserved = vec![start];
    let mut objectives = Vec::with_capacity(params.objective_count);
    for _ in 0..params.objective_count {
        let target = random_cell(&mut rng, width, height);
        reserved.push(target);
        let offer_len = roll(&mut rng, 3);
        let offer = (0..offer_len)
            .map(|_| KeyId(2 + roll(&mut rng, u64::from(params.key_kinds)) as u32))
            .collect();
        objectives.push(Objective { target, offer });
    }

    let wall = u64::from(params.wall_percent);
    let gate = wall + u64::from(params.gate_percent);
    let mut nodes = Vec::new();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pos = Pos { x, y };
            let draw = roll(&mut rng, 100);
            if reserved.contains(&pos) {
                continue;
            }
            if draw < wall {
                nodes.push(NodeRecord { pos, code: 1 });
            } else if draw < gate {
                let key = 2 + roll(&mut rng, u64::from(params.key_kinds)) as u32;
                nodes.push(NodeRecord { pos, code: key });
            }
        }
    }

    let quarters = u64::from(params.max_weight.max(1)) * 4;
    let mut edges = uniform_lattice_edges(width, height, 1.0);
    for edge in &mut edges {
        edge.weight = (4 + roll(&mut rng, quarters)) as f64 / 4.0;
    }

    Scenario {
        width,
        height,
        nodes,
        edges,
        sight_radius: params.sight_radius,
        start,
        objectives,
    }
}

fn random_cell(rng: &mut ChaCha8Rng, width: usize, height: usize) -> Pos {
    Pos { x: roll(rng, width as u64) as i32, y: roll(rng, height as u64) as i32 }
}

fn roll(rng: &mut ChaCha8Rng, bound: u64) -> u64 {
    if bound == 0 {
        return 0;
    }
    rng.next_u64() % bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_edges_cover_every_adjacent_pair_once() {
        let edges = uniform_lattice_edges(3, 2, 1.0);
        // 2 horizontal per row * 2 rows + 3 vertical.
        assert_eq!(edges.len(), 7);
        assert!(edges.iter().all(|edge| edge.weight == 1.0));
    }

    #[test]
    fn same_seed_generates_the_same_scenario() {
        let params = LatticeParams::default();
        assert_eq!(generate_lattice(7, &params), generate_lattice(7, &params));
        assert_ne!(generate_lattice(7, &params), generate_lattice(8, &params));
    }

    #[test]
    fn reserved_cells_stay_plain_and_weights_stay_positive() {
        let params = LatticeParams { wall_percent: 60, gate_percent: 30, ..Default::default() };
        for seed in 0..20 {
            let scenario = generate_lattice(seed, &params);
            let mut reserved = vec![scenario.start];
            reserved.extend(scenario.objectives.iter().map(|objective| objective.target));
            assert!(scenario.nodes.iter().all(|node| !reserved.contains(&node.pos)));
            assert!(scenario.edges.iter().all(|edge| edge.weight >= 1.0));
            assert!(scenario.build_grid().is_ok());
        }
    }
}
