//! Sight-radius reveal of gated nodes and path invalidation checks.
//! This is the only code path that flips a node's revealed flag.

use std::collections::BTreeSet;

use super::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealReport {
    /// Gated nodes revealed for the first time by this call.
    pub newly_revealed: usize,
    /// Nodes of the path under test that are now known to be locked.
    pub violations: Vec<Pos>,
}

impl RevealReport {
    pub fn is_path_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Reveals gated nodes within `radius` of `origin` and checks them against `path_under_test`.
///
/// When `heading` is a unit move, the half of the sight box behind the
/// traveler is skipped since it was already scanned from the previous cell.
pub fn reveal(
    grid: &mut Grid,
    origin: Pos,
    radius: u32,
    heading: Option<Direction>,
    path_under_test: &BTreeSet<Pos>,
    keys: &KeySet,
) -> RevealReport {
    let mut report = RevealReport::default();
    let Some(bounds) = SightBox::around(grid, origin, radius, heading) else {
        return report;
    };

    for y in bounds.min_y..=bounds.max_y {
        for x in bounds.min_x..=bounds.max_x {
            let p = Pos { x, y };
            let TileKind::Gated(key) = grid.tile_at(p) else {
                continue;
            };
            if !in_sight(origin, p, radius) {
                continue;
            }
            if grid.reveal(p) {
                report.newly_revealed += 1;
            }
            if !keys.contains(key) && path_under_test.contains(&p) {
                report.violations.push(p);
            }
        }
    }

    report
}

struct SightBox {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl SightBox {
    fn around(grid: &Grid, origin: Pos, radius: u32, heading: Option<Direction>) -> Option<Self> {
        let r = i64::from(radius);
        let (mut left, mut right, mut down, mut up) = (r, r, r, r);
        match heading {
            Some(Direction::Right) => left = 0,
            Some(Direction::Left) => right = 0,
            Some(Direction::Up) => down = 0,
            Some(Direction::Down) => up = 0,
            None => {}
        }

        let max_x_bound = grid.width() as i64 - 1;
        let max_y_bound = grid.height() as i64 - 1;
        let min_x = (i64::from(origin.x) - left).max(0);
        let max_x = (i64::from(origin.x) + right).min(max_x_bound);
        let min_y = (i64::from(origin.y) - down).max(0);
        let max_y = (i64::from(origin.y) + up).min(max_y_bound);
        if min_x > max_x || min_y > max_y {
            return None;
        }

        Some(Self {
            min_x: i32::try_from(min_x).ok()?,
            max_x: i32::try_from(max_x).ok()?,
            min_y: i32::try_from(min_y).ok()?,
            max_y: i32::try_from(max_y).ok()?,
        })
    }
}

fn in_sight(origin: Pos, p: Pos, radius: u32) -> bool {
    let dx = i64::from(p.x) - i64::from(origin.x);
    let dy = i64::from(p.y) - i64::from(origin.y);
    let r = i64::from(radius);
    dx * dx + dy * dy <= r * r
}
