use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Traveler {
    pos: Pos,
    sight_radius: u32,
}

impl Traveler {
    pub fn new(pos: Pos, sight_radius: u32) -> Self {
        Self { pos, sight_radius }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn sight_radius(&self) -> u32 {
        self.sight_radius
    }

    /// Moves one edge and reports the heading when the edge is an axis-aligned unit step.
    pub(super) fn step_to(&mut self, next: Pos) -> Option<Direction> {
        let heading = Direction::between(self.pos, next);
        self.pos = next;
        heading
    }
}
