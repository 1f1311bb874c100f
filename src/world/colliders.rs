//! Static obstacles placed once at world creation
//!
//! Colliders never move and are never removed. They are baked into the base
//! scene at construction and only read afterwards, by the collision check.

use ahash::AHashSet;
use serde::Deserialize;

use crate::core::types::Position;

/// An immovable obstacle cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Collider {
    pub position: Position,
    pub glyph: char,
}

impl Collider {
    pub const fn new(position: Position, glyph: char) -> Self {
        Self { position, glyph }
    }
}

/// Rectangular walled room with an optional doorway
#[derive(Debug, Clone, Deserialize)]
pub struct RoomSpec {
    pub top: i32,
    pub left: i32,
    pub height: i32,
    pub width: i32,
    #[serde(default = "default_wall")]
    pub wall: char,
    /// Wall cell left open
    #[serde(default)]
    pub door: Option<Position>,
}

fn default_wall() -> char {
    '#'
}

impl RoomSpec {
    /// Perimeter cells of the room, minus the doorway
    pub fn colliders(&self) -> Vec<Collider> {
        let bottom = self.top + self.height - 1;
        let right = self.left + self.width - 1;
        let mut out = Vec::new();

        for row in self.top..=bottom {
            for col in self.left..=right {
                let on_edge = row == self.top || row == bottom || col == self.left || col == right;
                let pos = Position::new(row, col);
                if on_edge && self.door != Some(pos) {
                    out.push(Collider::new(pos, self.wall));
                }
            }
        }
        out
    }
}

/// Collider layout as data: rooms plus loose cells
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColliderLayout {
    pub rooms: Vec<RoomSpec>,
    pub cells: Vec<Collider>,
}

impl ColliderLayout {
    /// Expand the layout into individual colliders, rooms first
    pub fn build(&self) -> Colliders {
        let mut colliders = Colliders::new();
        for room in &self.rooms {
            for collider in room.colliders() {
                colliders.insert(collider);
            }
        }
        for collider in &self.cells {
            colliders.insert(*collider);
        }
        colliders
    }
}

/// Read-only registry of every collider in the world
#[derive(Debug, Clone, Default)]
pub struct Colliders {
    list: Vec<Collider>,
    occupied: AHashSet<Position>,
}

impl Colliders {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, collider: Collider) {
        self.occupied.insert(collider.position);
        self.list.push(collider);
    }

    /// Whether any collider sits on `pos`
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.occupied.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collider> + '_ {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl FromIterator<Collider> for Colliders {
    fn from_iter<I: IntoIterator<Item = Collider>>(iter: I) -> Self {
        let mut colliders = Colliders::new();
        for collider in iter {
            colliders.insert(collider);
        }
        colliders
    }
}
