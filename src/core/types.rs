//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique handle for a registered entity
///
/// Handles are issued by the world on registration and never reused, so a
/// handle to a removed entity simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Which side an entity fights on. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Player,
    Enemy,
}

impl Role {
    /// The role this role attacks
    pub fn opponent(&self) -> Role {
        match self {
            Role::Player => Role::Enemy,
            Role::Enemy => Role::Player,
        }
    }
}

/// Grid cell coordinate, row first (the scene is a stack of row strings)
///
/// Coordinates are signed: attack rays and patrol jitter can point off the
/// grid, and those positions must be representable before they are clamped
/// or dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Shift by a row/column delta without any bounds handling
    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// True when `other` lies within `radius` cells on both axes
    pub fn within(&self, other: &Position, radius: i32) -> bool {
        (self.row - other.row).abs() <= radius && (self.col - other.col).abs() <= radius
    }

    /// Clamp into `[0, height-1] x [0, width-1]`, inclusive on both ends
    pub fn clamp(&self, limits: Limits) -> Self {
        Self {
            row: clamp_axis(self.row, limits.height),
            col: clamp_axis(self.col, limits.width),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

fn clamp_axis(value: i32, limit: i32) -> i32 {
    if value >= limit {
        limit - 1
    } else if value <= 0 {
        0
    } else {
        value
    }
}

/// World extent in cells. Both dimensions are at least 1 once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub height: i32,
    pub width: i32,
}

impl Limits {
    pub const fn new(height: i32, width: i32) -> Self {
        Self { height, width }
    }

    /// Whether a position lies inside `[0, height) x [0, width)`
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.height && pos.col >= 0 && pos.col < self.width
    }
}

/// Cardinal direction for moves and attack rays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, col) delta of a single step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Position `distance` steps from `origin` along this direction
    pub fn step_from(&self, origin: Position, distance: i32) -> Position {
        let (d_row, d_col) = self.delta();
        origin.offset(d_row * distance, d_col * distance)
    }
}
