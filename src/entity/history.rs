//! Bounded position history used for step-back

use std::collections::VecDeque;

use crate::core::types::Position;

/// Number of positions an entity remembers
pub const HISTORY_CAPACITY: usize = 3;

/// Most-recent-first record of an entity's last positions
///
/// The front entry is always the entity's current position; the oldest
/// entry falls off once `HISTORY_CAPACITY` is exceeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionHistory {
    entries: VecDeque<Position>,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Record a new current position
    pub fn push(&mut self, pos: Position) {
        self.entries.push_front(pos);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// The position held immediately before the current one
    pub fn previous(&self) -> Option<Position> {
        self.entries.get(1).copied()
    }

    /// Drop the current entry and return the one before it.
    ///
    /// With fewer than two entries nothing changes and `None` is returned.
    pub fn step_back(&mut self) -> Option<Position> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop_front();
        self.entries.front().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Position> {
        self.entries.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> + '_ {
        self.entries.iter()
    }
}
