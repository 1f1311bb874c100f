//! Player-only state

use crate::core::types::{Direction, EntityId, Position};

/// One glyph of an attack ray, drawn on top of everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackStamp {
    pub glyph: char,
    pub position: Position,
}

/// State carried only by player entities
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    /// Attack command waiting for the next round's combat phase
    pub attack_intent: Option<Direction>,
    /// Ray stamps of this round's attack, in probe order
    pub pending_attack: Vec<AttackStamp>,
    /// Handle of the enemy damaged most recently. May outlive the enemy.
    pub last_attacked: Option<EntityId>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous command's attack: called before every command is applied
    pub fn clear_attack(&mut self) {
        self.attack_intent = None;
        self.pending_attack.clear();
    }
}
