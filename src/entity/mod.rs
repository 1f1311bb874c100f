//! Entity model shared by the player and enemies
//!
//! An entity is one struct with a tagged `kind`: the player and enemy
//! variants carry their own extra state, so the store never downcasts.

pub mod enemy;
pub mod history;
pub mod player;

pub use enemy::EnemyState;
pub use history::{PositionHistory, HISTORY_CAPACITY};
pub use player::{AttackStamp, PlayerState};

use crate::core::config::{EnemySpec, EntitySpec, PatrolAggroConfig};
use crate::core::types::{EntityId, Limits, Position, Role};
use crate::simulation::behavior::BehaviorKind;

/// Combat attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub health: i32,
    pub attack: i32,
    /// Stored and displayed, never subtracted from incoming damage
    pub defense: i32,
}

impl Stats {
    pub const fn new(health: i32, attack: i32, defense: i32) -> Self {
        Self {
            health,
            attack,
            defense,
        }
    }
}

/// Role-specific state
#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(PlayerState),
    Enemy(EnemyState),
}

/// A player or enemy on the grid
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    pub name: String,
    pub stats: Stats,
    position: Position,
    pub sprite: char,
    history: PositionHistory,
    pub kind: EntityKind,
}

impl Entity {
    /// Handle carried by entities that have not been registered yet
    pub const UNREGISTERED: EntityId = EntityId(u32::MAX);

    pub fn new(
        name: impl Into<String>,
        stats: Stats,
        position: Position,
        sprite: char,
        kind: EntityKind,
    ) -> Self {
        Self {
            id: Self::UNREGISTERED,
            name: name.into(),
            stats,
            position,
            sprite,
            history: PositionHistory::new(),
            kind,
        }
    }

    pub fn player(name: impl Into<String>, stats: Stats, position: Position, sprite: char) -> Self {
        Self::new(
            name,
            stats,
            position,
            sprite,
            EntityKind::Player(PlayerState::new()),
        )
    }

    pub fn enemy(
        name: impl Into<String>,
        stats: Stats,
        position: Position,
        sprite: char,
        state: EnemyState,
    ) -> Self {
        Self::new(name, stats, position, sprite, EntityKind::Enemy(state))
    }

    pub fn from_player_spec(spec: &EntitySpec) -> Self {
        Self::player(
            spec.name.clone(),
            Stats::new(spec.health, spec.attack, spec.defense),
            spec.position,
            spec.sprite,
        )
    }

    pub fn from_enemy_spec(spec: &EnemySpec, tuning: &PatrolAggroConfig) -> Self {
        let entity = &spec.entity;
        let state = match spec.behavior {
            BehaviorKind::PatrolAggro => {
                EnemyState::patrol_aggro(entity.position, tuning.attack_shape_radius)
            }
        };
        Self::enemy(
            entity.name.clone(),
            Stats::new(entity.health, entity.attack, entity.defense),
            entity.position,
            entity.sprite,
            state,
        )
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn role(&self) -> Role {
        match self.kind {
            EntityKind::Player(_) => Role::Player,
            EntityKind::Enemy(_) => Role::Enemy,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    pub fn health(&self) -> i32 {
        self.stats.health
    }

    pub fn is_alive(&self) -> bool {
        self.stats.health > 0
    }

    /// Move to `target` clamped into `limits`, recording the result in history
    pub fn set_position(&mut self, target: Position, limits: Limits) -> Position {
        let clamped = target.clamp(limits);
        self.position = clamped;
        self.history.push(clamped);
        clamped
    }

    /// Return to the previous recorded position.
    ///
    /// No-op (returns `None`) when fewer than two positions are recorded.
    pub fn step_back(&mut self, limits: Limits) -> Option<Position> {
        let previous = self.history.step_back()?;
        self.position = previous.clamp(limits);
        Some(self.position)
    }

    /// Subtract raw damage and return the new health
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        self.stats.health -= damage;
        self.stats.health
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            EntityKind::Player(state) => Some(state),
            EntityKind::Enemy(_) => None,
        }
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            EntityKind::Player(state) => Some(state),
            EntityKind::Enemy(_) => None,
        }
    }

    pub fn enemy_state(&self) -> Option<&EnemyState> {
        match &self.kind {
            EntityKind::Enemy(state) => Some(state),
            EntityKind::Player(_) => None,
        }
    }
}
