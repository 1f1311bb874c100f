//! Enemy behavior framework
//!
//! Each enemy carries a `BehaviorKind`; the turn engine looks up the
//! matching `EnemyBehavior` and acts on the `Intent` it returns. New kinds
//! plug in here without touching the engine.

use rand::{Rng, RngCore};
use serde::Deserialize;

use crate::core::config::PatrolAggroConfig;
use crate::core::types::{Limits, Position};
use crate::entity::Entity;

/// Closed set of enemy behaviors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    /// Wander around a home square, strike when the player comes close
    #[default]
    PatrolAggro,
}

/// What an enemy wants to do this round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Move to this (unclamped) target
    MoveTo(Position),
    /// Damage the player and flash the warning glyph on these cells
    Attack { damage: i32, warning: Vec<Position> },
    /// Do nothing
    Idle,
}

/// Read-only view of the round handed to a behavior
#[derive(Debug, Clone, Copy)]
pub struct BehaviorContext<'a> {
    pub player_position: Position,
    pub limits: Limits,
    pub patrol_aggro: &'a PatrolAggroConfig,
}

/// Trait for kind-specific enemy decisions
pub trait EnemyBehavior {
    /// Decide this round's intent for `enemy`
    fn decide(&self, enemy: &Entity, ctx: &BehaviorContext<'_>, rng: &mut dyn RngCore) -> Intent;
}

/// Get the behavior handler for a kind
pub fn behavior_for(kind: BehaviorKind) -> Box<dyn EnemyBehavior> {
    match kind {
        BehaviorKind::PatrolAggro => Box::new(PatrolAggro),
    }
}

/// Patrol around home; attack whenever the player is within the aggro radius.
///
/// The test is re-evaluated fresh every round: no cooldown, no memory of
/// having been aggravated last round.
pub struct PatrolAggro;

impl EnemyBehavior for PatrolAggro {
    fn decide(&self, enemy: &Entity, ctx: &BehaviorContext<'_>, rng: &mut dyn RngCore) -> Intent {
        let Some(state) = enemy.enemy_state() else {
            return Intent::Idle;
        };
        let tuning = ctx.patrol_aggro;

        if enemy
            .position()
            .within(&ctx.player_position, tuning.aggro_radius)
        {
            return Intent::Attack {
                damage: enemy.stats.attack,
                warning: state.attack_cells(enemy.position()).collect(),
            };
        }

        let step = tuning.patrol_step;
        let d_row = rng.gen_range(-step..=step);
        let d_col = rng.gen_range(-step..=step);
        Intent::MoveTo(state.home.offset(d_row, d_col))
    }
}
