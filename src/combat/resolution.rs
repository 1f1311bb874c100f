//! Directional attack resolution
//!
//! An attack casts a short ray from the attacker in a cardinal direction.
//! Each probe cell along the ray is checked independently against every
//! entity of the opposing role, and each probe leaves a glyph stamp
//! whether or not it hit. Damage is the attacker's raw attack value.

use crate::core::config::GlyphConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::{Direction, EntityId, Position, Role};
use crate::ecs::world::World;
use crate::entity::AttackStamp;

/// What a single application of damage did to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target survived with this much health
    Wounded { remaining: i32 },
    /// Enemy dropped to zero or below and was removed from the world
    Killed,
    /// Player dropped to zero or below. Players are never removed.
    Downed { remaining: i32 },
}

/// One entity struck by one probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHit {
    pub target: EntityId,
    pub name: String,
    pub position: Position,
    pub damage: i32,
    pub outcome: DamageOutcome,
}

/// Everything a resolved attack produced
#[derive(Debug, Clone, Default)]
pub struct AttackReport {
    /// Ray stamps in probe order
    pub stamps: Vec<AttackStamp>,
    /// Hits in probe order, then store order within a probe
    pub hits: Vec<ProbeHit>,
}

impl AttackReport {
    pub fn kills(&self) -> usize {
        self.hits
            .iter()
            .filter(|hit| hit.outcome == DamageOutcome::Killed)
            .count()
    }
}

/// Probe cells at distance `1..=reach` from `origin`, nearest first
pub fn probe_positions(
    origin: Position,
    direction: Direction,
    reach: i32,
) -> impl Iterator<Item = Position> {
    (1..=reach).map(move |distance| direction.step_from(origin, distance))
}

/// Subtract `damage` from the target, removing it if it is an enemy that died
pub fn apply_damage(world: &mut World, target: EntityId, damage: i32) -> Result<DamageOutcome> {
    let entity = world
        .get_mut(target)
        .ok_or(GameError::EntityNotFound(target))?;
    let remaining = entity.take_damage(damage);

    if remaining > 0 {
        return Ok(DamageOutcome::Wounded { remaining });
    }

    match entity.role() {
        Role::Enemy => {
            if let Some(dead) = world.remove_by_id(target) {
                tracing::info!("{} at {} was slain", dead.name, dead.position());
            }
            Ok(DamageOutcome::Killed)
        }
        Role::Player => {
            tracing::info!("{} is down ({} health)", entity.name, remaining);
            Ok(DamageOutcome::Downed { remaining })
        }
    }
}

/// Resolve an attack by `attacker` towards `direction`
///
/// Hit candidates for each probe are snapshotted before any damage lands,
/// so removing a dead enemy never disturbs the scan. When the attacker is
/// a player, the stamps become its pending attack and the last enemy hit is
/// remembered for the status readout.
pub fn resolve_attack(
    world: &mut World,
    attacker: EntityId,
    direction: Direction,
    glyphs: &GlyphConfig,
    reach: i32,
) -> Result<AttackReport> {
    let (origin, damage, role, name) = {
        let entity = world
            .get(attacker)
            .ok_or(GameError::EntityNotFound(attacker))?;
        (
            entity.position(),
            entity.stats.attack,
            entity.role(),
            entity.name.clone(),
        )
    };
    let glyph = glyphs.ray(direction);
    let mut report = AttackReport::default();

    for probe in probe_positions(origin, direction, reach) {
        report.stamps.push(AttackStamp {
            glyph,
            position: probe,
        });

        let targets: Vec<(EntityId, String)> = world
            .entities_of(role.opponent())?
            .iter()
            .filter(|e| e.position() == probe)
            .map(|e| (e.id(), e.name.clone()))
            .collect();

        for (target, target_name) in targets {
            let outcome = apply_damage(world, target, damage)?;
            tracing::debug!(
                "{} hit {} at {} for {} ({:?})",
                name,
                target_name,
                probe,
                damage,
                outcome
            );
            report.hits.push(ProbeHit {
                target,
                name: target_name,
                position: probe,
                damage,
                outcome,
            });
        }
    }

    if let Some(state) = world.get_mut(attacker).and_then(|e| e.player_state_mut()) {
        state.pending_attack = report.stamps.clone();
        if let Some(last) = report.hits.last() {
            state.last_attacked = Some(last.target);
        }
    }

    Ok(report)
}
