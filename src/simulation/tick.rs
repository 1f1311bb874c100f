//! Turn engine - orchestrates one round of play
//!
//! A round always runs in this order:
//! 1. Reset the frame from the base scene (terrain and colliders)
//! 2. Collision correction (players standing on an enemy or collider step back)
//! 3. Enemy phase (each enemy patrols or attacks)
//! 4. Player attack phase (the attack command applied last round resolves)
//! 5. Composite entity sprites, then attack ray glyphs, onto the frame
//!
//! Commands are applied between rounds with `apply_command`. A move changes
//! the player's position right away, but the frame only shows it after the
//! next round, which is also when the collision check sees it.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::{apply_damage, resolve_attack, DamageOutcome};
use crate::command::Command;
use crate::core::config::{GameConfig, PlayerDeathPolicy};
use crate::core::error::{GameError, Result};
use crate::core::types::{EntityId, Position, Role};
use crate::ecs::world::World;
use crate::render::StatusReadout;
use crate::simulation::behavior::{behavior_for, BehaviorContext, Intent};

/// Events generated during a round
///
/// Returned by `run_round` for logging and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    /// A player overlapping an obstacle was pushed back
    CollisionReverted {
        player: EntityId,
        from: Position,
        to: Position,
    },
    /// An enemy patrolled to a new cell
    EnemyMoved { enemy: EntityId, to: Position },
    /// An enemy struck the player
    EnemyAttacked {
        enemy: EntityId,
        damage: i32,
        player_health: i32,
    },
    /// The player's attack hit an enemy
    PlayerHit {
        target: EntityId,
        name: String,
        damage: i32,
        outcome: DamageOutcome,
    },
    /// The player went down under the game-over policy
    GameOver { round: u64 },
}

/// Everything that happened in one round
#[derive(Debug, Clone, Default)]
pub struct RoundReport {
    pub round: u64,
    pub events: Vec<RoundEvent>,
}

/// Whether the session continues after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Owns the world for the duration of the game and advances it round by round
pub struct TurnEngine<R: RngCore = ChaCha8Rng> {
    world: World,
    config: GameConfig,
    rng: R,
    round: u64,
    debug_line: String,
    over: bool,
}

impl TurnEngine<ChaCha8Rng> {
    /// Build the configured world with a seeded ChaCha RNG
    pub fn from_config(config: GameConfig, seed: u64) -> Result<Self> {
        let world = World::from_config(&config)?;
        tracing::info!("Engine seeded with {}", seed);
        Self::new(world, config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> TurnEngine<R> {
    /// Wrap an existing world. Fails if the world has no player 0 or the
    /// config does not validate.
    pub fn new(world: World, config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        if world.count_of(Role::Player) == 0 {
            return Err(GameError::NoPlayers);
        }
        Ok(Self {
            world,
            config,
            rng,
            round: 0,
            debug_line: String::new(),
            over: false,
        })
    }

    /// Run one full round and leave the finished frame in the scene
    pub fn run_round(&mut self) -> Result<RoundReport> {
        self.round += 1;
        let mut events = Vec::new();

        self.world.scene_mut().reset();
        self.collision_check(&mut events)?;
        self.enemy_phase(&mut events)?;
        self.player_attack_phase(&mut events)?;
        self.composite()?;
        self.check_game_over(&mut events)?;

        tracing::debug!("Round {} finished with {} events", self.round, events.len());
        Ok(RoundReport {
            round: self.round,
            events,
        })
    }

    /// Push every player that overlaps an enemy or collider back one step
    fn collision_check(&mut self, events: &mut Vec<RoundEvent>) -> Result<()> {
        let limits = self.world.limits();

        for player_id in self.world.ids_of(Role::Player)? {
            let Some(position) = self.world.get(player_id).map(|p| p.position()) else {
                continue;
            };
            let on_enemy = self
                .world
                .entities_of(Role::Enemy)?
                .iter()
                .any(|e| e.position() == position);
            let on_collider = self.world.colliders().is_blocked(position);
            if !on_enemy && !on_collider {
                continue;
            }

            let Some(player) = self.world.get_mut(player_id) else {
                continue;
            };
            match player.step_back(limits) {
                Some(to) => {
                    tracing::debug!("{} collided at {}, reverted to {}", player.name, position, to);
                    self.debug_line = format!("Bumped at {position}, stepped back to {to}");
                    events.push(RoundEvent::CollisionReverted {
                        player: player_id,
                        from: position,
                        to,
                    });
                }
                None => {
                    tracing::debug!(
                        "{} collided at {} with no history to revert",
                        player.name,
                        position
                    );
                }
            }
        }
        Ok(())
    }

    /// Let every enemy decide and act
    fn enemy_phase(&mut self, events: &mut Vec<RoundEvent>) -> Result<()> {
        let limits = self.world.limits();
        let warning_glyph = self.config.glyphs.warning;
        let player_id = self.world.player(0)?.id();

        for enemy_id in self.world.ids_of(Role::Enemy)? {
            let player_position = self.world.player(0)?.position();
            let Some(enemy) = self.world.get(enemy_id) else {
                continue;
            };
            let Some(kind) = enemy.enemy_state().map(|s| s.behavior) else {
                continue;
            };

            let ctx = BehaviorContext {
                player_position,
                limits,
                patrol_aggro: &self.config.patrol_aggro,
            };
            let intent = behavior_for(kind).decide(enemy, &ctx, &mut self.rng);
            let enemy_name = enemy.name.clone();

            match intent {
                Intent::MoveTo(target) => {
                    if let Some(enemy) = self.world.get_mut(enemy_id) {
                        let to = enemy.set_position(target, limits);
                        events.push(RoundEvent::EnemyMoved { enemy: enemy_id, to });
                    }
                }
                Intent::Attack { damage, warning } => {
                    let outcome = apply_damage(&mut self.world, player_id, damage)?;
                    let player_health = match outcome {
                        DamageOutcome::Wounded { remaining }
                        | DamageOutcome::Downed { remaining } => remaining,
                        DamageOutcome::Killed => 0,
                    };
                    for cell in warning {
                        self.world.scene_mut().stamp(warning_glyph, cell);
                    }
                    tracing::debug!("{} attacked the player for {}", enemy_name, damage);
                    self.debug_line = format!("{enemy_name} bites for {damage}");
                    events.push(RoundEvent::EnemyAttacked {
                        enemy: enemy_id,
                        damage,
                        player_health,
                    });
                }
                Intent::Idle => {}
            }
        }
        Ok(())
    }

    /// Resolve the attack queued by last round's command
    fn player_attack_phase(&mut self, events: &mut Vec<RoundEvent>) -> Result<()> {
        let player = self.world.player_mut(0)?;
        let player_id = player.id();
        let Some(direction) = player
            .player_state_mut()
            .and_then(|state| state.attack_intent.take())
        else {
            return Ok(());
        };

        let report = resolve_attack(
            &mut self.world,
            player_id,
            direction,
            &self.config.glyphs,
            self.config.rules.attack_reach,
        )?;

        if !report.hits.is_empty() {
            self.debug_line = format!(
                "Attack {:?}: {} hit(s), {} kill(s)",
                direction,
                report.hits.len(),
                report.kills()
            );
        }
        for hit in report.hits {
            events.push(RoundEvent::PlayerHit {
                target: hit.target,
                name: hit.name,
                damage: hit.damage,
                outcome: hit.outcome,
            });
        }
        Ok(())
    }

    /// Stamp sprites (enemies, then players) and then attack rays on top
    fn composite(&mut self) -> Result<()> {
        let mut stamps: Vec<(char, Position)> = Vec::new();
        for role in [Role::Enemy, Role::Player] {
            stamps.extend(
                self.world
                    .entities_of(role)?
                    .iter()
                    .map(|e| (e.sprite, e.position())),
            );
        }
        for player in self.world.entities_of(Role::Player)? {
            if let Some(state) = player.player_state() {
                stamps.extend(state.pending_attack.iter().map(|s| (s.glyph, s.position)));
            }
        }

        let scene = self.world.scene_mut();
        for (glyph, pos) in stamps {
            scene.stamp(glyph, pos);
        }
        Ok(())
    }

    fn check_game_over(&mut self, events: &mut Vec<RoundEvent>) -> Result<()> {
        if self.over || self.config.rules.player_death != PlayerDeathPolicy::GameOver {
            return Ok(());
        }
        let player = self.world.player(0)?;
        if !player.is_alive() {
            tracing::info!("{} has fallen in round {}", player.name, self.round);
            self.over = true;
            events.push(RoundEvent::GameOver { round: self.round });
        }
        Ok(())
    }

    /// Apply a command to player 0 ahead of the next round
    pub fn apply_command(&mut self, command: Command) -> Result<Control> {
        let limits = self.world.limits();
        let player = self.world.player_mut(0)?;
        if let Some(state) = player.player_state_mut() {
            state.clear_attack();
        }

        if let Some(direction) = command.move_direction() {
            let (d_row, d_col) = direction.delta();
            let target = player.position().offset(d_row, d_col);
            player.set_position(target, limits);
        } else if let Some(direction) = command.attack_direction() {
            if let Some(state) = player.player_state_mut() {
                state.attack_intent = Some(direction);
            }
        } else {
            match command {
                Command::MoveBack => {
                    if player.step_back(limits).is_none() {
                        tracing::debug!("Nothing to step back to");
                    }
                }
                Command::Quit => return Ok(Control::Quit),
                _ => {}
            }
        }

        tracing::trace!("Applied {:?}, player at {}", command, player.position());
        Ok(Control::Continue)
    }

    /// The frame composed by the last round, one string per row
    pub fn frame(&self) -> impl Iterator<Item = String> + '_ {
        self.world.scene().render()
    }

    /// Status readout for player 0
    pub fn status(&self) -> Result<StatusReadout> {
        let player = self.world.player(0)?;
        let last_enemy = player
            .player_state()
            .and_then(|state| state.last_attacked)
            .and_then(|id| self.world.get(id))
            .map(|enemy| (enemy.name.clone(), enemy.health()));

        Ok(StatusReadout {
            player_name: player.name.clone(),
            player_stats: player.stats,
            last_enemy,
            debug: self.debug_line.clone(),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn debug_line(&self) -> &str {
        &self.debug_line
    }
}
