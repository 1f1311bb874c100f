//! Game configuration with documented defaults
//!
//! Every tunable the engine reads lives here: grid extent, glyphs, the
//! patrol/aggro thresholds, collider layout and the starting roster.
//! `Default` reproduces the reference build; a TOML file can override any
//! subset of it.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{GameError, Result};
use crate::core::types::{Direction, Limits, Position};
use crate::simulation::behavior::BehaviorKind;
use crate::world::colliders::{ColliderLayout, RoomSpec};

/// Largest accepted grid dimension
pub const MAX_DIMENSION: usize = 1024;

/// Largest accepted radius, reach or room coordinate
const MAX_EXTENT: i32 = MAX_DIMENSION as i32;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub glyphs: GlyphConfig,
    pub patrol_aggro: PatrolAggroConfig,
    pub rules: RulesConfig,
    pub colliders: ColliderLayout,
    pub players: Vec<EntitySpec>,
    pub enemies: Vec<EnemySpec>,
}

/// Grid extent and terrain
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of rows in the scene
    pub height: usize,
    /// Number of columns in the scene
    pub width: usize,
    /// Glyph of an empty cell
    pub terrain: char,
    /// Seed for the engine RNG. `None` draws a fresh seed at startup.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            height: 10,
            width: 60,
            terrain: '.',
            seed: None,
        }
    }
}

/// Glyphs used for feedback stamps
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// Stamped around an enemy that attacks this round
    pub warning: char,
    /// Attack ray going up or down
    pub ray_vertical: char,
    /// Attack ray going right
    pub ray_right: char,
    /// Attack ray going left
    pub ray_left: char,
}

impl GlyphConfig {
    /// Glyph recorded for an attack probe in `direction`
    pub fn ray(&self, direction: Direction) -> char {
        match direction {
            Direction::Up | Direction::Down => self.ray_vertical,
            Direction::Right => self.ray_right,
            Direction::Left => self.ray_left,
        }
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            warning: '^',
            ray_vertical: '|',
            ray_right: '/',
            ray_left: '\\',
        }
    }
}

/// Tunables for the patrol/aggro enemy behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PatrolAggroConfig {
    /// Chebyshev distance at which an enemy switches to attacking.
    ///
    /// At 1 the enemy attacks when the player is in its 8-neighbourhood.
    pub aggro_radius: i32,
    /// Maximum per-axis distance of a patrol hop from the home square
    pub patrol_step: i32,
    /// Radius of the square warning stamp drawn around an attacking enemy
    pub attack_shape_radius: i32,
}

impl Default for PatrolAggroConfig {
    fn default() -> Self {
        Self {
            aggro_radius: 1,
            patrol_step: 1,
            attack_shape_radius: 1,
        }
    }
}

/// What happens when the player's health drops to zero or below
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerDeathPolicy {
    /// Nothing: health keeps going negative and the game goes on
    #[default]
    Continue,
    /// The round that downs the player ends the game
    GameOver,
}

/// Combat and turn rules
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub player_death: PlayerDeathPolicy,
    /// Number of probe cells along an attack ray
    pub attack_reach: i32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            player_death: PlayerDeathPolicy::Continue,
            attack_reach: 2,
        }
    }
}

/// Starting attributes of one entity
#[derive(Debug, Clone, Deserialize)]
pub struct EntitySpec {
    pub name: String,
    pub health: i32,
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    pub position: Position,
    pub sprite: char,
}

/// Starting attributes of one enemy
#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpec {
    #[serde(flatten)]
    pub entity: EntitySpec,
    #[serde(default)]
    pub behavior: BehaviorKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            glyphs: GlyphConfig::default(),
            patrol_aggro: PatrolAggroConfig::default(),
            rules: RulesConfig::default(),
            colliders: ColliderLayout {
                rooms: vec![RoomSpec {
                    top: 1,
                    left: 44,
                    height: 5,
                    width: 10,
                    wall: '#',
                    door: Some(Position::new(5, 49)),
                }],
                cells: Vec::new(),
            },
            players: vec![EntitySpec {
                name: "John".into(),
                health: 200,
                attack: 20,
                defense: 30,
                position: Position::new(4, 23),
                sprite: 'J',
            }],
            enemies: vec![
                EnemySpec {
                    entity: EntitySpec {
                        name: "Blind Bat".into(),
                        health: 30,
                        attack: 5,
                        defense: 1,
                        position: Position::new(5, 9),
                        sprite: 'B',
                    },
                    behavior: BehaviorKind::PatrolAggro,
                },
                EnemySpec {
                    entity: EntitySpec {
                        name: "Blind Bat".into(),
                        health: 30,
                        attack: 5,
                        defense: 1,
                        position: Position::new(5, 34),
                        sprite: 'B',
                    },
                    behavior: BehaviorKind::PatrolAggro,
                },
            ],
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// World extent as signed limits
    pub fn limits(&self) -> Limits {
        // validate() caps both dimensions well below i32::MAX
        Limits::new(self.world.height as i32, self.world.width as i32)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        if world.height == 0 || world.width == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                world.height, world.width
            )));
        }
        if world.height > MAX_DIMENSION || world.width > MAX_DIMENSION {
            return Err(GameError::InvalidConfig(format!(
                "grid dimensions must be <= {MAX_DIMENSION}, got {}x{}",
                world.height, world.width
            )));
        }

        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        let roster = self
            .players
            .iter()
            .chain(self.enemies.iter().map(|e| &e.entity));
        for spec in roster {
            if spec.health <= 0 {
                return Err(GameError::InvalidConfig(format!(
                    "'{}' must start with positive health, got {}",
                    spec.name, spec.health
                )));
            }
        }

        let pa = &self.patrol_aggro;
        for (name, value) in [
            ("aggro_radius", pa.aggro_radius),
            ("patrol_step", pa.patrol_step),
            ("attack_shape_radius", pa.attack_shape_radius),
        ] {
            if !(0..=MAX_EXTENT).contains(&value) {
                return Err(GameError::InvalidConfig(format!(
                    "patrol_aggro.{name} must be in 0..={MAX_EXTENT}, got {value}"
                )));
            }
        }

        if !(1..=MAX_EXTENT).contains(&self.rules.attack_reach) {
            return Err(GameError::InvalidConfig(format!(
                "attack_reach must be in 1..={MAX_EXTENT}, got {}",
                self.rules.attack_reach
            )));
        }

        for room in &self.colliders.rooms {
            let origin = Position::new(room.top, room.left);
            if room.height < 2 || room.width < 2 {
                return Err(GameError::InvalidConfig(format!(
                    "room at {origin} must be at least 2x2"
                )));
            }
            let coords = -MAX_EXTENT..=MAX_EXTENT;
            if room.height > MAX_EXTENT
                || room.width > MAX_EXTENT
                || !coords.contains(&room.top)
                || !coords.contains(&room.left)
            {
                return Err(GameError::InvalidConfig(format!(
                    "room at {origin} exceeds {MAX_EXTENT} cells"
                )));
            }
        }

        Ok(())
    }
}
