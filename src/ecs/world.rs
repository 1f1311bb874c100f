//! World - owns every entity, the colliders and the scene

use ahash::AHashMap;

use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::{EntityId, Limits, Role};
use crate::entity::{Entity, EntityKind};
use crate::spatial::grid::Scene;
use crate::world::colliders::Colliders;

/// The game world containing all entities
///
/// Entities live in one ordered bucket per role. Registration order is
/// store order: it decides which duplicate-named entity `remove` hits and
/// which player is player 0.
pub struct World {
    limits: Limits,
    entities: AHashMap<Role, Vec<Entity>>,
    colliders: Colliders,
    scene: Scene,
    next_id: u32,
}

impl World {
    fn empty(limits: Limits, terrain: char, colliders: Colliders) -> Self {
        let scene = Scene::new(
            limits,
            terrain,
            colliders.iter().map(|c| (c.glyph, c.position)),
        );
        Self {
            limits,
            entities: AHashMap::new(),
            colliders,
            scene,
            next_id: 0,
        }
    }

    /// Build a world from an explicit roster. Rejects a roster without players
    /// or with an entity that starts at non-positive health.
    pub fn with_entities(
        limits: Limits,
        terrain: char,
        colliders: Colliders,
        entities: impl IntoIterator<Item = Entity>,
    ) -> Result<Self> {
        if limits.height < 1 || limits.width < 1 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                limits.height, limits.width
            )));
        }

        let mut world = Self::empty(limits, terrain, colliders);
        for entity in entities {
            if !entity.is_alive() {
                return Err(GameError::InvalidConfig(format!(
                    "'{}' must start with positive health, got {}",
                    entity.name,
                    entity.health()
                )));
            }
            world.register(entity);
        }
        if world.count_of(Role::Player) == 0 {
            return Err(GameError::NoPlayers);
        }
        Ok(world)
    }

    /// Build the configured world: colliders, players, then enemies
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;

        let players = config.players.iter().map(Entity::from_player_spec);
        let enemies = config
            .enemies
            .iter()
            .map(|spec| Entity::from_enemy_spec(spec, &config.patrol_aggro));

        let mut world = Self::with_entities(
            config.limits(),
            config.world.terrain,
            config.colliders.build(),
            players.chain(enemies),
        )?;
        // An empty enemy roster is a legal configuration, not a missing bucket
        world.entities.entry(Role::Enemy).or_default();

        tracing::info!(
            "World built: {}x{}, {} players, {} enemies, {} colliders",
            world.limits.height,
            world.limits.width,
            world.count_of(Role::Player),
            world.count_of(Role::Enemy),
            world.colliders.len()
        );
        Ok(world)
    }

    /// Take ownership of an entity, clamp it onto the grid and hand out its handle.
    /// An enemy's home square is clamped along with its position.
    pub fn register(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        entity.assign_id(id);
        entity.set_position(entity.position(), self.limits);
        if let EntityKind::Enemy(state) = &mut entity.kind {
            state.home = state.home.clamp(self.limits);
        }
        tracing::debug!(
            "Registered {:?} '{}' as {:?} at {}",
            entity.role(),
            entity.name,
            id,
            entity.position()
        );

        self.entities.entry(entity.role()).or_default().push(entity);
        id
    }

    /// Remove the first entity of `role` named `name`, in store order
    pub fn remove(&mut self, role: Role, name: &str) -> Option<Entity> {
        let bucket = self.entities.get_mut(&role)?;
        let idx = bucket.iter().position(|e| e.name == name)?;
        Some(bucket.remove(idx))
    }

    /// Remove the entity behind `id`
    pub fn remove_by_id(&mut self, id: EntityId) -> Option<Entity> {
        for bucket in self.entities.values_mut() {
            if let Some(idx) = bucket.iter().position(|e| e.id() == id) {
                return Some(bucket.remove(idx));
            }
        }
        None
    }

    /// Every live entity of a role, in store order
    pub fn entities_of(&self, role: Role) -> Result<&[Entity]> {
        self.entities
            .get(&role)
            .map(Vec::as_slice)
            .ok_or(GameError::MissingRole(role))
    }

    /// Mutable view of a role bucket
    pub fn entities_of_mut(&mut self, role: Role) -> Result<&mut [Entity]> {
        self.entities
            .get_mut(&role)
            .map(Vec::as_mut_slice)
            .ok_or(GameError::MissingRole(role))
    }

    /// Snapshot of the handles in a role bucket
    pub fn ids_of(&self, role: Role) -> Result<Vec<EntityId>> {
        Ok(self.entities_of(role)?.iter().map(Entity::id).collect())
    }

    /// The `index`th registered player; index 0 is the canonical player
    pub fn player(&self, index: usize) -> Result<&Entity> {
        let players = self.entities_of(Role::Player)?;
        players.get(index).ok_or(GameError::PlayerIndexOutOfRange {
            index,
            count: players.len(),
        })
    }

    pub fn player_mut(&mut self, index: usize) -> Result<&mut Entity> {
        let players = self.entities_of_mut(Role::Player)?;
        let count = players.len();
        players
            .get_mut(index)
            .ok_or(GameError::PlayerIndexOutOfRange { index, count })
    }

    /// Look up a live entity by handle
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .values()
            .flat_map(|bucket| bucket.iter())
            .find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .values_mut()
            .flat_map(|bucket| bucket.iter_mut())
            .find(|e| e.id() == id)
    }

    pub fn count_of(&self, role: Role) -> usize {
        self.entities.get(&role).map_or(0, Vec::len)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.values().map(Vec::len).sum()
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn colliders(&self) -> &Colliders {
        &self.colliders
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}
