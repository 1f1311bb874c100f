//! Turn engine integration tests
//!
//! End-to-end checks of round ordering, collision correction, combat and
//! frame compositing through the public API.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish::combat::{resolve_attack, DamageOutcome};
use skirmish::command::Command;
use skirmish::core::config::{EnemySpec, EntitySpec, GameConfig, GlyphConfig, PlayerDeathPolicy};
use skirmish::core::error::GameError;
use skirmish::core::types::{Direction, EntityId, Limits, Position, Role};
use skirmish::ecs::World;
use skirmish::entity::{AttackStamp, EnemyState, Entity, Stats};
use skirmish::simulation::behavior::BehaviorKind;
use skirmish::simulation::{Control, RoundEvent, TurnEngine};
use skirmish::world::{ColliderLayout, Colliders};

fn enemy_spec(name: &str, health: i32, attack: i32, row: i32, col: i32) -> EnemySpec {
    EnemySpec {
        entity: EntitySpec {
            name: name.into(),
            health,
            attack,
            defense: 1,
            position: Position::new(row, col),
            sprite: 'B',
        },
        behavior: BehaviorKind::PatrolAggro,
    }
}

/// Default scenario without rooms, so nothing blocks the player by accident
fn open_config() -> GameConfig {
    GameConfig {
        colliders: ColliderLayout::default(),
        ..GameConfig::default()
    }
}

fn glyph_at(engine: &TurnEngine, pos: Position) -> char {
    engine
        .frame()
        .nth(pos.row as usize)
        .and_then(|row| row.chars().nth(pos.col as usize))
        .unwrap()
}

fn player_pos(engine: &TurnEngine) -> Position {
    engine.world().player(0).unwrap().position()
}

fn first_enemy(engine: &TurnEngine) -> EntityId {
    engine.world().entities_of(Role::Enemy).unwrap()[0].id()
}

#[test]
fn test_default_scenario_first_frame() {
    let mut engine = TurnEngine::from_config(GameConfig::default(), 11).unwrap();
    engine.run_round().unwrap();

    let rows: Vec<String> = engine.frame().collect();
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|r| r.chars().count() == 60));
    assert_eq!(glyph_at(&engine, Position::new(4, 23)), 'J');
    assert_eq!(glyph_at(&engine, Position::new(1, 44)), '#');
    // Doorway stays open terrain
    assert_eq!(glyph_at(&engine, Position::new(5, 49)), '.');
    assert_eq!(rows.iter().map(|r| r.matches('B').count()).sum::<usize>(), 2);
}

#[test]
fn test_one_round_input_latency() {
    let mut engine = TurnEngine::from_config(open_config(), 5).unwrap();
    engine.run_round().unwrap();
    assert_eq!(glyph_at(&engine, Position::new(4, 23)), 'J');

    // The command updates state immediately but the frame is last round's
    assert_eq!(engine.apply_command(Command::MoveRight).unwrap(), Control::Continue);
    assert_eq!(glyph_at(&engine, Position::new(4, 23)), 'J');
    assert_eq!(glyph_at(&engine, Position::new(4, 24)), '.');

    engine.run_round().unwrap();
    assert_eq!(glyph_at(&engine, Position::new(4, 24)), 'J');
    assert_eq!(glyph_at(&engine, Position::new(4, 23)), '.');
}

#[test]
fn test_collision_with_enemy_reverts_to_previous_position() {
    let mut config = open_config();
    config.enemies = vec![enemy_spec("Blind Bat", 30, 5, 0, 0)];
    let mut engine = TurnEngine::from_config(config, 8).unwrap();
    engine.run_round().unwrap();

    engine.apply_command(Command::MoveRight).unwrap();
    let before = engine.world().player(0).unwrap().history().clone();
    assert_eq!(before.get(0), Some(Position::new(4, 24)));
    let expected = before.get(1).unwrap();

    let bat = first_enemy(&engine);
    let limits = engine.world().limits();
    engine
        .world_mut()
        .get_mut(bat)
        .unwrap()
        .set_position(Position::new(4, 24), limits);

    let report = engine.run_round().unwrap();
    assert_eq!(player_pos(&engine), expected);
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, RoundEvent::CollisionReverted { .. })));
}

#[test]
fn test_collision_without_history_is_noop() {
    let mut config = open_config();
    config.enemies = vec![enemy_spec("Blind Bat", 30, 5, 4, 23)];
    let mut engine = TurnEngine::from_config(config, 8).unwrap();

    assert_eq!(engine.world().player(0).unwrap().history().len(), 1);
    let report = engine.run_round().unwrap();

    assert_eq!(player_pos(&engine), Position::new(4, 23));
    assert!(!report
        .events
        .iter()
        .any(|e| matches!(e, RoundEvent::CollisionReverted { .. })));
}

#[test]
fn test_collider_blocks_entry_into_room() {
    let mut engine = TurnEngine::from_config(GameConfig::default(), 2).unwrap();
    let limits = engine.world().limits();
    engine
        .world_mut()
        .player_mut(0)
        .unwrap()
        .set_position(Position::new(3, 43), limits);
    engine.run_round().unwrap();

    engine.apply_command(Command::MoveRight).unwrap();
    engine.run_round().unwrap();
    assert_eq!(player_pos(&engine), Position::new(3, 43));
    assert_eq!(glyph_at(&engine, Position::new(3, 44)), '#');
}

#[test]
fn test_attack_ray_order_from_five_five() {
    let player = Entity::player("John", Stats::new(200, 20, 30), Position::new(5, 5), 'J');
    let mut world = World::with_entities(
        Limits::new(10, 60),
        '.',
        Colliders::new(),
        vec![
            player,
            Entity::enemy(
                "Near",
                Stats::new(30, 5, 1),
                Position::new(4, 5),
                'B',
                EnemyState::patrol_aggro(Position::new(4, 5), 1),
            ),
            Entity::enemy(
                "Far",
                Stats::new(30, 5, 1),
                Position::new(3, 5),
                'B',
                EnemyState::patrol_aggro(Position::new(3, 5), 1),
            ),
        ],
    )
    .unwrap();
    let player_id = world.player(0).unwrap().id();

    let report = resolve_attack(
        &mut world,
        player_id,
        Direction::Up,
        &GlyphConfig::default(),
        2,
    )
    .unwrap();

    let expected = vec![
        AttackStamp {
            glyph: '|',
            position: Position::new(4, 5),
        },
        AttackStamp {
            glyph: '|',
            position: Position::new(3, 5),
        },
    ];
    assert_eq!(report.stamps, expected);
    let names: Vec<&str> = report.hits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Near", "Far"]);
    assert_eq!(
        world.player(0).unwrap().player_state().unwrap().pending_attack,
        expected
    );
}

#[test]
fn test_lethal_hit_removed_and_never_rendered() {
    let mut config = open_config();
    config.enemies = vec![enemy_spec("Weak Bat", 10, 1, 3, 23)];
    let mut engine = TurnEngine::from_config(config, 4).unwrap();
    engine.run_round().unwrap();

    // Keep the bat right above the player regardless of where it patrolled
    let bat = first_enemy(&engine);
    let limits = engine.world().limits();
    engine
        .world_mut()
        .get_mut(bat)
        .unwrap()
        .set_position(Position::new(3, 23), limits);

    engine.apply_command(Command::AttackUp).unwrap();
    let report = engine.run_round().unwrap();

    assert!(report.events.iter().any(|e| matches!(
        e,
        RoundEvent::PlayerHit {
            outcome: DamageOutcome::Killed,
            ..
        }
    )));
    assert!(engine.world().entities_of(Role::Enemy).unwrap().is_empty());
    assert!(engine.world().get(bat).is_none());

    engine.apply_command(Command::NoOp).unwrap();
    engine.run_round().unwrap();
    assert!(engine.frame().all(|row| !row.contains('B')));

    // The stale handle is tolerated by the status readout
    let status = engine.status().unwrap();
    assert!(status.last_enemy.is_none());
}

#[test]
fn test_damage_equal_to_health_kills() {
    let mut config = open_config();
    config.players[0].attack = 10;
    config.enemies = vec![enemy_spec("Weak Bat", 10, 1, 5, 23)];
    let mut engine = TurnEngine::from_config(config, 8).unwrap();
    engine.run_round().unwrap();

    let bat = first_enemy(&engine);
    let limits = engine.world().limits();
    engine
        .world_mut()
        .get_mut(bat)
        .unwrap()
        .set_position(Position::new(5, 23), limits);

    engine.apply_command(Command::AttackDown).unwrap();
    let report = engine.run_round().unwrap();

    assert!(report.events.iter().any(|e| matches!(
        e,
        RoundEvent::PlayerHit {
            damage: 10,
            outcome: DamageOutcome::Killed,
            ..
        }
    )));
    assert!(engine.world().entities_of(Role::Enemy).unwrap().is_empty());
    assert!(engine.frame().all(|row| !row.contains('B')));
}

#[test]
fn test_zero_health_enemy_rejected_at_startup() {
    let mut config = GameConfig::default();
    config.enemies[0].entity.health = 0;
    assert!(matches!(
        TurnEngine::from_config(config, 1),
        Err(GameError::InvalidConfig(_))
    ));
}

#[test]
fn test_huge_tunables_rejected_without_panic() {
    let mut config = GameConfig::default();
    config.patrol_aggro.attack_shape_radius = i32::MAX;
    assert!(TurnEngine::from_config(config, 1).is_err());

    let mut config = GameConfig::default();
    config.rules.attack_reach = i32::MAX;
    assert!(TurnEngine::from_config(config, 1).is_err());
}

#[test]
fn test_off_grid_enemy_patrols_near_clamped_home() {
    let mut config = open_config();
    config.enemies = vec![enemy_spec("Lost Bat", 30, 5, 40, 200)];
    let mut engine = TurnEngine::from_config(config, 12).unwrap();
    let bat = first_enemy(&engine);
    let home = engine.world().get(bat).unwrap().enemy_state().unwrap().home;
    assert_eq!(home, Position::new(9, 59));

    for _ in 0..20 {
        engine.run_round().unwrap();
        let pos = engine.world().get(bat).unwrap().position();
        assert!(pos.within(&home, 1));
    }
}

#[test]
fn test_adjacent_enemy_attacks_and_stamps_warning() {
    let mut config = open_config();
    config.enemies = vec![enemy_spec("Blind Bat", 30, 5, 5, 9)];
    let mut engine = TurnEngine::from_config(config, 6).unwrap();

    let bat = first_enemy(&engine);
    let limits = engine.world().limits();
    engine
        .world_mut()
        .get_mut(bat)
        .unwrap()
        .set_position(Position::new(5, 24), limits);

    let report = engine.run_round().unwrap();
    assert!(report.events.iter().any(|e| matches!(
        e,
        RoundEvent::EnemyAttacked {
            damage: 5,
            player_health: 195,
            ..
        }
    )));
    assert_eq!(engine.world().player(0).unwrap().health(), 195);

    // Warning glyph around the bat, sprites on top
    assert_eq!(glyph_at(&engine, Position::new(6, 25)), '^');
    assert_eq!(glyph_at(&engine, Position::new(5, 24)), 'B');
    assert_eq!(glyph_at(&engine, Position::new(4, 23)), 'J');
}

#[test]
fn test_warning_near_edge_does_not_fault() {
    let mut config = open_config();
    config.players[0].position = Position::new(0, 1);
    config.enemies = vec![enemy_spec("Edge Bat", 30, 5, 0, 0)];
    let mut engine = TurnEngine::from_config(config, 6).unwrap();

    engine.run_round().unwrap();
    assert_eq!(engine.world().player(0).unwrap().health(), 195);
    assert_eq!(glyph_at(&engine, Position::new(1, 0)), '^');
}

#[test]
fn test_patrol_stays_near_home_and_in_bounds() {
    let mut config = open_config();
    config.enemies = vec![enemy_spec("Corner Bat", 30, 5, 9, 59)];
    config.players[0].position = Position::new(0, 0);
    let mut engine = TurnEngine::from_config(config, 21).unwrap();

    for _ in 0..50 {
        engine.run_round().unwrap();
        let bat = &engine.world().entities_of(Role::Enemy).unwrap()[0];
        let pos = bat.position();
        assert!(engine.world().limits().contains(pos));
        assert!(pos.within(&Position::new(9, 59), 1));
    }
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| -> Vec<Vec<String>> {
        let mut engine = TurnEngine::from_config(GameConfig::default(), seed).unwrap();
        let script = [
            Command::MoveLeft,
            Command::MoveLeft,
            Command::AttackLeft,
            Command::MoveDown,
            Command::MoveBack,
        ];
        let mut frames = Vec::new();
        for command in script {
            engine.run_round().unwrap();
            frames.push(engine.frame().collect());
            engine.apply_command(command).unwrap();
        }
        frames
    };
    assert_eq!(play(1234), play(1234));
}

#[test]
fn test_player_death_continue_by_default() {
    let mut config = open_config();
    config.players[0].health = 3;
    config.enemies = vec![enemy_spec("Blind Bat", 30, 5, 5, 24)];
    let mut engine = TurnEngine::from_config(config, 1).unwrap();

    let report = engine.run_round().unwrap();
    assert_eq!(engine.world().player(0).unwrap().health(), -2);
    assert!(!engine.is_over());
    assert!(!report
        .events
        .iter()
        .any(|e| matches!(e, RoundEvent::GameOver { .. })));
    assert_eq!(engine.world().count_of(Role::Player), 1);
}

#[test]
fn test_player_death_game_over_policy() {
    let mut config = open_config();
    config.rules.player_death = PlayerDeathPolicy::GameOver;
    config.players[0].health = 3;
    config.enemies = vec![enemy_spec("Blind Bat", 30, 5, 5, 24)];
    let mut engine = TurnEngine::from_config(config, 1).unwrap();

    let report = engine.run_round().unwrap();
    assert!(engine.is_over());
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, RoundEvent::GameOver { round: 1 })));
}

#[test]
fn test_engine_accepts_injected_rng() {
    let world = World::from_config(&GameConfig::default()).unwrap();
    let mut engine =
        TurnEngine::new(world, GameConfig::default(), ChaCha8Rng::seed_from_u64(77)).unwrap();
    engine.run_round().unwrap();
    assert_eq!(engine.round(), 1);
}
