//! Integration tests that drive the full frame through [`Simulation`].

use bevy_ecs::prelude::*;
use glam::Vec2;

use snakecore::components::bounds::Bounds;
use snakecore::components::mapposition::MapPosition;
use snakecore::components::platform::{Platform, PlatformKind};
use snakecore::components::rigidbody::RigidBody;
use snakecore::components::snake::{Direction, FruitCount, Player, Segment, SnakeChain, SnakeState};
use snakecore::components::timeout::{DeferredAction, Timeout};
use snakecore::events::feedback::{Collaborators, Color, FeedbackCmd, Screen};
use snakecore::game::{RuleTag, Scene, SceneError, SceneObject, spawn_scene};
use snakecore::resources::gameconfig::GameConfig;
use snakecore::resources::gamestate::GameStates;
use snakecore::simulation::Simulation;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn new_sim() -> Simulation {
    Simulation::new(GameConfig::new())
}

fn pos(sim: &Simulation, entity: Entity) -> Vec2 {
    sim.get::<MapPosition>(entity).unwrap().pos
}

/// Straight snake along x, head first, parts 8 units apart.
fn spawn_snake(sim: &mut Simulation, head_at: Vec2, parts: usize, velocity: Vec2) -> Entity {
    let head = sim.create_entity();
    sim.attach(head, MapPosition::from_vec(head_at));
    sim.attach(head, Bounds::new(8.0, 8.0).at(head_at));
    sim.attach(head, RigidBody::with_velocity(velocity));
    sim.attach(head, SnakeState::default());
    sim.attach(head, Player);
    let segments: Vec<Entity> = (1..parts)
        .map(|i| {
            let at = head_at - Vec2::new(8.0 * i as f32, 0.0);
            let seg = sim.create_entity();
            sim.attach(seg, Segment);
            sim.attach(seg, MapPosition::from_vec(at));
            sim.attach(seg, Bounds::new(8.0, 8.0).at(at));
            seg
        })
        .collect();
    let id = sim.next_chain_id();
    sim.attach(head, SnakeChain::with_segments(head, id, segments));
    head
}

fn parts(sim: &Simulation, head: Entity) -> Vec<Entity> {
    sim.get::<SnakeChain>(head).unwrap().parts().to_vec()
}

#[derive(Default)]
struct Recorder {
    sounds: Vec<String>,
    followed: Vec<Entity>,
    counts: Vec<(String, u32)>,
    screens: Vec<Screen>,
}

impl Collaborators for Recorder {
    fn play(&mut self, sound_id: &str) {
        self.sounds.push(sound_id.to_string());
    }
    fn follow(&mut self, entity: Entity) {
        self.followed.push(entity);
    }
    fn animate_count(&mut self, label: &str, value: u32, _: Color, _: f32, _: f32) {
        self.counts.push((label.to_string(), value));
    }
    fn show_screen(&mut self, screen: Screen) {
        self.screens.push(screen);
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn registry_create_attach_get_remove() {
    let mut sim = new_sim();
    let e = sim.create_entity();
    sim.attach(e, MapPosition::new(1.0, 2.0));
    assert_eq!(pos(&sim, e), Vec2::new(1.0, 2.0));

    sim.attach(e, MapPosition::new(3.0, 4.0));
    assert_eq!(pos(&sim, e), Vec2::new(3.0, 4.0));
    assert!(sim.get::<RigidBody>(e).is_none());

    assert!(sim.remove(e));
    assert!(!sim.contains(e));
    assert!(!sim.remove(e));
    // attaching to a removed entity is ignored
    sim.attach(e, RigidBody::new());
    assert!(!sim.contains(e));
}

#[test]
fn query_is_a_snapshot() {
    let mut sim = new_sim();
    let a = sim.create_entity();
    sim.attach(a, Platform::new(PlatformKind::Wall));
    let snapshot = sim.query::<With<Platform>>();
    let b = sim.create_entity();
    sim.attach(b, Platform::new(PlatformKind::Bounce));

    assert_eq!(snapshot, vec![a]);
    assert_eq!(sim.query::<With<Platform>>().len(), 2);
}

#[test]
fn player_entity_finds_the_marked_snake() {
    let mut sim = new_sim();
    assert!(sim.player_entity().is_none());
    let head = spawn_snake(&mut sim, Vec2::ZERO, 2, Vec2::X);
    assert_eq!(sim.player_entity(), Some(head));
}

// ---------------------------------------------------------------------------
// Chain operations
// ---------------------------------------------------------------------------

#[test]
fn grown_segment_stays_on_growth_tick_then_fills_old_tail_spot() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::new(16.0, 0.0), 3, Vec2::new(8.0, 0.0));
    let old_tail = *parts(&sim, head).last().unwrap();
    let old_tail_pos = pos(&sim, old_tail);

    let grown = sim.grow(head).unwrap();
    assert_eq!(parts(&sim, head).len(), 4);
    assert_eq!(pos(&sim, grown), old_tail_pos);
    assert_eq!(sim.get::<Bounds>(grown).unwrap().origin, old_tail_pos);

    sim.update(1.0);

    assert_eq!(pos(&sim, grown), old_tail_pos);
    assert_eq!(pos(&sim, old_tail), Vec2::new(8.0, 0.0));
    assert_eq!(pos(&sim, head), Vec2::new(24.0, 0.0));
}

#[test]
fn remove_tail_despawns_last_segment() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 3, Vec2::X);
    let before = parts(&sim, head);

    assert_eq!(sim.remove_tail(head), Some(before[2]));

    assert_eq!(parts(&sim, head), before[..2].to_vec());
    assert!(!sim.contains(before[2]));
}

#[test]
#[should_panic(expected = "below its head")]
fn remove_tail_on_head_only_chain_panics() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 1, Vec2::X);
    sim.remove_tail(head);
}

#[test]
fn increase_speed_and_teleport() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 2, Vec2::new(0.0, 10.0));

    sim.increase_speed(head);
    let velocity = sim.get::<RigidBody>(head).unwrap().velocity;
    assert!(approx_eq(velocity.y, 15.0));

    sim.teleport(head, Vec2::new(-40.0, 7.0));
    assert_eq!(pos(&sim, head), Vec2::new(-40.0, 7.0));
    assert_eq!(sim.get::<Bounds>(head).unwrap().origin, Vec2::new(-40.0, 7.0));
    assert_eq!(pos(&sim, parts(&sim, head)[1]), Vec2::new(-8.0, 0.0));
}

#[test]
fn revert_round_trip_restores_velocity() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 2, Vec2::new(3.0, -1.0));
    let chain = sim.chain_id(head).unwrap();

    assert!(sim.revert(head, chain));
    assert_eq!(sim.get::<SnakeState>(head), Some(&SnakeState::Reverting));
    sim.update(0.1);
    assert_eq!(sim.get::<SnakeState>(head), Some(&SnakeState::Moving));
    assert_eq!(sim.get::<RigidBody>(head).unwrap().velocity, Vec2::new(-3.0, 1.0));

    assert!(sim.revert(head, chain));
    sim.update(0.1);
    assert_eq!(sim.get::<RigidBody>(head).unwrap().velocity, Vec2::new(3.0, -1.0));
}

#[test]
fn double_revert_before_a_tick_counts_once() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 2, Vec2::new(3.0, 0.0));
    let chain = sim.chain_id(head).unwrap();

    assert!(sim.revert(head, chain));
    assert!(!sim.revert(head, chain));
    sim.update(0.1);

    assert_eq!(sim.get::<RigidBody>(head).unwrap().velocity, Vec2::new(-3.0, 0.0));
}

#[test]
fn revert_with_stale_chain_is_ignored() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 1, Vec2::X);
    let stale = sim.chain_id(head).unwrap();
    let fresh = sim.next_chain_id();
    sim.attach(head, SnakeChain::new(head, fresh));

    assert!(!sim.revert(head, stale));
    assert_eq!(sim.get::<SnakeState>(head), Some(&SnakeState::Moving));
}

#[test]
fn steer_keeps_speed() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 1, Vec2::new(3.0, 4.0));

    sim.steer(head, Direction::Down);

    let velocity = sim.get::<RigidBody>(head).unwrap().velocity;
    assert!(approx_eq(velocity.x, 0.0));
    assert!(approx_eq(velocity.y, -5.0));
}

// ---------------------------------------------------------------------------
// Timeouts and game over
// ---------------------------------------------------------------------------

#[test]
fn arm_timeout_replaces_screens_but_keeps_game_over() {
    let mut sim = new_sim();
    let e = sim.create_entity();
    let game_over = Timeout::new(1.0, DeferredAction::GameOver);

    assert!(sim.arm_timeout(e, Timeout::new(30.0, DeferredAction::ShowScreen(Screen::MainMenu))));
    assert!(sim.arm_timeout(e, game_over));
    assert_eq!(sim.get::<Timeout>(e), Some(&game_over));
    assert!(!sim.arm_timeout(e, Timeout::new(0.5, DeferredAction::ShowScreen(Screen::LevelSelect))));
    assert!(!sim.arm_timeout(e, Timeout::new(9.0, DeferredAction::GameOver)));
    assert_eq!(sim.get::<Timeout>(e), Some(&game_over));

    sim.update(1.0);
    assert_eq!(
        sim.drain_feedback(),
        vec![FeedbackCmd::ShowScreen {
            screen: Screen::GameOver
        }]
    );
    assert_eq!(sim.game_state(), GameStates::GameOver);
}

#[test]
fn wall_ends_the_round_even_with_a_menu_timeout_pending() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 2, Vec2::new(8.0, 0.0));
    assert!(sim.arm_timeout(head, Timeout::new(30.0, DeferredAction::ShowScreen(Screen::MainMenu))));
    let wall = sim.create_entity();
    sim.attach(wall, MapPosition::new(4.0, 0.0));
    sim.attach(wall, Bounds::new(8.0, 8.0).at(Vec2::new(4.0, 0.0)));
    sim.attach(wall, Platform::new(PlatformKind::Wall));

    let mut recorder = Recorder::default();
    for _ in 0..16 {
        sim.update(0.25);
        sim.dispatch_feedback(&mut recorder);
    }

    assert_eq!(sim.game_state(), GameStates::GameOver);
    assert_eq!(recorder.screens, vec![Screen::GameOver]);
}

#[test]
fn snake_runs_into_wall_and_game_is_over_after_delay() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 3, Vec2::new(8.0, 0.0));
    let wall = sim.create_entity();
    sim.attach(wall, MapPosition::new(12.0, 0.0));
    sim.attach(wall, Bounds::new(8.0, 8.0).at(Vec2::new(12.0, 0.0)));
    sim.attach(wall, Platform::new(PlatformKind::Wall));

    let mut recorder = Recorder::default();
    // head reaches x = 8, overlapping the wall
    sim.update(1.0);
    sim.dispatch_feedback(&mut recorder);
    assert_eq!(sim.game_state(), GameStates::Dying);
    assert!(sim.query::<With<SnakeChain>>().is_empty());
    assert!(sim.query::<With<RigidBody>>().is_empty());
    let frozen_at = pos(&sim, head);
    // the delay already runs down during the frame that armed it
    assert!(approx_eq(sim.get::<Timeout>(head).unwrap().remaining, 1.0));

    sim.update(0.5);
    assert_eq!(sim.game_state(), GameStates::Dying);
    assert_eq!(pos(&sim, head), frozen_at);
    sim.update(0.5);
    sim.update(1.0);
    sim.dispatch_feedback(&mut recorder);

    assert_eq!(sim.game_state(), GameStates::GameOver);
    assert_eq!(recorder.sounds, vec!["crash".to_string()]);
    assert_eq!(recorder.screens, vec![Screen::GameOver]);
}

#[test]
fn reset_world_clears_the_round_but_keeps_observers() {
    let mut sim = new_sim();
    let head = spawn_snake(&mut sim, Vec2::ZERO, 2, Vec2::new(8.0, 0.0));
    let wall = sim.create_entity();
    sim.attach(wall, MapPosition::new(4.0, 0.0));
    sim.attach(wall, Bounds::new(8.0, 8.0).at(Vec2::new(4.0, 0.0)));
    sim.attach(wall, Platform::new(PlatformKind::Wall));
    sim.update(0.0);
    assert_eq!(sim.game_state(), GameStates::Dying);

    sim.reset_world();

    assert_eq!(sim.game_state(), GameStates::Playing);
    assert!(!sim.contains(head));
    assert!(!sim.contains(wall));
    sim.drain_feedback();

    // observers survived: a new round still produces hit sounds
    let head = spawn_snake(&mut sim, Vec2::ZERO, 1, Vec2::new(8.0, 0.0));
    let fruit = sim.create_entity();
    sim.attach(fruit, MapPosition::new(2.0, 0.0));
    sim.attach(fruit, Bounds::new(8.0, 8.0).at(Vec2::new(2.0, 0.0)));
    sim.attach(fruit, Platform::new(PlatformKind::Fruit));
    sim.update(0.0);

    assert_eq!(parts(&sim, head).len(), 2);
    assert!(
        sim.drain_feedback()
            .contains(&FeedbackCmd::play("eat"))
    );
}

// ---------------------------------------------------------------------------
// Scene loading
// ---------------------------------------------------------------------------

#[test]
fn scene_spawns_snake_platforms_and_paired_holes() {
    let mut sim = new_sim();
    let config = GameConfig::new();
    let scene = Scene::from_json_str(
        r#"{ "objects": [
            { "name": "head", "x": 0, "y": 0, "tag": "head", "size": 2 },
            { "name": "tail", "x": -30, "y": 0, "tag": "body-piece" },
            { "name": "apple", "x": 40, "y": 0, "tag": "fruit", "visual": "apple" },
            { "name": "box", "x": 0, "y": 40, "tag": "wall", "width": 64, "height": 8 },
            { "name": "init1", "x": 80, "y": 0, "tag": "teleport-in", "pair": 1 },
            { "name": "end1", "x": 0, "y": -80, "tag": "teleport-out", "pair": 1 },
            { "name": "tree", "x": 100, "y": 100 }
        ] }"#,
    )
    .unwrap();

    let head = spawn_scene(sim.world_mut(), &scene, &config).unwrap();

    assert_eq!(sim.player_entity(), Some(head));
    let chain = parts(&sim, head);
    assert_eq!(chain.len(), 4);
    assert_eq!(pos(&sim, chain[3]), Vec2::new(-30.0, 0.0));
    let velocity = sim.get::<RigidBody>(head).unwrap().velocity;
    assert_eq!(velocity, Vec2::new(config.initial_speed, 0.0));

    let platforms = sim.query::<With<Platform>>();
    assert_eq!(platforms.len(), 3);
    let hole = platforms
        .iter()
        .copied()
        .find(|e| matches!(sim.get::<Platform>(*e).unwrap().kind, PlatformKind::Teleport { .. }))
        .unwrap();
    let PlatformKind::Teleport { exit } = sim.get::<Platform>(hole).unwrap().kind else {
        unreachable!();
    };
    assert_eq!(pos(&sim, exit), Vec2::new(0.0, -80.0));

    let wall = platforms
        .iter()
        .copied()
        .find(|e| sim.get::<Platform>(*e).unwrap().kind == PlatformKind::Wall)
        .unwrap();
    assert_eq!(sim.get::<Bounds>(wall).unwrap().size, Vec2::new(64.0, 8.0));

    sim.update(0.0);
    assert!(
        sim.drain_feedback()
            .contains(&FeedbackCmd::FollowCamera { entity: head })
    );
}

#[test]
fn scene_head_defaults_to_configured_segments() {
    let mut sim = new_sim();
    let config = GameConfig::new();
    let scene = Scene {
        objects: vec![SceneObject::new("head", 0.0, 0.0, RuleTag::Head)],
    };
    let head = spawn_scene(sim.world_mut(), &scene, &config).unwrap();
    assert_eq!(parts(&sim, head).len(), 1 + config.initial_segments as usize);
}

#[test]
fn scene_with_unpaired_hole_is_rejected() {
    let mut sim = new_sim();
    let scene = Scene {
        objects: vec![
            SceneObject::new("head", 0.0, 0.0, RuleTag::Head),
            SceneObject::new("init1", 10.0, 0.0, RuleTag::TeleportIn).with_pair(7),
        ],
    };
    let result = spawn_scene(sim.world_mut(), &scene, &GameConfig::new());
    assert!(matches!(
        result,
        Err(SceneError::UnpairedTeleport { pair: 7, .. })
    ));
    assert!(sim.query::<With<MapPosition>>().is_empty());
}

#[test]
fn full_run_eats_fruit_through_teleport() {
    let mut sim = new_sim();
    let config = GameConfig::new();
    let scene = Scene {
        objects: vec![
            SceneObject::new("head", 0.0, 0.0, RuleTag::Head).with_size(1),
            SceneObject::new("init1", 16.0, 0.0, RuleTag::TeleportIn).with_pair(1),
            SceneObject::new("end1", 0.0, 200.0, RuleTag::TeleportOut).with_pair(1),
            SceneObject::new("apple", 40.0, 200.0, RuleTag::Fruit),
        ],
    };
    let head = spawn_scene(sim.world_mut(), &scene, &config).unwrap();

    let mut recorder = Recorder::default();
    for _ in 0..60 {
        sim.update(0.1);
        sim.dispatch_feedback(&mut recorder);
    }

    assert!(pos(&sim, head).y >= 200.0);
    assert_eq!(parts(&sim, head).len(), 3);
    assert_eq!(recorder.counts, vec![("fruits".to_string(), 1)]);
    assert_eq!(recorder.followed, vec![head]);
    let count = sim.get::<FruitCount>(head).unwrap();
    assert_eq!((count.eaten, count.goal), (1, 1));
    assert!(count.is_complete());
    assert!(recorder.sounds.contains(&"eat".to_string()));
    assert!(recorder.sounds.contains(&"hit".to_string()));
}

#[test]
fn new_scene_after_game_over_plays_a_fresh_round() {
    let mut sim = new_sim();
    let config = GameConfig::new();
    let level = |y: f32| Scene {
        objects: vec![
            SceneObject::new("head", 0.0, y, RuleTag::Head).with_size(0),
            SceneObject::new("box", 12.0, y, RuleTag::Wall),
        ],
    };

    let first = spawn_scene(sim.world_mut(), &level(0.0), &config).unwrap();
    for _ in 0..4 {
        sim.update(1.0);
    }
    assert_eq!(sim.game_state(), GameStates::GameOver);
    assert!(sim.get::<SnakeChain>(first).is_none());

    let second = spawn_scene(sim.world_mut(), &level(500.0), &config).unwrap();
    assert_eq!(sim.game_state(), GameStates::Playing);
    assert!(sim.chain_id(second).is_some());

    sim.update(1.0);
    assert_eq!(sim.game_state(), GameStates::Dying);
    assert_eq!(sim.get::<SnakeState>(second), Some(&SnakeState::Stopped));
    assert!(sim.get::<Timeout>(second).is_some());
}
