//! Scene loading: turns a level description into entities.
//!
//! A [`Scene`] is a flat list of [`SceneObject`]s read from JSON. Each object
//! carries a position, a size, an optional visual handle for the renderer and
//! a [`RuleTag`] that decides which components it gets:
//!
//! | tag | components |
//! |---|---|
//! | `fruit`, `poison`, `speed` | consumable [`Platform`] with a [`Spin`] |
//! | `wall`, `bounce` | solid [`Platform`] |
//! | `teleport-in` | [`PlatformKind::Teleport`] pointing at the `teleport-out` with the same `pair` |
//! | `teleport-out` | exit marker, not a platform itself |
//! | `head` | the player snake, with `size` generated body pieces and a `goal` of fruits (defaults to the fruits in the scene) |
//! | `body-piece` | appended to the head's chain after the generated pieces |
//! | `none` | scenery, position only |
//!
//! The whole scene is validated before anything is spawned, so a bad file
//! leaves the world untouched. Spawning starts a new round: the
//! [`GameState`] goes back to `Playing`.
//!
//! # Example
//!
//! ```json
//! { "objects": [
//!   { "name": "head",  "x": 8,  "y": 8, "tag": "head", "size": 2 },
//!   { "name": "apple", "x": 40, "y": 8, "tag": "fruit", "visual": "apple" },
//!   { "name": "init1", "x": 80, "y": 8, "tag": "teleport-in", "pair": 1 },
//!   { "name": "end1",  "x": 8,  "y": 80, "tag": "teleport-out", "pair": 1 }
//! ] }
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::bounds::Bounds;
use crate::components::mapposition::MapPosition;
use crate::components::platform::{Platform, PlatformKind};
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::snake::{FruitCount, Player, Segment, SnakeChain, SnakeState};
use crate::components::spin::Spin;
use crate::components::zindex::ZIndex;
use crate::events::feedback::FeedbackCmd;
use crate::resources::chainids::ChainIds;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::systems::snake::SEGMENT_SPIN;

const FRUIT_SPIN: f32 = -5.0;
const POISON_SPIN: f32 = 5.0;
const SPEED_SPIN: f32 = 3.0;
const HOLE_SPIN: f32 = 25.0;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene has no head object")]
    MissingHead,
    #[error("scene has more than one head ({first} and {second})")]
    DuplicateHead { first: String, second: String },
    #[error("teleport `{name}` has no pair id")]
    MissingPair { name: String },
    #[error("teleport `{name}` has no exit with pair id {pair}")]
    UnpairedTeleport { name: String, pair: u32 },
    #[error("pair id {pair} has more than one exit")]
    DuplicateExit { pair: u32 },
    #[error("invalid scene json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Semantic role of a scene object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleTag {
    Fruit,
    Poison,
    Speed,
    Wall,
    Bounce,
    TeleportIn,
    TeleportOut,
    Head,
    BodyPiece,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneObject {
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// Falls back to the configured segment size.
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    /// Opaque handle for the renderer.
    #[serde(default)]
    pub visual: Option<String>,
    #[serde(default)]
    pub tag: RuleTag,
    /// Links a `teleport-in` to its `teleport-out`.
    #[serde(default)]
    pub pair: Option<u32>,
    /// Generated body pieces for the head.
    #[serde(default)]
    pub size: Option<u32>,
    /// Fruits the head has to eat to finish the level.
    #[serde(default)]
    pub goal: Option<u32>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, x: f32, y: f32, tag: RuleTag) -> Self {
        SceneObject {
            name: name.into(),
            x,
            y,
            width: None,
            height: None,
            visual: None,
            tag,
            pair: None,
            size: None,
            goal: None,
        }
    }

    pub fn with_pair(mut self, pair: u32) -> Self {
        self.pair = Some(pair);
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_goal(mut self, goal: u32) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_extent(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn bounds(&self, config: &GameConfig) -> Bounds {
        Bounds::new(
            self.width.unwrap_or(config.segment_width),
            self.height.unwrap_or(config.segment_height),
        )
        .at(self.position())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn from_json_str(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_json_str(&text)?;
        info!("Loaded scene {:?} with {} objects", path, scene.objects.len());
        Ok(scene)
    }

    /// The single head object, and each pair id mapped to its exit index.
    fn validate(&self) -> Result<(usize, FxHashMap<u32, usize>), SceneError> {
        let mut head: Option<usize> = None;
        let mut exits: FxHashMap<u32, usize> = FxHashMap::default();
        for (index, object) in self.objects.iter().enumerate() {
            match object.tag {
                RuleTag::Head => {
                    if let Some(first) = head {
                        return Err(SceneError::DuplicateHead {
                            first: self.objects[first].name.clone(),
                            second: object.name.clone(),
                        });
                    }
                    head = Some(index);
                }
                RuleTag::TeleportOut => {
                    let pair = object.pair.ok_or_else(|| SceneError::MissingPair {
                        name: object.name.clone(),
                    })?;
                    if exits.insert(pair, index).is_some() {
                        return Err(SceneError::DuplicateExit { pair });
                    }
                }
                _ => {}
            }
        }
        for object in self.objects.iter().filter(|o| o.tag == RuleTag::TeleportIn) {
            let pair = object.pair.ok_or_else(|| SceneError::MissingPair {
                name: object.name.clone(),
            })?;
            if !exits.contains_key(&pair) {
                return Err(SceneError::UnpairedTeleport {
                    name: object.name.clone(),
                    pair,
                });
            }
        }
        let head = head.ok_or(SceneError::MissingHead)?;
        Ok((head, exits))
    }

    pub fn fruit_count(&self) -> u32 {
        self.objects.iter().filter(|o| o.tag == RuleTag::Fruit).count() as u32
    }
}

/// Spawn every object of `scene` into `world`. Returns the player head.
///
/// A camera follow command for the head is written to the
/// `Messages<FeedbackCmd>` mailbox when the world has one, and the
/// [`GameState`] is set back to `Playing` when the world has one.
pub fn spawn_scene(world: &mut World, scene: &Scene, config: &GameConfig) -> Result<Entity, SceneError> {
    let (head_index, exit_indices) = scene.validate()?;

    // Exits first so that holes can point at them
    let mut exits: FxHashMap<u32, Entity> = FxHashMap::default();
    for (pair, index) in &exit_indices {
        let object = &scene.objects[*index];
        let exit = world
            .spawn((
                MapPosition::from_vec(object.position()),
                object.bounds(config),
                Rotation::default(),
                Spin::new(HOLE_SPIN),
                ZIndex::HOLE,
            ))
            .id();
        exits.insert(*pair, exit);
    }

    let mut body_pieces = Vec::new();
    for object in &scene.objects {
        let position = MapPosition::from_vec(object.position());
        let bounds = object.bounds(config);
        match object.tag {
            RuleTag::Fruit => {
                spawn_platform(world, position, bounds, PlatformKind::Fruit, Some(FRUIT_SPIN));
            }
            RuleTag::Poison => {
                spawn_platform(world, position, bounds, PlatformKind::Poison, Some(POISON_SPIN));
            }
            RuleTag::Speed => {
                spawn_platform(world, position, bounds, PlatformKind::Speed, Some(SPEED_SPIN));
            }
            RuleTag::Wall => {
                spawn_platform(world, position, bounds, PlatformKind::Wall, None);
            }
            RuleTag::Bounce => {
                spawn_platform(world, position, bounds, PlatformKind::Bounce, None);
            }
            RuleTag::TeleportIn => {
                // validate() guarantees the pair and its exit
                let Some(exit) = object.pair.and_then(|pair| exits.get(&pair)).copied() else {
                    continue;
                };
                let hole =
                    spawn_platform(world, position, bounds, PlatformKind::Teleport { exit }, Some(HOLE_SPIN));
                world.entity_mut(hole).insert(ZIndex::HOLE);
            }
            RuleTag::BodyPiece => {
                body_pieces.push(spawn_piece(world, object.position(), config));
            }
            RuleTag::None => {
                world.spawn((position, bounds, Rotation::default()));
            }
            RuleTag::TeleportOut | RuleTag::Head => {}
        }
    }

    let head_object = &scene.objects[head_index];
    let origin = head_object.position();
    let size = head_object.size.unwrap_or(config.initial_segments);
    let goal = head_object.goal.unwrap_or_else(|| scene.fruit_count());
    let head = world
        .spawn((
            MapPosition::from_vec(origin),
            head_object.bounds(config),
            RigidBody::with_velocity(Vec2::new(config.initial_speed, 0.0)),
            SnakeState::default(),
            FruitCount::new(goal),
            Player,
            Rotation::default(),
            ZIndex::HEAD,
        ))
        .id();
    let mut segments: Vec<Entity> = (0..size).map(|_| spawn_piece(world, origin, config)).collect();
    segments.extend(body_pieces);
    let id = world.get_resource_or_insert_with(ChainIds::default).issue();
    let chain = SnakeChain::with_segments(head, id, segments);
    info!(
        "Spawned snake {:?} with {} parts at ({}, {})",
        head,
        chain.len(),
        origin.x,
        origin.y
    );
    world.entity_mut(head).insert(chain);

    if let Some(mut state) = world.get_resource_mut::<GameState>() {
        state.set(GameStates::Playing);
    }
    if let Some(mut feedback) = world.get_resource_mut::<Messages<FeedbackCmd>>() {
        feedback.write(FeedbackCmd::FollowCamera { entity: head });
    }
    debug!("Scene spawned: {} objects", scene.objects.len());
    Ok(head)
}

fn spawn_platform(
    world: &mut World,
    position: MapPosition,
    bounds: Bounds,
    kind: PlatformKind,
    spin: Option<f32>,
) -> Entity {
    let mut entity = world.spawn((position, bounds, Platform::new(kind), Rotation::default()));
    if let Some(degrees_per_second) = spin {
        entity.insert(Spin::new(degrees_per_second));
    }
    entity.id()
}

fn spawn_piece(world: &mut World, position: Vec2, config: &GameConfig) -> Entity {
    world
        .spawn((
            Segment,
            MapPosition::from_vec(position),
            Bounds::new(config.segment_width, config.segment_height).at(position),
            Rotation::default(),
            Spin::new(SEGMENT_SPIN),
            ZIndex::PIECE,
        ))
        .id()
}
