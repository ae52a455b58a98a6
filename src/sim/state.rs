//! Game state and core simulation types
//!
//! Everything a single run needs lives in [`RunState`]. Process-lifetime data
//! (scores) is kept outside in [`crate::ScoreState`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ramp::DifficultyRamp;
use super::rect::Rect;
use super::spawn;
use crate::consts::*;
use crate::settings::Settings;

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Evaluation order for movement input. A later direction wins `facing`
    /// when several move in the same tick.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Stable index for fixed-size per-direction tables
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Unit step in screen space (y grows down)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Which sprite the player shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPose {
    /// Standing still
    Idle,
    /// Walking, showing `frame` of the cycle for `facing`
    Walk { facing: Direction, frame: u8 },
    /// Caught at the end of a run
    Caught,
}

/// The player-controlled critter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Pixels per tick along each held axis
    pub velocity: f32,
    /// Last direction actually moved in
    pub facing: Option<Direction>,
    pub pose: PlayerPose,
    /// Ticks with movement since the animation last advanced
    pub step_counter: u32,
    /// Current walk frame (0-based)
    pub anim_frame: u8,
}

impl Player {
    pub fn new(center: Vec2, velocity: f32) -> Self {
        Self {
            rect: Rect::from_center(center, Vec2::splat(PLAYER_SIZE)),
            velocity,
            facing: None,
            pose: PlayerPose::Idle,
            step_counter: 0,
            anim_frame: 0,
        }
    }

    /// Apply one tick of held directions, staying inside `arena`
    ///
    /// Each held direction is honoured on its own, so diagonals work. A move
    /// that would push the sprite past a wall is skipped. Returns whether the
    /// player moved at all.
    pub fn step(&mut self, held: &[bool; 4], arena: &Rect, walk_cooldown: u32) -> bool {
        let mut moved = false;
        for dir in Direction::ALL {
            if !held[dir.index()] {
                continue;
            }
            let next = self.rect.translated(dir.unit() * self.velocity);
            if next.is_within(arena) {
                self.rect = next;
                self.facing = Some(dir);
                moved = true;
            }
        }

        if !held.iter().any(|&h| h) {
            self.step_counter = 0;
            self.anim_frame = 0;
            self.pose = PlayerPose::Idle;
            return false;
        }

        if moved {
            self.step_counter += 1;
        }

        if self.step_counter > walk_cooldown {
            self.step_counter = 0;
            self.anim_frame = (self.anim_frame + 1) % WALK_FRAMES;
            if let Some(facing) = self.facing {
                self.pose = PlayerPose::Walk {
                    facing,
                    frame: self.anim_frame,
                };
            }
        }

        moved
    }
}

/// Collectible appearance catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Red,
    Blue,
    Pink,
    White,
    Yellow,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 5] = [
        CollectibleKind::Red,
        CollectibleKind::Blue,
        CollectibleKind::Pink,
        CollectibleKind::White,
        CollectibleKind::Yellow,
    ];
}

/// A berry waiting to be eaten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub rect: Rect,
}

/// Projectile appearance catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Classic,
    Great,
    Ultra,
    Quick,
    Timer,
    Love,
    Master,
    Net,
    Premier,
    Moon,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 10] = [
        ProjectileKind::Classic,
        ProjectileKind::Great,
        ProjectileKind::Ultra,
        ProjectileKind::Quick,
        ProjectileKind::Timer,
        ProjectileKind::Love,
        ProjectileKind::Master,
        ProjectileKind::Net,
        ProjectileKind::Premier,
        ProjectileKind::Moon,
    ];
}

/// Arena edge a projectile is thrown from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Unit travel direction: straight across the arena, away from this edge
    pub fn heading(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(0.0, 1.0),
            Edge::Right => Vec2::new(-1.0, 0.0),
            Edge::Bottom => Vec2::new(0.0, -1.0),
            Edge::Left => Vec2::new(1.0, 0.0),
        }
    }
}

/// A thrown ball crossing the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub origin: Edge,
    pub rect: Rect,
}

impl Projectile {
    /// Move along the fixed heading at the shared speed
    pub fn advance(&mut self, speed: f32) {
        self.rect.translate(self.origin.heading() * speed);
    }

    /// Whether the sprite has fully left the arena on the side opposite its origin
    pub fn has_exited(&self, arena: &Rect) -> bool {
        match self.origin {
            Edge::Top => self.rect.top() > arena.bottom(),
            Edge::Right => self.rect.right() < arena.left(),
            Edge::Bottom => self.rect.bottom() < arena.top(),
            Edge::Left => self.rect.left() > arena.right(),
        }
    }

    /// Re-throw: new appearance, new origin edge, new position
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, arena: &Rect) {
        *self = spawn::spawn_projectile(rng, arena.size.x, arena.size.y);
    }
}

/// Something the run wants the outside world to know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile was (re)thrown
    Thrown { projectile: usize },
    /// The player ate the collectible; `score` is the new run score
    Collected { score: u32 },
    /// A projectile caught the player; the run is over
    Caught { projectile: usize, score: u32 },
    /// The difficulty ramp fired
    SpeedUp,
}

/// Where a run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Normal play
    Running,
    /// Frozen right after the catch so it registers visually
    AwaitingCatchAck { remaining: f32 },
    /// Caught pose and banner on screen
    ShowingCaught { remaining: f32 },
    /// Done; the screen should go back to the title
    Over,
}

/// Per-run tuning, normally derived from [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub player_velocity: f32,
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub ramp_interval: f32,
    pub walk_cooldown: u32,
    pub projectile_count: usize,
    pub catch_register_secs: f32,
    pub catch_hold_secs: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_velocity: PLAYER_VELOCITY,
            initial_speed: INITIAL_PROJECTILE_SPEED,
            speed_increment: SPEED_INCREMENT,
            ramp_interval: RAMP_INTERVAL_SECS,
            walk_cooldown: WALK_COOLDOWN_TICKS,
            projectile_count: PROJECTILE_COUNT,
            catch_register_secs: CATCH_REGISTER_SECS,
            catch_hold_secs: CATCH_HOLD_SECS,
        }
    }
}

impl From<&Settings> for RunConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            arena_width: settings.arena_width,
            arena_height: settings.arena_height,
            player_velocity: settings.player_velocity,
            initial_speed: settings.initial_projectile_speed,
            speed_increment: settings.speed_increment,
            ramp_interval: settings.ramp_interval_secs,
            walk_cooldown: settings.walk_cooldown_ticks,
            projectile_count: settings.projectile_count,
            catch_register_secs: settings.catch_register_secs,
            catch_hold_secs: settings.catch_hold_secs,
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub config: RunConfig,
    pub arena: Rect,
    pub player: Player,
    /// Exactly one collectible is in play at a time
    pub collectible: Collectible,
    /// Never empty; projectiles are reset, not removed
    pub projectiles: Vec<Projectile>,
    /// Shared speed of every projectile (pixels per tick)
    pub projectile_speed: f32,
    pub ramp: DifficultyRamp,
    pub phase: RunPhase,
    /// Simulation ticks elapsed in this run
    pub time_ticks: u64,
}

impl RunState {
    /// Start a fresh run; initial throws are reported through `events`
    pub fn new<R: Rng + ?Sized>(
        config: RunConfig,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Self {
        let arena = Rect::new(0.0, 0.0, config.arena_width, config.arena_height);
        let player = spawn::spawn_player(rng, &arena, config.player_velocity);
        let collectible = spawn::spawn_collectible(rng, config.arena_width, config.arena_height);

        let count = if config.projectile_count == 0 {
            log::warn!("projectile_count is 0; running with 1 projectile");
            1
        } else {
            config.projectile_count
        };
        let projectiles = (0..count)
            .map(|i| {
                events.push(GameEvent::Thrown { projectile: i });
                spawn::spawn_projectile(rng, config.arena_width, config.arena_height)
            })
            .collect();

        Self {
            config,
            arena,
            player,
            collectible,
            projectiles,
            projectile_speed: config.initial_speed,
            ramp: DifficultyRamp::new(config.ramp_interval, config.speed_increment),
            phase: RunPhase::Running,
            time_ticks: 0,
        }
    }

    /// Whether normal play is happening (not frozen on a catch)
    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }
}
