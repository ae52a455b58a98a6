//! Playing-state simulation tick
//!
//! One tick of a run is split into phases so the playing screen can draw
//! between them:
//! 1. [`advance_catch`]: count down the post-catch delays
//! 2. [`advance_player`]: difficulty ramp, player movement, collect check
//! 3. (screen draws the player, collectible, projectiles and score)
//! 4. [`advance_projectiles`]: projectile travel/reset, catch check
//!
//! [`tick`] runs the phases back to back for headless use.

use glam::Vec2;
use rand::Rng;

use super::collision::{first_overlap, overlaps};
use super::spawn;
use super::state::{Direction, GameEvent, PlayerPose, RunPhase, RunState};
use crate::score::ScoreState;

/// Input sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Held movement keys, indexed by [`Direction::index`]
    pub held: [bool; 4],
    /// Primary button went up this tick
    pub click_released: bool,
    /// Pointer position in arena coordinates
    pub mouse: Vec2,
    /// OS-level quit request
    pub quit: bool,
}

impl TickInput {
    #[inline]
    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    /// Input with the given directions held and nothing else
    pub fn holding(dirs: &[Direction]) -> Self {
        let mut input = Self::default();
        for dir in dirs {
            input.held[dir.index()] = true;
        }
        input
    }

    /// A primary click released at `pos`
    pub fn click_at(pos: Vec2) -> Self {
        Self {
            click_released: true,
            mouse: pos,
            ..Default::default()
        }
    }
}

/// Whether the run wants to keep the playing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Catch sequence complete; go back to the title
    Finished,
}

/// Count down the catch delays
///
/// Nothing else in the run changes while a catch is being shown.
pub fn advance_catch(state: &mut RunState, dt: f32) -> TickOutcome {
    match state.phase {
        RunPhase::Running => TickOutcome::Continue,
        RunPhase::AwaitingCatchAck { remaining } => {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                state.player.pose = PlayerPose::Caught;
                state.phase = RunPhase::ShowingCaught {
                    remaining: state.config.catch_hold_secs,
                };
            } else {
                state.phase = RunPhase::AwaitingCatchAck { remaining };
            }
            TickOutcome::Continue
        }
        RunPhase::ShowingCaught { remaining } => {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                state.phase = RunPhase::Over;
                TickOutcome::Finished
            } else {
                state.phase = RunPhase::ShowingCaught { remaining };
                TickOutcome::Continue
            }
        }
        RunPhase::Over => TickOutcome::Finished,
    }
}

/// Ramp, player movement and the collect check
pub fn advance_player<R: Rng + ?Sized>(
    state: &mut RunState,
    scores: &mut ScoreState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    let boost = state.ramp.advance(dt);
    if boost > 0.0 {
        state.projectile_speed += boost;
        events.push(GameEvent::SpeedUp);
    }

    state
        .player
        .step(&input.held, &state.arena, state.config.walk_cooldown);

    if overlaps(&state.player.rect, &state.collectible.rect) {
        let score = scores.collect();
        state.collectible =
            spawn::spawn_collectible(rng, state.config.arena_width, state.config.arena_height);
        log::debug!("Collected, score now {score}");
        events.push(GameEvent::Collected { score });
    }
}

/// Projectile travel, re-throws and the catch check
pub fn advance_projectiles<R: Rng + ?Sized>(
    state: &mut RunState,
    scores: &mut ScoreState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if !state.is_running() {
        return;
    }

    let speed = state.projectile_speed;
    for (i, projectile) in state.projectiles.iter_mut().enumerate() {
        projectile.advance(speed);
        if projectile.has_exited(&state.arena) {
            projectile.reset(rng, &state.arena);
            log::debug!("Projectile {i} re-thrown from {:?}", projectile.origin);
            events.push(GameEvent::Thrown { projectile: i });
        }
    }

    // One catch per tick: the first overlapping projectile ends the run
    let rects = state.projectiles.iter().map(|p| &p.rect);
    if let Some(projectile) = first_overlap(&state.player.rect, rects) {
        let score = scores.current;
        scores.finish_run();
        state.phase = RunPhase::AwaitingCatchAck {
            remaining: state.config.catch_register_secs,
        };
        log::debug!("Caught by projectile {projectile} with score {score}");
        events.push(GameEvent::Caught { projectile, score });
    }
}

/// Run every phase of a tick in order
pub fn tick<R: Rng + ?Sized>(
    state: &mut RunState,
    scores: &mut ScoreState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> TickOutcome {
    if advance_catch(state, dt) == TickOutcome::Finished {
        return TickOutcome::Finished;
    }
    advance_player(state, scores, input, dt, rng, events);
    advance_projectiles(state, scores, rng, events);
    TickOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Edge, Projectile, ProjectileKind, RunConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 64.0;

    fn new_run(seed: u64) -> (RunState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut events = Vec::new();
        let state = RunState::new(RunConfig::default(), &mut rng, &mut events);
        (state, rng)
    }

    /// Park the projectile on a corner where it can't reach the player soon
    fn park_projectile(state: &mut RunState) {
        state.projectiles[0] = Projectile {
            kind: ProjectileKind::Classic,
            origin: Edge::Top,
            rect: Rect::from_center(Vec2::new(32.0, 0.0), Vec2::splat(ITEM_SIZE)),
        };
    }

    #[test]
    fn test_new_run_throws_initial_projectile() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        let state = RunState::new(RunConfig::default(), &mut rng, &mut events);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(events, vec![GameEvent::Thrown { projectile: 0 }]);
        assert_eq!(state.projectile_speed, INITIAL_PROJECTILE_SPEED);
        assert!(state.is_running());
    }

    #[test]
    fn test_collect_at_center() {
        let (mut state, mut rng) = new_run(9);
        let mut scores = ScoreState::default();
        scores.start_run();
        let center = Vec2::new(400.0, 400.0);
        state.player.rect.set_center(center);
        state.collectible.rect.set_center(center);
        park_projectile(&mut state);
        let eaten = state.collectible.clone();

        let mut events = Vec::new();
        let outcome = tick(&mut state, &mut scores, &TickInput::default(), DT, &mut rng, &mut events);

        assert_eq!(outcome, TickOutcome::Continue);
        assert_eq!(scores.current, 1);
        assert!(events.contains(&GameEvent::Collected { score: 1 }));
        assert_ne!(state.collectible.rect, eaten.rect);
    }

    #[test]
    fn test_catch_sequence_returns_to_title() {
        let (mut state, mut rng) = new_run(21);
        let mut scores = ScoreState::default();
        scores.high = 10;
        scores.start_run();
        scores.current = 4;
        // Projectile heading down, right on top of the player
        let center = state.player.rect.center();
        state.projectiles[0] = Projectile {
            kind: ProjectileKind::Net,
            origin: Edge::Top,
            rect: Rect::from_center(center - Vec2::new(0.0, 20.0), Vec2::splat(ITEM_SIZE)),
        };
        state.collectible.rect.set_center(Vec2::new(-500.0, -500.0));

        let mut events = Vec::new();
        tick(&mut state, &mut scores, &TickInput::default(), DT, &mut rng, &mut events);
        assert!(events.contains(&GameEvent::Caught { projectile: 0, score: 4 }));
        assert_eq!(scores.last, 4);
        assert_eq!(scores.high, 10);
        assert!(matches!(state.phase, RunPhase::AwaitingCatchAck { .. }));

        // Frozen: input does not move the player during the delays
        let frozen = state.player.rect;
        let input = TickInput::holding(&[Direction::Left]);
        let mut ticks = 0;
        let mut saw_caught_pose = false;
        loop {
            ticks += 1;
            let outcome = tick(&mut state, &mut scores, &input, DT, &mut rng, &mut events);
            saw_caught_pose |= state.player.pose == PlayerPose::Caught;
            assert_eq!(state.player.rect, frozen);
            if outcome == TickOutcome::Finished {
                break;
            }
            assert!(ticks < 64 * 10, "catch sequence never finished");
        }
        assert!(saw_caught_pose);
        // 1s + 3s at 64 ticks per second
        assert_eq!(ticks, 64 * 4);
        assert_eq!(state.phase, RunPhase::Over);
    }

    #[test]
    fn test_catch_updates_high_score() {
        let (mut state, mut rng) = new_run(22);
        let mut scores = ScoreState::default();
        scores.high = 2;
        scores.start_run();
        scores.current = 5;
        let center = state.player.rect.center();
        state.projectiles[0].rect.set_center(center);
        state.collectible.rect.set_center(Vec2::new(-500.0, -500.0));

        let mut events = Vec::new();
        tick(&mut state, &mut scores, &TickInput::default(), DT, &mut rng, &mut events);
        assert_eq!(scores.last, 5);
        assert_eq!(scores.high, 5);
    }

    #[test]
    fn test_only_one_catch_per_tick() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut events = Vec::new();
        let config = RunConfig {
            projectile_count: 3,
            ..Default::default()
        };
        let mut state = RunState::new(config, &mut rng, &mut events);
        let center = state.player.rect.center();
        for p in &mut state.projectiles {
            p.rect.set_center(center);
        }
        state.collectible.rect.set_center(Vec2::new(-500.0, -500.0));
        let mut scores = ScoreState::default();

        events.clear();
        advance_projectiles(&mut state, &mut scores, &mut rng, &mut events);
        let catches = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Caught { .. }))
            .count();
        assert_eq!(catches, 1);
        assert!(events.contains(&GameEvent::Caught { projectile: 0, score: 0 }));
    }

    #[test]
    fn test_speed_ramps_with_time() {
        let (mut state, mut rng) = new_run(5);
        let mut scores = ScoreState::default();
        let mut events = Vec::new();
        // Keep the run alive: player and collectible far from anything
        for _ in 0..64 * 6 {
            park_projectile(&mut state);
            state.player.rect.set_center(Vec2::new(600.0, 600.0));
            advance_player(&mut state, &mut scores, &TickInput::default(), DT, &mut rng, &mut events);
        }
        assert_eq!(state.projectile_speed, INITIAL_PROJECTILE_SPEED + 0.5 * 6.0);
        let speedups = events.iter().filter(|e| **e == GameEvent::SpeedUp).count();
        assert_eq!(speedups, 6);
        assert_eq!(state.time_ticks, 64 * 6);
    }

    #[test]
    fn test_ramp_paused_during_catch() {
        let (mut state, mut rng) = new_run(6);
        let mut scores = ScoreState::default();
        state.phase = RunPhase::AwaitingCatchAck { remaining: 1.0 };
        let speed = state.projectile_speed;
        let mut events = Vec::new();
        for _ in 0..64 * 3 {
            advance_player(&mut state, &mut scores, &TickInput::default(), DT, &mut rng, &mut events);
        }
        assert_eq!(state.projectile_speed, speed);
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_reset_projectile_exits_on_far_side() {
        let (mut state, mut rng) = new_run(77);
        let mut scores = ScoreState::default();
        state.player.rect.set_center(Vec2::new(-1000.0, -1000.0));
        state.collectible.rect.set_center(Vec2::new(-2000.0, -2000.0));

        for _ in 0..50 {
            state.projectiles[0].reset(&mut rng, &state.arena);
            let origin = state.projectiles[0].origin;
            let start = state.projectiles[0].rect.center();
            let mut exited = false;
            for _ in 0..1000 {
                let mut events = Vec::new();
                advance_projectiles(&mut state, &mut scores, &mut rng, &mut events);
                if events.contains(&GameEvent::Thrown { projectile: 0 }) {
                    exited = true;
                    break;
                }
                // Still travelling straight along the axis it started on
                let c = state.projectiles[0].rect.center();
                match origin {
                    Edge::Top | Edge::Bottom => assert_eq!(c.x, start.x),
                    Edge::Left | Edge::Right => assert_eq!(c.y, start.y),
                }
            }
            assert!(exited, "projectile from {origin:?} never left the arena");
        }
    }

    #[test]
    fn test_determinism() {
        let (mut a, mut rng_a) = new_run(99999);
        let (mut b, mut rng_b) = new_run(99999);
        let mut scores_a = ScoreState::default();
        let mut scores_b = ScoreState::default();
        let inputs = [
            TickInput::holding(&[Direction::Up]),
            TickInput::holding(&[Direction::Left, Direction::Down]),
            TickInput::default(),
            TickInput::holding(&[Direction::Right]),
        ];
        let mut events_a = Vec::new();
        let mut events_b = Vec::new();
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, &mut scores_a, input, DT, &mut rng_a, &mut events_a);
            tick(&mut b, &mut scores_b, input, DT, &mut rng_b, &mut events_b);
        }
        assert_eq!(a.player.rect, b.player.rect);
        assert_eq!(a.projectiles, b.projectiles);
        assert_eq!(events_a, events_b);
        assert_eq!(scores_a, scores_b);
    }
}
