//! Playing screen: drives one run and draws it

use glam::Vec2;
use rand::Rng;

use super::ScreenMode;
use crate::audio::AudioManager;
use crate::renderer::{Background, Renderer, Sprite, TextColor, TextStyle};
use crate::score::ScoreState;
use crate::sim::{
    GameEvent, RunConfig, RunPhase, RunState, TickInput, TickOutcome, advance_catch,
    advance_player, advance_projectiles,
};

const SCORE_POSITION: Vec2 = Vec2::new(30.0, 30.0);

pub struct PlayingScreen {
    run: RunState,
    /// Scratch buffer, drained into audio every tick
    events: Vec<GameEvent>,
}

impl PlayingScreen {
    /// Begin a run: reset the current score and throw the first projectiles
    pub fn start<R: Rng + ?Sized>(
        config: RunConfig,
        rng: &mut R,
        scores: &mut ScoreState,
        audio: &mut AudioManager,
    ) -> Self {
        scores.start_run();
        let mut events = Vec::new();
        let run = RunState::new(config, rng, &mut events);
        log::info!(
            "Run started: player at {:?}, {} projectile(s)",
            run.player.rect.center(),
            run.projectiles.len()
        );
        audio.play_events(&events);
        events.clear();
        Self { run, events }
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn run_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    /// One tick of play. The frame shows the player after this tick's move
    /// and the projectiles where they were before theirs.
    #[allow(clippy::too_many_arguments)]
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        input: &TickInput,
        dt: f32,
        rng: &mut R,
        scores: &mut ScoreState,
        audio: &mut AudioManager,
        renderer: &mut dyn Renderer,
    ) -> Option<ScreenMode> {
        if advance_catch(&mut self.run, dt) == TickOutcome::Finished {
            log::info!(
                "Run over with score {} after {} ticks",
                scores.last,
                self.run.time_ticks
            );
            return Some(ScreenMode::Title);
        }

        advance_player(&mut self.run, scores, input, dt, rng, &mut self.events);
        self.draw(renderer, scores);
        advance_projectiles(&mut self.run, scores, rng, &mut self.events);

        if matches!(self.run.phase, RunPhase::ShowingCaught { .. }) {
            renderer.draw_text(
                "You were caught!",
                self.run.arena.center(),
                TextStyle::new(60.0, TextColor::White).bold(),
            );
        }

        audio.play_events(&self.events);
        self.events.clear();
        None
    }

    fn draw(&self, renderer: &mut dyn Renderer, scores: &ScoreState) {
        renderer.clear(Background::Arena);
        let run = &self.run;
        renderer.draw(Sprite::player(run.player.pose), run.player.rect);
        renderer.draw(Sprite::Collectible(run.collectible.kind), run.collectible.rect);
        for projectile in &run.projectiles {
            renderer.draw(Sprite::Projectile(projectile.kind), projectile.rect);
        }
        renderer.draw_text(
            &scores.current.to_string(),
            SCORE_POSITION,
            TextStyle::new(40.0, TextColor::Black).bold(),
        );
    }
}
