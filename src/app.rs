//! Screen state machine and frame loop
//!
//! `App` owns every collaborator and the cross-run state (scores, RNG). Each
//! frame it polls input, lets the active screen update and draw, then shows
//! the frame and waits for the next tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::audio::{AudioManager, SoundEffect};
use crate::platform::{Clock, InputError, InputSource};
use crate::renderer::{RenderError, Renderer};
use crate::score::ScoreState;
use crate::settings::Settings;
use crate::sim::RunConfig;
use crate::ui::{HowToScreen, PlayingScreen, ScreenMode, TitleScreen};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

enum Screen {
    Title(TitleScreen),
    HowTo(HowToScreen),
    Playing(Box<PlayingScreen>),
}

pub struct App<R: Renderer, I: InputSource, C: Clock> {
    settings: Settings,
    run_config: RunConfig,
    arena: Vec2,
    renderer: R,
    input: I,
    clock: C,
    audio: AudioManager,
    rng: Pcg32,
    seed: u64,
    scores: ScoreState,
    screen: Screen,
    mode: ScreenMode,
}

impl<R: Renderer, I: InputSource, C: Clock> App<R, I, C> {
    /// Set up on the title screen and start the music
    pub fn new(settings: Settings, renderer: R, input: I, clock: C, mut audio: AudioManager) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Game initialized with seed: {seed}");

        let arena = Vec2::new(settings.arena_width, settings.arena_height);
        audio.play(SoundEffect::Music);

        Self {
            run_config: RunConfig::from(&settings),
            settings,
            arena,
            renderer,
            input,
            clock,
            audio,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            scores: ScoreState::new(),
            screen: Screen::Title(TitleScreen::new(arena)),
            mode: ScreenMode::Title,
        }
    }

    /// Run frames until the player quits
    pub fn run(&mut self) -> Result<(), AppError> {
        while self.frame()? == FrameOutcome::Continue {}
        log::info!(
            "Exiting; last score {}, high score {}",
            self.scores.last,
            self.scores.high
        );
        Ok(())
    }

    /// One pass of the loop: input, update, draw, present, pace
    pub fn frame(&mut self) -> Result<FrameOutcome, AppError> {
        self.input.poll()?;
        let dt = self.clock.elapsed_since_last_tick().as_secs_f32();
        let input = self.input.snapshot();

        if input.quit {
            log::info!("Quit requested");
            self.mode = ScreenMode::Quit;
            return Ok(FrameOutcome::Quit);
        }

        let next = match &mut self.screen {
            Screen::Title(title) => {
                let next = title.update(&input, &mut self.audio);
                if next.is_none() {
                    title.draw(&mut self.renderer, &self.scores);
                }
                next
            }
            Screen::HowTo(howto) => {
                let next = howto.update(&input, &mut self.audio);
                if next.is_none() {
                    howto.draw(&mut self.renderer);
                }
                next
            }
            Screen::Playing(playing) => playing.update(
                &input,
                dt,
                &mut self.rng,
                &mut self.scores,
                &mut self.audio,
                &mut self.renderer,
            ),
        };

        match next {
            Some(ScreenMode::Quit) => {
                self.transition(ScreenMode::Quit);
                return Ok(FrameOutcome::Quit);
            }
            // The new screen draws its first frame on the next tick
            Some(mode) => self.transition(mode),
            None => self.renderer.present()?,
        }

        self.clock.sleep_until_next_tick(self.settings.target_fps);
        Ok(FrameOutcome::Continue)
    }

    fn transition(&mut self, mode: ScreenMode) {
        log::info!("Screen {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        match mode {
            ScreenMode::Title => self.screen = Screen::Title(TitleScreen::new(self.arena)),
            ScreenMode::HowTo => self.screen = Screen::HowTo(HowToScreen::new(self.arena)),
            ScreenMode::NewGame => {
                let playing = PlayingScreen::start(
                    self.run_config,
                    &mut self.rng,
                    &mut self.scores,
                    &mut self.audio,
                );
                self.screen = Screen::Playing(Box::new(playing));
            }
            ScreenMode::Quit => {}
        }
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreState {
        &self.scores
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn title(&self) -> Option<&TitleScreen> {
        match &self.screen {
            Screen::Title(title) => Some(title),
            _ => None,
        }
    }

    pub fn howto(&self) -> Option<&HowToScreen> {
        match &self.screen {
            Screen::HowTo(howto) => Some(howto),
            _ => None,
        }
    }

    pub fn playing(&self) -> Option<&PlayingScreen> {
        match &self.screen {
            Screen::Playing(playing) => Some(playing),
            _ => None,
        }
    }

    pub fn playing_mut(&mut self) -> Option<&mut PlayingScreen> {
        match &mut self.screen {
            Screen::Playing(playing) => Some(playing),
            _ => None,
        }
    }
}
