//! Sound effect triggers
//!
//! The game only fires effects and never waits on them. Playback itself is
//! delegated to an [`AudioSink`]; the manager applies the volume mix.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// A menu button was activated
    Select,
    /// A projectile was thrown
    Throw,
    /// The player ate a collectible
    Eat,
    /// The player was caught
    Catch,
    /// Looping background music
    Music,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Select => "select",
            SoundEffect::Throw => "throw",
            SoundEffect::Eat => "eat",
            SoundEffect::Catch => "catch",
            SoundEffect::Music => "music",
        }
    }

    /// Mix level of the raw asset before master/sfx/music scaling
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Select => 0.1,
            SoundEffect::Throw => 0.05,
            SoundEffect::Eat => 0.2,
            SoundEffect::Catch => 0.1,
            SoundEffect::Music => 0.05,
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::Music)
    }

    /// Sound that accompanies a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Thrown { .. } => Some(SoundEffect::Throw),
            GameEvent::Collected { .. } => Some(SoundEffect::Eat),
            GameEvent::Caught { .. } => Some(SoundEffect::Catch),
            GameEvent::SpeedUp => None,
        }
    }
}

/// Playback back-end
pub trait AudioSink {
    /// Start playing `effect` at `volume` (0.0 - 1.0); music loops until the process exits
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs what would have played
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Audio: {} at volume {:.3}", effect.as_str(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Manager with the volume mix from `settings`
    pub fn from_settings(settings: &Settings, sink: Box<dyn AudioSink>) -> Self {
        let mut manager = Self::new(sink);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel * effect.base_volume()
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play whatever sounds go with a batch of simulation events
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
