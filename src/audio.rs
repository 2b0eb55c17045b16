//! Audio cues
//!
//! Procedurally generated with the Web Audio API on the web - no external files
//! needed. Natively every cue is a silent no-op.

use crate::hooks::TickHook;
use crate::sim::{GameEvent, GameSession};

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Ball burst on the paddle
    Pop,
    /// Ball hit the floor
    Escape,
    /// Round finished
    GameOver,
}

/// Sound output; failures are logged by the implementation, never returned
pub trait AudioSink {
    fn play_one_shot(&mut self, cue: SoundCue);
    fn start_loop(&mut self);
    fn stop_loop(&mut self);
}

/// Sink that plays nothing (native builds, audio disabled)
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_one_shot(&mut self, cue: SoundCue) {
        log::debug!("(silent) {:?}", cue);
    }

    fn start_loop(&mut self) {}

    fn stop_loop(&mut self) {}
}

/// Maps game events onto sound cues and the background loop
pub struct AudioHook<S: AudioSink> {
    sink: S,
}

impl<S: AudioSink> AudioHook<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: AudioSink> TickHook for AudioHook<S> {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn on_event(&mut self, _session: &GameSession, event: &GameEvent) {
        match event {
            GameEvent::Burst { .. } => self.sink.play_one_shot(SoundCue::Pop),
            GameEvent::Escaped { .. } => self.sink.play_one_shot(SoundCue::Escape),
            GameEvent::RoundStarted { .. } | GameEvent::Resumed => self.sink.start_loop(),
            GameEvent::Paused => self.sink.stop_loop(),
            GameEvent::RoundOver { .. } => {
                self.sink.stop_loop();
                self.sink.play_one_shot(SoundCue::GameOver);
            }
            GameEvent::BallSpawned { .. } => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundCue};

    /// Background loop gain relative to master volume
    const LOOP_GAIN: f32 = 0.3;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        music_volume: f32,
        /// Running background drone (oscillator, gain)
        background: Option<(OscillatorNode, GainNode)>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                music_volume: 0.7,
                background: None,
            }
        }

        /// Set volumes (0.0 - 1.0)
        pub fn set_volumes(&mut self, master: f32, sfx: f32, music: f32) {
            self.master_volume = master.clamp(0.0, 1.0);
            self.sfx_volume = sfx.clamp(0.0, 1.0);
            self.music_volume = music.clamp(0.0, 1.0);
        }

        fn sfx_gain(&self) -> f32 {
            self.master_volume * self.sfx_volume
        }

        fn music_gain(&self) -> f32 {
            self.master_volume * self.music_volume * LOOP_GAIN
        }

        /// Resume a suspended context; autoplay rejection is logged, not propagated
        fn ensure_running(ctx: &AudioContext) {
            if ctx.state() != AudioContextState::Suspended {
                return;
            }
            match ctx.resume() {
                Ok(promise) => {
                    wasm_bindgen_futures::spawn_local(async move {
                        if let Err(e) = JsFuture::from(promise).await {
                            log::warn!("Audio autoplay was prevented: {:?}", e);
                        }
                    });
                }
                Err(e) => log::warn!("Failed to resume AudioContext: {:?}", e),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Result<(OscillatorNode, GainNode), JsValue> {
            let osc = ctx.create_oscillator()?;
            let gain = ctx.create_gain()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&ctx.destination())?;

            Ok((osc, gain))
        }

        /// Pop - quick rising blip
        fn play_pop(ctx: &AudioContext, vol: f32) -> Result<(), JsValue> {
            let (osc, gain) = Self::create_osc(ctx, 500.0, OscillatorType::Sine)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t)?;
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.08)?;
            osc.frequency().set_value_at_time(500.0, t)?;
            osc.frequency().exponential_ramp_to_value_at_time(1200.0, t + 0.06)?;

            osc.start()?;
            osc.stop_with_when(t + 0.1)?;
            Ok(())
        }

        /// Escape - low thud
        fn play_escape(ctx: &AudioContext, vol: f32) -> Result<(), JsValue> {
            let (osc, gain) = Self::create_osc(ctx, 140.0, OscillatorType::Triangle)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t)?;
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.12)?;
            osc.frequency().set_value_at_time(140.0, t)?;
            osc.frequency().exponential_ramp_to_value_at_time(60.0, t + 0.12)?;

            osc.start()?;
            osc.stop_with_when(t + 0.15)?;
            Ok(())
        }

        /// Game over - descending sawtooth
        fn play_game_over(ctx: &AudioContext, vol: f32) -> Result<(), JsValue> {
            let (osc, gain) = Self::create_osc(ctx, 440.0, OscillatorType::Sawtooth)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t)?;
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + 1.0)?;
            osc.frequency().set_value_at_time(440.0, t)?;
            osc.frequency().exponential_ramp_to_value_at_time(110.0, t + 1.0)?;

            osc.start()?;
            osc.stop_with_when(t + 1.1)?;
            Ok(())
        }
    }

    impl AudioSink for AudioManager {
        fn play_one_shot(&mut self, cue: SoundCue) {
            let vol = self.sfx_gain();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            Self::ensure_running(ctx);

            let result = match cue {
                SoundCue::Pop => Self::play_pop(ctx, vol),
                SoundCue::Escape => Self::play_escape(ctx, vol),
                SoundCue::GameOver => Self::play_game_over(ctx, vol),
            };
            if let Err(e) = result {
                log::warn!("Failed to play {:?}: {:?}", cue, e);
            }
        }

        fn start_loop(&mut self) {
            if self.background.is_some() {
                return;
            }
            let vol = self.music_gain();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            Self::ensure_running(ctx);

            let started = Self::create_osc(ctx, 110.0, OscillatorType::Triangle).and_then(
                |(osc, gain)| {
                    gain.gain().set_value(vol * 0.2);
                    osc.start()?;
                    Ok((osc, gain))
                },
            );
            match started {
                Ok(nodes) => self.background = Some(nodes),
                Err(e) => log::warn!("Failed to start background loop: {:?}", e),
            }
        }

        fn stop_loop(&mut self) {
            if let Some((osc, gain)) = self.background.take() {
                osc.stop().ok();
                gain.disconnect().ok();
            }
        }
    }
}
