//! Frame driver
//!
//! Owns the session, the frame clock and the hook chain. The platform loop
//! calls [`FrameDriver::frame`] once per animation frame and keeps scheduling
//! frames only while it returns true.

use crate::hooks::HookChain;
use crate::hud::HudText;
use crate::platform::{FrameClock, InputAction, TouchTracker};
use crate::renderer::{RenderTarget, draw_frame};
use crate::sim::autopilot;
use crate::sim::{GameSession, tick};

pub struct FrameDriver {
    pub session: GameSession,
    pub touch: TouchTracker,
    clock: FrameClock,
    hooks: HookChain,
    autopilot: bool,
}

impl FrameDriver {
    pub fn new(session: GameSession, hooks: HookChain) -> Self {
        let clock = FrameClock::new(
            session.config.reference_frame_ms,
            session.config.max_frame_delta_ms,
        );
        let touch = TouchTracker::new(session.config.touch_factor);
        Self {
            session,
            touch,
            clock,
            hooks,
            autopilot: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        if !enabled {
            self.session.paddle.set_velocity(0.0);
        }
    }

    /// Apply a player action to the session and notify hooks
    pub fn apply(&mut self, action: InputAction) {
        let was_running = self.session.is_running();
        let speed = self.session.config.paddle_key_speed;
        let field_width = self.session.config.field_width;

        match action {
            InputAction::MoveLeft if self.is_running() => self.session.paddle.set_velocity(-speed),
            InputAction::MoveRight if self.is_running() => self.session.paddle.set_velocity(speed),
            InputAction::StopMove => self.session.paddle.set_velocity(0.0),
            InputAction::Nudge(delta) if self.is_running() => {
                self.session.paddle.nudge(delta, field_width)
            }
            InputAction::TogglePause => {
                self.session.toggle_pause();
            }
            InputAction::Start => {
                self.session.start();
            }
            InputAction::Reset => self.session.reset(),
            InputAction::SelectDifficulty(difficulty) => self.session.set_difficulty(difficulty),
            InputAction::ToggleAutopilot => {
                let enabled = !self.autopilot;
                self.set_autopilot(enabled);
                log::info!("Autopilot: {}", enabled);
            }
            // Movement is ignored unless playing
            _ => {}
        }

        // Entering play (start, resume, reset) must not see the idle gap as frame time
        let restarted = matches!(action, InputAction::Reset | InputAction::SelectDifficulty(_));
        if self.session.is_running() && (!was_running || restarted) {
            self.clock.restart();
        }
        self.flush_events();
    }

    /// Advance one animation frame stamped `now_ms`; returns whether to schedule another
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.session.is_running() {
            return false;
        }

        if self.autopilot {
            let velocity = autopilot::steer(&self.session);
            self.session.paddle.set_velocity(velocity);
        }

        let dt = self.clock.delta(now_ms);
        tick(&mut self.session, dt);
        self.flush_events();
        self.hooks.after_tick(&self.session);

        self.session.is_running()
    }

    /// Draw the field, then let hooks draw their overlays
    pub fn render(&self, target: &mut dyn RenderTarget) {
        draw_frame(target, &self.session);
        self.hooks.draw(target);
    }

    pub fn hud(&self) -> HudText {
        HudText::new(&self.session, self.hooks.high_score().unwrap_or(0))
    }

    fn flush_events(&mut self) {
        let events = self.session.drain_events();
        if !events.is_empty() {
            self.hooks.dispatch(&self.session, &events);
        }
    }
}
