//! Per-tick observers
//!
//! Side effects (sound, particles, high score) hang off the simulation as an
//! ordered chain of hooks. The driver feeds every queued [`GameEvent`] to each
//! hook in order, then calls `after_tick` once per simulated frame.

use crate::renderer::RenderTarget;
use crate::sim::{GameEvent, GameSession};

pub trait TickHook {
    /// Short identifier for logging
    fn name(&self) -> &'static str;

    /// Called for each event, in the order the session queued them
    fn on_event(&mut self, _session: &GameSession, _event: &GameEvent) {}

    /// Called once after every simulated frame (never while paused)
    fn after_tick(&mut self, _session: &GameSession) {}

    /// Draw on top of the field after the core primitives
    fn draw(&self, _target: &mut dyn RenderTarget) {}

    /// Best score tracked by this hook, if it tracks one
    fn high_score(&self) -> Option<u64> {
        None
    }
}

/// Hooks invoked in insertion order
#[derive(Default)]
pub struct HookChain {
    hooks: Vec<Box<dyn TickHook>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hook: impl TickHook + 'static) -> Self {
        self.push(hook);
        self
    }

    pub fn push(&mut self, hook: impl TickHook + 'static) {
        log::info!("Registered hook: {}", hook.name());
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn dispatch(&mut self, session: &GameSession, events: &[GameEvent]) {
        for event in events {
            for hook in &mut self.hooks {
                hook.on_event(session, event);
            }
        }
    }

    pub fn after_tick(&mut self, session: &GameSession) {
        for hook in &mut self.hooks {
            hook.after_tick(session);
        }
    }

    pub fn draw(&self, target: &mut dyn RenderTarget) {
        for hook in &self.hooks {
            hook.draw(target);
        }
    }

    pub fn high_score(&self) -> Option<u64> {
        self.hooks.iter().find_map(|h| h.high_score())
    }
}
