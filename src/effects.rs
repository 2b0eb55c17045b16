//! Burst particles
//!
//! Purely decorative; nothing here feeds back into the simulation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_PARTICLES, PARTICLE_DECAY, PARTICLE_RADIUS, PARTICLES_PER_BURST};
use crate::hooks::TickHook;
use crate::renderer::RenderTarget;
use crate::sim::{ColorTag, GameEvent, GameSession};

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ColorTag,
    pub life: f32, // 0-1, decreases every tick
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spray particles outward from a burst point
    pub fn burst(&mut self, pos: Vec2, color: ColorTag) {
        for _ in 0..PARTICLES_PER_BURST {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let speed = self.rng.random_range(1.0..3.0f32);
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                color,
                life: 1.0,
            });
        }
    }

    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life -= PARTICLE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

impl TickHook for ParticleSystem {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn on_event(&mut self, _session: &GameSession, event: &GameEvent) {
        match event {
            GameEvent::Burst { pos, color, .. } => self.burst(*pos, *color),
            GameEvent::RoundStarted { .. } => self.clear(),
            _ => {}
        }
    }

    fn after_tick(&mut self, _session: &GameSession) {
        self.update();
    }

    fn draw(&self, target: &mut dyn RenderTarget) {
        for particle in &self.particles {
            target.fill_circle(
                particle.pos.x,
                particle.pos.y,
                PARTICLE_RADIUS,
                &particle.color.to_css(),
                particle.life,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;

    const RED: ColorTag = ColorTag { r: 255, g: 0, b: 0 };

    #[test]
    fn test_burst_spawns_particles() {
        let mut system = ParticleSystem::new(1);
        system.burst(Vec2::new(100.0, 200.0), RED);
        assert_eq!(system.len(), PARTICLES_PER_BURST);
        for p in system.iter() {
            let speed = p.vel.length();
            assert!((1.0 - 1e-4..3.0 + 1e-4).contains(&speed));
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_particles_fade_out() {
        let mut system = ParticleSystem::new(1);
        system.burst(Vec2::ZERO, RED);
        for _ in 0..49 {
            system.update();
        }
        assert_eq!(system.len(), PARTICLES_PER_BURST);
        // 50 updates of 0.02 reach zero life (allowing for float drift, 51 at most)
        system.update();
        system.update();
        assert!(system.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut system = ParticleSystem::new(1);
        for _ in 0..100 {
            system.burst(Vec2::ZERO, RED);
        }
        assert_eq!(system.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_draw_uses_life_as_alpha() {
        let mut system = ParticleSystem::new(1);
        system.burst(Vec2::ZERO, RED);
        system.update();
        let mut list = DrawList::default();
        system.draw(&mut list);
        assert_eq!(list.circles().count(), PARTICLES_PER_BURST);
        for command in list.circles() {
            if let crate::renderer::DrawCommand::Circle { alpha, radius, .. } = command {
                assert!((alpha - 0.98).abs() < 1e-4);
                assert_eq!(*radius, PARTICLE_RADIUS);
            }
        }
    }
}
