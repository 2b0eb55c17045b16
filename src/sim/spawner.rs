//! Frame-driven ball activation
//!
//! The only path by which a dormant ball starts falling.

use rand::Rng;

use super::state::BallPool;
use crate::tuning::DifficultyTuning;

/// Activate `balls_per_spawn` random dormant balls on every `spawn_interval`-th frame.
///
/// Returns the activated slots (empty on off-frames or when the pool is exhausted).
pub fn spawn(
    pool: &mut BallPool,
    frame_count: u64,
    tuning: &DifficultyTuning,
    field_width: f32,
    rng: &mut impl Rng,
) -> Vec<usize> {
    if tuning.spawn_interval == 0 || frame_count % tuning.spawn_interval != 0 {
        return Vec::new();
    }

    let mut dormant = pool.find_inactive();
    let mut spawned = Vec::with_capacity(tuning.balls_per_spawn as usize);

    for _ in 0..tuning.balls_per_spawn {
        if dormant.is_empty() {
            break;
        }
        let pick = rng.random_range(0..dormant.len());
        let slot = dormant.swap_remove(pick);
        if let Some(ball) = pool.get_mut(slot) {
            ball.activate(field_width, rng);
            spawned.push(slot);
        }
    }

    if !spawned.is_empty() {
        log::debug!("Frame {}: spawned {:?}", frame_count, spawned);
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{Difficulty, GameConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup(capacity: usize) -> (BallPool, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(42);
        let pool = BallPool::new(capacity, 450.0, 10.0, &mut rng);
        (pool, rng)
    }

    #[test]
    fn test_spawn_only_on_interval() {
        let config = GameConfig::default();
        let tuning = config.tuning(Difficulty::Easy);
        let (mut pool, mut rng) = setup(50);

        for frame in 1..150 {
            assert!(spawn(&mut pool, frame, tuning, 450.0, &mut rng).is_empty());
        }
        assert_eq!(spawn(&mut pool, 150, tuning, 450.0, &mut rng).len(), 1);
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_spawn_multiple_per_interval() {
        let config = GameConfig::default();
        let tuning = config.tuning(Difficulty::Hard);
        let (mut pool, mut rng) = setup(100);

        let spawned = spawn(&mut pool, 50, tuning, 450.0, &mut rng);
        assert_eq!(spawned.len(), 2);
        assert_ne!(spawned[0], spawned[1]);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_spawn_noop_when_exhausted() {
        let config = GameConfig::default();
        let tuning = config.tuning(Difficulty::Hard);
        let (mut pool, mut rng) = setup(3);

        assert_eq!(spawn(&mut pool, 50, tuning, 450.0, &mut rng).len(), 2);
        // Only one dormant ball left for a two-ball spawn
        assert_eq!(spawn(&mut pool, 100, tuning, 450.0, &mut rng).len(), 1);
        assert!(spawn(&mut pool, 150, tuning, 450.0, &mut rng).is_empty());
        assert!(pool.find_inactive().is_empty());
    }

    #[test]
    fn test_spawn_never_reactivates_resolved_ball() {
        let config = GameConfig::default();
        let tuning = config.tuning(Difficulty::Easy);
        let (mut pool, mut rng) = setup(1);

        let spawned = spawn(&mut pool, 150, tuning, 450.0, &mut rng);
        assert_eq!(spawned, vec![0]);
        pool.get_mut(0).unwrap().state = crate::sim::BallState::Escaped;
        assert!(spawn(&mut pool, 300, tuning, 450.0, &mut rng).is_empty());
    }
}
