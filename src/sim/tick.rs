//! Per-frame simulation tick
//!
//! Advances paddle, spawner and collision engine in a fixed order.

use super::collision::advance_balls;
use super::spawner::spawn;
use super::state::{GameEvent, GameSession};

/// Advance the session by one frame of `dt_ms` milliseconds.
///
/// Does nothing unless the session is `Playing`, so a stray frame after a
/// pause or game over cannot change state.
pub fn tick(session: &mut GameSession, dt_ms: f32) {
    if !session.is_running() {
        return;
    }

    session.frame_count += 1;
    session.elapsed_ms += dt_ms as f64;
    if session.frame_count % session.config.step_interval == 0 {
        session.stats.steps += 1;
    }

    let tuning = *session.tuning();
    let field_width = session.config.field_width;

    // Paddle
    session.paddle.tick(field_width);

    // Spawner
    let spawned = spawn(
        &mut session.pool,
        session.frame_count,
        &tuning,
        field_width,
        &mut session.rng,
    );
    session
        .events
        .extend(spawned.into_iter().map(|slot| GameEvent::BallSpawned { slot }));

    // Collisions
    let paddle_rect = session.paddle.rect(&session.config);
    let dt_scale = dt_ms / session.config.reference_frame_ms;
    let round_complete = advance_balls(
        &mut session.pool,
        &paddle_rect,
        &mut session.stats,
        &tuning,
        session.config.field_height,
        dt_scale,
        &mut session.events,
    );

    if round_complete {
        session.end_round();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DELTA_MS;
    use crate::sim::state::{BallState, GamePhase, RoundStats};
    use crate::tuning::{Difficulty, GameConfig};
    use proptest::prelude::*;

    const DT: f32 = 16.0;

    fn playing(difficulty: Difficulty, seed: u64) -> GameSession {
        let mut session = GameSession::new(GameConfig::default(), difficulty, seed);
        session.start();
        session.drain_events();
        session
    }

    #[test]
    fn test_tick_ignored_outside_playing() {
        let mut session = GameSession::new(GameConfig::default(), Difficulty::Easy, 1);
        tick(&mut session, DT);
        assert_eq!(session.frame_count, 0);

        session.start();
        session.toggle_pause();
        tick(&mut session, DT);
        assert_eq!(session.frame_count, 0);
    }

    #[test]
    fn test_step_counter() {
        let mut session = playing(Difficulty::Easy, 1);
        for _ in 0..119 {
            tick(&mut session, DT);
        }
        assert_eq!(session.stats.steps, 1);
        tick(&mut session, DT);
        assert_eq!(session.stats.steps, 2);
        assert!((session.elapsed_ms - 120.0 * 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_first_spawn_on_easy() {
        let mut session = playing(Difficulty::Easy, 7);
        // Park the paddle in the corner, away from any ball's path
        session.paddle.x = 0.0;

        for _ in 0..149 {
            tick(&mut session, DT);
        }
        assert_eq!(session.pool.active_count(), 0);

        tick(&mut session, DT);
        assert_eq!(session.frame_count, 150);
        assert_eq!(session.pool.active_count(), 1);
        assert_eq!(session.stats, RoundStats {
            steps: 2,
            ..Default::default()
        });
        assert!(matches!(
            session.drain_events().as_slice(),
            [GameEvent::BallSpawned { .. }]
        ));
    }

    #[test]
    fn test_ball_escapes_when_paddle_away() {
        let mut session = playing(Difficulty::Easy, 3);
        for _ in 0..150 {
            tick(&mut session, DT);
        }
        let slot = session.pool.active().next().unwrap().slot;
        let x = session.pool.get(slot).unwrap().pos.x;
        // Keep the paddle on the far side of the ball
        session.paddle.x = if x > 225.0 { 0.0 } else { 380.0 };

        // 0.5 px per frame: needs (300 - 10) / 0.5 = 580 frames to escape
        while session.pool.get(slot).unwrap().state == BallState::Falling {
            // Nothing is counted until the first ball reaches the floor
            assert_eq!(session.stats.resolved(), 0);
            tick(&mut session, DT);
        }
        assert_eq!(session.pool.get(slot).unwrap().state, BallState::Escaped);
        assert_eq!(session.stats.escaped, 1);
        assert_eq!(session.stats.burst, 0);
    }

    #[test]
    fn test_capped_frame_still_catches_fast_ball() {
        let mut session = playing(Difficulty::Hard, 3);
        session.paddle.x = 200.0;
        let ball = session.pool.get_mut(0).unwrap();
        ball.state = BallState::Falling;
        ball.pos = glam::Vec2::new(220.0, 279.0);

        tick(&mut session, MAX_FRAME_DELTA_MS);

        assert_eq!(session.pool.get(0).unwrap().state, BallState::Burst);
        assert_eq!(session.stats.burst, 1);
        assert_eq!(session.stats.escaped, 0);
    }

    #[test]
    fn test_ball_bursts_on_paddle() {
        let mut session = playing(Difficulty::Easy, 3);
        for _ in 0..150 {
            tick(&mut session, DT);
        }
        let slot = session.pool.active().next().unwrap().slot;
        let x = session.pool.get(slot).unwrap().pos.x;
        session.paddle.x = (x - 35.0).clamp(0.0, 380.0);

        while session.pool.get(slot).unwrap().state == BallState::Falling {
            tick(&mut session, DT);
        }
        assert_eq!(session.pool.get(slot).unwrap().state, BallState::Burst);
        assert_eq!(session.stats.burst, 1);
        assert_eq!(session.stats.score, 10);
    }

    #[test]
    fn test_round_ends_when_pool_resolved() {
        let mut config = GameConfig::default();
        config.difficulties.hard.max_balls = 4;
        let mut session = GameSession::new(config, Difficulty::Hard, 5);
        session.start();

        let mut ticks = 0;
        while session.is_running() {
            tick(&mut session, DT);
            ticks += 1;
            assert!(ticks < 10_000, "round never ended");
        }

        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.stats.resolved(), 4);
        let events = session.drain_events();
        assert!(matches!(events.last(), Some(GameEvent::RoundOver { .. })));

        // Loop is halted: further frames change nothing
        let frames = session.frame_count;
        tick(&mut session, DT);
        assert_eq!(session.frame_count, frames);
    }

    #[test]
    fn test_pause_resume_preserves_state() {
        let mut session = playing(Difficulty::Moderate, 11);
        for _ in 0..400 {
            tick(&mut session, DT);
        }
        let stats = session.stats;
        let frames = session.frame_count;
        let positions: Vec<_> = session.pool.iter().map(|b| (b.pos, b.state)).collect();

        session.toggle_pause();
        for _ in 0..50 {
            tick(&mut session, DT);
        }
        session.toggle_pause();

        assert_eq!(session.stats, stats);
        assert_eq!(session.frame_count, frames);
        let after: Vec<_> = session.pool.iter().map(|b| (b.pos, b.state)).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_same_seed_same_round() {
        let mut a = playing(Difficulty::Hard, 99999);
        let mut b = playing(Difficulty::Hard, 99999);
        for i in 0..600 {
            let v = if (i / 40) % 2 == 0 { 5.0 } else { -5.0 };
            a.paddle.set_velocity(v);
            b.paddle.set_velocity(v);
            tick(&mut a, DT);
            tick(&mut b, DT);
        }
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.paddle.x, b.paddle.x);
    }

    proptest! {
        #[test]
        fn prop_tick_invariants(
            seed in any::<u64>(),
            difficulty in prop::sample::select(Difficulty::ALL.to_vec()),
            moves in prop::collection::vec((-8.0f32..8.0, 1.0f32..40.0), 1..400),
        ) {
            let mut session = playing(difficulty, seed);
            let max_x = session.config.field_width - session.paddle.width;
            let mut resolved = 0;

            for (velocity, dt) in moves {
                session.paddle.set_velocity(velocity);
                tick(&mut session, dt);

                let now = session.stats.resolved();
                prop_assert!(now >= resolved);
                prop_assert!(now <= session.capacity());
                prop_assert!(session.paddle.x >= 0.0 && session.paddle.x <= max_x);
                prop_assert_eq!(now == session.capacity(), session.phase == GamePhase::GameOver);
                for ball in session.pool.active() {
                    prop_assert!(ball.pos.y >= 0.0 && ball.pos.y <= session.config.field_height);
                }
                resolved = now;
            }
        }
    }
}
