//! Round state and core simulation types
//!
//! Everything here is rebuilt on every round reset; nothing is persisted.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// The player's bird
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Centre position (x is fixed for the round)
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical velocity (positive is down)
    pub velocity: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BIRD_START_X, BIRD_START_Y),
            radius: BIRD_RADIUS,
            velocity: 0.0,
        }
    }
}

impl Bird {
    /// Replace velocity with the upward flap impulse
    pub fn flap(&mut self) {
        self.velocity = FLAP_STRENGTH;
    }

    /// Render tilt in radians, nose down when falling
    pub fn tilt(&self) -> f32 {
        (self.velocity * 0.08).clamp(-0.5, 0.6)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    /// Top of the gap
    pub gap_y: f32,
    pub gap_height: f32,
    /// Set once the bird has passed; a pipe scores at most once
    pub scored: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_y: f32, gap_height: f32) -> Self {
        Self {
            x,
            width: PIPE_WIDTH,
            gap_y,
            gap_height,
            scored: false,
        }
    }

    /// Right edge (the last part the bird sees)
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + self.gap_height
    }

    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.gap_y + self.gap_height / 2.0
    }
}

/// A collectible coin, always spawned inside a pipe gap
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: COIN_RADIUS,
        }
    }
}

/// Mutable per-round state
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Spawn RNG; survives round resets so consecutive rounds differ
    pub rng: Pcg32,
    pub bird: Bird,
    /// Ordered oldest (leftmost) first; new pipes are appended
    pub pipes: Vec<Pipe>,
    pub coins: Vec<Coin>,
    /// Distance credit toward the next pipe spawn
    pub spawn_meter: f32,
    /// Pipes left to spawn before the next coin
    pub pipes_until_coin: u32,
    /// Pipes passed this round
    pub score: u32,
}

impl RoundState {
    /// Create a fresh round with the given seed
    pub fn new(seed: u64) -> Self {
        let mut round = Self {
            rng: Pcg32::seed_from_u64(seed),
            bird: Bird::default(),
            pipes: Vec::new(),
            coins: Vec::new(),
            spawn_meter: 0.0,
            pipes_until_coin: 0,
            score: 0,
        };
        round.reset();
        round
    }

    /// Clear all entities, zero the score and put a new bird at the start
    pub fn reset(&mut self) {
        self.pipes.clear();
        self.coins.clear();
        self.spawn_meter = 0.0;
        self.pipes_until_coin = self.roll_pipes_until_coin();
        self.bird = Bird::default();
        self.score = 0;
    }

    pub fn roll_pipes_until_coin(&mut self) -> u32 {
        self.rng.random_range(PIPES_PER_COIN_MIN..=PIPES_PER_COIN_MAX)
    }

    /// Horizontal speed for the current score (grows, capped)
    pub fn speed(&self) -> f32 {
        let gain = (self.score as f32 * SPEED_GAIN_PER_POINT).min(SPEED_GAIN_CAP);
        (BASE_SPEED + gain) * GAME_SPEED_SCALE
    }

    /// Spawn threshold for the current score (shrinks, floored)
    pub fn spacing(&self) -> f32 {
        (SPACING_BASE - self.score as f32 * SPACING_SHRINK_PER_POINT)
            .clamp(SPACING_MIN, SPACING_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_shape() {
        let mut round = RoundState::new(7);
        round.pipes.push(Pipe::new(100.0, 80.0, 150.0));
        round.coins.push(Coin::new(Vec2::new(137.0, 150.0)));
        round.spawn_meter = 42.0;
        round.score = 9;
        round.bird.pos.y = 12.0;
        round.bird.velocity = 3.0;

        round.reset();

        assert!(round.pipes.is_empty());
        assert!(round.coins.is_empty());
        assert_eq!(round.spawn_meter, 0.0);
        assert_eq!(round.score, 0);
        assert_eq!(round.bird, Bird::default());
        assert!((PIPES_PER_COIN_MIN..=PIPES_PER_COIN_MAX).contains(&round.pipes_until_coin));
    }

    #[test]
    fn test_speed_and_spacing_curves() {
        let mut round = RoundState::new(1);
        assert!((round.speed() - 2.6 * 0.3).abs() < 1e-6);
        assert_eq!(round.spacing(), SPACING_MAX);

        round.score = 50;
        assert!((round.spacing() - 95.0).abs() < 1e-4);

        round.score = 10_000;
        assert!((round.speed() - 6.0 * 0.3).abs() < 1e-5);
        assert_eq!(round.spacing(), SPACING_MIN);
    }

    #[test]
    fn test_bird_tilt_clamped() {
        let mut bird = Bird::default();
        bird.velocity = -100.0;
        assert_eq!(bird.tilt(), -0.5);
        bird.velocity = 100.0;
        assert_eq!(bird.tilt(), 0.6);
        bird.flap();
        assert_eq!(bird.velocity, FLAP_STRENGTH);
    }
}
