//! Variable-delta simulation tick
//!
//! Advances a round by one frame: spawning, bird physics, scrolling,
//! collisions, scoring and coin pickup. No wall-clock access; the driver
//! supplies an already clamped delta.

use glam::Vec2;
use rand::Rng;

use super::collision::{
    bird_ceiling_collision, bird_coin_pickup, bird_ground_collision, bird_pipe_collision,
};
use super::state::{Coin, Pipe, RoundState};
use crate::consts::*;
use crate::economy::EconomyConfig;

/// What killed the bird
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Ground,
    Pipe,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// At most one death per tick; the tick stops updating entities after it
    pub death: Option<DeathCause>,
    /// Pipes passed during this tick
    pub points: u32,
    /// Coins picked up during this tick
    pub coins_collected: u32,
    /// Balance to credit for those coins
    pub coins_earned: u64,
}

/// Advance the round by `delta` frames (1.0 = one frame at 60 Hz)
///
/// `delta` must be finite and clamped to [`MIN_DELTA`, `MAX_DELTA`] by the
/// caller.
pub fn tick(round: &mut RoundState, economy: &EconomyConfig, delta: f32) -> TickReport {
    debug_assert!(delta.is_finite() && delta >= 0.0);

    let mut report = TickReport::default();
    let scaled = delta * GAME_SPEED_SCALE;
    let speed = round.speed();

    // --- SPAWNING ---
    round.spawn_meter += speed * scaled * SPAWN_RATE;
    if round.spawn_meter >= round.spacing() {
        spawn_pipe(round);
        round.spawn_meter = 0.0;
    }

    // --- BIRD PHYSICS ---
    let bird = &mut round.bird;
    bird.velocity += GRAVITY * scaled;
    bird.pos.y += bird.velocity * scaled * BIRD_MOVE_FACTOR;

    if bird_ground_collision(bird) {
        report.death = Some(DeathCause::Ground);
        return report;
    }
    if bird_ceiling_collision(bird) {
        bird.pos.y = bird.radius;
        bird.velocity = 0.0;
    }

    // --- PIPES ---
    let move_distance = speed * scaled * SCROLL_FACTOR;
    let bird = &round.bird;
    for pipe in &mut round.pipes {
        pipe.x -= move_distance;
        if !pipe.scored && pipe.trailing_edge() < bird.pos.x {
            pipe.scored = true;
            round.score += 1;
            report.points += 1;
        }
        if bird_pipe_collision(bird, pipe) {
            report.death = Some(DeathCause::Pipe);
            break;
        }
    }
    if report.death.is_some() {
        return report;
    }

    round.pipes.retain(|p| p.trailing_edge() > CULL_MARGIN);

    // --- COINS ---
    // Pickup before culling
    let value = economy.coin_value();
    round.coins.retain_mut(|coin| {
        coin.pos.x -= move_distance;
        if bird_coin_pickup(bird, coin) {
            report.coins_collected += 1;
            report.coins_earned += value;
            return false;
        }
        coin.pos.x > CULL_MARGIN
    });

    report
}

/// Append a pipe at the right edge with a random gap
///
/// Every few pipes (see [`RoundState::pipes_until_coin`]) a coin is placed
/// inside the new pipe's gap.
pub fn spawn_pipe(round: &mut RoundState) {
    let spacing_limit = GROUND_Y - GAP_BOTTOM_RESERVE;
    let gap_height = GAP_MIN + round.rng.random::<f32>() * GAP_RANGE;
    let gap_y = GAP_TOP_MARGIN + round.rng.random::<f32>() * (spacing_limit - gap_height);
    let pipe = Pipe::new(PIPE_SPAWN_X, gap_y, gap_height);

    log::debug!(
        "Pipe spawned: gap {:.1}..{:.1} (score {})",
        pipe.gap_y,
        pipe.gap_bottom(),
        round.score
    );

    round.pipes_until_coin = round.pipes_until_coin.saturating_sub(1);
    if round.pipes_until_coin == 0 {
        spawn_coin(round, &pipe);
        round.pipes_until_coin = round.roll_pipes_until_coin();
    }
    round.pipes.push(pipe);
}

/// Place a coin in the middle of a pipe's gap with a little vertical jitter
fn spawn_coin(round: &mut RoundState, pipe: &Pipe) {
    let shift = (round.rng.random::<f32>() - 0.5) * COIN_JITTER;
    let y = (pipe.gap_center() + shift).clamp(
        pipe.gap_y + COIN_RADIUS,
        pipe.gap_bottom() - COIN_RADIUS,
    );
    let x = pipe.x + pipe.width / 2.0;
    round.coins.push(Coin::new(Vec2::new(x, y)));
}
