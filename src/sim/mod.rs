//! Round simulation module
//!
//! All gameplay physics lives here. This module must stay pure:
//! - Time only enters through the delta passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (pipes oldest first)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    bird_ceiling_collision, bird_coin_pickup, bird_ground_collision, bird_pipe_collision,
};
pub use state::{Bird, Coin, Pipe, RoundState};
pub use tick::{DeathCause, TickReport, spawn_pipe, tick};
