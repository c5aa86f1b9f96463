//! Session controller
//!
//! Owns the round, the lives counter and the persistent profile, and drives
//! the round lifecycle:
//!
//! ```text
//! Idle/GameOver --activate--> Playing (lives refilled)
//! Playing --activate--> Playing (flap)
//! Playing --death, lives left--> LifeLost (round reset)
//! Playing --death, no lives--> GameOver (score recorded)
//! LifeLost --activate--> Playing
//! ```

use crate::economy::{MultiplierTier, PurchaseError, SKINS, skin_index};
use crate::persistence::KeyValueStore;
use crate::platform::{Intent, clamp_delta};
use crate::profile::Profile;
use crate::sim::{RoundState, TickReport, tick};
use crate::wallet::{WalletStatus, format_address};

pub const START_MESSAGE: &str = "Press Space / Tap to flap";
pub const GAME_OVER_MESSAGE: &str = "Game over - Press Space to restart";

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Before the first run
    Idle,
    Playing,
    /// Paused after losing a life, waiting for input to continue
    LifeLost,
    /// Run ended; waiting for input to restart
    GameOver,
}

/// Complete session: round, lives, profile and UI-facing status
pub struct Session<S: KeyValueStore> {
    store: S,
    pub profile: Profile,
    pub round: RoundState,
    pub status: Status,
    /// Lives left in the current run
    pub lives: u8,
    /// Message shown over the play field, if any
    pub overlay: Option<String>,
    pub wallet_status: WalletStatus,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the profile from `store` and wait in `Idle`
    pub fn new(store: S, seed: u64, now: f64) -> Self {
        let profile = Profile::load(&store, now);
        let wallet_status = match &profile.wallet_address {
            Some(address) => WalletStatus::Connected(address.clone()),
            None => WalletStatus::Idle,
        };
        let lives = profile.ledger.max_lives();
        Self {
            store,
            profile,
            round: RoundState::new(seed),
            status: Status::Idle,
            lives,
            overlay: Some(START_MESSAGE.to_string()),
            wallet_status,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn max_lives(&self) -> u8 {
        self.profile.ledger.max_lives()
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn coins(&self) -> u64 {
        self.profile.ledger.coins
    }

    /// Leaderboard name for this player
    pub fn player_name(&self) -> String {
        format_address(self.profile.wallet_address.as_deref())
    }

    fn save(&mut self) {
        self.profile.save(&mut self.store);
    }

    /// Handle player input
    pub fn handle(&mut self, intent: Intent) {
        match intent {
            Intent::Activate => self.activate(),
        }
    }

    /// Flap, continue or (re)start depending on status
    pub fn activate(&mut self) {
        match self.status {
            Status::Playing => self.round.bird.flap(),
            Status::LifeLost => {
                self.overlay = None;
                self.status = Status::Playing;
            }
            Status::Idle | Status::GameOver => self.start_run(),
        }
    }

    /// Fresh run: new round, lives refilled
    fn start_run(&mut self) {
        self.round.reset();
        self.lives = self.max_lives();
        self.overlay = None;
        self.status = Status::Playing;
        log::info!("Run started with {} lives", self.lives);
    }

    /// Advance one animation frame
    ///
    /// `raw_delta` is in frames and is clamped here. `now` (Unix ms) stamps
    /// a leaderboard entry if the run ends. Outside `Playing` nothing moves.
    pub fn update(&mut self, raw_delta: f32, now: f64) -> TickReport {
        if self.status != Status::Playing {
            return TickReport::default();
        }

        let economy = self.profile.ledger.economy();
        let report = tick(&mut self.round, &economy, clamp_delta(raw_delta));

        if report.coins_earned > 0 {
            self.profile.ledger.credit(report.coins_earned);
            self.save();
        }
        if let Some(cause) = report.death {
            log::info!("Bird died ({:?}) at score {}", cause, self.round.score);
            self.lose_life(now);
        }
        report
    }

    fn lose_life(&mut self, now: f64) {
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            self.status = Status::GameOver;
            let score = self.round.score as u64;
            let name = self.player_name();
            if let Some(rank) = self.profile.leaderboard.record(name, score, now) {
                log::info!("Score {} placed #{} on the leaderboard", score, rank);
            }
            self.save();
            self.overlay = Some(GAME_OVER_MESSAGE.to_string());
            log::info!("Game over (score {})", score);
            return;
        }

        self.status = Status::LifeLost;
        self.round.reset();
        self.overlay = Some(format!(
            "Life lost - {} left. Tap to continue",
            self.lives
        ));
    }

    /// Buy the next coin multiplier tier
    pub fn buy_multiplier(&mut self) -> Result<&'static MultiplierTier, PurchaseError> {
        let result = self.profile.ledger.buy_multiplier();
        match &result {
            Ok(tier) => {
                log::info!("Bought {}x multiplier for {}", tier.multiplier, tier.price);
                self.save();
            }
            Err(e) => log::debug!("Multiplier purchase refused: {e}"),
        }
        result
    }

    /// Buy an extra life; also grants one life in the current run
    pub fn buy_extra_life(&mut self) -> Result<u64, PurchaseError> {
        let result = self.profile.ledger.buy_extra_life();
        match &result {
            Ok(price) => {
                self.lives = (self.lives + 1).min(self.max_lives());
                log::info!("Bought extra life for {} (max {})", price, self.max_lives());
                self.save();
            }
            Err(e) => log::debug!("Extra life purchase refused: {e}"),
        }
        result
    }

    /// Select a skin by catalog index. Out-of-range indexes are ignored.
    pub fn select_skin(&mut self, index: usize) -> bool {
        if index >= SKINS.len() {
            return false;
        }
        self.profile.skin_index = index;
        self.save();
        true
    }

    /// Select a skin by key. Unknown keys are ignored.
    pub fn select_skin_key(&mut self, key: &str) -> bool {
        skin_index(key).is_some_and(|i| self.select_skin(i))
    }

    /// Start a wallet connection. Returns false if there is nothing to connect
    /// to or a request is already in flight.
    pub fn begin_wallet_connect(&mut self, provider_available: bool) -> bool {
        if !provider_available {
            self.wallet_status = WalletStatus::NotRequired;
            return false;
        }
        if self.wallet_status.is_busy() {
            return false;
        }
        self.wallet_status = WalletStatus::Connecting;
        true
    }

    /// Apply the wallet's answer. Only wallet fields are touched.
    pub fn finish_wallet_connect(&mut self, result: Result<Option<String>, String>) {
        match result {
            Ok(address) => {
                self.wallet_status = match &address {
                    Some(a) => WalletStatus::Connected(a.clone()),
                    None => WalletStatus::Idle,
                };
                self.profile.wallet_address = address;
                self.save();
            }
            Err(reason) => {
                log::warn!("Wallet connection failed: {reason}");
                self.wallet_status = WalletStatus::Failed;
            }
        }
    }
}
