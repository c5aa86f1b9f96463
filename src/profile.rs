//! Player profile: everything that survives a page reload
//!
//! Coins, upgrade levels, selected skin, leaderboard and linked wallet.
//! Loading never fails; each field falls back to its default and numeric
//! fields are clamped into range.

use crate::economy::{EXTRA_LIFE_COSTS, Ledger, MULTIPLIER_TIERS, SKINS, Skin, skin_at};
use crate::leaderboard::Leaderboard;
use crate::persistence::{
    KeyValueStore, StorageError, keys, load_json, load_number, save_json, save_number,
    try_load_number,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub ledger: Ledger,
    /// Index into the skin catalog
    pub skin_index: usize,
    pub leaderboard: Leaderboard,
    /// Linked wallet address, if any
    pub wallet_address: Option<String>,
}

impl Profile {
    /// A brand new player; `now` timestamps the house leaderboard
    pub fn new(now: f64) -> Self {
        Self {
            ledger: Ledger::default(),
            skin_index: 0,
            leaderboard: Leaderboard::seeded(now),
            wallet_address: None,
        }
    }

    pub fn skin(&self) -> &'static Skin {
        skin_at(self.skin_index)
    }

    /// Load from the store, falling back field by field
    pub fn load(store: &dyn KeyValueStore, now: f64) -> Self {
        let defaults = Self::new(now);

        let coins = load_number(store, keys::COINS, 0.0).max(0.0) as u64;
        let multiplier_level = load_multiplier_level(store)
            .clamp(1.0, MULTIPLIER_TIERS.len() as f64) as u32;
        let extra_lives_bought = load_number(store, keys::EXTRA_LIVES, 0.0)
            .clamp(0.0, EXTRA_LIFE_COSTS.len() as f64) as u32;
        let skin_index =
            load_number(store, keys::SKIN, 0.0).clamp(0.0, (SKINS.len() - 1) as f64) as usize;

        let mut leaderboard = load_json(store, keys::LEADERBOARD, defaults.leaderboard);
        leaderboard.normalize();

        let wallet_address = load_json::<Option<String>>(store, keys::WALLET, None);

        log::info!(
            "Loaded profile: {} coins, multiplier level {}, {} extra lives",
            coins,
            multiplier_level,
            extra_lives_bought
        );

        Self {
            ledger: Ledger {
                coins,
                multiplier_level,
                extra_lives_bought,
            },
            skin_index,
            leaderboard,
            wallet_address,
        }
    }

    /// Write every field to the store
    ///
    /// Write failures are skipped: the in-memory profile stays authoritative
    /// for the rest of the session.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match self.try_save(store) {
            Ok(()) => log::debug!("Profile saved"),
            Err(StorageError::Unavailable) => {}
            Err(e) => log::debug!("Profile not saved: {e}"),
        }
    }

    fn try_save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        save_number(store, keys::COINS, self.ledger.coins)?;
        save_number(store, keys::MULTIPLIER, self.ledger.multiplier_level)?;
        save_number(store, keys::EXTRA_LIVES, self.ledger.extra_lives_bought)?;
        save_number(store, keys::SKIN, self.skin_index)?;
        save_json(store, keys::LEADERBOARD, &self.leaderboard)?;
        save_json(store, keys::WALLET, &self.wallet_address)
    }
}

/// Stored multiplier level, migrating the older numbering if that is all there is
fn load_multiplier_level(store: &dyn KeyValueStore) -> f64 {
    if let Some(level) = try_load_number(store, keys::MULTIPLIER) {
        return level;
    }
    match try_load_number(store, keys::LEGACY_MULTIPLIER) {
        Some(old) => {
            log::info!("Migrating multiplier level {} to {}", old, old + 1.0);
            old + 1.0
        }
        None => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    const NOW: f64 = 1_700_000_000_000.0;

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Profile::load(&store, NOW), Profile::new(NOW));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut profile = Profile::new(NOW);
        profile.ledger.coins = 321;
        profile.ledger.multiplier_level = 3;
        profile.ledger.extra_lives_bought = 2;
        profile.skin_index = 9;
        profile.wallet_address = Some("0x1234567890abcdef".to_string());
        profile.leaderboard.record("me", 999, NOW);

        profile.save(&mut store);
        assert_eq!(store.len(), 6);
        assert_eq!(Profile::load(&store, NOW + 5.0), profile);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut store = MemoryStore::new();
        store.set(keys::COINS, "-50").unwrap();
        store.set(keys::MULTIPLIER, "99").unwrap();
        store.set(keys::EXTRA_LIVES, "-3").unwrap();
        store.set(keys::SKIN, "400").unwrap();
        store.set(keys::WALLET, "42").unwrap();

        let profile = Profile::load(&store, NOW);

        assert_eq!(profile.ledger.coins, 0);
        assert_eq!(profile.ledger.multiplier_level, MULTIPLIER_TIERS.len() as u32);
        assert_eq!(profile.ledger.extra_lives_bought, 0);
        assert_eq!(profile.skin_index, SKINS.len() - 1);
        // Non-string wallet is discarded
        assert_eq!(profile.wallet_address, None);
    }

    #[test]
    fn test_legacy_multiplier_level_is_migrated() {
        let mut store = MemoryStore::new();
        // Old top tier (6x) was stored as level 5
        store.set(keys::LEGACY_MULTIPLIER, "5").unwrap();
        let profile = Profile::load(&store, NOW);
        assert_eq!(profile.ledger.multiplier_level, 6);
        assert_eq!(profile.ledger.multiplier(), 6);
        assert_eq!(profile.ledger.next_tier(), None);

        // The first save moves it to the new key
        profile.save(&mut store);
        assert_eq!(store.get(keys::MULTIPLIER).unwrap().as_deref(), Some("6"));
        store.set(keys::LEGACY_MULTIPLIER, "1").unwrap();
        assert_eq!(Profile::load(&store, NOW).ledger.multiplier(), 6);
    }

    #[test]
    fn test_legacy_base_level_keeps_its_multiplier() {
        let mut store = MemoryStore::new();
        store.set(keys::LEGACY_MULTIPLIER, "1").unwrap();
        assert_eq!(Profile::load(&store, NOW).ledger.multiplier(), 2);
    }

    #[test]
    fn test_corrupt_leaderboard_falls_back_to_house_board() {
        let mut store = MemoryStore::new();
        store.set(keys::LEADERBOARD, "[{\"name\":").unwrap();
        let profile = Profile::load(&store, NOW);
        assert_eq!(profile.leaderboard, Leaderboard::seeded(NOW));
    }

    #[test]
    fn test_save_to_unavailable_store_is_silent() {
        let mut store = MemoryStore::unavailable();
        let profile = Profile::new(NOW);
        profile.save(&mut store);
        assert_eq!(Profile::load(&store, NOW), profile);
    }
}
