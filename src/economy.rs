//! Coins, upgrades and cosmetic skins
//!
//! Static price ladders plus the `Ledger` that owns the player's balance and
//! purchased levels.

use thiserror::Error;

/// Value of a single coin before the multiplier
pub const COIN_BASE_VALUE: u64 = 1;

/// Lives every run starts with before upgrades
pub const BASE_LIVES: u8 = 1;

/// Price of each extra life, in purchase order
pub const EXTRA_LIFE_COSTS: [u64; 4] = [150, 225, 325, 450];

/// Upper bound on lives (base + every extra life bought)
pub const MAX_LIVES: u8 = BASE_LIVES + EXTRA_LIFE_COSTS.len() as u8;

/// A cosmetic bird colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub key: &'static str,
    pub name: &'static str,
    /// Body colour (CSS)
    pub primary: &'static str,
    /// Eye patch colour (CSS)
    pub secondary: &'static str,
}

const fn skin(
    key: &'static str,
    name: &'static str,
    primary: &'static str,
    secondary: &'static str,
) -> Skin {
    Skin {
        key,
        name,
        primary,
        secondary,
    }
}

/// Skin catalog; the first entry is the default
pub const SKINS: [Skin; 15] = [
    skin("classic-red", "Classic Red Bird", "#ff4b4b", "#ffd8d8"),
    skin("blue", "Blue Bird", "#4ab3ff", "#e9f3ff"),
    skin("green", "Green Bird", "#42d776", "#d7ffe7"),
    skin("yellow", "Yellow Bird", "#ffe249", "#fff8d5"),
    skin("pink", "Pink Bird", "#ff7ac2", "#ffe8f3"),
    skin("rainbow", "Rainbow Bird", "#ff4ec5", "#42f591"),
    skin("gold", "Gold Bird", "#ffd166", "#fff1c2"),
    skin("silver", "Silver Bird", "#cbd5ff", "#f2f5ff"),
    skin("bronze", "Bronze Bird", "#c77b41", "#ffe7d2"),
    skin("ninja", "Ninja Bird", "#1f1f2d", "#53536c"),
    skin("pirate", "Pirate Bird", "#3c1f54", "#f0c4ff"),
    skin("astronaut", "Astronaut Bird", "#7dd3fe", "#c4f2ff"),
    skin("superhero", "Superhero Bird", "#ff2848", "#ff8c80"),
    skin("zombie", "Zombie Bird", "#6fe56f", "#d2ffd2"),
    skin("unicorn", "Unicorn Bird", "#f8d5ff", "#ffe4ff"),
];

/// Find a skin's catalog index by key
pub fn skin_index(key: &str) -> Option<usize> {
    SKINS.iter().position(|s| s.key == key)
}

/// Skin at `index`, falling back to the default
pub fn skin_at(index: usize) -> &'static Skin {
    SKINS.get(index).unwrap_or(&SKINS[0])
}

/// One step of the coin multiplier ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplierTier {
    pub level: u32,
    pub multiplier: u64,
    /// Price to reach this level (the base tier is free)
    pub price: u64,
}

/// Multiplier ladder, ascending by level and price. Level 1 is owned by default.
pub const MULTIPLIER_TIERS: [MultiplierTier; 6] = [
    MultiplierTier { level: 1, multiplier: 1, price: 0 },
    MultiplierTier { level: 2, multiplier: 2, price: 100 },
    MultiplierTier { level: 3, multiplier: 3, price: 250 },
    MultiplierTier { level: 4, multiplier: 4, price: 500 },
    MultiplierTier { level: 5, multiplier: 5, price: 1000 },
    MultiplierTier { level: 6, multiplier: 6, price: 2000 },
];

/// Coin value rules handed to the simulation each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomyConfig {
    pub base_coin_value: u64,
    pub multiplier: u64,
}

impl EconomyConfig {
    /// Balance gained per collected coin
    pub fn coin_value(&self) -> u64 {
        self.base_coin_value * self.multiplier
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            base_coin_value: COIN_BASE_VALUE,
            multiplier: 1,
        }
    }
}

/// Why a purchase was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("already at the top of the ladder")]
    Maxed,
    #[error("need {price} coins, have {balance}")]
    InsufficientFunds { price: u64, balance: u64 },
}

/// Coin balance and purchased upgrade levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    pub coins: u64,
    /// Current multiplier level, 1..=MULTIPLIER_TIERS.len()
    pub multiplier_level: u32,
    /// Extra lives bought, 0..=EXTRA_LIFE_COSTS.len()
    pub extra_lives_bought: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            coins: 0,
            multiplier_level: 1,
            extra_lives_bought: 0,
        }
    }
}

impl Ledger {
    pub fn current_tier(&self) -> &'static MultiplierTier {
        MULTIPLIER_TIERS
            .iter()
            .find(|t| t.level == self.multiplier_level)
            .unwrap_or(&MULTIPLIER_TIERS[0])
    }

    pub fn next_tier(&self) -> Option<&'static MultiplierTier> {
        MULTIPLIER_TIERS
            .iter()
            .find(|t| t.level == self.multiplier_level + 1)
    }

    pub fn multiplier(&self) -> u64 {
        self.current_tier().multiplier
    }

    /// Price of the next extra life, `None` once all are bought
    pub fn next_life_cost(&self) -> Option<u64> {
        EXTRA_LIFE_COSTS.get(self.extra_lives_bought as usize).copied()
    }

    pub fn max_lives(&self) -> u8 {
        (BASE_LIVES as u32 + self.extra_lives_bought).min(MAX_LIVES as u32) as u8
    }

    pub fn economy(&self) -> EconomyConfig {
        EconomyConfig {
            base_coin_value: COIN_BASE_VALUE,
            multiplier: self.multiplier(),
        }
    }

    pub fn credit(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    fn charge(&mut self, price: u64) -> Result<(), PurchaseError> {
        if self.coins < price {
            return Err(PurchaseError::InsufficientFunds {
                price,
                balance: self.coins,
            });
        }
        self.coins -= price;
        Ok(())
    }

    /// Buy the next multiplier tier. Leaves the ledger untouched on error.
    pub fn buy_multiplier(&mut self) -> Result<&'static MultiplierTier, PurchaseError> {
        let tier = self.next_tier().ok_or(PurchaseError::Maxed)?;
        self.charge(tier.price)?;
        self.multiplier_level = tier.level;
        Ok(tier)
    }

    /// Buy one extra life. Returns the price paid.
    pub fn buy_extra_life(&mut self) -> Result<u64, PurchaseError> {
        let price = self.next_life_cost().ok_or(PurchaseError::Maxed)?;
        self.charge(price)?;
        self.extra_lives_bought += 1;
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_purchase_and_guard() {
        let mut ledger = Ledger {
            coins: 100,
            ..Ledger::default()
        };

        let tier = ledger.buy_multiplier().unwrap();
        assert_eq!(tier.level, 2);
        assert_eq!(ledger.coins, 0);
        assert_eq!(ledger.multiplier_level, 2);
        assert_eq!(ledger.multiplier(), 2);

        // Broke: no-op
        let before = ledger.clone();
        assert_eq!(
            ledger.buy_multiplier(),
            Err(PurchaseError::InsufficientFunds {
                price: 250,
                balance: 0
            })
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_multiplier_ladder_exhausted() {
        let mut ledger = Ledger {
            coins: 1_000_000,
            multiplier_level: MULTIPLIER_TIERS.len() as u32,
            extra_lives_bought: 0,
        };
        assert_eq!(ledger.buy_multiplier(), Err(PurchaseError::Maxed));
        assert_eq!(ledger.coins, 1_000_000);
    }

    #[test]
    fn test_extra_life_ladder() {
        let mut ledger = Ledger {
            coins: 10_000,
            ..Ledger::default()
        };
        assert_eq!(ledger.max_lives(), 1);

        let paid: Vec<u64> = (0..4).map(|_| ledger.buy_extra_life().unwrap()).collect();
        assert_eq!(paid, EXTRA_LIFE_COSTS.to_vec());
        assert_eq!(ledger.max_lives(), MAX_LIVES);
        assert_eq!(ledger.coins, 10_000 - 1150);
        assert_eq!(ledger.buy_extra_life(), Err(PurchaseError::Maxed));
    }

    #[test]
    fn test_coin_value_scales_with_tier() {
        let ledger = Ledger {
            multiplier_level: 4,
            ..Ledger::default()
        };
        assert_eq!(ledger.economy().coin_value(), 4 * COIN_BASE_VALUE);
        assert_eq!(EconomyConfig::default().coin_value(), COIN_BASE_VALUE);
    }

    #[test]
    fn test_ladders_ascend() {
        assert!(MULTIPLIER_TIERS.windows(2).all(|w| w[0].price < w[1].price));
        assert!(EXTRA_LIFE_COSTS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_skin_lookup() {
        assert_eq!(skin_index("ninja"), Some(9));
        assert_eq!(skin_index("dragon"), None);
        assert_eq!(skin_at(99).key, "classic-red");
    }
}
