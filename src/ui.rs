//! HUD and shop text
//!
//! Pure formatting so the DOM layer only copies strings into elements.

use crate::economy::{Ledger, MAX_LIVES};
use crate::leaderboard::Leaderboard;

/// Currency suffix shown after every balance
pub const CURRENCY: &str = "TNKc";

/// A shop button's label and whether it can be pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub enabled: bool,
}

/// Format a balance with thousands separators (`12,345 TNKc`)
pub fn format_currency(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + CURRENCY.len() + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(' ');
    out.push_str(CURRENCY);
    out
}

pub fn lives_label(remaining: u8, max: u8) -> String {
    format!("{remaining} / {max}")
}

/// Current multiplier, e.g. `2x (Level 2)`
pub fn multiplier_info(ledger: &Ledger) -> String {
    let tier = ledger.current_tier();
    format!("{}x (Level {})", tier.multiplier, tier.level)
}

pub fn multiplier_button(ledger: &Ledger) -> ButtonView {
    match ledger.next_tier() {
        Some(next) => ButtonView {
            label: format!("Upgrade ({}x for {} {})", next.multiplier, next.price, CURRENCY),
            enabled: ledger.coins >= next.price,
        },
        None => ButtonView {
            label: "Maxed".to_string(),
            enabled: false,
        },
    }
}

/// Lives owned out of the cap, e.g. `3 / 5 lives`
pub fn extra_life_info(ledger: &Ledger) -> String {
    format!("{} / {} lives", ledger.max_lives(), MAX_LIVES)
}

pub fn extra_life_button(ledger: &Ledger) -> ButtonView {
    match ledger.next_life_cost() {
        Some(cost) => ButtonView {
            label: format!("Buy extra ({cost} {CURRENCY})"),
            enabled: ledger.coins >= cost,
        },
        None => ButtonView {
            label: "Lives maxed".to_string(),
            enabled: false,
        },
    }
}

/// Numbered rows, e.g. `1. 240 - TracBird`
pub fn leaderboard_lines(board: &Leaderboard) -> Vec<String> {
    board
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {} - {}", i + 1, e.score, e.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "0 TNKc");
        assert_eq!(format_currency(999), "999 TNKc");
        assert_eq!(format_currency(1000), "1,000 TNKc");
        assert_eq!(format_currency(1234567), "1,234,567 TNKc");
    }

    #[test]
    fn test_shop_buttons() {
        let mut ledger = Ledger::default();
        assert_eq!(multiplier_info(&ledger), "1x (Level 1)");
        assert_eq!(
            multiplier_button(&ledger),
            ButtonView {
                label: "Upgrade (2x for 100 TNKc)".to_string(),
                enabled: false,
            }
        );
        assert_eq!(extra_life_info(&ledger), "1 / 5 lives");

        ledger.coins = 150;
        assert!(multiplier_button(&ledger).enabled);
        assert!(extra_life_button(&ledger).enabled);

        ledger.multiplier_level = 6;
        ledger.extra_lives_bought = 4;
        assert_eq!(multiplier_button(&ledger).label, "Maxed");
        assert!(!extra_life_button(&ledger).enabled);
        assert_eq!(extra_life_info(&ledger), "5 / 5 lives");
    }

    #[test]
    fn test_leaderboard_lines() {
        let board = Leaderboard::seeded(1_000_000.0);
        let lines = leaderboard_lines(&board);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "1. 240 - TracBird");
        assert_eq!(lives_label(2, 3), "2 / 3");
    }
}
