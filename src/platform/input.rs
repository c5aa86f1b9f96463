//! Input mapping
//!
//! Every supported input collapses to a single "activate" intent: flap while
//! playing, otherwise start or continue a run.

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Activate,
}

/// Map a `KeyboardEvent.code` to an intent
pub fn intent_for_key(code: &str) -> Option<Intent> {
    match code {
        "Space" | "ArrowUp" => Some(Intent::Activate),
        _ => None,
    }
}

/// Mouse-down and touch-start always activate
pub fn intent_for_pointer() -> Intent {
    Intent::Activate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(intent_for_key("Space"), Some(Intent::Activate));
        assert_eq!(intent_for_key("ArrowUp"), Some(Intent::Activate));
        assert_eq!(intent_for_key("ArrowDown"), None);
        assert_eq!(intent_for_key("KeyW"), None);
    }
}
