//! Optional wallet link
//!
//! The linked address only names leaderboard entries. Connecting is
//! fire-and-forget: the request runs on its own and reports back through a
//! callback, never touching the round in progress.

/// Wallet connection state shown next to the wallet button
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WalletStatus {
    #[default]
    Idle,
    Connecting,
    Connected(String),
    Failed,
    /// No injected provider; the game works fine without one
    NotRequired,
}

impl WalletStatus {
    pub fn label(&self) -> String {
        match self {
            WalletStatus::Idle => "wallet idle".to_string(),
            WalletStatus::Connecting => "connecting...".to_string(),
            WalletStatus::Connected(address) => {
                format!("connected {}", format_address(Some(address)))
            }
            WalletStatus::Failed => "wallet connection failed".to_string(),
            WalletStatus::NotRequired => {
                "MetaMask / WalletConnect supported (not required)".to_string()
            }
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            WalletStatus::Connecting => "connecting...",
            WalletStatus::Connected(_) => "Refresh Wallet",
            _ => "Connect Wallet",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, WalletStatus::Connecting)
    }
}

/// Shorten an address for display (`0x1234...abcd`)
pub fn format_address(address: Option<&str>) -> String {
    match address {
        None | Some("") => "anonymous".to_string(),
        Some(a) if a.chars().count() <= 10 => a.to_string(),
        Some(a) => {
            let chars: Vec<char> = a.chars().collect();
            let head: String = chars[..6].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}...{tail}")
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use js_sys::{Array, Object, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    /// The injected EIP-1193 provider, if any
    fn provider() -> Option<Object> {
        let window = web_sys::window()?;
        Reflect::get(&window, &JsValue::from_str("ethereum"))
            .ok()
            .filter(|v| v.is_object())
            .map(|v| v.unchecked_into::<Object>())
    }

    pub fn provider_available() -> bool {
        provider().is_some()
    }

    async fn request_accounts(provider: Object) -> Result<Option<String>, String> {
        let request = Reflect::get(&provider, &JsValue::from_str("request"))
            .map_err(|e| format!("{e:?}"))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| "provider has no request()".to_string())?;

        let args = Object::new();
        Reflect::set(
            &args,
            &JsValue::from_str("method"),
            &JsValue::from_str("eth_requestAccounts"),
        )
        .map_err(|e| format!("{e:?}"))?;

        let promise: Promise = request
            .call1(&provider, &args)
            .map_err(|e| format!("{e:?}"))?
            .dyn_into()
            .map_err(|_| "request() did not return a promise".to_string())?;

        let accounts = JsFuture::from(promise).await.map_err(|e| format!("{e:?}"))?;
        Ok(accounts
            .dyn_into::<Array>()
            .ok()
            .and_then(|list| list.get(0).as_string()))
    }

    /// Spawn the account request; `on_done` runs when the wallet answers
    pub fn connect(on_done: impl FnOnce(Result<Option<String>, String>) + 'static) {
        let Some(provider) = provider() else {
            on_done(Err("no wallet provider".to_string()));
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            on_done(request_accounts(provider).await);
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{connect, provider_available};

/// Native builds never have an injected wallet
#[cfg(not(target_arch = "wasm32"))]
pub fn provider_available() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        assert_eq!(format_address(None), "anonymous");
        assert_eq!(format_address(Some("")), "anonymous");
        assert_eq!(format_address(Some("0xabc")), "0xabc");
        assert_eq!(format_address(Some("0x12345678")), "0x12345678");
        assert_eq!(
            format_address(Some("0x1234567890abcdef1234")),
            "0x1234...1234"
        );
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(WalletStatus::Idle.label(), "wallet idle");
        assert_eq!(
            WalletStatus::Connected("0xdeadbeefcafe0001".into()).label(),
            "connected 0xdead...0001"
        );
        assert_eq!(WalletStatus::Connected("x".into()).button_label(), "Refresh Wallet");
        assert!(WalletStatus::Connecting.is_busy());
        assert!(!provider_available());
    }
}
