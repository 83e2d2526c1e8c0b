//! Page configuration
//!
//! A host page may set `window.__WALLET_CONFIG__` to a partial
//! [`WalletConfig`] object before the wasm bundle loads. Query parameters
//! take precedence over it:
//!
//! - `?network=dogeMainnet` selects the initial network
//! - `?log=debug` sets the console log level

use std::str::FromStr;

use js_sys::Reflect;
use lib_wallet::{Network, WalletConfig};
use wasm_bindgen::JsValue;

use crate::utils::constants::{LOG_LEVEL_PARAM, NETWORK_PARAM, PAGE_CONFIG_KEY};
use crate::utils::url::get_query_param;

/// Resolve the wallet configuration for this page.
///
/// Never fails: anything unreadable or invalid falls back to defaults with
/// a warning in the console.
pub fn load_config() -> WalletConfig {
    let mut config = page_config().unwrap_or_default();

    if let Some(raw) = get_query_param(NETWORK_PARAM) {
        match Network::from_str(&raw) {
            Ok(network) => config.default_network = network,
            Err(err) => log::warn!("Ignoring ?{}= override: {}", NETWORK_PARAM, err),
        }
    }

    if let Err(err) = config.validate() {
        log::warn!("Invalid wallet configuration ({}); using defaults", err);
        return WalletConfig::default();
    }

    log::debug!("Wallet configuration: {:?}", config);
    config
}

fn page_config() -> Option<WalletConfig> {
    let window = web_sys::window()?;
    let raw = Reflect::get(&window, &JsValue::from_str(PAGE_CONFIG_KEY)).ok()?;
    if raw.is_undefined() || raw.is_null() {
        return None;
    }

    match serde_wasm_bindgen::from_value::<WalletConfig>(raw) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Could not read window.{}: {}", PAGE_CONFIG_KEY, err);
            None
        }
    }
}

/// Console log level from `?log=`, defaulting to `Info`.
pub fn log_level() -> log::Level {
    parse_log_level(get_query_param(LOG_LEVEL_PARAM).as_deref())
}

fn parse_log_level(raw: Option<&str>) -> log::Level {
    raw.and_then(|value| log::Level::from_str(value).ok())
        .unwrap_or(log::Level::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level(Some("debug")), log::Level::Debug);
        assert_eq!(parse_log_level(Some("WARN")), log::Level::Warn);
        assert_eq!(parse_log_level(Some("loud")), log::Level::Info);
        assert_eq!(parse_log_level(None), log::Level::Info);
    }
}
