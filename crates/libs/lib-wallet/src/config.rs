//! # Wallet Panel Configuration
//!
//! Timings and wallet identity used by [`crate::WalletManager`].
//!
//! Every field has a default, so a partial JSON object is a valid config:
//!
//! ```rust
//! use lib_wallet::{Network, WalletConfig};
//!
//! let config: WalletConfig = serde_json::from_str(r#"{ "default_network": "dogeMainnet" }"#).unwrap();
//! assert_eq!(config.default_network, Network::DogeMainnet);
//! assert_eq!(config.detection_window_ms, 10_000);
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::network::Network;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Display name used in panels and diagnostics
    pub wallet_name: String,

    /// Global property the extension injects (also the needle for key probing)
    pub global_key: String,

    /// Where the "not installed" panel sends the user
    pub install_url: String,

    /// Network selected when the view mounts
    pub default_network: Network,

    /// How long `Checking` may last before settling into `NotInstalled`
    pub detection_window_ms: u64,

    /// Global-scope polling period while checking
    pub poll_interval_ms: u64,

    /// One-shot manual-init retries, measured from mount
    pub manual_init_delays_ms: Vec<u64>,

    /// Repeating manual-init period, measured from mount
    pub manual_init_period_ms: u64,

    /// Acquisition rounds per connect attempt
    pub handshake_rounds: u32,

    /// Pause between handshake rounds
    pub handshake_retry_delay_ms: u64,

    /// Characters of a rejection's stack shown in the error panel
    pub detail_excerpt_chars: usize,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            wallet_name: "Nintondo".to_string(),
            global_key: "nintondo".to_string(),
            install_url: "https://chrome.google.com/webstore/detail/nintondo-wallet".to_string(),
            default_network: Network::default(),
            detection_window_ms: 10_000,
            poll_interval_ms: 1_000,
            manual_init_delays_ms: vec![500, 2_000],
            manual_init_period_ms: 3_000,
            handshake_rounds: 5,
            handshake_retry_delay_ms: 500,
            detail_excerpt_chars: 200,
        }
    }
}

impl WalletConfig {
    pub fn detection_window(&self) -> Duration {
        Duration::from_millis(self.detection_window_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn handshake_retry_delay(&self) -> Duration {
        Duration::from_millis(self.handshake_retry_delay_ms)
    }

    /// Validate values that would otherwise stall or spin the polling tasks.
    pub fn validate(&self) -> Result<(), String> {
        if self.global_key.trim().is_empty() {
            return Err("global_key must not be empty".to_string());
        }

        if self.detection_window_ms == 0 {
            return Err("detection_window_ms must be greater than 0".to_string());
        }

        if self.poll_interval_ms == 0 || self.poll_interval_ms > self.detection_window_ms {
            return Err(format!(
                "poll_interval_ms must be between 1 and detection_window_ms ({})",
                self.detection_window_ms
            ));
        }

        if self.manual_init_period_ms == 0 {
            return Err("manual_init_period_ms must be greater than 0".to_string());
        }

        if self.handshake_rounds == 0 {
            return Err("handshake_rounds must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WalletConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.detection_window(), Duration::from_secs(10));
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.handshake_retry_delay(), Duration::from_millis(500));
        assert_eq!(config.handshake_rounds, 5);
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = WalletConfig {
            detection_window_ms: 0,
            ..WalletConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let config = WalletConfig {
            handshake_rounds: 0,
            ..WalletConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "handshake_rounds must be at least 1"
        );
    }

    #[test]
    fn test_poll_interval_longer_than_window_rejected() {
        let config = WalletConfig {
            poll_interval_ms: 20_000,
            ..WalletConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
