//! Application constants

pub const APP_TITLE: &str = "Bellschain Game";
pub const APP_TAGLINE: &str = "Welcome to the on-chain game!";

/// Window property a page may set to override [`lib_wallet::WalletConfig`]
pub const PAGE_CONFIG_KEY: &str = "__WALLET_CONFIG__";

/// Dispatched on `window` by the extension once its object is injected
pub const WALLET_READY_EVENT: &str = "nintondo#initialized";

// Query parameters
pub const NETWORK_PARAM: &str = "network";
pub const LOG_LEVEL_PARAM: &str = "log";
