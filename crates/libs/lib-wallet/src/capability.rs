//! External wallet capabilities
//!
//! The wallet object is owned by the browser extension. The core never
//! creates one; it only observes the sources that may hand one out:
//!
//! | Source | Meaning |
//! |--------|---------|
//! | A - [`HandleSource::Reactive`] | reference kept up to date by the UI framework |
//! | B - [`HandleSource::ManualInit`] | explicit initialiser call, may throw |
//! | C - [`HandleSource::GlobalScope`] | object injected into the page's global scope |
//!
//! Implementations are single-threaded; nothing here needs to be `Send`.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ProviderError;
use crate::network::Network;

/// The `provider` sub-interface of a wallet handle.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Ask the wallet to connect on `network`, resolving to the account address.
    async fn connect(&self, network: Network) -> Result<String, ProviderError>;
}

/// Opaque wallet object handed out by one of the sources.
pub trait WalletHandle: Clone + 'static {
    type Provider: WalletProvider;

    /// `None` while the extension is locked or not fully initialised.
    fn provider(&self) -> Option<Self::Provider>;
}

/// Access to the three acquisition sources.
pub trait CapabilityProvider: 'static {
    type Handle: WalletHandle;

    /// Source A. Cheap, side-effect free read of the current reference.
    fn reactive_handle(&self) -> Option<Self::Handle>;

    /// Source B. Callable repeatedly; `Err` means "not yet available".
    fn manual_init(&self) -> Result<Option<Self::Handle>, ProviderError>;

    /// Source C. Presence test on the well-known global.
    fn global_handle(&self) -> Option<Self::Handle>;

    /// Global keys containing `needle`, for diagnostics only.
    fn global_keys_matching(&self, needle: &str) -> Vec<String>;
}

/// Which source produced a handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleSource {
    Reactive,
    ManualInit,
    GlobalScope,
}

impl HandleSource {
    pub fn label(&self) -> &'static str {
        match self {
            HandleSource::Reactive => "provider hook",
            HandleSource::ManualInit => "manual init",
            HandleSource::GlobalScope => "global scope",
        }
    }
}

impl fmt::Display for HandleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
