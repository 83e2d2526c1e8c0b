//! # Wallet Availability & Connection Core
//!
//! Platform-independent logic behind the Bellschain Game wallet panel.
//!
//! The browser wallet extension injects its object into the page at an
//! unpredictable moment, so the panel races three acquisition sources against
//! a bounded detection window and then drives a connect handshake against
//! whichever source produced a handle.
//!
//! ## Structure
//!
//! - **[`network`]**: The fixed set of supported networks
//! - **[`capability`]**: Traits for the externally supplied wallet objects
//! - **[`runtime`]**: Timer/spawn abstraction and cancellable task groups
//! - **[`schedule`]**: Manual-initialisation retry schedule
//! - **[`state`]**: Connection state machine and snapshots
//! - **[`manager`]**: [`WalletManager`], which owns state and drives the sources
//! - **[`diagnostics`]**: Read-only probe report and multi-line error texts
//! - **[`error`]**: Error taxonomy
//! - **[`config`]**: Timings and wallet identity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lib_wallet::{WalletConfig, WalletManager};
//!
//! let manager = WalletManager::new(capabilities, runtime, WalletConfig::default());
//! manager.subscribe(|snapshot| render(snapshot));
//! manager.mount();
//!
//! // later, from the UI
//! manager.connect();
//! manager.unmount();
//! ```

pub mod capability;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod manager;
pub mod network;
pub mod runtime;
pub mod schedule;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use capability::{CapabilityProvider, HandleSource, WalletHandle, WalletProvider};
pub use config::WalletConfig;
pub use diagnostics::ProbeReport;
pub use error::{NetworkParseError, ProviderError, WalletError};
pub use manager::WalletManager;
pub use network::Network;
pub use runtime::{Runtime, TaskGroup, TaskKind};
pub use state::{ConnectionState, WalletSnapshot};
