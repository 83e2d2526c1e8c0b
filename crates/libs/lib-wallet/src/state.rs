//! Connection state machine
//!
//! ```text
//!            handle found                 connect
//! Checking ───────────────> Disconnected ─────────> Connecting ──> Connected
//!    │                          ^   ^                 │   ^            │
//!    │ window elapsed           │   └── disconnect ───┼───┼────────────┘
//!    v                          │                     v   │ retry
//! NotInstalled ── connect ──────┼──────────────────> Error┘
//!                               └──── disconnect ─────┘
//! ```

use crate::capability::HandleSource;
use crate::error::WalletError;
use crate::network::Network;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    /// Waiting for any source to yield a handle.
    Checking,
    /// Detection window elapsed with no handle.
    NotInstalled,
    /// A handle is available, no account connected.
    Disconnected,
    /// Handshake in flight.
    Connecting,
    Connected { address: String },
    Error(WalletError),
}

impl ConnectionState {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionState::Checking => "checking",
            ConnectionState::NotInstalled => "not_installed",
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected { .. } => "connected",
            ConnectionState::Error(_) => "error",
        }
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, ConnectionState::Checking)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    /// States from which a user-triggered connect starts a handshake.
    pub fn can_connect(&self) -> bool {
        matches!(
            self,
            ConnectionState::Disconnected | ConnectionState::Error(_) | ConnectionState::NotInstalled
        )
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            ConnectionState::Connected { address } => Some(address),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WalletError> {
        match self {
            ConnectionState::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// What the view renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletSnapshot {
    pub state: ConnectionState,
    pub network: Network,
    /// Source of the first acquired handle, if any.
    pub source: Option<HandleSource>,
}

impl WalletSnapshot {
    pub fn new(network: Network) -> Self {
        Self {
            state: ConnectionState::Checking,
            network,
            source: None,
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.state.address()
    }

    /// Multi-line text for the error panel.
    pub fn error_message(&self) -> Option<String> {
        self.state.error().map(WalletError::diagnostic)
    }
}

impl Default for WalletSnapshot {
    fn default() -> Self {
        Self::new(Network::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_allowed_only_when_idle() {
        assert!(ConnectionState::Disconnected.can_connect());
        assert!(ConnectionState::NotInstalled.can_connect());
        assert!(ConnectionState::Error(WalletError::ProviderUnavailable).can_connect());

        assert!(!ConnectionState::Checking.can_connect());
        assert!(!ConnectionState::Connecting.can_connect());
        assert!(!ConnectionState::Connected {
            address: "addr".to_string()
        }
        .can_connect());
    }

    #[test]
    fn test_snapshot_accessors() {
        let mut snapshot = WalletSnapshot::default();
        assert!(snapshot.state.is_checking());
        assert_eq!(snapshot.address(), None);
        assert_eq!(snapshot.error_message(), None);

        snapshot.state = ConnectionState::Connected {
            address: "addr123".to_string(),
        };
        assert_eq!(snapshot.address(), Some("addr123"));

        snapshot.state = ConnectionState::Error(WalletError::ProviderUnavailable);
        assert!(snapshot
            .error_message()
            .unwrap()
            .contains("provider is not available"));
    }
}
