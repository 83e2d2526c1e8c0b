//! # Error Types
//!
//! Errors surfaced by the wallet panel. None of them is fatal: every variant
//! is recovered locally and the user can retry by connecting again.
//!
//! ## Error Categories
//!
//! - **NotInstalled**: no handle appeared within the detection window
//! - **HandshakeExhausted**: every acquisition round of a connect attempt failed
//! - **ProviderUnavailable**: a handle exists but has no `provider`
//! - **ConnectRejected**: `provider.connect` itself rejected
//!
//! `Display` gives a one-line summary suitable for logs. The multi-line text
//! shown in the error panel comes from [`WalletError::diagnostic`].

use thiserror::Error;

use crate::config::WalletConfig;
use crate::diagnostics::{self, ProbeReport};

/// Failure of a connect attempt or of wallet detection.
///
/// `Clone + PartialEq` so the error can sit inside UI state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No wallet object appeared before the detection window closed.
    #[error("{wallet} Wallet not found")]
    NotInstalled { wallet: String, install_url: String },

    /// All handshake rounds ran without acquiring a handle.
    #[error("{wallet} Wallet object not found after {attempts} attempts")]
    HandshakeExhausted {
        wallet: String,
        attempts: u32,
        probe: ProbeReport,
    },

    /// The handle has no provider; usually a locked extension.
    #[error("Wallet found but provider is not available. Please unlock the wallet extension by clicking the extension icon.")]
    ProviderUnavailable,

    /// `provider.connect` rejected.
    #[error("{message}")]
    ConnectRejected { message: String, detail: String },
}

impl WalletError {
    pub fn not_installed(config: &WalletConfig) -> Self {
        WalletError::NotInstalled {
            wallet: config.wallet_name.clone(),
            install_url: config.install_url.clone(),
        }
    }

    /// Full text for the error panel. Line breaks are meant to be preserved.
    pub fn diagnostic(&self) -> String {
        match self {
            WalletError::NotInstalled { wallet, .. } => diagnostics::not_installed(wallet),
            WalletError::HandshakeExhausted {
                wallet,
                attempts,
                probe,
            } => diagnostics::handshake_exhausted(wallet, *attempts, probe),
            WalletError::ProviderUnavailable => self.to_string(),
            WalletError::ConnectRejected { message, detail } => {
                diagnostics::connect_rejected(message, detail)
            }
        }
    }
}

/// Rejection coming back from the external wallet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
    pub stack: Option<String>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// A network name outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown network: {0}")]
pub struct NetworkParseError(pub String);
