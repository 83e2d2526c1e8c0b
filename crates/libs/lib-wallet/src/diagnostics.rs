//! Diagnostic texts and the read-only source probe
//!
//! Nothing here mutates acquisition state. The probe only reads the sources
//! so that error panels can say what was (not) found.

use serde::Serialize;

use crate::capability::CapabilityProvider;

/// Snapshot of which sources currently expose a wallet object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub from_reactive: bool,
    pub from_manual_init: bool,
    pub from_global: bool,
    /// Global-scope keys whose name contains the wallet key (case-insensitive).
    pub matching_global_keys: Vec<String>,
}

impl ProbeReport {
    pub fn collect<C: CapabilityProvider>(
        capabilities: &C,
        manual_cached: bool,
        global_key: &str,
    ) -> Self {
        Self {
            from_reactive: capabilities.reactive_handle().is_some(),
            from_manual_init: manual_cached,
            from_global: capabilities.global_handle().is_some(),
            matching_global_keys: capabilities.global_keys_matching(global_key),
        }
    }

    pub fn summary(&self) -> String {
        let keys = if self.matching_global_keys.is_empty() {
            "none".to_string()
        } else {
            self.matching_global_keys.join(", ")
        };
        format!(
            "hook: {}, manual init: {}, global: {}, matching globals: {}",
            yes_no(self.from_reactive),
            yes_no(self.from_manual_init),
            yes_no(self.from_global),
            keys
        )
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// First `max_chars` characters of `text`, on a char boundary.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub fn not_installed(wallet: &str) -> String {
    format!("Please install the {wallet} Wallet browser extension to continue.")
}

pub fn handshake_exhausted(wallet: &str, attempts: u32, probe: &ProbeReport) -> String {
    format!(
        "{wallet} Wallet object not found after {attempts} attempts.\n\n\
         The extension may not have injected into this page yet.\n\n\
         QUICK FIXES:\n\
         1. Reload the extension:\n   \
            - Go to chrome://extensions/ -> {wallet} Wallet\n   \
            - Click the reload icon (circular arrow)\n   \
            - Refresh this page (F5)\n\n\
         2. Make sure the wallet is unlocked:\n   \
            - Click the extension icon and enter your password if needed\n\n\
         3. Try clicking \"Connect Wallet\" again:\n   \
            - The connection attempt might trigger injection\n\n\
         4. Use a local domain when serving from localhost:\n   \
            - Add \"127.0.0.1 localhost.test\" to /etc/hosts\n   \
            - Open the page via http://localhost.test instead of http://localhost\n\n\
         Probe: {}",
        probe.summary()
    )
}

pub fn connect_rejected(message: &str, detail: &str) -> String {
    format!(
        "{message}\n\n\
         Common issues:\n\
         - Wallet extension is locked (click icon to unlock)\n\
         - Permission not granted (check extension popup for connection request)\n\
         - Network mismatch (check wallet network matches selected network)\n\
         - Extension not ready (try reloading extension and refreshing page)\n\n\
         Error details: {detail}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("héllo", 2), "hé");
        assert_eq!(excerpt("short", 200), "short");
        assert_eq!(excerpt(&"x".repeat(300), 200).len(), 200);
    }

    #[test]
    fn test_connect_rejected_contains_checklist() {
        let text = connect_rejected("User rejected", "Error: User rejected");
        assert!(text.starts_with("User rejected\n\n"));
        assert!(text.contains("Wallet extension is locked"));
        assert!(text.contains("Permission not granted"));
        assert!(text.contains("Network mismatch"));
        assert!(text.ends_with("Error details: Error: User rejected"));
    }

    #[test]
    fn test_handshake_exhausted_lists_remediation_and_probe() {
        let probe = ProbeReport {
            matching_global_keys: vec!["nintondoLoader".to_string()],
            ..ProbeReport::default()
        };
        let text = handshake_exhausted("Nintondo", 5, &probe);
        assert!(text.starts_with("Nintondo Wallet object not found after 5 attempts."));
        assert!(text.contains("Reload the extension"));
        assert!(text.contains("Make sure the wallet is unlocked"));
        assert!(text.contains("matching globals: nintondoLoader"));
    }

    #[test]
    fn test_probe_summary_without_keys() {
        let probe = ProbeReport {
            from_global: true,
            ..ProbeReport::default()
        };
        assert_eq!(
            probe.summary(),
            "hook: no, manual init: no, global: yes, matching globals: none"
        );
    }
}
