//! Wallet Connect Panel
//!
//! Owns one [`WalletManager`] for as long as the panel is mounted and
//! mirrors its snapshot into the shared wallet context.

use std::str::FromStr;

use leptos::prelude::*;
use lib_wallet::{ConnectionState, Network, WalletError, WalletManager, WalletSnapshot};

use crate::services::{BrowserCapabilities, BrowserRuntime};
use crate::state::wallet::use_wallet_context;

type BrowserWalletManager = WalletManager<BrowserCapabilities, BrowserRuntime>;

#[component]
pub fn WalletConnect() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let config = wallet_ctx.config.get_value();
    let snapshot = wallet_ctx.snapshot;

    let capabilities = BrowserCapabilities::new(config.global_key.clone(), wallet_ctx.hook_handle);
    let manager: BrowserWalletManager =
        WalletManager::new(capabilities, BrowserRuntime, config.clone());
    manager.subscribe(move |latest| snapshot.set(latest.clone()));
    manager.mount();
    let manager = StoredValue::new_local(manager);

    // Provider hook changed (extension announced itself)
    let hook_handle = wallet_ctx.hook_handle;
    Effect::new(move |_| {
        hook_handle.track();
        manager.with_value(|manager| manager.notify_reactive_changed());
    });

    on_cleanup(move || {
        manager.try_with_value(|manager| manager.unmount());
    });

    let not_installed = WalletError::not_installed(&config);
    let install_url = config.install_url.clone();
    let wallet_name = config.wallet_name.clone();

    view! {
        <div class="card wallet-connect">
            {move || {
                let current = snapshot.get();
                match current.state {
                    ConnectionState::Checking => {
                        view! {
                            <p class="wallet-status">
                                {format!("Checking for {} Wallet...", wallet_name)}
                            </p>
                        }
                            .into_any()
                    }
                    ConnectionState::NotInstalled => {
                        not_installed_view(manager, &not_installed, &wallet_name, &install_url).into_any()
                    }
                    ConnectionState::Connected { ref address } => {
                        connected_view(manager, address, &current).into_any()
                    }
                    _ => connect_form_view(manager, snapshot, &wallet_name).into_any(),
                }
            }}
        </div>
    }
}

fn not_installed_view(
    manager: StoredValue<BrowserWalletManager, LocalStorage>,
    error: &WalletError,
    wallet_name: &str,
    install_url: &str,
) -> impl IntoView {
    view! {
        <div class="wallet-not-installed">
            <h3>{error.to_string()}</h3>
            <p>{error.diagnostic()}</p>
            <a class="btn" href=install_url.to_string() target="_blank" rel="noopener noreferrer">
                {format!("Install {} Wallet", wallet_name)}
            </a>
            <button
                class="btn btn-secondary"
                on:click=move |_| manager.with_value(|manager| manager.connect())
            >
                "Try Connecting Anyway"
            </button>
        </div>
    }
}

fn connected_view(
    manager: StoredValue<BrowserWalletManager, LocalStorage>,
    address: &str,
    current: &WalletSnapshot,
) -> impl IntoView {
    view! {
        <div class="wallet-connected">
            <p class="wallet-label">"Connected Address:"</p>
            <p class="wallet-address">{address.to_string()}</p>
            <p class="wallet-meta">{connection_caption(current)}</p>
            <button
                class="btn btn-secondary"
                on:click=move |_| manager.with_value(|manager| manager.disconnect())
            >
                "Disconnect"
            </button>
        </div>
    }
}

/// Network wire name plus the source that found the wallet.
fn connection_caption(current: &WalletSnapshot) -> String {
    let source = current
        .source
        .map(|source| source.label())
        .unwrap_or("unknown");
    format!("Network: {} | Detected via: {}", current.network, source)
}

fn connect_form_view(
    manager: StoredValue<BrowserWalletManager, LocalStorage>,
    snapshot: RwSignal<WalletSnapshot>,
    wallet_name: &str,
) -> impl IntoView {
    let connecting = move || snapshot.with(|snapshot| snapshot.state.is_connecting());
    let connect_label = format!("Connect {} Wallet", wallet_name);

    let on_network_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        match Network::from_str(&value) {
            Ok(network) => manager.with_value(|manager| manager.set_network(network)),
            Err(err) => log::warn!("{}", err),
        }
    };

    view! {
        <div class="wallet-connect-form">
            <label for="network-select">"Network"</label>
            <select
                id="network-select"
                prop:value=move || snapshot.with(|snapshot| snapshot.network.as_str())
                on:change=on_network_change
                disabled=connecting
            >
                {Network::ALL
                    .iter()
                    .map(|network| {
                        view! {
                            <option value=network.as_str() title=network.label()>
                                {network.as_str()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>

            <button
                class="btn"
                disabled=connecting
                on:click=move |_| manager.with_value(|manager| manager.connect())
            >
                {move || if connecting() { "Connecting...".to_string() } else { connect_label.clone() }}
            </button>

            {move || {
                snapshot
                    .with(|snapshot| snapshot.error_message())
                    .map(|message| {
                        view! {
                            <div class="error-panel" style="white-space: pre-wrap;">
                                {message}
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use lib_wallet::HandleSource;

    use super::*;

    #[test]
    fn test_connection_caption_uses_wire_name() {
        let mut current = WalletSnapshot::new(Network::BellsTestnet);
        current.state = ConnectionState::Connected {
            address: "bel1qxyz".to_string(),
        };
        current.source = Some(HandleSource::GlobalScope);

        let caption = connection_caption(&current);
        assert!(caption.starts_with("Network: bellsTestnet |"));
        assert!(!caption.contains("Bells Testnet"));
    }

    #[test]
    fn test_connection_caption_without_source() {
        let current = WalletSnapshot::new(Network::DogeMainnet);
        assert_eq!(
            connection_caption(&current),
            "Network: dogeMainnet | Detected via: unknown"
        );
    }
}
