//! Wallet state management

use leptos::prelude::*;
use lib_wallet::{WalletConfig, WalletSnapshot};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::services::nintondo::{injected_handle, NintondoHandle};
use crate::utils::constants::WALLET_READY_EVENT;

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    /// Latest state pushed by the view's wallet manager
    pub snapshot: RwSignal<WalletSnapshot>,
    /// Provider-hook reference, refreshed when the extension announces itself.
    ///
    /// Stands in for the SDK's `NintondoProvider` context. It is read from the
    /// same `window.nintondo` object the global-scope probe sees, so a wallet
    /// injected before startup is reported as found via the provider hook.
    pub hook_handle: RwSignal<Option<NintondoHandle>, LocalStorage>,
    pub config: StoredValue<WalletConfig>,
}

impl WalletContext {
    pub fn new(config: WalletConfig) -> Self {
        Self {
            snapshot: RwSignal::new(WalletSnapshot::new(config.default_network)),
            hook_handle: RwSignal::new_local(None),
            config: StoredValue::new(config),
        }
    }

    pub fn address(&self) -> Option<String> {
        self.snapshot.with(|snapshot| snapshot.address().map(str::to_string))
    }

    /// Keep `hook_handle` in sync with the extension's ready event.
    fn watch_wallet_injection(&self) {
        let global_key = self.config.with_value(|config| config.global_key.clone());
        let hook_handle = self.hook_handle;
        let refresh = move || hook_handle.set(injected_handle(&global_key));
        refresh();

        let Some(window) = web_sys::window() else {
            log::warn!("No window available; provider hook disabled");
            return;
        };

        // Lives as long as the page, like the context itself.
        let listener = Closure::<dyn FnMut()>::new(refresh);
        if let Err(err) = window
            .add_event_listener_with_callback(WALLET_READY_EVENT, listener.as_ref().unchecked_ref())
        {
            log::warn!("Failed to listen for {}: {:?}", WALLET_READY_EVENT, err);
        }
        listener.forget();
    }
}

pub fn provide_wallet_context(config: WalletConfig) -> WalletContext {
    let context = WalletContext::new(config);
    context.watch_wallet_injection();
    provide_context(context);
    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
