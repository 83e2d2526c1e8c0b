//! Nintondo Wallet integration via wasm-bindgen
//!
//! The extension injects `window.nintondo` some time after page load. This
//! module exposes the three places a handle can come from (provider hook
//! signal, SDK initialiser, global object) as a [`CapabilityProvider`].

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use leptos::prelude::*;
use lib_wallet::{CapabilityProvider, Network, ProviderError, WalletHandle, WalletProvider};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

// ============================================================================
// JAVASCRIPT INTEROP
// ============================================================================

#[wasm_bindgen(inline_js = "
export function initNintondo(key) {
    // Bundled SDK, when the page ships one
    const sdk = globalThis.nintondoSdk;
    if (sdk && typeof sdk.initNintondo === 'function') {
        return sdk.initNintondo() || null;
    }

    // Otherwise accept the injected object once it carries a provider
    const injected = globalThis[key];
    if (injected && injected.provider) {
        return injected;
    }
    return null;
}

export function probeGlobal(key) {
    return typeof globalThis[key] !== 'undefined' ? globalThis[key] : null;
}

export function globalKeysMatching(needle) {
    const lower = needle.toLowerCase();
    return Object.keys(globalThis).filter(k => k.toLowerCase().includes(lower));
}
")]
extern "C" {
    /// Manual initialiser; may throw while the extension is still loading
    #[wasm_bindgen(catch)]
    fn initNintondo(key: &str) -> Result<JsValue, JsValue>;

    /// Injected global, or null
    fn probeGlobal(key: &str) -> JsValue;

    fn globalKeysMatching(needle: &str) -> Array;
}

fn present(value: JsValue) -> Option<JsValue> {
    if value.is_null() || value.is_undefined() {
        None
    } else {
        Some(value)
    }
}

/// Read the injected global right now.
pub fn injected_handle(global_key: &str) -> Option<NintondoHandle> {
    present(probeGlobal(global_key)).map(NintondoHandle)
}

/// Convert a thrown/rejected JS value, keeping `message` and `stack` of `Error`s.
fn provider_error(value: JsValue) -> ProviderError {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        let message = String::from(err.message());
        let stack = Reflect::get(err, &JsValue::from_str("stack"))
            .ok()
            .and_then(|stack| stack.as_string());
        return ProviderError { message, stack };
    }

    let detail = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    ProviderError::new("Failed to connect wallet").with_stack(detail)
}

// ============================================================================
// HANDLE / PROVIDER
// ============================================================================

/// The extension's wallet object.
#[derive(Clone, Debug)]
pub struct NintondoHandle(JsValue);

impl WalletHandle for NintondoHandle {
    type Provider = NintondoProvider;

    fn provider(&self) -> Option<NintondoProvider> {
        Reflect::get(&self.0, &JsValue::from_str("provider"))
            .ok()
            .and_then(present)
            .map(NintondoProvider)
    }
}

/// `wallet.provider`
#[derive(Clone, Debug)]
pub struct NintondoProvider(JsValue);

#[async_trait(?Send)]
impl WalletProvider for NintondoProvider {
    async fn connect(&self, network: Network) -> Result<String, ProviderError> {
        let connect = Reflect::get(&self.0, &JsValue::from_str("connect")).map_err(provider_error)?;
        let connect: Function = connect
            .dyn_into()
            .map_err(|_| ProviderError::new("provider.connect is not a function"))?;

        let pending = connect
            .call1(&self.0, &JsValue::from_str(network.as_str()))
            .map_err(provider_error)?;
        let address = JsFuture::from(Promise::resolve(&pending))
            .await
            .map_err(provider_error)?;

        address
            .as_string()
            .ok_or_else(|| ProviderError::new("Wallet returned an address that is not a string"))
    }
}

// ============================================================================
// CAPABILITY PROVIDER
// ============================================================================

/// Browser sources for [`lib_wallet::WalletManager`].
#[derive(Clone)]
pub struct BrowserCapabilities {
    global_key: String,
    hook_handle: RwSignal<Option<NintondoHandle>, LocalStorage>,
}

impl BrowserCapabilities {
    pub fn new(
        global_key: impl Into<String>,
        hook_handle: RwSignal<Option<NintondoHandle>, LocalStorage>,
    ) -> Self {
        Self {
            global_key: global_key.into(),
            hook_handle,
        }
    }
}

impl CapabilityProvider for BrowserCapabilities {
    type Handle = NintondoHandle;

    fn reactive_handle(&self) -> Option<NintondoHandle> {
        self.hook_handle.try_get_untracked().flatten()
    }

    fn manual_init(&self) -> Result<Option<NintondoHandle>, ProviderError> {
        initNintondo(&self.global_key)
            .map(|value| present(value).map(NintondoHandle))
            .map_err(provider_error)
    }

    fn global_handle(&self) -> Option<NintondoHandle> {
        injected_handle(&self.global_key)
    }

    fn global_keys_matching(&self, needle: &str) -> Vec<String> {
        globalKeysMatching(needle)
            .iter()
            .filter_map(|key| key.as_string())
            .collect()
    }
}
