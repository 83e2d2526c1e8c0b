//! Test doubles: a tokio-backed runtime and a scripted wallet

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::capability::{CapabilityProvider, WalletHandle, WalletProvider};
use crate::error::ProviderError;
use crate::network::Network;
use crate::runtime::Runtime;

/// Runs on tokio's clock; needs a surrounding `LocalSet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

pub async fn run_local<F: Future>(future: F) -> F::Output {
    tokio::task::LocalSet::new().run_until(future).await
}

pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[derive(Clone)]
pub struct MockProvider {
    outcome: Result<String, ProviderError>,
    delay: Duration,
    calls: Rc<RefCell<Vec<Network>>>,
}

impl MockProvider {
    pub fn resolving(address: &str) -> Self {
        Self {
            outcome: Ok(address.to_string()),
            delay: Duration::ZERO,
            calls: Rc::default(),
        }
    }

    pub fn rejecting(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            delay: Duration::ZERO,
            calls: Rc::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Networks passed to `connect`, in call order.
    pub fn calls(&self) -> Vec<Network> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    async fn connect(&self, network: Network) -> Result<String, ProviderError> {
        self.calls.borrow_mut().push(network);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}

#[derive(Clone)]
pub struct MockHandle {
    provider: Option<MockProvider>,
}

impl MockHandle {
    pub fn with_provider(provider: MockProvider) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn locked() -> Self {
        Self { provider: None }
    }
}

impl WalletHandle for MockHandle {
    type Provider = MockProvider;

    fn provider(&self) -> Option<MockProvider> {
        self.provider.clone()
    }
}

/// Scripted behaviour of the manual initialiser.
#[derive(Clone, Default)]
pub enum ManualInit {
    #[default]
    Nothing,
    Throws,
    Returns(MockHandle),
    /// Returns the handle from the n-th call (1-based) on.
    ReturnsOnCall(u32, MockHandle),
}

#[derive(Default)]
struct MockState {
    reactive: RefCell<Option<MockHandle>>,
    global: RefCell<Option<MockHandle>>,
    manual: RefCell<ManualInit>,
    global_keys: RefCell<Vec<String>>,
    manual_calls: Cell<u32>,
    global_calls: Cell<u32>,
}

/// Capability provider whose sources are set by the test.
#[derive(Clone, Default)]
pub struct MockWallet {
    state: Rc<MockState>,
}

impl MockWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reactive(&self, handle: Option<MockHandle>) {
        *self.state.reactive.borrow_mut() = handle;
    }

    pub fn set_global(&self, handle: Option<MockHandle>) {
        *self.state.global.borrow_mut() = handle;
    }

    pub fn set_manual(&self, behaviour: ManualInit) {
        *self.state.manual.borrow_mut() = behaviour;
    }

    pub fn set_global_keys(&self, keys: &[&str]) {
        *self.state.global_keys.borrow_mut() = keys.iter().map(|k| k.to_string()).collect();
    }

    pub fn manual_calls(&self) -> u32 {
        self.state.manual_calls.get()
    }

    pub fn global_calls(&self) -> u32 {
        self.state.global_calls.get()
    }
}

impl CapabilityProvider for MockWallet {
    type Handle = MockHandle;

    fn reactive_handle(&self) -> Option<MockHandle> {
        self.state.reactive.borrow().clone()
    }

    fn manual_init(&self) -> Result<Option<MockHandle>, ProviderError> {
        let call = self.state.manual_calls.get() + 1;
        self.state.manual_calls.set(call);

        match &*self.state.manual.borrow() {
            ManualInit::Nothing => Ok(None),
            ManualInit::Throws => Err(ProviderError::new("initNintondo is not available")),
            ManualInit::Returns(handle) => Ok(Some(handle.clone())),
            ManualInit::ReturnsOnCall(n, handle) => Ok((call >= *n).then(|| handle.clone())),
        }
    }

    fn global_handle(&self) -> Option<MockHandle> {
        self.state.global_calls.set(self.state.global_calls.get() + 1);
        self.state.global.borrow().clone()
    }

    fn global_keys_matching(&self, needle: &str) -> Vec<String> {
        let needle = needle.to_lowercase();
        self.state
            .global_keys
            .borrow()
            .iter()
            .filter(|key| key.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
