//! # Wallet Availability & Connection Manager
//!
//! Owns the [`WalletSnapshot`] of one view and drives it from three
//! acquisition sources plus user actions.
//!
//! ## Acquisition
//!
//! On [`WalletManager::mount`]:
//!
//! 1. The reactive reference (A) and the global scope (C) are consulted once.
//! 2. The manual initialiser (B) is called immediately and then on
//!    [`ManualInitSchedule`] until it yields a handle.
//! 3. While still `Checking`, the sources are polled every
//!    `poll_interval_ms` and a detection window of `detection_window_ms`
//!    settles the state into `NotInstalled` if nothing turned up.
//!
//! The first handle to resolve becomes the active one; later sources never
//! replace it.
//!
//! ## Handshake
//!
//! [`WalletManager::connect`] runs up to `handshake_rounds` rounds, each
//! consulting A, cached B, fresh B and C in that order, pausing
//! `handshake_retry_delay_ms` between rounds. A connect while a handshake is
//! in flight is ignored.
//!
//! Every task lives in a [`TaskGroup`]; [`WalletManager::unmount`] cancels
//! all of them.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::capability::{CapabilityProvider, HandleSource, WalletHandle, WalletProvider};
use crate::config::WalletConfig;
use crate::diagnostics::{self, ProbeReport};
use crate::error::WalletError;
use crate::network::Network;
use crate::runtime::{Runtime, TaskGroup, TaskKind};
use crate::schedule::ManualInitSchedule;
use crate::state::{ConnectionState, WalletSnapshot};


type Observer = Rc<dyn Fn(&WalletSnapshot)>;

struct Inner<H> {
    snapshot: WalletSnapshot,
    /// Handle returned by the manual initialiser, once it succeeded.
    manual: Option<H>,
    /// First handle acquired from any source.
    active: Option<H>,
    mounted: bool,
    unmounted: bool,
}

struct Shared<C: CapabilityProvider, R> {
    capabilities: C,
    runtime: R,
    config: WalletConfig,
    inner: RefCell<Inner<C::Handle>>,
    tasks: RefCell<TaskGroup>,
    observers: RefCell<Vec<Observer>>,
}

/// Cheaply clonable handle to one view's wallet state.
pub struct WalletManager<C: CapabilityProvider, R: Runtime> {
    shared: Rc<Shared<C, R>>,
}

impl<C: CapabilityProvider, R: Runtime> Clone for WalletManager<C, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<C: CapabilityProvider, R: Runtime> WalletManager<C, R> {
    pub fn new(capabilities: C, runtime: R, config: WalletConfig) -> Self {
        let snapshot = WalletSnapshot::new(config.default_network);
        Self {
            shared: Rc::new(Shared {
                capabilities,
                runtime,
                config,
                inner: RefCell::new(Inner {
                    snapshot,
                    manual: None,
                    active: None,
                    mounted: false,
                    unmounted: false,
                }),
                tasks: RefCell::new(TaskGroup::new()),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.shared.config
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.shared.inner.borrow().snapshot.clone()
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.inner.borrow().snapshot.state.clone()
    }

    pub fn network(&self) -> Network {
        self.shared.inner.borrow().snapshot.network
    }

    pub fn source(&self) -> Option<HandleSource> {
        self.shared.inner.borrow().snapshot.source
    }

    /// Register `observer` and call it with the current snapshot right away.
    pub fn subscribe(&self, observer: impl Fn(&WalletSnapshot) + 'static) {
        let observer: Observer = Rc::new(observer);
        observer(&self.snapshot());
        self.shared.observers.borrow_mut().push(observer);
    }

    /// Start detection. Only the first call has an effect.
    pub fn mount(&self) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.mounted || inner.unmounted {
                log::warn!("wallet manager mounted twice; ignoring");
                return;
            }
            inner.mounted = true;
            inner.snapshot.state = ConnectionState::Checking;
        }
        log::info!("Checking for {} Wallet...", self.shared.config.wallet_name);
        self.emit();

        self.poll_sources();

        if !self.try_manual_init() {
            self.spawn_manual_init();
        }

        if self.state().is_checking() {
            self.spawn_detection();
        }
    }

    /// Cancel every task. The manager stays readable but inert.
    pub fn unmount(&self) {
        {
            let mut tasks = self.shared.tasks.borrow_mut();
            if !tasks.is_empty() {
                log::debug!("cancelling {} wallet tasks", tasks.len());
            }
            tasks.cancel_all();
        }
        self.shared.inner.borrow_mut().unmounted = true;
        log::debug!("wallet manager unmounted");
    }

    /// Re-read source A after the environment reported a change.
    pub fn notify_reactive_changed(&self) {
        if self.shared.inner.borrow().unmounted {
            return;
        }
        if let Some(handle) = self.shared.capabilities.reactive_handle() {
            self.acquire(HandleSource::Reactive, handle);
        }
    }

    pub fn set_network(&self, network: Network) {
        let changed = {
            let mut inner = self.shared.inner.borrow_mut();
            let changed = inner.snapshot.network != network;
            inner.snapshot.network = network;
            changed
        };
        if changed {
            log::debug!("network selected: {}", network);
            self.emit();
        }
    }

    /// Start a connect handshake. No-op unless the state allows connecting.
    pub fn connect(&self) {
        let network = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.unmounted || !inner.snapshot.state.can_connect() {
                log::debug!("connect ignored while {}", inner.snapshot.state.name());
                return;
            }
            inner.snapshot.state = ConnectionState::Connecting;
            inner.snapshot.network
        };
        self.emit();

        let manager = self.clone();
        self.spawn(TaskKind::Handshake, async move {
            let outcome = manager.handshake(network).await;
            manager.finish_handshake(outcome);
        });
    }

    /// Local clear of address and error. No call reaches the wallet.
    pub fn disconnect(&self) {
        let previous = {
            let mut inner = self.shared.inner.borrow_mut();
            let previous = inner.snapshot.state.clone();
            match previous {
                ConnectionState::Connected { .. }
                | ConnectionState::Connecting
                | ConnectionState::Error(_) => {
                    inner.snapshot.state = if inner.active.is_some() {
                        ConnectionState::Disconnected
                    } else {
                        ConnectionState::NotInstalled
                    };
                }
                _ => return,
            }
            previous
        };

        if previous.is_connecting() {
            self.shared.tasks.borrow_mut().cancel(TaskKind::Handshake);
        }
        log::info!("Wallet disconnected");
        self.emit();
    }

    fn emit(&self) {
        let snapshot = self.snapshot();
        log::debug!("wallet state: {}", snapshot.state.name());
        let observers = self.shared.observers.borrow().clone();
        for observer in observers {
            observer(&snapshot);
        }
    }

    fn spawn<F>(&self, kind: TaskKind, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        self.shared
            .tasks
            .borrow_mut()
            .spawn(&self.shared.runtime, kind, task);
    }

    fn spawn_manual_init(&self) {
        let manager = self.clone();
        let runtime = self.shared.runtime.clone();
        // The zero-delay attempt already ran in `mount`.
        let waits = ManualInitSchedule::from_config(&self.shared.config)
            .waits()
            .skip(1);

        self.spawn(TaskKind::ManualInit, async move {
            for wait in waits {
                runtime.sleep(wait).await;
                if manager.try_manual_init() {
                    break;
                }
            }
        });
    }

    fn spawn_detection(&self) {
        let config = &self.shared.config;

        let manager = self.clone();
        let runtime = self.shared.runtime.clone();
        let interval = config.poll_interval();
        self.spawn(TaskKind::GlobalPoll, async move {
            loop {
                runtime.sleep(interval).await;
                if manager.poll_sources() {
                    break;
                }
            }
        });

        let manager = self.clone();
        let runtime = self.shared.runtime.clone();
        let window = config.detection_window();
        self.spawn(TaskKind::DetectionWindow, async move {
            runtime.sleep(window).await;
            manager.close_detection();
        });
    }

    /// Consult A then C while checking. Returns `true` once detection is over.
    fn poll_sources(&self) -> bool {
        if !self.state().is_checking() {
            return true;
        }

        let capabilities = &self.shared.capabilities;
        if let Some(handle) = capabilities.reactive_handle() {
            self.acquire(HandleSource::Reactive, handle);
            return true;
        }
        if let Some(handle) = capabilities.global_handle() {
            self.acquire(HandleSource::GlobalScope, handle);
            return true;
        }
        false
    }

    fn close_detection(&self) {
        let closed = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.snapshot.state.is_checking() {
                inner.snapshot.state = ConnectionState::NotInstalled;
                true
            } else {
                false
            }
        };
        self.shared.tasks.borrow_mut().cancel(TaskKind::GlobalPoll);

        if closed {
            log::info!(
                "{} Wallet not detected within {} ms",
                self.shared.config.wallet_name,
                self.shared.config.detection_window_ms
            );
            self.emit();
        }
    }

    /// Cached manual-init handle, or a fresh initialiser call.
    fn manual_handle(&self) -> Option<C::Handle> {
        let cached = self.shared.inner.borrow().manual.clone();
        if cached.is_some() {
            return cached;
        }

        match self.shared.capabilities.manual_init() {
            Ok(Some(handle)) => {
                self.shared.inner.borrow_mut().manual = Some(handle.clone());
                self.acquire(HandleSource::ManualInit, handle.clone());
                Some(handle)
            }
            Ok(None) => None,
            Err(err) => {
                log::debug!("manual init not available yet: {}", err);
                None
            }
        }
    }

    fn try_manual_init(&self) -> bool {
        self.manual_handle().is_some()
    }

    /// Record `handle` if nothing was acquired yet and leave `Checking`.
    fn acquire(&self, source: HandleSource, handle: C::Handle) {
        let (first, left_checking) = {
            let mut inner = self.shared.inner.borrow_mut();
            let first = inner.active.is_none();
            if first {
                inner.active = Some(handle);
                inner.snapshot.source = Some(source);
            }
            let left_checking = inner.snapshot.state.is_checking();
            if left_checking {
                inner.snapshot.state = ConnectionState::Disconnected;
            }
            (first, left_checking)
        };

        if left_checking {
            let mut tasks = self.shared.tasks.borrow_mut();
            tasks.cancel(TaskKind::GlobalPoll);
            tasks.cancel(TaskKind::DetectionWindow);
        }
        if first {
            log::info!(
                "{} Wallet acquired via {}",
                self.shared.config.wallet_name,
                source
            );
        }
        if first || left_checking {
            self.emit();
        }
    }

    /// One handshake round: A, cached B, fresh B, C.
    fn consult_sources(&self) -> Option<(HandleSource, C::Handle)> {
        let capabilities = &self.shared.capabilities;

        if let Some(handle) = capabilities.reactive_handle() {
            self.acquire(HandleSource::Reactive, handle.clone());
            return Some((HandleSource::Reactive, handle));
        }
        if let Some(handle) = self.manual_handle() {
            return Some((HandleSource::ManualInit, handle));
        }
        if let Some(handle) = capabilities.global_handle() {
            self.acquire(HandleSource::GlobalScope, handle.clone());
            return Some((HandleSource::GlobalScope, handle));
        }
        None
    }

    async fn acquire_for_handshake(&self) -> Option<C::Handle> {
        let rounds = self.shared.config.handshake_rounds;
        let delay = self.shared.config.handshake_retry_delay();

        for round in 1..=rounds {
            if let Some((source, handle)) = self.consult_sources() {
                log::debug!("handshake round {} found wallet via {}", round, source);
                return Some(handle);
            }
            if round < rounds {
                self.shared.runtime.sleep(delay).await;
            }
        }
        None
    }

    async fn handshake(&self, network: Network) -> Result<String, WalletError> {
        let config = &self.shared.config;

        let Some(handle) = self.acquire_for_handshake().await else {
            let manual_cached = self.shared.inner.borrow().manual.is_some();
            let probe = ProbeReport::collect(
                &self.shared.capabilities,
                manual_cached,
                &config.global_key,
            );
            log::warn!(
                "{} Wallet not found after {} attempts: {}",
                config.wallet_name,
                config.handshake_rounds,
                serde_json::to_string(&probe).unwrap_or_default()
            );
            return Err(WalletError::HandshakeExhausted {
                wallet: config.wallet_name.clone(),
                attempts: config.handshake_rounds,
                probe,
            });
        };

        let Some(provider) = handle.provider() else {
            log::warn!("wallet handle has no provider; extension is probably locked");
            return Err(WalletError::ProviderUnavailable);
        };

        log::info!("Attempting to connect to wallet with network: {}", network);
        match provider.connect(network).await {
            Ok(address) => {
                log::info!("Connected! Address: {}", address);
                Ok(address)
            }
            Err(err) => {
                log::warn!("Wallet connection error: {}", err);
                let detail = diagnostics::excerpt(
                    err.stack.as_deref().unwrap_or(&err.message),
                    config.detail_excerpt_chars,
                );
                Err(WalletError::ConnectRejected {
                    message: err.message,
                    detail,
                })
            }
        }
    }

    fn finish_handshake(&self, outcome: Result<String, WalletError>) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            if !inner.snapshot.state.is_connecting() {
                return;
            }
            inner.snapshot.state = match outcome {
                Ok(address) => ConnectionState::Connected { address },
                Err(err) => ConnectionState::Error(err),
            };
        }
        self.emit();
    }
}
