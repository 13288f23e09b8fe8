//! Lifecycle of the single database handle shared by all repository calls.
//!
//! ## Connecting
//!
//! [`ConnectionManager::connect`] is idempotent: with a healthy handle it
//! returns immediately. Otherwise it validates the settings (a missing value
//! is fatal and never retried) and runs a bounded retry loop: up to
//! [`RetryPolicy::max_attempts`] opens with a fixed delay between them. The
//! attempt counter is reset after success and after exhaustion.
//!
//! ## Health signals
//!
//! The driver reports heartbeat and pool events through a [`SignalSender`].
//! One supervisor task consumes them: a healthy-to-unhealthy transition
//! spawns a background reconnect, and a success signal marks an existing
//! handle healthy again. Every open gets a fresh generation stamped on its
//! sender; only signals from the generation of the installed handle count,
//! so a replaced client shutting down its pool, or a client that failed to
//! open, cannot flip the state of the current one. A background reconnect that exhausts its attempts
//! only logs; requests keep failing with "not connected" until the driver
//! recovers or a later reconnect succeeds.
//!
//! ## Serialization
//!
//! Every retry chain, startup or background, runs while holding `gate`.
//! `connect` waits for it; background triggers use `try_lock` and are
//! dropped when a chain is already running.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::{debug, error, info, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

const DEFAULT_SCHEME: &str = "mongodb+srv://";
const DEFAULT_URI_OPTIONS: &str = "retryWrites=true&w=majority";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of open attempts per chain, including the first.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Connection settings as configured. Credentials may be absent here; they
/// are checked when a connection is requested.
#[derive(Clone, Default)]
pub struct ConnectionSettings {
    pub account: Option<String>,
    pub secret: Option<String>,
    pub host: Option<String>,
    pub database: String,
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("account", &self.account)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("database", &self.database)
            .finish()
    }
}

impl ConnectionSettings {
    /// Resolve the settings into a usable target, failing on the first
    /// missing value.
    pub fn target(&self) -> Result<ConnectionTarget, ConnectionError> {
        Ok(ConnectionTarget {
            account: required(&self.account, "MONGODB_USER")?,
            secret: required(&self.secret, "MONGODB_PASSWORD")?,
            host: required(&self.host, "MONGODB_HOST")?,
            database: self.database.clone(),
        })
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ConnectionError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConnectionError::MissingSetting(name))
}

/// Fully resolved connection parameters.
#[derive(Clone)]
pub struct ConnectionTarget {
    pub account: String,
    pub secret: String,
    pub host: String,
    pub database: String,
}

impl ConnectionTarget {
    /// Connection string without credentials; those are supplied separately
    /// so they never need URI escaping.
    pub fn uri(&self) -> String {
        if self.host.contains("://") {
            self.host.clone()
        } else {
            format!(
                "{DEFAULT_SCHEME}{}/?{DEFAULT_URI_OPTIONS}",
                self.host.trim_end_matches('/')
            )
        }
    }
}

/// Low-level health events forwarded from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionSignal {
    HeartbeatSucceeded,
    HeartbeatFailed,
    PoolReady,
    PoolClosed,
}

impl ConnectionSignal {
    fn is_failure(self) -> bool {
        matches!(self, Self::HeartbeatFailed | Self::PoolClosed)
    }
}

type StampedSignal = (u64, ConnectionSignal);

/// Cloneable sink handed to the connector on every open, tagged with that
/// open's generation.
#[derive(Debug, Clone)]
pub struct SignalSender {
    generation: u64,
    tx: mpsc::UnboundedSender<StampedSignal>,
}

impl SignalSender {
    pub fn send(&self, signal: ConnectionSignal) {
        // The manager may already be gone during process teardown.
        let _ = self.tx.send((self.generation, signal));
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("missing required database setting {0}")]
    MissingSetting(&'static str),
    #[error("could not connect to the database after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("database is not connected")]
    NotConnected,
    #[error("connection manager has been closed")]
    Closed,
}

/// Opens and closes handles for a concrete database driver.
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open and verify a connection. Health events for the new connection
    /// must be reported through `signals`.
    fn open(
        &self,
        target: &ConnectionTarget,
        signals: SignalSender,
    ) -> impl Future<Output = Result<Self::Handle, Self::Error>> + Send;

    fn close(&self, handle: Self::Handle) -> impl Future<Output = ()> + Send;
}

/// Process-wide owner of the database handle. Cheap to clone; all clones
/// share state.
pub struct ConnectionManager<C: Connector> {
    shared: Arc<Shared<C>>,
}

impl<C: Connector> Clone for ConnectionManager<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<C: Connector> {
    connector: C,
    settings: ConnectionSettings,
    policy: RetryPolicy,
    handle: RwLock<Option<C::Handle>>,
    healthy: AtomicBool,
    attempts: AtomicU32,
    closed: AtomicBool,
    gate: Mutex<()>,
    signals: mpsc::UnboundedSender<StampedSignal>,
    /// Last generation handed out to an open attempt.
    issued: AtomicU64,
    /// Generation of the installed handle; 0 when there is none.
    current: AtomicU64,
}

impl<C: Connector> ConnectionManager<C> {
    /// Create the manager and start its signal supervisor. Must be called
    /// inside a tokio runtime. No connection is attempted yet.
    pub fn new(connector: C, settings: ConnectionSettings, policy: RetryPolicy) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared {
            connector,
            settings,
            policy,
            handle: RwLock::new(None),
            healthy: AtomicBool::new(false),
            attempts: AtomicU32::new(0),
            closed: AtomicBool::new(false),
            gate: Mutex::new(()),
            signals: tx,
            issued: AtomicU64::new(0),
            current: AtomicU64::new(0),
        });
        tokio::spawn(supervise(Arc::downgrade(&shared), rx));
        Self { shared }
    }

    /// Return the active handle, connecting first if there is none.
    pub async fn connect(&self) -> Result<C::Handle, ConnectionError> {
        if let Ok(handle) = self.handle().await {
            return Ok(handle);
        }
        let target = self.shared.settings.target()?;

        let _gate = self.shared.gate.lock().await;
        // Another chain may have connected while we waited.
        if let Ok(handle) = self.handle().await {
            return Ok(handle);
        }
        self.shared.connect_with_retry(&target).await
    }

    /// The active handle, or [`ConnectionError::NotConnected`] when there is
    /// no handle or the connection is currently unhealthy.
    pub async fn handle(&self) -> Result<C::Handle, ConnectionError> {
        let guard = self.shared.handle.read().await;
        match guard.as_ref() {
            Some(handle) if self.shared.healthy.load(Ordering::Acquire) => Ok(handle.clone()),
            _ => Err(ConnectionError::NotConnected),
        }
    }

    /// Release the connection. Safe to call without one. Later health
    /// signals are ignored.
    pub async fn close(&self) {
        self.shared.closed.store(true, Ordering::Release);
        self.shared.healthy.store(false, Ordering::Release);
        let handle = {
            let mut slot = self.shared.handle.write().await;
            self.shared.current.store(0, Ordering::Release);
            slot.take()
        };
        if let Some(handle) = handle {
            self.shared.connector.close(handle).await;
            info!("Database connection closed");
        }
    }

    #[cfg(test)]
    fn attempts(&self) -> u32 {
        self.shared.attempts.load(Ordering::Acquire)
    }
}

impl<C: Connector> Shared<C> {
    /// Bounded retry loop. Callers must hold `gate`.
    async fn connect_with_retry(
        &self,
        target: &ConnectionTarget,
    ) -> Result<C::Handle, ConnectionError> {
        let max_attempts = self.policy.max_attempts.max(1);
        loop {
            if self.closed.load(Ordering::Acquire) {
                return Err(ConnectionError::Closed);
            }

            let attempt = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;
            let generation = self.issued.fetch_add(1, Ordering::AcqRel) + 1;
            info!(attempt, max_attempts, generation, host = %target.host, "Connecting to database");

            let signals = SignalSender {
                generation,
                tx: self.signals.clone(),
            };
            match self.connector.open(target, signals).await {
                Ok(handle) => {
                    self.attempts.store(0, Ordering::Release);
                    if self.closed.load(Ordering::Acquire) {
                        self.connector.close(handle).await;
                        return Err(ConnectionError::Closed);
                    }
                    let previous = {
                        let mut slot = self.handle.write().await;
                        self.current.store(generation, Ordering::Release);
                        self.healthy.store(true, Ordering::Release);
                        slot.replace(handle.clone())
                    };
                    if let Some(previous) = previous {
                        self.connector.close(previous).await;
                    }
                    info!(attempt, database = %target.database, "Database connection established");
                    return Ok(handle);
                }
                Err(err) if attempt >= max_attempts => {
                    self.attempts.store(0, Ordering::Release);
                    error!(attempts = attempt, error = %err, "Giving up on database connection");
                    return Err(ConnectionError::RetriesExhausted {
                        attempts: attempt,
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    warn!(
                        attempt,
                        max_attempts,
                        error = %err,
                        retry_in_secs = self.policy.delay.as_secs_f64(),
                        "Database connection failed, retrying"
                    );
                    tokio::time::sleep(self.policy.delay).await;
                }
            }
        }
    }

    async fn mark_healthy(&self) {
        if self.handle.read().await.is_some() && !self.healthy.swap(true, Ordering::AcqRel) {
            info!("Database connection healthy again");
        }
    }

    /// Fire-and-forget reconnect triggered by a health signal.
    async fn reconnect(self: Arc<Self>) {
        let Ok(_gate) = self.gate.try_lock() else {
            debug!("Reconnect already in progress, skipping");
            return;
        };
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        let target = match self.settings.target() {
            Ok(target) => target,
            Err(err) => {
                error!(error = %err, "Cannot reconnect");
                return;
            }
        };
        if let Err(err) = self.connect_with_retry(&target).await {
            error!(error = %err, "Background reconnect failed; database stays disconnected");
        }
    }
}

async fn supervise<C: Connector>(
    shared: Weak<Shared<C>>,
    mut signals: mpsc::UnboundedReceiver<StampedSignal>,
) {
    while let Some((generation, signal)) = signals.recv().await {
        let Some(shared) = shared.upgrade() else {
            break;
        };
        if shared.closed.load(Ordering::Acquire) {
            continue;
        }
        if generation != shared.current.load(Ordering::Acquire) {
            debug!(generation, ?signal, "Ignoring signal from a retired connection");
            continue;
        }

        if signal.is_failure() {
            // Only the transition away from healthy starts a reconnect;
            // repeated failures while already down do not pile up chains.
            if shared.healthy.swap(false, Ordering::AcqRel) {
                warn!(?signal, "Database connection lost, reconnecting in background");
                tokio::spawn(shared.reconnect());
            }
        } else {
            shared.mark_healthy().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::time::Instant;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    /// Scripted connector: pops one outcome per open, falling back to
    /// `default_ok` when the script runs out. Handles are the open count, and
    /// the sender of open `n` is kept at index `n - 1`.
    #[derive(Clone, Default)]
    struct ScriptedConnector {
        script: Arc<StdMutex<VecDeque<bool>>>,
        default_ok: bool,
        opens: Arc<AtomicU32>,
        closed: Arc<StdMutex<Vec<u32>>>,
        senders: Arc<StdMutex<Vec<SignalSender>>>,
        pool_closed_on_close: bool,
    }

    impl ScriptedConnector {
        fn new(script: &[bool], default_ok: bool) -> Self {
            Self {
                script: Arc::new(StdMutex::new(script.iter().copied().collect())),
                default_ok,
                ..Default::default()
            }
        }

        /// Like the driver: closing a client shuts its pool down, which
        /// reports `PoolClosed` through that client's own sender.
        fn reporting_pool_close(mut self) -> Self {
            self.pool_closed_on_close = true;
            self
        }

        fn opens(&self) -> u32 {
            self.opens.load(Ordering::SeqCst)
        }

        fn closed(&self) -> Vec<u32> {
            self.closed.lock().unwrap().clone()
        }

        /// Send `signal` through the sender given to open number `open`.
        fn emit(&self, open: u32, signal: ConnectionSignal) {
            let senders = self.senders.lock().unwrap();
            senders[open as usize - 1].send(signal);
        }
    }

    impl Connector for ScriptedConnector {
        type Handle = u32;
        type Error = Refused;

        async fn open(
            &self,
            _target: &ConnectionTarget,
            signals: SignalSender,
        ) -> Result<u32, Refused> {
            let n = self.opens.fetch_add(1, Ordering::SeqCst) + 1;
            self.senders.lock().unwrap().push(signals);
            let ok = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(self.default_ok);
            if ok {
                Ok(n)
            } else {
                Err(Refused)
            }
        }

        async fn close(&self, handle: u32) {
            self.closed.lock().unwrap().push(handle);
            if self.pool_closed_on_close {
                self.emit(handle, ConnectionSignal::PoolClosed);
                tokio::task::yield_now().await;
            }
        }
    }

    fn settings() -> ConnectionSettings {
        ConnectionSettings {
            account: Some("catalog".into()),
            secret: Some("hunter2".into()),
            host: Some("cluster0.example.net".into()),
            database: "catalogo_juegos".into(),
        }
    }

    fn manager(connector: &ScriptedConnector) -> ConnectionManager<ScriptedConnector> {
        ConnectionManager::new(connector.clone(), settings(), RetryPolicy::default())
    }

    /// Let the supervisor and spawned reconnect tasks run.
    async fn settle(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_first_try() {
        let connector = ScriptedConnector::new(&[], true);
        let manager = manager(&connector);

        assert_eq!(manager.connect().await.unwrap(), 1);
        assert_eq!(manager.handle().await.unwrap(), 1);
        assert_eq!(connector.opens(), 1);
        assert_eq!(manager.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_is_idempotent() {
        let connector = ScriptedConnector::new(&[], true);
        let manager = manager(&connector);

        manager.connect().await.unwrap();
        manager.connect().await.unwrap();
        assert_eq!(connector.opens(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_with_fixed_delay_then_succeeds() {
        let connector = ScriptedConnector::new(&[false, false, false], true);
        let manager = manager(&connector);

        let start = Instant::now();
        assert_eq!(manager.connect().await.unwrap(), 4);
        let elapsed = start.elapsed();
        assert!(elapsed >= DEFAULT_RETRY_DELAY * 3, "{elapsed:?}");
        assert!(elapsed < DEFAULT_RETRY_DELAY * 4, "{elapsed:?}");
        assert_eq!(connector.opens(), 4);
        assert_eq!(manager.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let connector = ScriptedConnector::new(&[], false);
        let manager = manager(&connector);

        let err = manager.connect().await.unwrap_err();
        match &err {
            ConnectionError::RetriesExhausted { attempts, source } => {
                assert_eq!(*attempts, DEFAULT_MAX_ATTEMPTS);
                assert_eq!(source.to_string(), "connection refused");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("5 attempts"));
        assert_eq!(connector.opens(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(manager.attempts(), 0);
        assert!(matches!(
            manager.handle().await,
            Err(ConnectionError::NotConnected)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_setting_is_not_retried() {
        let connector = ScriptedConnector::new(&[], true);
        let mut settings = settings();
        settings.secret = Some("   ".into());
        let manager = ConnectionManager::new(connector.clone(), settings, RetryPolicy::default());

        let err = manager.connect().await.unwrap_err();
        assert!(matches!(
            err,
            ConnectionError::MissingSetting("MONGODB_PASSWORD")
        ));
        assert_eq!(connector.opens(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_before_connect_fails() {
        let connector = ScriptedConnector::new(&[], true);
        let manager = manager(&connector);
        assert!(matches!(
            manager.handle().await,
            Err(ConnectionError::NotConnected)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_is_safe_without_connection() {
        let connector = ScriptedConnector::new(&[], true);
        let manager = manager(&connector);
        manager.close().await;
        manager.close().await;
        assert!(connector.closed().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_releases_handle() {
        let connector = ScriptedConnector::new(&[], true);
        let manager = manager(&connector);
        manager.connect().await.unwrap();

        manager.close().await;
        assert_eq!(connector.closed(), vec![1]);
        assert!(manager.handle().await.is_err());
        assert!(matches!(
            manager.connect().await,
            Err(ConnectionError::Closed)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_heartbeat_failure_triggers_reconnect() {
        let connector = ScriptedConnector::new(&[], true);
        let manager = manager(&connector);
        manager.connect().await.unwrap();

        connector.emit(1, ConnectionSignal::HeartbeatFailed);
        settle(Duration::from_secs(1)).await;

        assert_eq!(connector.opens(), 2);
        assert_eq!(manager.handle().await.unwrap(), 2);
        assert_eq!(connector.closed(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_exhaustion_leaves_disconnected() {
        let connector = ScriptedConnector::new(&[true], false);
        let manager = manager(&connector);
        manager.connect().await.unwrap();

        connector.emit(1, ConnectionSignal::PoolClosed);
        settle(DEFAULT_RETRY_DELAY * 10).await;

        assert_eq!(connector.opens(), 1 + DEFAULT_MAX_ATTEMPTS);
        assert!(matches!(
            manager.handle().await,
            Err(ConnectionError::NotConnected)
        ));
        assert_eq!(manager.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_failures_start_one_reconnect() {
        let connector = ScriptedConnector::new(&[true], false);
        let manager = manager(&connector);
        manager.connect().await.unwrap();

        for _ in 0..4 {
            connector.emit(1, ConnectionSignal::HeartbeatFailed);
        }
        settle(DEFAULT_RETRY_DELAY * 20).await;

        assert_eq!(connector.opens(), 1 + DEFAULT_MAX_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_heartbeat_success_restores_existing_handle() {
        let connector = ScriptedConnector::new(&[true], false);
        let manager = manager(&connector);
        manager.connect().await.unwrap();

        connector.emit(1, ConnectionSignal::HeartbeatFailed);
        settle(DEFAULT_RETRY_DELAY * 10).await;
        assert!(manager.handle().await.is_err());

        connector.emit(1, ConnectionSignal::HeartbeatSucceeded);
        settle(Duration::from_millis(10)).await;
        assert_eq!(manager.handle().await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_waits_for_background_chain() {
        let connector = ScriptedConnector::new(&[true, false], true);
        let manager = manager(&connector);
        manager.connect().await.unwrap();

        connector.emit(1, ConnectionSignal::HeartbeatFailed);
        settle(Duration::from_millis(10)).await;

        // The background chain holds the gate through its retry delay; an
        // explicit connect must not start a second chain.
        let handle = manager.connect().await.unwrap();
        assert_eq!(handle, 3);
        assert_eq!(connector.opens(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replaced_client_pool_close_is_ignored() {
        let connector = ScriptedConnector::new(&[], true).reporting_pool_close();
        let manager = manager(&connector);
        manager.connect().await.unwrap();

        connector.emit(1, ConnectionSignal::HeartbeatFailed);
        settle(Duration::from_secs(60)).await;

        assert_eq!(connector.closed(), vec![1]);
        assert_eq!(connector.opens(), 2);
        assert_eq!(manager.handle().await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replaced_client_pool_close_ignored_after_gate_release() {
        let connector = ScriptedConnector::new(&[], true);
        let manager = manager(&connector);
        manager.connect().await.unwrap();

        connector.emit(1, ConnectionSignal::HeartbeatFailed);
        settle(Duration::from_secs(1)).await;
        assert_eq!(manager.handle().await.unwrap(), 2);

        // The old pool reports its shutdown only after the chain has ended.
        connector.emit(1, ConnectionSignal::PoolClosed);
        settle(Duration::from_secs(60)).await;

        assert_eq!(connector.opens(), 2);
        assert_eq!(manager.handle().await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_open_cannot_mark_old_handle_healthy() {
        let connector = ScriptedConnector::new(&[true], false);
        let manager = manager(&connector);
        manager.connect().await.unwrap();

        connector.emit(1, ConnectionSignal::HeartbeatFailed);
        settle(Duration::from_millis(10)).await;
        assert_eq!(connector.opens(), 2);

        // Open 2 saw a heartbeat but failed to verify; it is not installed.
        connector.emit(2, ConnectionSignal::HeartbeatSucceeded);
        settle(Duration::from_millis(10)).await;
        assert!(matches!(
            manager.handle().await,
            Err(ConnectionError::NotConnected)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_signals_ignored_after_close() {
        let connector = ScriptedConnector::new(&[], true);
        let manager = manager(&connector);
        manager.connect().await.unwrap();
        manager.close().await;

        connector.emit(1, ConnectionSignal::HeartbeatFailed);
        connector.emit(1, ConnectionSignal::HeartbeatSucceeded);
        settle(Duration::from_secs(1)).await;

        assert_eq!(connector.opens(), 1);
        assert!(manager.handle().await.is_err());
    }

    #[test]
    fn test_target_uri() {
        let target = settings().target().unwrap();
        assert_eq!(
            target.uri(),
            "mongodb+srv://cluster0.example.net/?retryWrites=true&w=majority"
        );

        let local = ConnectionTarget {
            host: "mongodb://localhost:27017".into(),
            ..target
        };
        assert_eq!(local.uri(), "mongodb://localhost:27017");
    }

    #[test]
    fn test_settings_debug_redacts_secret() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
