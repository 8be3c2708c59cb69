//! Session registry: the set of live bridges, the foreground session, and
//! a trail of recently disconnected hosts.
//!
//! The registry has its own lock and never calls into a bridge while
//! holding it, so bridge teardown (which fires observers) cannot deadlock
//! against registration.

use std::sync::{Arc, Weak};
use std::time::SystemTime;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::bridge::{BridgeState, SessionBridge, SessionId, SessionObserver};
use crate::error::{ConnectionError, SessionError};
use crate::transport::HostDescriptor;

/// Registry-level notifications.
pub trait RegistryObserver: Send + Sync {
    /// A registered session closed and was removed.
    fn on_session_closed(&self, _host: &HostDescriptor, _id: SessionId) {}

    /// The foreground session changed (`None` = no sessions left).
    fn on_foreground_changed(&self, _id: Option<SessionId>) {}
}

/// Receives session start/end timestamps, e.g. to stamp "last connected"
/// on stored hosts.
pub trait SessionLifecycleSink: Send + Sync {
    fn session_started(&self, host: &HostDescriptor, at: SystemTime);
    fn session_ended(&self, host: &HostDescriptor, at: SystemTime);
}

/// A host whose session recently closed, newest last.
#[derive(Debug, Clone)]
pub struct DisconnectedHost {
    pub host: HostDescriptor,
    pub closed_at: SystemTime,
}

struct RegistryInner {
    bridges: Vec<Arc<SessionBridge>>,
    foreground: Option<SessionId>,
    disconnected: Vec<DisconnectedHost>,
}

/// Tracks every live [`SessionBridge`] by host identity.
pub struct SessionRegistry {
    inner: Mutex<RegistryInner>,
    observers: Mutex<Vec<Arc<dyn RegistryObserver>>>,
    lifecycle_sink: Mutex<Option<Arc<dyn SessionLifecycleSink>>>,
    /// How many disconnected-host entries to keep.
    max_disconnected: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Bridge observer that removes the session from the registry when it
/// closes.
struct UnregisterOnDisconnect {
    registry: Weak<SessionRegistry>,
}

impl SessionObserver for UnregisterOnDisconnect {
    fn on_disconnect(&self, id: SessionId, _error: Option<&SessionError>) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unregister(id);
        }
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                bridges: Vec::new(),
                foreground: None,
                disconnected: Vec::new(),
            }),
            observers: Mutex::new(Vec::new()),
            lifecycle_sink: Mutex::new(None),
            max_disconnected: 10,
        }
    }

    pub fn add_observer(&self, observer: Arc<dyn RegistryObserver>) {
        self.observers.lock().push(observer);
    }

    pub fn set_lifecycle_sink(&self, sink: Arc<dyn SessionLifecycleSink>) {
        *self.lifecycle_sink.lock() = Some(sink);
    }

    /// Add a live bridge. Rejects a second session for the same host
    /// identity. The first registered session becomes foreground.
    pub fn register(
        self: &Arc<Self>,
        bridge: Arc<SessionBridge>,
    ) -> Result<(), ConnectionError> {
        let identity = bridge.host().identity();
        {
            let mut inner = self.inner.lock();
            if inner
                .bridges
                .iter()
                .any(|b| b.host().identity() == identity)
            {
                return Err(ConnectionError::AlreadyConnected(identity));
            }
            inner.bridges.push(Arc::clone(&bridge));
            if inner.foreground.is_none() {
                inner.foreground = Some(bridge.id());
            }
        }
        bridge.add_observer(Arc::new(UnregisterOnDisconnect {
            registry: Arc::downgrade(self),
        }));
        // The bridge may have closed before the observer was installed
        if bridge.state() == BridgeState::Closed {
            self.unregister(bridge.id());
        }
        info!(id = %bridge.id(), host = %identity, "session registered");

        let sink = self.lifecycle_sink.lock().clone();
        if let Some(sink) = sink {
            sink.session_started(bridge.host(), bridge.connected_at());
        }
        Ok(())
    }

    /// Remove a session. Called automatically when a registered bridge
    /// disconnects; safe to call for an unknown id.
    pub fn unregister(&self, id: SessionId) {
        let (removed, foreground_change) = {
            let mut inner = self.inner.lock();
            let Some(pos) = inner.bridges.iter().position(|b| b.id() == id) else {
                return;
            };
            let bridge = inner.bridges.remove(pos);
            inner.disconnected.push(DisconnectedHost {
                host: bridge.host().clone(),
                closed_at: SystemTime::now(),
            });
            if inner.disconnected.len() > self.max_disconnected {
                inner.disconnected.remove(0);
            }
            let foreground_change = if inner.foreground == Some(id) {
                inner.foreground = inner.bridges.first().map(|b| b.id());
                Some(inner.foreground)
            } else {
                None
            };
            (bridge, foreground_change)
        };
        debug!(id = %id, "session unregistered");

        let sink = self.lifecycle_sink.lock().clone();
        if let Some(sink) = sink {
            sink.session_ended(removed.host(), SystemTime::now());
        }
        let observers: Vec<_> = self.observers.lock().clone();
        for observer in &observers {
            observer.on_session_closed(removed.host(), id);
        }
        if let Some(new_foreground) = foreground_change {
            for observer in &observers {
                observer.on_foreground_changed(new_foreground);
            }
        }
    }

    pub fn find_by_id(&self, id: SessionId) -> Option<Arc<SessionBridge>> {
        self.inner
            .lock()
            .bridges
            .iter()
            .find(|b| b.id() == id)
            .cloned()
    }

    /// Look a session up by host identity (nickname is ignored).
    pub fn find_by_host(&self, host: &HostDescriptor) -> Option<Arc<SessionBridge>> {
        let identity = host.identity();
        self.inner
            .lock()
            .bridges
            .iter()
            .find(|b| b.host().identity() == identity)
            .cloned()
    }

    pub fn sessions(&self) -> Vec<Arc<SessionBridge>> {
        self.inner.lock().bridges.clone()
    }

    pub fn foreground(&self) -> Option<Arc<SessionBridge>> {
        let id = self.inner.lock().foreground?;
        self.find_by_id(id)
    }

    /// Make `id` the foreground session. Ignored for unknown ids.
    pub fn set_foreground(&self, id: SessionId) {
        {
            let mut inner = self.inner.lock();
            if !inner.bridges.iter().any(|b| b.id() == id) {
                return;
            }
            if inner.foreground == Some(id) {
                return;
            }
            inner.foreground = Some(id);
        }
        let observers: Vec<_> = self.observers.lock().clone();
        for observer in observers {
            observer.on_foreground_changed(Some(id));
        }
    }

    /// Hosts whose sessions closed recently, oldest first.
    pub fn disconnected_hosts(&self) -> Vec<DisconnectedHost> {
        self.inner.lock().disconnected.clone()
    }

    /// Tear down every session, e.g. on application shutdown.
    pub fn disconnect_all(&self) {
        let bridges = self.sessions();
        for bridge in bridges {
            bridge.disconnect(true);
        }
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("SessionRegistry")
            .field("sessions", &inner.bridges.len())
            .field("foreground", &inner.foreground)
            .field("disconnected", &inner.disconnected.len())
            .finish()
    }
}
