//! Session bridge: owns one transport connection, one interpreter, and the
//! reader thread that pumps bytes between them.
//!
//! Locking discipline: the interpreter lock is held per processed chunk and
//! for snapshots/resizes only, never across a blocking read or a prompt
//! wait. The writer has its own lock so keystrokes never contend with
//! output processing. Observer callbacks run with no lock held.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::SystemTime;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ConnectionError, SessionError};
use crate::input::{self, KeyModifiers, MouseEvent, TerminalKey};
use crate::interpreter::Interpreter;
use crate::prompt::PromptCoordinator;
use crate::snapshot::RenderSnapshot;
use crate::transport::{
    AuthHandler, HostDescriptor, TransportControl, TransportFactory, TransportWriter,
};

/// Unique identifier for a session, stable for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session lifecycle. Transitions only move forward; a closed bridge is
/// never resurrected.
///
/// Connecting happens inside [`SessionBridge::connect`], before any bridge
/// exists to observe: a successful call returns an `Interactive` bridge, a
/// failed one returns an error and no bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Interactive,
    /// Interactive, but a prompt is blocking the session (auth follow-up,
    /// host key confirmation).
    AwaitingPrompt,
    Disconnecting,
    Closed,
}

/// Push notifications from a bridge. All methods default to no-ops; dispatch
/// happens with no bridge lock held.
pub trait SessionObserver: Send + Sync {
    /// Screen content changed. Coalesced: at most once per processed chunk.
    fn on_redraw(&self, _id: SessionId) {}

    /// The session ended. Called exactly once per bridge; `error` is `None`
    /// for a locally requested disconnect.
    fn on_disconnect(&self, _id: SessionId, _error: Option<&SessionError>) {}
}

/// [`AuthHandler`] backed by a [`PromptCoordinator`]: transport auth
/// questions become UI prompts.
pub struct PromptAuthHandler {
    coordinator: Arc<PromptCoordinator>,
}

impl PromptAuthHandler {
    pub fn new(coordinator: Arc<PromptCoordinator>) -> Self {
        Self { coordinator }
    }
}

impl AuthHandler for PromptAuthHandler {
    fn prompt_password(
        &self,
        instructions: &str,
        hint: &str,
    ) -> Result<zeroize::Zeroizing<String>, crate::error::AuthError> {
        self.coordinator
            .request_secret(instructions, hint)
            .map_err(|_| crate::error::AuthError::PromptCancelled)
    }

    fn confirm(&self, instructions: &str, hint: &str) -> Result<bool, crate::error::AuthError> {
        self.coordinator
            .request_boolean(instructions, hint)
            .map_err(|_| crate::error::AuthError::PromptCancelled)
    }
}

/// One live terminal session: transport + interpreter + reader thread.
pub struct SessionBridge {
    id: SessionId,
    host: HostDescriptor,
    state: Mutex<BridgeState>,
    interpreter: Mutex<Interpreter>,
    writer: Mutex<Option<Box<dyn TransportWriter>>>,
    control: Arc<dyn TransportControl>,
    prompt: Arc<PromptCoordinator>,
    observers: Mutex<Vec<Arc<dyn SessionObserver>>>,
    reader_thread: Mutex<Option<JoinHandle<()>>>,
    disconnect_notified: AtomicBool,
    bytes_received: AtomicU64,
    bytes_sent: AtomicU64,
    connected_at: SystemTime,
}

impl SessionBridge {
    /// Open a transport via `factory` and start pumping it into a fresh
    /// `cols x rows` screen. Auth prompts raised during `open` go through
    /// `prompt`, which the caller keeps to route UI answers.
    ///
    /// On error the connection never existed: nothing to disconnect.
    pub fn connect(
        factory: &dyn TransportFactory,
        host: HostDescriptor,
        cols: usize,
        rows: usize,
        prompt: Arc<PromptCoordinator>,
    ) -> Result<Arc<SessionBridge>, ConnectionError> {
        info!(host = %host.identity(), cols, rows, "connecting");
        if cols == 0 || rows == 0 {
            // Interpreter::new clamps to 1x1; note it at connect time
            warn!(cols, rows, "degenerate terminal size requested");
        }
        let auth = PromptAuthHandler::new(Arc::clone(&prompt));
        let streams = factory.open(&host, &auth)?;

        let bridge = Arc::new(SessionBridge {
            id: SessionId::new(),
            host,
            state: Mutex::new(BridgeState::Interactive),
            interpreter: Mutex::new(Interpreter::new(cols, rows)),
            writer: Mutex::new(Some(streams.writer)),
            control: streams.control,
            prompt,
            observers: Mutex::new(Vec::new()),
            reader_thread: Mutex::new(None),
            disconnect_notified: AtomicBool::new(false),
            bytes_received: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            connected_at: SystemTime::now(),
        });

        let weak = Arc::downgrade(&bridge);
        let mut reader = streams.reader;
        let handle = std::thread::Builder::new()
            .name(format!("session-reader-{}", bridge.id))
            .spawn(move || {
                let mut buf = [0u8; 8192];
                loop {
                    let outcome = reader.read(&mut buf);
                    let Some(bridge) = weak.upgrade() else { break };
                    match outcome {
                        Ok(0) => {
                            bridge.finish(Some(SessionError::RemoteClosed));
                            break;
                        }
                        Ok(n) => {
                            bridge.bytes_received.fetch_add(n as u64, Ordering::Relaxed);
                            bridge.process_chunk(&buf[..n]);
                        }
                        Err(e) => {
                            bridge.finish(Some(SessionError::TransportIo(e)));
                            break;
                        }
                    }
                }
            })
            .map_err(ConnectionError::Transport)?;
        *bridge.reader_thread.lock() = Some(handle);

        info!(id = %bridge.id, "session established");
        Ok(bridge)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn host(&self) -> &HostDescriptor {
        &self.host
    }

    pub fn connected_at(&self) -> SystemTime {
        self.connected_at
    }

    /// Current lifecycle state. `Interactive` with a prompt outstanding
    /// reads as `AwaitingPrompt`.
    pub fn state(&self) -> BridgeState {
        let state = *self.state.lock();
        if state == BridgeState::Interactive && self.prompt.pending().is_some() {
            BridgeState::AwaitingPrompt
        } else {
            state
        }
    }

    /// The coordinator UI code answers prompts through.
    pub fn prompt(&self) -> &Arc<PromptCoordinator> {
        &self.prompt
    }

    pub fn add_observer(&self, observer: Arc<dyn SessionObserver>) {
        self.observers.lock().push(observer);
    }

    pub fn bytes_received(&self) -> u64 {
        self.bytes_received.load(Ordering::Relaxed)
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    /// Feed one chunk of remote output through the interpreter, answer any
    /// report sequences, and notify redraw observers once.
    fn process_chunk(&self, data: &[u8]) {
        let responses = {
            let mut term = self.interpreter.lock();
            term.process(data);
            term.take_responses()
        };
        if !responses.is_empty() {
            // DSR/DA answers go back to the application
            if let Err(e) = self.write(&responses) {
                debug!(id = %self.id, error = %e, "dropping report reply");
            }
        }
        self.notify_redraw();
    }

    /// Send raw bytes to the remote side.
    pub fn write(&self, data: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock();
        let Some(w) = writer.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "session closed"));
        };
        w.write_all(data)?;
        w.flush()?;
        self.bytes_sent.fetch_add(data.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    /// Encode a key press under the current terminal modes and send it.
    /// Unmappable chords are dropped silently.
    pub fn send_key(&self, key: TerminalKey, modifiers: KeyModifiers) -> io::Result<()> {
        let modes = self.interpreter.lock().mode_snapshot();
        match input::encode_key(key, modifiers, &modes) {
            Some(bytes) => self.write(&bytes),
            None => Ok(()),
        }
    }

    /// Encode a mouse event under the current tracking mode and send it.
    /// No-op while tracking is off.
    pub fn send_mouse(&self, event: MouseEvent) -> io::Result<()> {
        let modes = self.interpreter.lock().mode_snapshot();
        match input::encode_mouse(&event, &modes) {
            Some(bytes) => self.write(&bytes),
            None => Ok(()),
        }
    }

    /// Paste text, wrapped in bracketed-paste guards when the application
    /// asked for them.
    pub fn inject_string(&self, text: &str) -> io::Result<()> {
        let modes = self.interpreter.lock().mode_snapshot();
        self.write(&input::encode_paste(text, &modes))
    }

    /// Resize the local screen and tell the remote side. The remote
    /// notification is best-effort.
    pub fn request_resize(&self, cols: usize, rows: usize) {
        if cols == 0 || rows == 0 {
            warn!(id = %self.id, cols, rows, "ignoring degenerate resize");
            return;
        }
        self.interpreter.lock().resize(cols, rows);
        self.control.resize_remote(cols, rows);
        self.notify_redraw();
    }

    /// Shift the viewport into scrollback (positive = older lines).
    pub fn scroll_display(&self, delta: isize) {
        self.interpreter.lock().scroll_display(delta);
        self.notify_redraw();
    }

    /// Deep-copy the visible screen for rendering.
    pub fn snapshot_for_render(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.interpreter.lock())
    }

    /// Tear the session down. Idempotent.
    ///
    /// `immediate` closes the transport (unblocking a reader mid-read) and
    /// cancels any pending prompt so its waiter returns. Without it the
    /// bridge only moves to `Disconnecting`; the transport stays open and
    /// the remote side's EOF completes the teardown. A later immediate call
    /// escalates a pending graceful disconnect.
    pub fn disconnect(&self, immediate: bool) {
        {
            let mut state = self.state.lock();
            match *state {
                BridgeState::Closed => return,
                BridgeState::Disconnecting if !immediate => return,
                _ => *state = BridgeState::Disconnecting,
            }
        }
        info!(id = %self.id, immediate, "disconnecting");
        if immediate {
            self.finish(None);
            self.join_reader();
        } else {
            // Give buffered keystrokes a chance to leave; the reader's EOF
            // drives finish()
            if let Some(w) = self.writer.lock().as_mut() {
                let _ = w.flush();
            }
        }
    }

    /// Common teardown: close the stream, cancel prompts, drop the writer,
    /// move to Closed, and notify disconnect observers exactly once. The
    /// error is suppressed when the disconnect was locally requested.
    fn finish(&self, error: Option<SessionError>) {
        let locally_requested = {
            let mut state = self.state.lock();
            if *state == BridgeState::Closed {
                return;
            }
            let prior = *state;
            *state = BridgeState::Closed;
            prior == BridgeState::Disconnecting
        };
        let error = if locally_requested { None } else { error };
        if let Some(ref e) = error {
            warn!(id = %self.id, error = %e, "session ended");
        }
        self.control.close();
        self.prompt.cancel();
        *self.writer.lock() = None;

        if !self.disconnect_notified.swap(true, Ordering::SeqCst) {
            let observers: Vec<_> = self.observers.lock().clone();
            for observer in observers {
                observer.on_disconnect(self.id, error.as_ref());
            }
        }
    }

    fn notify_redraw(&self) {
        let observers: Vec<_> = self.observers.lock().clone();
        for observer in observers {
            observer.on_redraw(self.id);
        }
    }

    /// Join the reader thread unless we *are* the reader thread (an
    /// observer called disconnect from a callback).
    fn join_reader(&self) {
        let handle = self.reader_thread.lock().take();
        if let Some(handle) = handle {
            if handle.thread().id() == std::thread::current().id() {
                return;
            }
            let _ = handle.join();
        }
    }
}

impl Drop for SessionBridge {
    fn drop(&mut self) {
        // The reader only holds a Weak, so drop can run while it is still
        // blocked; closing the stream lets it exit.
        self.control.close();
        self.prompt.cancel();
        self.join_reader();
    }
}

impl std::fmt::Debug for SessionBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionBridge")
            .field("id", &self.id)
            .field("host", &self.host.identity())
            .field("state", &self.state())
            .finish()
    }
}
