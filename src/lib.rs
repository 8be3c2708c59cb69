//! Terminal session bridge core
//!
//! Everything between a remote byte stream and a renderer: a VT100/xterm
//! screen buffer, an escape-sequence interpreter, input encoding, and the
//! thread-safe session plumbing that ties them to a pluggable transport.
//!
//! ## Terminal emulation
//! - Flat-grid screen buffer with bounded circular scrollback and a
//!   display offset for user scrollback
//! - `vte`-based escape-sequence interpretation: cursor control, erase and
//!   edit operations, scroll regions (DECSTBM), SGR attributes with 256-color
//!   and true color, alternate screen, origin mode, tab stops
//! - Deferred wrap and wide (East-Asian) characters as glyph+spacer pairs
//! - Split-read safe: escape sequences may arrive divided across reads
//! - Malformed or unsupported sequences are consumed and counted, never
//!   errors
//!
//! ## Input encoding
//! - Keys honoring application cursor/keypad modes and xterm modifiers
//! - Mouse reporting (Normal, Button, Any tracking; SGR and legacy
//!   encodings)
//! - Bracketed paste
//!
//! ## Session plumbing
//! - [`SessionBridge`](bridge::SessionBridge): one reader thread per
//!   session, a single interpreter lock held per chunk, deep-copy render
//!   snapshots, idempotent disconnect
//! - [`PromptCoordinator`](prompt::PromptCoordinator): blocking auth
//!   prompts handed to the UI, responses zeroized
//! - [`SessionRegistry`](registry::SessionRegistry): live sessions by host
//!   identity, foreground tracking, recently disconnected hosts
//! - Transport trait seams; real SSH/Telnet implementations plug in from
//!   outside

pub mod bridge;
pub mod cell;
pub mod cursor;
pub mod error;
pub mod grid;
pub mod input;
pub mod interpreter;
pub mod prompt;
pub mod registry;
pub mod snapshot;
pub mod transport;

pub use bridge::{BridgeState, PromptAuthHandler, SessionBridge, SessionId, SessionObserver};
pub use cell::{Cell, CellFlags, Color, NamedColor};
pub use cursor::Cursor;
pub use error::{AuthError, ConnectionError, PromptError, SessionError};
pub use grid::Grid;
pub use input::{
    KeyModifiers, ModeSnapshot, MouseButton, MouseEncoding, MouseEvent, MouseEventKind, MouseMode,
    TerminalKey,
};
pub use interpreter::Interpreter;
pub use prompt::{PromptCoordinator, PromptDescriptor, PromptKind, PromptResponse};
pub use registry::{DisconnectedHost, RegistryObserver, SessionLifecycleSink, SessionRegistry};
pub use snapshot::RenderSnapshot;
pub use transport::{
    AuthHandler, HostDescriptor, TransportControl, TransportFactory, TransportReader,
    TransportStreams, TransportWriter,
};

// Secret buffers cross the public API (prompt responses, auth handlers).
pub use zeroize::Zeroizing;
