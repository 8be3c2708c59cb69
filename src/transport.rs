//! Transport collaborator seams.
//!
//! The core never opens sockets itself. A [`TransportFactory`] hands the
//! bridge a connected duplex stream split into a blocking reader, a writer,
//! and a control handle. Real SSH/Telnet/local implementations live outside
//! this crate; tests script the same traits in memory.

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, ConnectionError};

/// Identity of a remote endpoint, as the persistence collaborator stores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostDescriptor {
    /// User-visible name for the session.
    pub nickname: String,
    pub username: String,
    pub hostname: String,
    pub port: u16,
    /// Transport scheme, e.g. "ssh", "telnet", "local".
    pub protocol: String,
}

impl HostDescriptor {
    /// Canonical `user@host:port/protocol` identity string. Two descriptors
    /// with the same identity refer to the same remote session slot.
    pub fn identity(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.username, self.hostname, self.port, self.protocol
        )
    }
}

impl std::fmt::Display for HostDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nickname.is_empty() {
            write!(f, "{}", self.identity())
        } else {
            write!(f, "{}", self.nickname)
        }
    }
}

/// Blocking read half of a transport stream.
///
/// `read` returning `Ok(0)` means orderly end-of-stream. A concurrent
/// [`TransportControl::close`] must unblock a pending `read` (returning
/// `Ok(0)` or an error, either is accepted).
pub trait TransportReader: Send {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Write half of a transport stream. Called under the bridge's writer lock,
/// never under the grid lock.
pub trait TransportWriter: Send {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Out-of-band control handle shared by the bridge and its reader thread.
pub trait TransportControl: Send + Sync {
    /// Idempotent teardown. Must unblock a concurrent blocking read.
    fn close(&self);

    /// Best-effort notification of the new terminal geometry. Failures are
    /// logged and ignored; the local grid already resized.
    fn resize_remote(&self, cols: usize, rows: usize);
}

/// The connected stream a factory hands back.
pub struct TransportStreams {
    pub reader: Box<dyn TransportReader>,
    pub writer: Box<dyn TransportWriter>,
    pub control: std::sync::Arc<dyn TransportControl>,
}

/// Opens transport connections. Implementations block; the bridge calls
/// `open` from the connecting thread before the reader thread exists.
pub trait TransportFactory {
    fn open(
        &self,
        host: &HostDescriptor,
        auth: &dyn AuthHandler,
    ) -> Result<TransportStreams, ConnectionError>;
}

/// Interactive authentication callbacks a transport may invoke during
/// `open`. The bridge backs these with its [`PromptCoordinator`]
/// (crate::prompt::PromptCoordinator); key-based flows go through `sign`.
pub trait AuthHandler {
    /// Ask the user for a secret. Blocks until answered or cancelled. The
    /// returned buffer is wiped when dropped.
    fn prompt_password(
        &self,
        instructions: &str,
        hint: &str,
    ) -> Result<zeroize::Zeroizing<String>, AuthError>;

    /// Yes/no decision, e.g. accepting a changed host key.
    fn confirm(&self, instructions: &str, hint: &str) -> Result<bool, AuthError>;

    /// Sign an authentication challenge with an externally held key
    /// (agent, keystore). The default has no keys.
    fn sign(&self, _challenge: &[u8]) -> Result<Vec<u8>, AuthError> {
        Err(AuthError::NoCredential("no signer configured".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_identity_ignores_nickname() {
        let a = HostDescriptor {
            nickname: "work box".into(),
            username: "deploy".into(),
            hostname: "example.com".into(),
            port: 22,
            protocol: "ssh".into(),
        };
        let b = HostDescriptor {
            nickname: String::new(),
            ..a.clone()
        };
        assert_eq!(a.identity(), b.identity());
        assert_eq!(a.identity(), "deploy@example.com:22/ssh");
    }

    #[test]
    fn test_display_prefers_nickname() {
        let h = HostDescriptor {
            nickname: "prod".into(),
            username: "ops".into(),
            hostname: "10.0.0.1".into(),
            port: 2222,
            protocol: "ssh".into(),
        };
        assert_eq!(h.to_string(), "prod");
    }

    #[test]
    fn test_descriptor_serde_round_trip() {
        let h = HostDescriptor {
            nickname: "prod".into(),
            username: "ops".into(),
            hostname: "10.0.0.1".into(),
            port: 2222,
            protocol: "ssh".into(),
        };
        let json = serde_json::to_string(&h).unwrap();
        let back: HostDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
