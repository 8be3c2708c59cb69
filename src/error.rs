//! Error taxonomy for the session layer.
//!
//! Malformed escape sequences are deliberately absent: the interpreter
//! consumes them, bumps a diagnostic counter, and never surfaces an error.

use thiserror::Error;

/// Failure establishing a session. The bridge moves straight to `Closed`
/// and is never retried in place.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("could not resolve host: {0}")]
    Dns(String),

    #[error("connection refused by {0}")]
    Refused(String),

    #[error("connection timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("host key rejected for {0}")]
    HostKeyRejected(String),

    #[error("a session for {0} is already registered")]
    AlreadyConnected(String),

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

/// Signer/credential failures raised by an [`AuthHandler`](crate::transport::AuthHandler)
/// collaborator. Folded into [`ConnectionError::Auth`] at connect time.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no credential available for {0}")]
    NoCredential(String),

    #[error("signing failed: {0}")]
    SignatureFailed(String),

    #[error("authentication prompt was cancelled")]
    PromptCancelled,
}

/// Outcome of a prompt request that did not produce a response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    /// The session disconnected while the prompt was pending.
    #[error("prompt cancelled by disconnect")]
    Cancelled,

    /// A prompt was requested while another was still pending. This is a
    /// caller bug; prompts are strictly one-at-a-time.
    #[error("a prompt is already pending")]
    IllegalState,
}

/// Fatal mid-session transport failure. Carried on the disconnect
/// notification so observers can distinguish remote EOF from local errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("transport I/O error: {0}")]
    TransportIo(#[from] std::io::Error),

    #[error("remote closed the stream")]
    RemoteClosed,
}
