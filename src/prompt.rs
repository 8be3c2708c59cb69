//! Prompt coordination between a blocked auth/reader thread and the UI.
//!
//! One prompt may be outstanding at a time. The requesting thread parks on
//! a one-shot channel; the UI answers (or disconnect cancels) from another
//! thread. Secret responses are zeroized when the requester drops them.

use std::sync::mpsc;

use parking_lot::Mutex;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::PromptError;

/// What kind of answer a pending prompt expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Free-text secret (password, passphrase, keyboard-interactive).
    Secret,
    /// Yes/no decision (host key acceptance and the like).
    Boolean,
}

/// A pending prompt as the UI should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDescriptor {
    pub kind: PromptKind,
    /// Full instructions from the transport, may be multi-line.
    pub instructions: String,
    /// Short label for the input field.
    pub hint: String,
}

/// An answer supplied by the UI.
pub enum PromptResponse {
    Secret(Zeroizing<String>),
    Boolean(bool),
}

struct PendingPrompt {
    descriptor: PromptDescriptor,
    tx: mpsc::SyncSender<PromptResponse>,
}

/// Hands prompts from a blocked session thread to the UI and the answer
/// back. Cloneable via `Arc`; all methods take `&self`.
#[derive(Default)]
pub struct PromptCoordinator {
    pending: Mutex<Option<PendingPrompt>>,
}

impl PromptCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The prompt currently awaiting an answer, if any.
    pub fn pending(&self) -> Option<PromptDescriptor> {
        self.pending.lock().as_ref().map(|p| p.descriptor.clone())
    }

    /// Block until the UI supplies a secret. Returns
    /// [`PromptError::Cancelled`] if the session disconnects first.
    pub fn request_secret(
        &self,
        instructions: &str,
        hint: &str,
    ) -> Result<Zeroizing<String>, PromptError> {
        match self.request(PromptKind::Secret, instructions, hint)? {
            PromptResponse::Secret(s) => Ok(s),
            PromptResponse::Boolean(_) => Err(PromptError::IllegalState),
        }
    }

    /// Block until the UI supplies a yes/no answer.
    pub fn request_boolean(&self, instructions: &str, hint: &str) -> Result<bool, PromptError> {
        match self.request(PromptKind::Boolean, instructions, hint)? {
            PromptResponse::Boolean(b) => Ok(b),
            PromptResponse::Secret(_) => Err(PromptError::IllegalState),
        }
    }

    fn request(
        &self,
        kind: PromptKind,
        instructions: &str,
        hint: &str,
    ) -> Result<PromptResponse, PromptError> {
        let rx = {
            let mut pending = self.pending.lock();
            if pending.is_some() {
                tracing::warn!("prompt requested while another is pending");
                return Err(PromptError::IllegalState);
            }
            let (tx, rx) = mpsc::sync_channel(1);
            *pending = Some(PendingPrompt {
                descriptor: PromptDescriptor {
                    kind,
                    instructions: instructions.to_string(),
                    hint: hint.to_string(),
                },
                tx,
            });
            rx
        };
        debug!(?kind, "prompt pending");

        // Sender dropped without an answer means the prompt was cancelled.
        rx.recv().map_err(|_| PromptError::Cancelled)
    }

    /// Deliver the UI's answer to the waiting thread. Returns
    /// [`PromptError::IllegalState`] when nothing is pending or the answer
    /// kind does not match the request.
    pub fn set_response(&self, response: PromptResponse) -> Result<(), PromptError> {
        let mut pending = self.pending.lock();
        let expected = match pending.as_ref() {
            Some(p) => p.descriptor.kind,
            None => return Err(PromptError::IllegalState),
        };
        let matches = matches!(
            (&response, expected),
            (PromptResponse::Secret(_), PromptKind::Secret)
                | (PromptResponse::Boolean(_), PromptKind::Boolean)
        );
        if !matches {
            return Err(PromptError::IllegalState);
        }
        if let Some(p) = pending.take() {
            // Waiter gone (cancelled concurrently): drop the response.
            let _ = p.tx.send(response);
        }
        Ok(())
    }

    /// Abort any pending prompt; its requester returns
    /// [`PromptError::Cancelled`]. Safe to call with nothing pending.
    pub fn cancel(&self) {
        if let Some(p) = self.pending.lock().take() {
            debug!(kind = ?p.descriptor.kind, "prompt cancelled");
            // Dropping the sender wakes the waiter with RecvError.
        }
    }
}

impl std::fmt::Debug for PromptCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptCoordinator")
            .field("pending", &self.pending())
            .finish()
    }
}
