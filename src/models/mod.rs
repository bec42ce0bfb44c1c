use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User-entered connection input, before a successful creation call.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ConnectionDraft {
    pub name: String,
    pub dsn: String,
    pub is_sample: bool,
}

impl ConnectionDraft {
    /// Both required fields present after trimming. The DSN itself is
    /// opaque to the client; the backend validates its format.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.dsn.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.dsn.clear();
        self.is_sample = false;
    }
}

/// A persisted connection as the backend reports it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConnectionRecord {
    pub id: Uuid,
    pub name: String,
    pub dsn: String,
    pub database: String,
    pub dialect: String,
    pub is_sample: bool,
}

/// Lifecycle of one create-connection attempt.
///
/// `Succeeded` is terminal for the draft instance; `DuplicateConflict` and
/// `Failed` accept another `submit()` after the user edits the draft.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    DuplicateConflict,
    Failed,
}
