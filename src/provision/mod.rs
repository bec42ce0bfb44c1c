use std::sync::{Arc, Mutex};

use crate::api::{ApiResult, ConnectionRepository, FailureKind};
use crate::models::{ConnectionDraft, ConnectionRecord, SubmissionState};
use crate::notify::{Navigator, NotificationKind, NotificationSink};
use crate::state::ConnectionRegistry;

/// Side effect requested by a state transition, executed after the next
/// state has been committed.
#[derive(Debug)]
enum Effect {
    ClearDraft,
    Notify {
        kind: NotificationKind,
        message: String,
    },
    RefreshConnections,
    NavigateAfterSuccess,
}

struct Inner {
    draft: ConnectionDraft,
    state: SubmissionState,
}

/// Orchestrates one create-connection workflow: owns the draft and its
/// lifecycle state, issues the repository call, and executes the resulting
/// side effects.
///
/// Cheaply clonable handle over shared inner state; the `Submitting` state
/// value itself is the re-entrancy guard, so at most one creation call is
/// in flight per instance no matter how many call sites hold a clone.
#[derive(Clone)]
pub struct SubmissionController {
    repo: Arc<dyn ConnectionRepository>,
    notifier: Arc<dyn NotificationSink>,
    navigator: Arc<dyn Navigator>,
    registry: Arc<ConnectionRegistry>,
    inner: Arc<Mutex<Inner>>,
}

impl SubmissionController {
    pub fn new(
        repo: Arc<dyn ConnectionRepository>,
        notifier: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
        registry: Arc<ConnectionRegistry>,
    ) -> Self {
        Self {
            repo,
            notifier,
            navigator,
            registry,
            inner: Arc::new(Mutex::new(Inner {
                draft: ConnectionDraft::default(),
                state: SubmissionState::Idle,
            })),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.inner.lock().expect("submission state lock").state
    }

    pub fn draft(&self) -> ConnectionDraft {
        self.inner.lock().expect("submission state lock").draft.clone()
    }

    pub fn set_name(&self, name: &str) {
        self.edit(|draft| draft.name = name.to_string());
    }

    pub fn set_dsn(&self, dsn: &str) {
        self.edit(|draft| draft.dsn = dsn.to_string());
    }

    pub fn set_sample(&self, is_sample: bool) {
        self.edit(|draft| draft.is_sample = is_sample);
    }

    /// Drops the edit while a request is in flight; the draft must stay
    /// exactly what was submitted until the outcome is known.
    fn edit(&self, apply: impl FnOnce(&mut ConnectionDraft)) {
        let mut inner = self.inner.lock().expect("submission state lock");
        if inner.state == SubmissionState::Submitting {
            tracing::debug!("draft edit ignored, request in flight");
            return;
        }
        apply(&mut inner.draft);
    }

    /// Start over with an empty draft. `Succeeded` does not accept another
    /// submit on its own; the shell calls this for a fresh attempt.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().expect("submission state lock");
        inner.draft.clear();
        inner.state = SubmissionState::Idle;
    }

    /// Run one creation attempt. Invalid drafts and in-flight or already
    /// succeeded submissions return without a network call.
    pub async fn submit(&self) -> SubmissionState {
        let draft = {
            let mut inner = self.inner.lock().expect("submission state lock");
            match inner.state {
                SubmissionState::Submitting => {
                    tracing::debug!("submit ignored, request already in flight");
                    return SubmissionState::Submitting;
                }
                SubmissionState::Succeeded => return SubmissionState::Succeeded,
                SubmissionState::Idle
                | SubmissionState::DuplicateConflict
                | SubmissionState::Failed => {}
            }
            if !inner.draft.is_valid() {
                return inner.state;
            }
            inner.state = SubmissionState::Submitting;
            inner.draft.clone()
        };

        tracing::debug!(name = %draft.name, is_sample = draft.is_sample, "creating connection");
        let outcome = self
            .repo
            .create_connection(&draft.dsn, &draft.name, draft.is_sample)
            .await;

        match &outcome {
            Ok(record) => tracing::info!(id = %record.id, "connection created"),
            Err(err) => tracing::warn!(error = %err, "connection creation failed"),
        }

        let (next, effects) = resolve(outcome);
        self.inner.lock().expect("submission state lock").state = next;
        self.run_effects(effects).await;
        next
    }

    async fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ClearDraft => {
                    self.inner.lock().expect("submission state lock").draft.clear();
                }
                Effect::Notify { kind, message } => self.notifier.notify(kind, &message),
                Effect::RefreshConnections => {
                    // A stale list is not a failed submission.
                    if let Err(err) = self.registry.refresh().await {
                        tracing::warn!(error = %err, "connection list refresh failed");
                    }
                }
                Effect::NavigateAfterSuccess => self.navigator.after_success(),
            }
        }
    }
}

/// The transition decision for a resolved creation call. Pure: the caller
/// commits the state and executes the effects.
fn resolve(outcome: ApiResult<ConnectionRecord>) -> (SubmissionState, Vec<Effect>) {
    match outcome {
        Ok(record) => (
            SubmissionState::Succeeded,
            vec![
                Effect::ClearDraft,
                Effect::Notify {
                    kind: NotificationKind::Info,
                    message: format!("Connection \"{}\" created", record.name),
                },
                Effect::RefreshConnections,
                Effect::NavigateAfterSuccess,
            ],
        ),
        Err(err) => match err.kind() {
            FailureKind::DuplicateConflict => (
                SubmissionState::DuplicateConflict,
                vec![Effect::Notify {
                    kind: NotificationKind::Info,
                    message: "Connection already exists, skipping creation".to_string(),
                }],
            ),
            FailureKind::ServerError | FailureKind::NetworkError => (
                SubmissionState::Failed,
                vec![Effect::Notify {
                    kind: NotificationKind::Error,
                    message: "Error creating connection".to_string(),
                }],
            ),
        },
    }
}
